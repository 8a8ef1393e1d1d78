//! Chart-of-accounts management

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::traits::LedgerStore;
use crate::types::*;
use crate::utils::validation;

/// Specification for a new account
#[derive(Debug, Clone)]
pub struct AccountSpec {
    pub tenant_id: String,
    pub code: String,
    pub name: String,
    pub nature: AccountNature,
    pub parent_id: Option<Uuid>,
    pub opening_balance: BigDecimal,
}

impl AccountSpec {
    /// Spec with a zero opening balance
    pub fn new(
        tenant_id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        nature: AccountNature,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            code: code.into(),
            name: name.into(),
            nature,
            parent_id: None,
            opening_balance: BigDecimal::from(0),
        }
    }

    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set a carried-in opening balance.
    ///
    /// Opening balances feed the trial balance directly: seed them in
    /// balanced debit-nature/credit-nature pairs, or bring balances in
    /// through an opening journal entry instead, otherwise the trial
    /// balance starts out unequal.
    pub fn with_opening_balance(mut self, opening_balance: BigDecimal) -> Self {
        self.opening_balance = opening_balance;
        self
    }
}

/// Registry owning the chart of accounts: hierarchy, nature, running balance
pub struct AccountRegistry<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> AccountRegistry<S> {
    /// Create a new registry over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a new account.
    ///
    /// The code must be unique within the tenant and the parent, if given,
    /// must exist in the same tenant.
    pub async fn create_account(&mut self, spec: AccountSpec) -> LedgerResult<Account> {
        validation::validate_code(&spec.code)?;
        validation::validate_name(&spec.name)?;

        if self
            .store
            .get_account_by_code(&spec.tenant_id, &spec.code)
            .await?
            .is_some()
        {
            return Err(LedgerError::InvalidAccount(format!(
                "code '{}' already exists for tenant '{}'",
                spec.code, spec.tenant_id
            )));
        }

        if let Some(parent_id) = spec.parent_id {
            let parent = self
                .store
                .get_account(parent_id)
                .await?
                .ok_or_else(|| {
                    LedgerError::InvalidAccount(format!("parent account {} does not exist", parent_id))
                })?;
            if parent.tenant_id != spec.tenant_id {
                return Err(LedgerError::InvalidAccount(format!(
                    "parent account {} belongs to a different tenant",
                    parent_id
                )));
            }
        }

        let account = Account::new(
            spec.tenant_id,
            spec.code,
            spec.name,
            spec.nature,
            spec.parent_id,
            spec.opening_balance,
        );
        self.store.save_account(&account).await?;
        Ok(account)
    }

    /// Get an account by ID
    pub async fn get_account(&self, account_id: Uuid) -> LedgerResult<Option<Account>> {
        self.store.get_account(account_id).await
    }

    /// Get an account by ID, erroring when absent
    pub async fn get_account_required(&self, account_id: Uuid) -> LedgerResult<Account> {
        self.store
            .get_account(account_id)
            .await?
            .ok_or_else(|| LedgerError::UnknownAccount(account_id.to_string()))
    }

    /// Get an account by its tenant-scoped code
    pub async fn get_account_by_code(
        &self,
        tenant_id: &str,
        code: &str,
    ) -> LedgerResult<Option<Account>> {
        self.store.get_account_by_code(tenant_id, code).await
    }

    /// List a tenant's accounts ordered by code
    pub async fn list_accounts(&self, tenant_id: &str) -> LedgerResult<Vec<Account>> {
        self.store.list_accounts(tenant_id).await
    }

    /// List the direct children of an account
    pub async fn list_children(
        &self,
        tenant_id: &str,
        parent_id: Uuid,
    ) -> LedgerResult<Vec<Account>> {
        let accounts = self.store.list_accounts(tenant_id).await?;
        Ok(accounts
            .into_iter()
            .filter(|a| a.parent_id == Some(parent_id))
            .collect())
    }

    /// Current balance of an account. O(1) read against the stored running
    /// balance; never recomputed by summation.
    pub async fn get_balance(&self, account_id: Uuid) -> LedgerResult<BigDecimal> {
        Ok(self.get_account_required(account_id).await?.balance)
    }

    /// Soft-disable an account so no new entries may reference it.
    ///
    /// Fails with [`LedgerError::AccountInUse`] while the account still
    /// carries a non-zero balance.
    pub async fn deactivate(&mut self, account_id: Uuid) -> LedgerResult<Account> {
        let mut account = self.get_account_required(account_id).await?;
        if account.balance != BigDecimal::from(0) {
            return Err(LedgerError::AccountInUse(account.code));
        }
        account.active = false;
        account.updated_at = chrono::Utc::now().naive_utc();
        self.store.update_account(&account).await?;
        Ok(account)
    }

    /// Re-enable a deactivated account
    pub async fn reactivate(&mut self, account_id: Uuid) -> LedgerResult<Account> {
        let mut account = self.get_account_required(account_id).await?;
        account.active = true;
        account.updated_at = chrono::Utc::now().naive_utc();
        self.store.update_account(&account).await?;
        Ok(account)
    }

    /// Rename an account. Codes and natures are immutable once created.
    pub async fn rename(&mut self, account_id: Uuid, name: String) -> LedgerResult<Account> {
        validation::validate_name(&name)?;
        let mut account = self.get_account_required(account_id).await?;
        account.name = name;
        account.updated_at = chrono::Utc::now().naive_utc();
        self.store.update_account(&account).await?;
        Ok(account)
    }
}

pub mod seed {
    use std::collections::HashMap;

    use super::*;

    /// Create a standard chart of accounts for an energy utility
    pub async fn create_standard_chart<S: LedgerStore>(
        registry: &mut AccountRegistry<S>,
        tenant_id: &str,
    ) -> LedgerResult<HashMap<String, Account>> {
        let mut accounts = HashMap::new();

        // Assets
        let cash = registry
            .create_account(AccountSpec::new(tenant_id, "1000", "Cash", AccountNature::Debit))
            .await?;
        accounts.insert("cash".to_string(), cash);

        let receivables = registry
            .create_account(AccountSpec::new(
                tenant_id,
                "1200",
                "Customer Receivables",
                AccountNature::Debit,
            ))
            .await?;
        accounts.insert("receivables".to_string(), receivables);

        let equipment = registry
            .create_account(AccountSpec::new(
                tenant_id,
                "1500",
                "Plant and Equipment",
                AccountNature::Debit,
            ))
            .await?;
        accounts.insert("equipment".to_string(), equipment);

        // Liabilities
        let payables = registry
            .create_account(AccountSpec::new(
                tenant_id,
                "2000",
                "Supplier Payables",
                AccountNature::Credit,
            ))
            .await?;
        accounts.insert("payables".to_string(), payables);

        let deposits = registry
            .create_account(AccountSpec::new(
                tenant_id,
                "2100",
                "Customer Deposits",
                AccountNature::Credit,
            ))
            .await?;
        accounts.insert("deposits".to_string(), deposits);

        // Revenue
        let energy_sales = registry
            .create_account(AccountSpec::new(
                tenant_id,
                "4000",
                "Energy Sales",
                AccountNature::Credit,
            ))
            .await?;
        accounts.insert("energy_sales".to_string(), energy_sales);

        let connection_fees = registry
            .create_account(AccountSpec::new(
                tenant_id,
                "4100",
                "Connection Fees",
                AccountNature::Credit,
            ))
            .await?;
        accounts.insert("connection_fees".to_string(), connection_fees);

        // Expenses
        let fuel = registry
            .create_account(AccountSpec::new(
                tenant_id,
                "5100",
                "Diesel Expense",
                AccountNature::Debit,
            ))
            .await?;
        accounts.insert("fuel".to_string(), fuel);

        let maintenance = registry
            .create_account(AccountSpec::new(
                tenant_id,
                "5200",
                "Maintenance Expense",
                AccountNature::Debit,
            ))
            .await?;
        accounts.insert("maintenance".to_string(), maintenance);

        let salaries = registry
            .create_account(AccountSpec::new(
                tenant_id,
                "5300",
                "Salaries Expense",
                AccountNature::Debit,
            ))
            .await?;
        accounts.insert("salaries".to_string(), salaries);

        Ok(accounts)
    }
}
