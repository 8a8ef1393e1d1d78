//! Cost-center registry: a tagging dimension for journal lines

use uuid::Uuid;

use crate::traits::LedgerStore;
use crate::types::*;
use crate::utils::validation;

/// Registry for the cost-center dimension.
///
/// Cost centers tag journal lines for cross-cutting cost attribution; they
/// hold no balance of their own.
pub struct CostCenterRegistry<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> CostCenterRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a new cost center; code unique per tenant, parent (if any)
    /// in the same tenant.
    pub async fn create_cost_center(
        &mut self,
        tenant_id: String,
        code: String,
        name: String,
        parent_id: Option<Uuid>,
    ) -> LedgerResult<CostCenter> {
        validation::validate_code(&code)?;
        validation::validate_name(&name)?;

        let existing = self.store.list_cost_centers(&tenant_id).await?;
        if existing.iter().any(|cc| cc.code == code) {
            return Err(LedgerError::Validation(format!(
                "cost center code '{}' already exists for tenant '{}'",
                code, tenant_id
            )));
        }

        if let Some(parent_id) = parent_id {
            let parent = self
                .store
                .get_cost_center(parent_id)
                .await?
                .ok_or_else(|| LedgerError::UnknownCostCenter(parent_id.to_string()))?;
            if parent.tenant_id != tenant_id {
                return Err(LedgerError::Validation(format!(
                    "parent cost center {} belongs to a different tenant",
                    parent_id
                )));
            }
        }

        let cost_center = CostCenter::new(tenant_id, code, name, parent_id);
        self.store.save_cost_center(&cost_center).await?;
        Ok(cost_center)
    }

    /// Get a cost center by ID
    pub async fn get_cost_center(&self, cost_center_id: Uuid) -> LedgerResult<Option<CostCenter>> {
        self.store.get_cost_center(cost_center_id).await
    }

    /// List a tenant's cost centers ordered by code
    pub async fn list_cost_centers(&self, tenant_id: &str) -> LedgerResult<Vec<CostCenter>> {
        self.store.list_cost_centers(tenant_id).await
    }

    /// Soft-disable a cost center so no new lines may reference it
    pub async fn deactivate(&mut self, cost_center_id: Uuid) -> LedgerResult<CostCenter> {
        let mut cost_center = self
            .store
            .get_cost_center(cost_center_id)
            .await?
            .ok_or_else(|| LedgerError::UnknownCostCenter(cost_center_id.to_string()))?;
        cost_center.active = false;
        self.store.update_cost_center(&cost_center).await?;
        Ok(cost_center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_store::MemoryStore;

    #[tokio::test]
    async fn create_and_deactivate_cost_center() {
        let mut registry = CostCenterRegistry::new(MemoryStore::new());
        let depot = registry
            .create_cost_center("t1".to_string(), "CC-100".to_string(), "North Depot".to_string(), None)
            .await
            .unwrap();
        assert!(depot.active);

        let child = registry
            .create_cost_center(
                "t1".to_string(),
                "CC-110".to_string(),
                "North Depot Fleet".to_string(),
                Some(depot.id),
            )
            .await
            .unwrap();
        assert_eq!(child.parent_id, Some(depot.id));

        let err = registry
            .create_cost_center("t1".to_string(), "CC-100".to_string(), "Dup".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));

        let disabled = registry.deactivate(depot.id).await.unwrap();
        assert!(!disabled.active);
    }
}
