//! Basic ledger walkthrough: periods, postings, a reversal, and reports

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate};
use ledger_core::{EntryKind, EntryMetadata, JournalLine, Ledger, MemoryStore};

const TENANT: &str = "acme-power";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Ledger Core - Basic Ledger Example\n");

    let mut ledger = Ledger::new(MemoryStore::new());

    // 1. Open a fiscal period covering the current year
    let year = chrono::Utc::now().date_naive().year();
    let period = ledger
        .create_period(
            TENANT.to_string(),
            year,
            1,
            NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
        )
        .await?;
    println!(
        "📅 Opened fiscal period {}-{:02} ({} to {})\n",
        period.year, period.period_no, period.start, period.end
    );

    // 2. Seed the chart of accounts
    println!("📊 Setting up Chart of Accounts...");
    let accounts = ledger.setup_standard_chart(TENANT).await?;
    for account in accounts.values() {
        println!("  ✓ {} - {} ({:?})", account.code, account.name, account.nature);
    }
    println!();

    // 3. Record a month of operations
    println!("💰 Recording Journal Entries...\n");
    let today = chrono::Utc::now().date_naive();

    let billing = ledger
        .build_draft(
            TENANT.to_string(),
            vec![
                JournalLine::debit(accounts["receivables"].id, BigDecimal::from(50000)),
                JournalLine::credit(accounts["energy_sales"].id, BigDecimal::from(50000)),
            ],
            EntryMetadata {
                date: today,
                kind: EntryKind::System,
                description: "Monthly energy billing".to_string(),
                source_ref: Some("billing-run-1".to_string()),
                created_by: "billing".to_string(),
            },
        )
        .await?;
    let billing = ledger.post(billing.id, "billing").await?;
    println!("  ✓ {} Energy billing of 50,000", billing.display_number());

    let payments = ledger
        .build_draft(
            TENANT.to_string(),
            vec![
                JournalLine::debit(accounts["cash"].id, BigDecimal::from(32000)),
                JournalLine::credit(accounts["receivables"].id, BigDecimal::from(32000)),
            ],
            EntryMetadata {
                date: today,
                kind: EntryKind::System,
                description: "Customer payments".to_string(),
                source_ref: None,
                created_by: "billing".to_string(),
            },
        )
        .await?;
    ledger.post(payments.id, "billing").await?;
    println!("  ✓ Customer payments of 32,000");

    let diesel = ledger
        .build_draft(
            TENANT.to_string(),
            vec![
                JournalLine::debit(accounts["fuel"].id, BigDecimal::from(8000))
                    .with_description("Generator fuel, north depot"),
                JournalLine::credit(accounts["payables"].id, BigDecimal::from(8000)),
            ],
            EntryMetadata {
                date: today,
                kind: EntryKind::Manual,
                description: "Diesel delivery".to_string(),
                source_ref: Some("grn-221".to_string()),
                created_by: "ops".to_string(),
            },
        )
        .await?;
    let diesel = ledger.post(diesel.id, "ops").await?;
    println!("  ✓ Diesel delivery of 8,000");

    // 4. Reverse a mistaken posting
    println!("\n↩️  Reversing the diesel entry (wrong vendor)...");
    let reversal = ledger.reverse(diesel.id, "controller", "wrong vendor").await?;
    println!("  ✓ {} reverses {}", reversal.display_number(), diesel.display_number());

    // 5. Reports
    println!("\n📈 Generating Reports...\n");
    let range_start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
    let range_end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap();

    let tb = ledger.trial_balance(TENANT, range_start, range_end).await?;
    println!("🔍 Trial Balance:");
    for row in &tb.rows {
        println!("  {} {:<22} {:>10}", row.code, row.name, row.closing);
    }
    println!("  Debit-nature total:  {}", tb.total_debit_nature);
    println!("  Credit-nature total: {}", tb.total_credit_nature);
    println!("  Balanced: {}", if tb.is_balanced { "✅ Yes" } else { "❌ No" });

    let is = ledger.income_statement(TENANT, range_start, range_end).await?;
    println!("\n💹 Income Statement:");
    println!("  Total Revenue:  {}", is.total_revenue);
    println!("  Total Expenses: {}", is.total_expenses);
    println!("  Net:            {}", is.net);

    let bs = ledger.balance_sheet(TENANT, range_end).await?;
    println!("\n📊 Balance Sheet:");
    println!("  Total Assets:      {}", bs.total_assets);
    println!("  Total Liabilities: {}", bs.total_liabilities);
    println!("  Net Position:      {}", bs.net_position);

    // 6. Integrity sweep
    println!("\n🔍 Validating Ledger Integrity...");
    let report = ledger.validate_integrity(TENANT, range_end).await?;
    if report.is_valid {
        println!("  ✅ Ledger integrity check passed!");
    } else {
        println!("  ❌ Ledger integrity check failed:");
        for issue in &report.issues {
            println!("    - {}", issue);
        }
    }

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
