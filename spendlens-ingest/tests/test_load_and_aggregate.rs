//! Files on disk through to the aggregate views.

use spendlens_analysis::{category_totals_by_month, core_vs_non_core_monthly_totals, monthly_totals};
use spendlens_core::Month;
use spendlens_ingest::{load_ledger, LoadOptions, Sources};
use std::fs;
use std::path::PathBuf;

fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let p = dir.path().join(name);
    fs::write(&p, body).unwrap();
    p
}

#[test]
fn test_core_split_scenario_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let expenses = write(
        &dir,
        "ytd.csv",
        "Date,Description,Debit,Credit\n\
         2024-01-04,Costco WHSE,-500,\n\
         2024-01-12,Game Grid,-200,\n\
         2024-02-08,Costco WHSE,-400,\n\
         2024-03-02,Other Store,-300,\n\
         2024-03-22,Costco WHSE,-600,\n\
         2024-04-15,Game Grid,-700,\n",
    );
    let mapping = write(
        &dir,
        "mapping.csv",
        "Key,CoreExpense,Category1,Category1Percentage,Category2,Category2Percentage,Category3,Category3Percentage\n\
         Costco WHSE,Y,Groceries,85,Clothing,10,Household,5\n\
         Game Grid,N,Entertainment,100,,,,\n",
    );
    let sources = Sources { exemptions: None, mapping: Some(mapping), expenses: vec![expenses] };
    let (ledger, summary) = load_ledger(&sources, &LoadOptions::default()).unwrap();
    assert_eq!(summary.accepted, 6);

    let split = core_vs_non_core_monthly_totals(&ledger);
    assert_eq!(split.core[Month::January], 500.0);
    assert_eq!(split.core[Month::February], 400.0);
    assert_eq!(split.core[Month::March], 600.0);
    assert_eq!(split.non_core[Month::January], 200.0);
    assert_eq!(split.non_core[Month::April], 700.0);
    assert_eq!(split.unmapped[Month::March], 300.0);
    assert_eq!(split.unmapped.total(), 300.0);

    let monthly = monthly_totals(&ledger);
    assert_eq!(monthly[Month::March], 900.0);
    assert_eq!(monthly.total(), 2700.0);

    let cats = category_totals_by_month(&ledger);
    assert_eq!(cats.get(Month::January, "Groceries"), Some(425.0));
    assert_eq!(cats.get(Month::January, "Entertainment"), Some(200.0));
    assert_eq!(cats.month(Month::January)[0].category, "Groceries");
    assert!(cats.month(Month::March).iter().all(|e| e.category != "Other Store"));
}

#[test]
fn test_exemptions_filter_before_aggregation() {
    let dir = tempfile::tempdir().unwrap();
    let exemptions = write(&dir, "exemptions.txt", "citi autopay\n");
    let expenses = write(
        &dir,
        "citi.csv",
        "Status,Date,Description,Debit,Credit\n\
         Cleared,06/01/2024,CITI AUTOPAY PAYMENT,1200.00,\n\
         Cleared,06/02/2024,Smith's Fuel,45.00,\n",
    );
    let sources = Sources { exemptions: Some(exemptions), mapping: None, expenses: vec![expenses] };
    let (ledger, summary) = load_ledger(&sources, &LoadOptions::default()).unwrap();
    assert_eq!(summary.exempt, 1);
    assert_eq!(monthly_totals(&ledger)[Month::June], 45.0);
    // No rules loaded: nothing is attempted.
    assert!(core_vs_non_core_monthly_totals(&ledger).unmapped.is_zero());
}
