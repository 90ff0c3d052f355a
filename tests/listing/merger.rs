use crate::common::{intl_row, listing_row};
use hkipo_rs::{CarryForward, IpoError, Merger};

#[test]
fn primary_then_secondary_emits_one_merge() {
    let mut merger = Merger::new();

    let first = listing_row(3, "Alpha Co", "12", "2021-03-01", "1000", "(a)");
    assert_eq!(merger.push(&first).unwrap(), None);

    let merged = merger.push(&intl_row(4, "500")).unwrap().unwrap();
    assert_eq!(merged.company.name, "Alpha Co");
    assert_eq!(merged.company.code.as_str(), "0012");
    assert_eq!(merged.hk_fund_raised.to_string(), "1000");
    assert_eq!(merged.intl_fund_raised.to_string(), "500");
}

#[test]
fn secondary_reads_without_clearing_the_slot() {
    let mut merger = Merger::new();
    merger
        .push(&listing_row(3, "Alpha Co", "12", "2021-03-01", "1000", "(a)"))
        .unwrap();
    let a = merger.push(&intl_row(4, "500")).unwrap().unwrap();
    let b = merger.push(&intl_row(5, "250")).unwrap().unwrap();

    assert_eq!(a.company, b.company);
    assert_eq!(b.intl_fund_raised.to_string(), "250");
    assert!(matches!(merger.slot(), CarryForward::Holding(c) if c.name == "Alpha Co"));
}

#[test]
fn secondary_pairs_with_most_recent_listing_row() {
    let mut merger = Merger::new();
    for row in [
        listing_row(3, "Alpha Co", "12", "2021-03-01", "1000", "(a)"),
        listing_row(4, "Beta Ltd", "2097", "2021-06-15", "800", "(a)"),
    ] {
        assert!(merger.push(&row).unwrap().is_none());
    }
    let merged = merger.push(&intl_row(5, "300")).unwrap().unwrap();
    assert_eq!(merged.company.name, "Beta Ltd");
    assert_eq!(merged.hk_fund_raised.to_string(), "800");
}

#[test]
fn unmarked_rows_replace_the_slot_and_emit_nothing() {
    let mut merger = Merger::new();
    merger
        .push(&listing_row(3, "Alpha Co", "12", "2021-03-01", "1000", "(a)"))
        .unwrap();
    assert!(merger
        .push(&listing_row(4, "Gamma Holdings", "3", "2021-07-02", "2000", ""))
        .unwrap()
        .is_none());

    assert_eq!(merger.slot().current().unwrap().name, "Gamma Holdings");
    let merged = merger.push(&intl_row(5, "900")).unwrap().unwrap();
    assert_eq!(merged.company.code.as_str(), "0003");
    assert_eq!(merged.hk_fund_raised.to_string(), "2000");
}

#[test]
fn secondary_without_listing_row_is_an_error() {
    let mut merger = Merger::new();
    match merger.push(&intl_row(2, "500")).unwrap_err() {
        IpoError::OrphanSecondary { source_label, line } => {
            assert_eq!(source_label, "NLR_test.csv");
            assert_eq!(line, 2);
        }
        other => panic!("expected OrphanSecondary, got {other:?}"),
    }
    assert_eq!(merger.slot(), &CarryForward::Empty);
}
