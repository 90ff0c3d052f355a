use crate::common::{intl_row, listing_row};
use hkipo_rs::TrancheMarker;

#[test]
fn exact_markers_classify() {
    assert_eq!(TrancheMarker::classify("(a)"), TrancheMarker::Primary);
    assert_eq!(TrancheMarker::classify("(b)"), TrancheMarker::Secondary);
}

#[test]
fn anything_else_is_unmarked() {
    for marker in ["", "a", "b", "(A)", "(B)", "( a)", "(c)", "nan", "(a)(b)"] {
        assert_eq!(
            TrancheMarker::classify(marker),
            TrancheMarker::Unmarked,
            "marker {marker:?}"
        );
    }
}

#[test]
fn row_marker_is_trimmed_last_but_one_cell() {
    let row = listing_row(3, "Alpha Co", "12", "2021-03-01", "1000", "  (a) ");
    assert_eq!(row.marker().unwrap(), "(a)");
    assert_eq!(TrancheMarker::of(&row).unwrap(), TrancheMarker::Primary);
    assert_eq!(TrancheMarker::of(&intl_row(4, "500")).unwrap(), TrancheMarker::Secondary);
}
