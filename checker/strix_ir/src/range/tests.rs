use pretty_assertions::assert_eq;

use super::*;

#[test]
fn single_line_range_has_line_count_one() {
    let range = Range::from_parts(9, 4, 9, 10);
    assert_eq!(range.line_count(), 1);
}

#[test]
fn multi_line_range_counts_both_endpoints() {
    let range = Range::from_parts(3, 0, 5, 2);
    assert_eq!(range.line_count(), 3);
}

#[test]
fn positions_order_by_line_then_column() {
    let a = Position::new(2, 9);
    let b = Position::new(3, 0);
    let c = Position::new(3, 1);
    assert!(a < b);
    assert!(b < c);
}

#[test]
fn display_is_one_based() {
    assert_eq!(Position::new(0, 0).to_string(), "1:1");
    assert_eq!(Range::from_parts(9, 4, 9, 10).to_string(), "10:5-10:11");
}
