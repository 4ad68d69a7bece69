use pretty_assertions::assert_eq;
use strix_ir::{Category, HintTier, Range};
use strix_rules::Rule;

use super::*;

fn diag(category: Category) -> CanonicalDiagnostic {
    CanonicalDiagnostic {
        rule: Some(Rule::PossiblyUnbound),
        range: Range::from_parts(0, 0, 0, 1),
        message: "m".to_string(),
        category,
    }
}

#[test]
fn only_errors_are_counted() {
    let batch = vec![
        diag(Category::Error),
        diag(Category::Warning),
        diag(Category::Information),
        diag(Category::Hint(HintTier::Deprecated)),
        diag(Category::Error),
    ];
    assert_eq!(count_errors(&batch), 2);
}

#[test]
fn summary_wording() {
    assert_eq!(summary_message(3, 3), "error count didn't change");
    assert_eq!(summary_message(3, 7), "error count went up by 4");
    assert_eq!(summary_message(7, 3), "error count went down by 4");
    assert_eq!(summary_message(0, 0), "error count didn't change");
}
