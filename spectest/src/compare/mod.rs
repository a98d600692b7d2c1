mod diff;

pub use diff::{Diff, FieldDiff};

/// Result of comparing a produced value with the expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonResult {
    Equal,
    Unequal(Vec<FieldDiff>),
}

impl ComparisonResult {
    pub fn is_equal(&self) -> bool {
        matches!(self, ComparisonResult::Equal)
    }
}

/// Compare every field of `result` with `expected`, recursively and by value.
pub fn compare<T: Diff>(result: &T, expected: &T) -> ComparisonResult {
    let mut diff = Vec::new();
    result.diff(expected, "", &mut diff);
    if diff.is_empty() {
        ComparisonResult::Equal
    } else {
        ComparisonResult::Unequal(diff)
    }
}
