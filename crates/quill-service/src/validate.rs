use crate::error::FieldViolation;

/// Consumes an inbound field, recording a violation when it is missing or
/// blank. Returns the value only when it passed.
pub(crate) fn require_text(
    field: &'static str,
    value: Option<String>,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match value {
        None => {
            violations.push(FieldViolation::missing(field));
            None
        }
        Some(value) if value.trim().is_empty() => {
            violations.push(FieldViolation::blank(field));
            None
        }
        Some(value) => Some(value),
    }
}

/// Records a violation when a patch field is present but blank.
pub(crate) fn reject_blank(
    field: &'static str,
    value: &Option<String>,
    violations: &mut Vec<FieldViolation>,
) {
    if matches!(value, Some(value) if value.trim().is_empty()) {
        violations.push(FieldViolation::blank(field));
    }
}
