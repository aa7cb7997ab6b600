pub mod jobs;
pub mod resumes;

/// Trimmed, non-empty value of an optional body field.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
