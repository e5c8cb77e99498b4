use super::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) text: String,
    pub(crate) author_id: i64,
    pub(crate) author_name: String,
    pub(crate) post_id: i64,
}

/// Trims comment text; blank input is an error.
pub(crate) fn normalize_comment_text(text: &str) -> Result<String, DomainError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::EmptyText);
    }
    Ok(text.to_string())
}
