use chrono::NaiveDate;

use super::error::DomainError;

const MAX_LINE_CHARS: usize = 250;

#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) body: String,
    pub(crate) img_url: String,
    pub(crate) date: String,
    pub(crate) author_id: i64,
    pub(crate) author_name: String,
}

/// Editable fields of a post, as submitted by the admin.
#[derive(Debug, Clone)]
pub(crate) struct PostDraft {
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) body: String,
    pub(crate) img_url: String,
}

impl PostDraft {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_line("title", &self.title)?,
            subtitle: normalize_line("subtitle", &self.subtitle)?,
            body: normalize_body(&self.body)?,
            img_url: normalize_line("img_url", &self.img_url)?,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct UpdatePostRequest {
    pub(crate) draft: PostDraft,
    pub(crate) author_id: i64,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_positive_i64("author_id", self.author_id)?;
        Ok(Self {
            draft: self.draft.validate()?,
            author_id: self.author_id,
        })
    }
}

impl Post {
    pub(crate) fn new(
        id: i64,
        draft: PostDraft,
        date: impl Into<String>,
        author_id: i64,
        author_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("author_id", author_id)?;
        let draft = draft.validate()?;
        let date = date.into();
        if date.trim().is_empty() {
            return Err(DomainError::Validation {
                field: "date",
                message: "must not be empty",
            });
        }

        Ok(Self {
            id,
            title: draft.title,
            subtitle: draft.subtitle,
            body: draft.body,
            img_url: draft.img_url,
            date,
            author_id,
            author_name: author_name.into(),
        })
    }
}

/// Publication date as shown on the site, e.g. "October 18, 2026".
pub(crate) fn format_post_date(day: NaiveDate) -> String {
    day.format("%B %d, %Y").to_string()
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn normalize_line(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > MAX_LINE_CHARS {
        return Err(DomainError::Validation {
            field,
            message: "must be 1..250 chars",
        });
    }
    Ok(value.to_string())
}

fn normalize_body(body: &str) -> Result<String, DomainError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(DomainError::Validation {
            field: "body",
            message: "must not be empty",
        });
    }
    Ok(body.to_string())
}
