use std::fmt;

/// Opaque proof of authentication handed to the browser.
///
/// It is a signed token naming a server-side session record, so it only
/// resolves to a user while that record exists.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct SessionToken(String);

impl SessionToken {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

// keep tokens out of logs
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SessionRecord {
    pub(crate) id: String,
    pub(crate) user_id: i64,
    pub(crate) expires_at: i64,
}

impl SessionRecord {
    pub(crate) fn is_expired(&self, now_unix: i64) -> bool {
        self.expires_at <= now_unix
    }
}
