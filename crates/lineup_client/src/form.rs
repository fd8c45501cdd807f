use lineup_common::RequestToken;

use crate::error::ClientError;

/// Request types offered by the join form. The first is preselected.
pub const TOKEN_TYPES: [&str; 3] = ["Regular", "Makeup", "General"];

/// State of the join-queue form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinForm {
    pub name: String,
    pub kind: String,
}

impl Default for JoinForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: TOKEN_TYPES[0].to_string(),
        }
    }
}

impl JoinForm {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Build the request from the form, trimming the name.
    ///
    /// A byte-order mark (U+FEFF) counts as whitespace, as it does in the
    /// browser's `String.prototype.trim`. The type is passed through
    /// unchecked; the select control limits it.
    pub fn validate(&self) -> Result<RequestToken, ClientError> {
        let name = self
            .name
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
        if name.is_empty() {
            return Err(ClientError::EmptyName);
        }
        Ok(RequestToken::new(name, self.kind.clone()))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Acknowledgement shown after a request has been sent.
pub fn confirmation_message(request: &RequestToken) -> String {
    format!(
        "Token requested successfully!\nName: {}\nType: {}",
        request.name, request.kind
    )
}
