use std::fmt;

use serde::Deserialize;

/// Sender address and app password entered on the dashboard
///
/// Only the address is used, as the `From` of outgoing messages. The
/// password is checked for presence and otherwise ignored.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCredentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub app_password: String,
}

impl EmailCredentials {
    pub fn new(email: impl Into<String>, app_password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            app_password: app_password.into(),
        }
    }

    /// Both halves non-empty
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.app_password.is_empty()
    }
}

impl fmt::Debug for EmailCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailCredentials")
            .field("email", &self.email)
            .field("app_password", &"<redacted>")
            .finish()
    }
}
