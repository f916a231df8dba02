//! Account-scoped credentials forwarded on every external call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Credential pair identifying the account against the remote platform.
///
/// The policy key is a bearer-style secret; `Debug` redacts it so the pair
/// can be logged alongside request context without leaking it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCredentials {
    /// Stable account identifier.
    pub account_id: String,
    /// Access policy key scoped to the account.
    pub policy_key: String,
}

impl AccountCredentials {
    /// Create a new credential pair.
    pub fn new(account_id: impl Into<String>, policy_key: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            policy_key: policy_key.into(),
        }
    }

    /// Returns `true` if either field is empty and the pair cannot be used.
    pub fn is_incomplete(&self) -> bool {
        self.account_id.is_empty() || self.policy_key.is_empty()
    }
}

impl fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("account_id", &self.account_id)
            .field("policy_key", &"<redacted>")
            .finish()
    }
}
