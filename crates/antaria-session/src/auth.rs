//! Login credentials.
//!
//! The game server authenticates with three values: the empire name, its
//! password, and the API key issued to the client application. They are
//! sent as the positional params of `empire.login` and nowhere else.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// What a [`Session`](crate::Session) logs in with.
///
/// `Debug` output redacts the password and API key, so credentials can sit
/// inside structs that get logged.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    empire_name: String,
    password: String,
    api_key: String,
}

impl Credentials {
    /// Creates a new set of credentials.
    pub fn new(
        empire_name: impl Into<String>,
        password: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            empire_name: empire_name.into(),
            password: password.into(),
            api_key: api_key.into(),
        }
    }

    /// The empire this session logs in as.
    pub fn empire_name(&self) -> &str {
        &self.empire_name
    }

    /// Splits into `(empire_name, password, api_key)`.
    pub fn into_parts(self) -> (String, String, String) {
        (self.empire_name, self.password, self.api_key)
    }

    /// The positional params of the login call:
    /// `[empire_name, password, api_key]`.
    pub(crate) fn login_params(&self) -> Vec<Value> {
        vec![
            Value::String(self.empire_name.clone()),
            Value::String(self.password.clone()),
            Value::String(self.api_key.clone()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("empire_name", &self.empire_name)
            .field("password", &"<redacted>")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_params_order_is_name_password_key() {
        let creds = Credentials::new("Antaria", "hunter2", "key-1");
        assert_eq!(
            creds.login_params(),
            vec![
                Value::from("Antaria"),
                Value::from("hunter2"),
                Value::from("key-1"),
            ]
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("Antaria", "hunter2", "key-1");
        let debug = format!("{creds:?}");
        assert!(debug.contains("Antaria"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("key-1"));
    }

    #[test]
    fn test_deserialize_from_config_table() {
        let creds: Credentials = serde_json::from_str(
            r#"{"empire_name":"Antaria","password":"pw","api_key":"k"}"#,
        )
        .unwrap();
        assert_eq!(creds.empire_name(), "Antaria");
    }
}
