use std::fmt;

pub const IDENTIFIER_VAR: &str = "CAPITAL_EMAIL";
pub const PASSWORD_VAR: &str = "CAPITAL_API_KEY_CUSTOM_PASSWORD";
pub const API_KEY_VAR: &str = "CAPITAL_API_KEY";

#[derive(Clone, PartialEq)]
pub struct Credentials {
    identifier: String,
    password: String,
    api_key: String,
}

impl Credentials {
    pub fn new(identifier: String, password: String, api_key: String) -> Self {
        Self {
            identifier,
            password,
            api_key,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Names of the environment variables whose value is empty, in the order
    /// the api key, identifier and password are checked.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (API_KEY_VAR, &self.api_key),
            (IDENTIFIER_VAR, &self.identifier),
            (PASSWORD_VAR, &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

// Secrets never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"***")
            .field("api_key", &"***")
            .finish()
    }
}
