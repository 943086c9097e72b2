pub const USE_DEMO_VAR: &str = "CAPITAL_USE_DEMO";

const DEMO_BASE_URL: &str = "https://demo-api-capital.backend-capital.com";
const LIVE_BASE_URL: &str = "https://api-capital.backend-capital.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Demo,
    Live,
}

impl Environment {
    /// Parses the `CAPITAL_USE_DEMO` flag. Only a case-insensitive `true`
    /// selects the demo endpoint; unset or any other value means live.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(value) if value.trim().eq_ignore_ascii_case("true") => Environment::Demo,
            _ => Environment::Live,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Demo => "demo",
            Environment::Live => "live",
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Demo => DEMO_BASE_URL,
            Environment::Live => LIVE_BASE_URL,
        }
    }
}
