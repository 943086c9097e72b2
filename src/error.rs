use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),

    #[error("Invalid request timeout: {0}")]
    InvalidTimeout(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed with status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Session response did not contain the '{0}' header")]
    MissingSessionToken(&'static str),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Failed to initialize client: {0}")]
    ClientInitialization(#[source] ApiError),

    #[error("Market lookup failed: {0}")]
    Lookup(#[source] ApiError),
}

/// Renders `error` followed by every cause in its source chain, skipping
/// causes whose text an outer level already includes.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Error, Debug)]
    #[error("error sending request")]
    struct SendError(#[source] io::Error);

    #[test]
    fn test_error_chain_includes_root_cause() {
        let error = SendError(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));
        assert_eq!(
            error_chain(&error),
            "error sending request: Connection refused"
        );
    }

    #[test]
    fn test_error_chain_does_not_repeat_wrapped_messages() {
        let error = FetchError::Lookup(ApiError::MissingSessionToken("CST"));
        assert_eq!(
            error_chain(&error),
            "Market lookup failed: Session response did not contain the 'CST' header"
        );
    }

    #[test]
    fn test_missing_variables_message_lists_every_name() {
        let error = ConfigError::MissingVariables(vec!["CAPITAL_API_KEY", "CAPITAL_EMAIL"]);
        assert_eq!(
            error.to_string(),
            "Missing required environment variables: CAPITAL_API_KEY, CAPITAL_EMAIL"
        );
    }

    #[test]
    fn test_fetch_error_keeps_underlying_message() {
        let error = FetchError::Lookup(ApiError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            message: "error.not-found.epic".into(),
        });
        assert_eq!(
            error.to_string(),
            "Market lookup failed: Request failed with status 404 Not Found: error.not-found.epic"
        );
    }
}
