use crate::core::services::types::ServiceError;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("ServiceError: {0}")]
    Service(#[from] ServiceError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    /// A fetch failed after its notice was already shown to the user.
    #[error("{0}")]
    RequestFailed(String),
}

/// Uniform error shape for every backend call.
///
/// `status` is 0 when no HTTP response was received (connection refused,
/// DNS failure, client-side timeout).
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client-side timeouts and 408/504 responses. Server timeouts keep the
    /// message and body the gateway sent back.
    #[error("{message}")]
    Timeout {
        status: u16,
        timeout_secs: u64,
        endpoint: String,
        message: String,
        payload: Option<Value>,
    },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
        payload: Option<Value>,
    },
    #[error("Authentication failed: {server_message}")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
        payload: Option<Value>,
    },
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Timeout { status, .. }
            | ApiError::Http { status, .. }
            | ApiError::Unauthorized { status, .. } => *status,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Timeout { message, .. } | ApiError::Http { message, .. } => message.clone(),
            ApiError::Unauthorized { server_message, .. } => server_message.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Timeout { endpoint, .. }
            | ApiError::Http { endpoint, .. }
            | ApiError::Unauthorized { endpoint, .. } => endpoint,
        }
    }

    /// Raw JSON body of the error response, when the server sent one.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Timeout { payload, .. }
            | ApiError::Http { payload, .. }
            | ApiError::Unauthorized { payload, .. } => payload.as_ref(),
        }
    }

    pub fn is_network(&self) -> bool {
        self.status() == 0
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login failed: Invalid credentials")]
    InvalidCredentials,
    #[error("Session expired or invalid")]
    SessionInvalid,
    #[error("Login failed: {message}")]
    LoginFailed { message: String },
    #[error("Login response did not contain a token")]
    MissingToken,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String, hint: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status: 0, .. } => ErrorSeverity::High,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Auth(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Service(service_error) => match service_error {
                ServiceError::NotFound { .. } => ErrorSeverity::Low,
                ServiceError::Validation { .. } => ErrorSeverity::Medium,
                ServiceError::Api(_) => ErrorSeverity::Medium,
            },
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_string(),
            AppError::Auth(AuthError::SessionInvalid) => "Session expired or invalid".to_string(),
            AppError::Api(api_error) if api_error.is_network() => {
                "Could not reach the directory server".to_string()
            }
            AppError::Api(api_error) => api_error.message(),
            AppError::Service(ServiceError::NotFound { resource_type, .. }) => {
                format!("{} not found", resource_type)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Auth(AuthError::InvalidCredentials | AuthError::SessionInvalid) => {
                Some("'medidir auth login' to sign in again".to_string())
            }
            AppError::Api(ApiError::Unauthorized { .. }) => {
                Some("'medidir auth login' to sign in".to_string())
            }
            AppError::Api(ApiError::Timeout { .. }) => {
                Some("Check your connection to the directory server and try again".to_string())
            }
            AppError::Api(api_error) if api_error.is_network() => Some(
                "Check the API URL with 'medidir config show' or set MEDIDIR_API_URL".to_string(),
            ),
            AppError::Config(ConfigError::MissingField { hint, .. }) => Some(hint.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cli_error_display() {
        let cli_err = CliError::InvalidArguments("page must be at least 1".to_string());
        assert_eq!(
            format!("{}", cli_err),
            "Invalid arguments: page must be at least 1"
        );
    }

    #[test]
    fn test_api_error_accessors() {
        let api_err = ApiError::Http {
            status: 422,
            endpoint: "/doctors".to_string(),
            message: "Invalid filter".to_string(),
            payload: Some(json!({"message": "Invalid filter", "field": "name"})),
        };
        assert_eq!(api_err.status(), 422);
        assert_eq!(api_err.message(), "Invalid filter");
        assert_eq!(api_err.endpoint(), "/doctors");
        assert_eq!(api_err.payload().unwrap()["field"], "name");
        assert!(!api_err.is_network());
        assert!(!api_err.is_not_found());
    }

    #[test]
    fn test_network_error_has_status_zero() {
        let api_err = ApiError::Http {
            status: 0,
            endpoint: "/hospitals".to_string(),
            message: "connection refused".to_string(),
            payload: None,
        };
        assert!(api_err.is_network());
        let app_err = AppError::Api(api_err);
        assert_eq!(app_err.severity(), ErrorSeverity::High);
        assert_eq!(
            app_err.display_friendly(),
            "Could not reach the directory server"
        );
        assert!(app_err.troubleshooting_hint().is_some());
    }

    #[test]
    fn test_timeout_keeps_status() {
        let api_err = ApiError::Timeout {
            status: 504,
            timeout_secs: 30,
            endpoint: "/doctors".to_string(),
            message: "Upstream timed out".to_string(),
            payload: Some(serde_json::json!({"message": "Upstream timed out"})),
        };
        assert_eq!(api_err.status(), 504);
        assert_eq!(format!("{}", api_err), "Upstream timed out");
        assert_eq!(api_err.message(), "Upstream timed out");
        assert_eq!(api_err.payload().unwrap()["message"], "Upstream timed out");
    }

    #[test]
    fn test_app_error_display_api() {
        let app_err = AppError::Api(ApiError::Unauthorized {
            status: 401,
            endpoint: "/users/me".to_string(),
            server_message: "Token expired".to_string(),
            payload: None,
        });
        assert_eq!(
            format!("{}", app_err),
            "ApiError: Authentication failed: Token expired"
        );
        assert_eq!(app_err.severity(), ErrorSeverity::High);
        assert_eq!(
            app_err.troubleshooting_hint().as_deref(),
            Some("'medidir auth login' to sign in")
        );
    }

    #[test]
    fn test_not_found_is_low_severity() {
        let app_err = AppError::Service(ServiceError::NotFound {
            resource_type: "Hospital".to_string(),
            id: 42,
        });
        assert_eq!(app_err.severity(), ErrorSeverity::Low);
        assert_eq!(app_err.display_friendly(), "Hospital not found");
    }

    #[test]
    fn test_config_error_hint() {
        let app_err = AppError::Config(ConfigError::MissingField {
            field: "api_url".to_string(),
            hint: "medidir config set --api-url <url>".to_string(),
        });
        assert_eq!(
            app_err.troubleshooting_hint().as_deref(),
            Some("medidir config set --api-url <url>")
        );
        assert_eq!(
            format!("{}", app_err),
            "ConfigError: Configuration field 'api_url' is missing"
        );
    }

    #[test]
    fn test_severity_emoji() {
        assert_eq!(ErrorSeverity::High.emoji(), "❌");
        assert_eq!(ErrorSeverity::Low.emoji(), "ℹ️");
    }
}
