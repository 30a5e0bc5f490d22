use crate::error::ApiError;
use serde_json::Value;

/// Helper functions for standardizing error conversions across the client.
/// Convert reqwest transport errors to ApiError with endpoint context.
///
/// Anything that never produced a response is reported with status 0.
pub fn convert_request_error(error: reqwest::Error, endpoint: &str, timeout_secs: u64) -> ApiError {
    if error.is_timeout() {
        return convert_timeout_error(endpoint, 0, timeout_secs, None, None);
    }
    ApiError::Http {
        status: error.status().map(|s| s.as_u16()).unwrap_or(0),
        endpoint: endpoint.to_string(),
        message: error.to_string(),
        payload: None,
    }
}

/// Build a timeout error. Without a server message the text falls back to
/// the configured client timeout.
pub fn convert_timeout_error(
    endpoint: &str,
    status: u16,
    timeout_secs: u64,
    message: Option<String>,
    payload: Option<Value>,
) -> ApiError {
    ApiError::Timeout {
        status,
        timeout_secs,
        endpoint: endpoint.to_string(),
        message: message
            .unwrap_or_else(|| format!("Request timed out after {}s", timeout_secs)),
        payload,
    }
}

/// Convert JSON deserialization errors of a successful response.
pub fn convert_json_error(error: reqwest::Error, status: u16, endpoint: &str) -> ApiError {
    ApiError::Http {
        status,
        endpoint: endpoint.to_string(),
        message: format!("Failed to parse response: {}", error),
        payload: None,
    }
}

/// Pull a human readable message and the raw payload out of an error body.
///
/// JSON bodies with a string `message` field yield that message; any other
/// body falls back to `"Request failed with status <code>"`.
pub fn extract_error_message(status: u16, body: &str) -> (String, Option<Value>) {
    let generic = format!("Request failed with status {}", status);
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (generic, None);
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(payload) => {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or(generic);
            (message, Some(payload))
        }
        Err(_) => (generic, Some(Value::String(trimmed.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_timeout_error() {
        match convert_timeout_error("/doctors", 0, 30, None, None) {
            ApiError::Timeout {
                status,
                endpoint,
                timeout_secs,
                message,
                payload,
            } => {
                assert_eq!(status, 0);
                assert_eq!(endpoint, "/doctors");
                assert_eq!(timeout_secs, 30);
                assert_eq!(message, "Request timed out after 30s");
                assert!(payload.is_none());
            }
            _ => panic!("Expected Timeout error"),
        }
    }

    #[test]
    fn test_convert_timeout_error_keeps_server_message() {
        let err = convert_timeout_error(
            "/hospitals",
            504,
            30,
            Some("Gateway busy".to_string()),
            Some(json!({"message": "Gateway busy"})),
        );
        assert_eq!(err.status(), 504);
        assert_eq!(err.message(), "Gateway busy");
        assert_eq!(err.payload(), Some(&json!({"message": "Gateway busy"})));
    }

    #[test]
    fn test_extract_message_field() {
        let (message, payload) =
            extract_error_message(400, r#"{"message":"Invalid email","code":"E_VALIDATION"}"#);
        assert_eq!(message, "Invalid email");
        assert_eq!(payload, Some(json!({"message":"Invalid email","code":"E_VALIDATION"})));
    }

    #[test]
    fn test_extract_without_message_field() {
        let (message, payload) = extract_error_message(500, r#"{"error":"boom"}"#);
        assert_eq!(message, "Request failed with status 500");
        assert_eq!(payload, Some(json!({"error":"boom"})));
    }

    #[test]
    fn test_extract_plain_text_body() {
        let (message, payload) = extract_error_message(502, "Bad Gateway");
        assert_eq!(message, "Request failed with status 502");
        assert_eq!(payload, Some(Value::String("Bad Gateway".to_string())));
    }

    #[test]
    fn test_extract_empty_body() {
        let (message, payload) = extract_error_message(404, "   ");
        assert_eq!(message, "Request failed with status 404");
        assert!(payload.is_none());
    }
}
