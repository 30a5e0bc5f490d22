use crate::error::ApiError;

/// Service layer error types
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Not found: {resource_type} with ID {id}")]
    NotFound { resource_type: String, id: u64 },
}

impl ServiceError {
    pub(crate) fn invalid_id(resource_type: &str) -> Self {
        ServiceError::Validation {
            field: "id".to_string(),
            message: format!("{} ID must be greater than 0", resource_type),
        }
    }

    /// Map a 404 from the backend onto `NotFound`, keep everything else.
    pub(crate) fn from_lookup(error: ApiError, resource_type: &str, id: u64) -> Self {
        if error.is_not_found() {
            ServiceError::NotFound {
                resource_type: resource_type.to_string(),
                id,
            }
        } else {
            ServiceError::Api(error)
        }
    }

    /// User-facing text for a transient notice.
    pub fn notice_text(&self) -> String {
        match self {
            ServiceError::Api(api) => api.message(),
            other => other.to_string(),
        }
    }
}

/// Generic loading state for async data.
///
/// Forces callers to handle every phase instead of rendering stale data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    /// Initial state, no data loaded yet
    #[default]
    Idle,
    /// Data is being fetched
    Loading,
    /// Data successfully loaded
    Loaded(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient user-facing message (the toast of a view).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
