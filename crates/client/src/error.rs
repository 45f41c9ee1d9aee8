use std::sync::Arc;

/// Error type for backend API operations.
///
/// Not-found is not represented here: a 404 is normalized to `Ok(None)`
/// before any caller sees it. The type is `Clone` so a failure cached by
/// the point cache can be handed to every waiter.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Non-2xx, non-404 response status.
    Status { status: u16 },
    /// Connection, TLS, or mid-body transport failure.
    Transport(Arc<reqwest::Error>),
    /// Response body did not match the expected shape.
    Decode { message: String },
}

impl ApiError {
    pub fn transport(err: reqwest::Error) -> Self {
        ApiError::Transport(Arc::new(err))
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        ApiError::Decode {
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Status { status } => write!(f, "backend returned HTTP {status}"),
            ApiError::Transport(err) => write!(f, "request failed: {err}"),
            ApiError::Decode { message } => write!(f, "unexpected response shape: {message}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn status_error_names_the_code() {
        let err = ApiError::Status { status: 502 };
        assert_eq!(err.to_string(), "backend returned HTTP 502");
    }

    #[test]
    fn decode_error_carries_message() {
        let err = ApiError::decode("missing field `confirmed`");
        assert!(err.to_string().contains("missing field"));
    }
}
