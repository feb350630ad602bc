use thiserror::Error;

#[derive(Debug, Error)]
pub enum AguiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("WebSocket protocol error: {0}")]
    Protocol(String),

    #[error("Method not found: {method}")]
    MethodNotFound { method: String },

    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

impl AguiError {
    /// Short error code string sent to clients in WS RES frames.
    pub fn code(&self) -> &'static str {
        match self {
            AguiError::Config(_) => "CONFIG_ERROR",
            AguiError::AuthFailed(_) => "AUTH_FAILED",
            AguiError::Protocol(_) => "PROTOCOL_ERROR",
            AguiError::MethodNotFound { .. } => "METHOD_NOT_FOUND",
            AguiError::TemplateNotFound { .. } => "TEMPLATE_NOT_FOUND",
            AguiError::InvalidParams(_) => "INVALID_PARAMS",
            AguiError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
        }
    }
}

pub type Result<T> = std::result::Result<T, AguiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_are_stable() {
        assert_eq!(
            AguiError::TemplateNotFound { id: "x".into() }.code(),
            "TEMPLATE_NOT_FOUND"
        );
        assert_eq!(AguiError::AuthFailed("t".into()).code(), "AUTH_FAILED");
        assert_eq!(
            AguiError::MethodNotFound { method: "m".into() }.code(),
            "METHOD_NOT_FOUND"
        );
        assert_eq!(
            AguiError::PayloadTooLarge { size: 1, max: 0 }.code(),
            "PAYLOAD_TOO_LARGE"
        );
    }
}
