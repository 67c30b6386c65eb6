use common::types::ErrorBody;
use thiserror::Error;

/// A non-success HTTP response, normalized once at the pipeline boundary.
///
/// `structured_message` is the best-effort parse of the body as
/// `{"message": ...}`; callers pick their presentation without re-parsing.
/// `Display` keeps the raw `"<status>: <raw-body>"` shape for logs.
#[derive(Debug, Error)]
#[error("{status}: {raw_body}")]
pub struct OperationFailure {
    pub status: u16,
    pub structured_message: Option<String>,
    pub raw_body: String,
}

impl OperationFailure {
    pub fn from_response(status: u16, raw_body: String) -> Self {
        let structured_message = serde_json::from_str::<ErrorBody>(&raw_body)
            .ok()
            .map(|body| body.message);
        Self { status, structured_message, raw_body }
    }

    /// The most specific user-facing text available: the structured message
    /// when the body parsed, the raw text otherwise.
    pub fn display_message(&self) -> &str {
        self.structured_message.as_deref().unwrap_or(&self.raw_body)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error(transparent)]
    Operation(#[from] OperationFailure),
    #[error("session storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Text suitable for showing the end user; never a raw technical error
    /// when something better is available.
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Operation(op) => op.display_message().to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_yields_its_message() {
        let failure = OperationFailure::from_response(400, r#"{"message":"CPF inválido"}"#.into());
        assert_eq!(failure.status, 400);
        assert_eq!(failure.display_message(), "CPF inválido");
        assert_eq!(failure.to_string(), r#"400: {"message":"CPF inválido"}"#);
    }

    #[test]
    fn plain_text_body_falls_back_to_raw() {
        let failure = OperationFailure::from_response(500, "Internal Server Error".into());
        assert!(failure.structured_message.is_none());
        assert_eq!(failure.display_message(), "Internal Server Error");
        assert_eq!(failure.to_string(), "500: Internal Server Error");
    }

    #[test]
    fn empty_body_degrades_to_empty_text() {
        let failure = OperationFailure::from_response(502, String::new());
        assert_eq!(failure.display_message(), "");
        assert_eq!(failure.to_string(), "502: ");
    }

    #[test]
    fn json_without_message_field_is_not_structured() {
        let failure = OperationFailure::from_response(422, r#"{"error":"nope"}"#.into());
        assert!(failure.structured_message.is_none());
        assert_eq!(failure.display_message(), r#"{"error":"nope"}"#);
    }

    #[test]
    fn client_error_display_message_unwraps_operations() {
        let err: ClientError =
            OperationFailure::from_response(400, r#"{"message":"CPF inválido"}"#.into()).into();
        assert_eq!(err.display_message(), "CPF inválido");

        let net = ClientError::Network("connection refused".into());
        assert_eq!(net.display_message(), "network error: connection refused");
    }
}
