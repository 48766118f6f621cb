use std::fmt;

/// Все ошибки, которые может выдать одна итерация опроса.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BotError {
    #[error("API request failed: {0}")]
    Fetch(String),
    #[error("unexpected response shape: {0}")]
    Shape(String),
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("unknown homework status: {0}")]
    UnknownStatus(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Fetch,
    Shape,
    MissingField,
    UnknownStatus,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Fetch => "fetch",
            ErrorKind::Shape => "shape",
            ErrorKind::MissingField => "missing_field",
            ErrorKind::UnknownStatus => "unknown_status",
            ErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Пара (вид, сообщение), по которой решаем, новая ли это ошибка.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorSignature {
    pub kind: ErrorKind,
    pub message: String,
}

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::Fetch(_) => ErrorKind::Fetch,
            BotError::Shape(_) => ErrorKind::Shape,
            BotError::MissingField(_) => ErrorKind::MissingField,
            BotError::UnknownStatus(_) => ErrorKind::UnknownStatus,
            BotError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn signature(&self) -> ErrorSignature {
        ErrorSignature {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

impl From<anyhow::Error> for BotError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<BotError>() {
            Ok(known) => known,
            Err(other) => BotError::Internal(format!("{:#}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_carries_kind_and_rendered_message() {
        let sig = BotError::MissingField("homeworks".into()).signature();
        assert_eq!(sig.kind, ErrorKind::MissingField);
        assert_eq!(sig.message, "missing required field: homeworks");
    }

    #[test]
    fn same_text_different_kind_gives_different_signature() {
        let a = BotError::Shape("x".into()).signature();
        let b = BotError::Fetch("x".into()).signature();
        assert_ne!(a, b);
    }

    #[test]
    fn anyhow_wrapping_a_bot_error_keeps_its_kind() {
        let err = anyhow::Error::new(BotError::Fetch("HTTP 500".into()));
        assert_eq!(BotError::from(err), BotError::Fetch("HTTP 500".into()));
    }

    #[test]
    fn unrecognised_failure_becomes_internal() {
        let err = anyhow::anyhow!("socket closed").context("sending message");
        let classified = BotError::from(err);
        assert_eq!(classified.kind(), ErrorKind::Internal);
        assert!(classified.to_string().contains("socket closed"));
    }
}
