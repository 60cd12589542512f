use thiserror::Error;

/// Errors returned by the label service.
///
/// `NotFound` and `PermissionDenied` are the two outcomes callers branch on;
/// anything raised by storage is carried through untouched in `Store`.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl LabelError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Stable machine-readable code, surfaced as `extensions.code` in GraphQL
    pub fn code(&self) -> &'static str {
        match self {
            LabelError::NotFound { .. } => "NOT_FOUND",
            LabelError::PermissionDenied(_) => "PERMISSION_DENIED",
            LabelError::Store(_) => "INTERNAL",
        }
    }
}

pub type Result<T, E = LabelError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_message() {
        let err = LabelError::from(anyhow::anyhow!("disk I/O error"));
        assert_eq!(err.to_string(), "disk I/O error");
        assert_eq!(err.code(), "INTERNAL");
    }

    #[test]
    fn not_found_names_kind_and_id() {
        let err = LabelError::not_found("label", 12);
        assert_eq!(err.to_string(), "label not found: 12");
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
