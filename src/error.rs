use sea_orm::SqlErr;

use crate::db::dao::DaoLayerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidInput(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Label carried in the `error` field of the envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "InvalidInput",
            Self::Unauthorized(_) => "Unauthorized",
            Self::Forbidden(_) => "Forbidden",
            Self::NotFound(_) => "NotFound",
            Self::Conflict(_) => "Conflict",
            Self::Internal(_) => "Internal",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message)
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Internal(message) => message.as_str(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<DaoLayerError> for AppError {
    fn from(err: DaoLayerError) -> Self {
        match err {
            DaoLayerError::NotFound { .. } => AppError::not_found(err.to_string()),
            DaoLayerError::Db(db_err) => match db_err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    tracing::warn!(detail = %detail, "unique constraint rejected write");
                    AppError::conflict("Resource already exists")
                }
                Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                    tracing::warn!(detail = %detail, "foreign key constraint rejected write");
                    AppError::invalid_input("Referenced resource does not exist")
                }
                _ => {
                    tracing::error!(error = %db_err, "database operation failed");
                    AppError::internal("Internal server error")
                }
            },
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!(error = %err, "token rejected");
        AppError::unauthorized("invalid access token")
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbErr, RuntimeErr};

    use super::AppError;
    use crate::db::dao::DaoLayerError;

    #[test]
    fn not_found_keeps_entity_and_id() {
        let err: AppError = DaoLayerError::NotFound {
            entity: "Food",
            id: 9,
        }
        .into();

        assert_eq!(err, AppError::not_found("Food not found (id=9)"));
        assert_eq!(err.kind(), "NotFound");
    }

    #[test]
    fn unknown_db_failure_is_internal_and_hides_detail() {
        let err: AppError = DaoLayerError::Db(DbErr::Query(RuntimeErr::Internal(
            "connection reset by peer".to_string(),
        )))
        .into();

        assert_eq!(err.kind(), "Internal");
        assert!(!err.message().contains("connection reset"));
    }

    #[test]
    fn display_includes_kind() {
        assert_eq!(
            AppError::conflict("Food already exists").to_string(),
            "Conflict: Food already exists"
        );
    }
}
