//! Error types for jobly

use thiserror::Error;

/// Result type alias for jobly operations
pub type JoblyResult<T> = Result<T, JoblyError>;

/// Message carried by [`JoblyError::InvalidRange`] for inverted employee bounds.
pub const INVALID_EMPLOYEE_RANGE: &str = "minEmployees cannot be greater than maxEmployees";

/// Error types for fragment building and database operations
#[derive(Debug, Error)]
pub enum JoblyError {
    /// A partial update was requested with nothing to update
    #[error("No data")]
    EmptyUpdate,

    /// A filter range has its lower bound above its upper bound
    #[error("{0}")]
    InvalidRange(String),

    /// Caller input failed validation (bad numeric filter, unknown update field)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record with the same key already exists
    #[error("Duplicate {0}")]
    Duplicate(String),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Missing or malformed configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),
}

impl JoblyError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The inverted `minEmployees`/`maxEmployees` error.
    pub fn invalid_employee_range() -> Self {
        Self::InvalidRange(INVALID_EMPLOYEE_RANGE.to_string())
    }

    /// HTTP-equivalent status for this error.
    ///
    /// Caller mistakes map to 4xx; everything coming from the database or the
    /// environment is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyUpdate
            | Self::InvalidRange(_)
            | Self::Validation(_)
            | Self::Duplicate(_)
            | Self::ForeignKeyViolation(_)
            | Self::CheckViolation(_) => 400,
            Self::NotFound(_) => 404,
            Self::UniqueViolation(_) => 409,
            _ => 500,
        }
    }

    /// Check if this error was caused by the caller's input
    pub fn is_bad_request(&self) -> bool {
        self.status_code() == 400
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Parse a tokio_postgres error into a more specific JoblyError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::UniqueViolation(format!("{}: {}", constraint, message)),
                "23503" => {
                    return Self::ForeignKeyViolation(format!("{}: {}", constraint, message));
                }
                "23514" => return Self::CheckViolation(format!("{}: {}", constraint, message)),
                _ => {}
            }
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for JoblyError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
