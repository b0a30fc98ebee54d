/// Errors that can occur in the data layer.
///
/// Everything except `Execution` is detected before any SQL text exists, so a
/// failed operation never leaves a partial statement behind.
#[derive(Debug)]
pub enum DataError {
    /// The mapped type itself is malformed (not an entity, zero or several
    /// identifier fields, empty or duplicate names). Never worth retrying.
    Configuration(String),
    /// A well-formed type yields nothing usable for the requested operation.
    Mapping(String),
    /// A missing entity or identifier was passed to an operation.
    InvalidArgument(String),
    /// Failure reported by the statement-execution collaborator, passed through unmodified.
    Execution(Box<dyn std::error::Error + Send + Sync>),
}

impl DataError {
    /// Construct an `Execution` variant from any error type.
    ///
    /// Used by executor backends (e.g. `rowmap-data-sqlx`) to wrap
    /// driver-specific errors.
    pub fn execution(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DataError::Execution(Box::new(err))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, DataError::Configuration(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, DataError::Mapping(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DataError::InvalidArgument(_))
    }

    pub fn is_execution(&self) -> bool {
        matches!(self, DataError::Execution(_))
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            DataError::Mapping(msg) => write!(f, "Mapping error: {msg}"),
            DataError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            DataError::Execution(err) => write!(f, "Execution error: {err}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Execution(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// Convenience alias for data-layer results.
pub type DataResult<T> = Result<T, DataError>;
