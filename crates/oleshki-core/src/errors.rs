use oleshki_core_types::RunId;
use thiserror::Error;

/// Result type alias using ChangeLogError
pub type Result<T> = std::result::Result<T, ChangeLogError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that the CLI prints and tests
/// assert on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Snapshot input
    /// A snapshot could not be read (missing file, permission, I/O)
    SnapshotRead,
    /// A snapshot was read but is not a well-formed snapshot document
    SnapshotParse,

    // Configuration / validation
    InvalidConfig,
    NotFound,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::SnapshotRead => "ERR_SNAPSHOT_READ",
            ExErrorKind::SnapshotParse => "ERR_SNAPSHOT_PARSE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus the context needed to name the failing
/// snapshot in the user-visible message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    snapshot: Option<String>,
    run_id: Option<RunId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            snapshot: None,
            run_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Name the snapshot (file path or label) the error belongs to
    pub fn with_snapshot(mut self, snapshot: impl Into<String>) -> Self {
        self.snapshot = Some(snapshot.into());
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(snapshot) = &self.snapshot {
            write!(f, " (snapshot: {})", snapshot)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for configuration and snapshot decoding
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChangeLogError {
    /// No significant fields were configured
    #[error("At least one significant field must be configured")]
    EmptyFieldSet,

    /// A significant field was listed more than once
    #[error("Significant field listed more than once: {field}")]
    DuplicateField { field: String },

    /// A significant field name is blank
    #[error("Significant field names must not be blank")]
    BlankField,

    /// Coalescing interval is negative
    #[error("Minimum interval must not be negative, got {minutes} minutes")]
    NegativeInterval { minutes: i64 },

    /// Coalescing interval does not fit a duration
    #[error("Minimum interval of {minutes} minutes is out of range")]
    IntervalOutOfRange { minutes: i64 },

    /// Lookback window is zero or negative
    #[error("Lookback window must be positive, got {hours} hours")]
    InvalidLookback { hours: i64 },

    /// Lookback window reaches before the earliest representable time
    #[error("Lookback window of {hours} hours is out of range")]
    LookbackOutOfRange { hours: i64 },

    /// Configuration text could not be parsed
    #[error("Invalid configuration: {message}")]
    ConfigSyntax { message: String },

    /// Snapshot document is structurally invalid
    #[error("Malformed snapshot: {reason}")]
    MalformedSnapshot { reason: String },

    /// Record inside a snapshot has an empty id
    #[error("Record at position {position} has an empty id")]
    EmptyRecordId { position: usize },
}

impl From<ChangeLogError> for ExError {
    fn from(err: ChangeLogError) -> Self {
        let message = err.to_string();
        match err {
            ChangeLogError::EmptyFieldSet
            | ChangeLogError::DuplicateField { .. }
            | ChangeLogError::BlankField
            | ChangeLogError::NegativeInterval { .. }
            | ChangeLogError::IntervalOutOfRange { .. }
            | ChangeLogError::InvalidLookback { .. }
            | ChangeLogError::LookbackOutOfRange { .. }
            | ChangeLogError::ConfigSyntax { .. } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("validate_config")
                .with_message(message),

            ChangeLogError::MalformedSnapshot { .. } | ChangeLogError::EmptyRecordId { .. } => {
                ExError::new(ExErrorKind::SnapshotParse)
                    .with_op("parse_snapshot")
                    .with_message(message)
            }
        }
    }
}
