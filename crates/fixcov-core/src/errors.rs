use thiserror::Error;

/// Result type alias using the canonical ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure in fixcov is classified into one of these kinds. Each kind
/// maps to a stable error code usable by scripts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input/Validation
    InvalidInput,
    InvalidSchema,
    UnknownSchema,

    // Fixtures
    MalformedFixture,
    UnclassifiedFixture,

    // Traversal
    RecursionLimit,

    // Reports / diffing
    InvalidReport,
    ShapeMismatch,

    // Integration/IO
    Io,
    Serialization,
    ExternalService,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidSchema => "ERR_INVALID_SCHEMA",
            ExErrorKind::UnknownSchema => "ERR_UNKNOWN_SCHEMA",
            ExErrorKind::MalformedFixture => "ERR_MALFORMED_FIXTURE",
            ExErrorKind::UnclassifiedFixture => "ERR_UNCLASSIFIED_FIXTURE",
            ExErrorKind::RecursionLimit => "ERR_RECURSION_LIMIT",
            ExErrorKind::InvalidReport => "ERR_INVALID_REPORT",
            ExErrorKind::ShapeMismatch => "ERR_SHAPE_MISMATCH",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification kind plus optional context describing where the
/// failure happened (operation, fixture file, dotted field path, schema name).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    file: Option<String>,
    field_path: Option<String>,
    schema: Option<String>,
    message: String,
    candidates: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            file: None,
            field_path: None,
            schema: None,
            message: String::new(),
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add fixture or report file context
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Add dotted field path context (e.g. `candidates.content.parts`)
    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    /// Add schema name context
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add candidate identifiers (e.g. every fixture that failed classification)
    pub fn with_candidates(mut self, ids: Vec<String>) -> Self {
        self.candidates = Some(ids);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the file context, if any
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Get the field path context, if any
    pub fn field_path(&self) -> Option<&str> {
        self.field_path.as_deref()
    }

    /// Get the schema context, if any
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get candidate identifiers, if any
    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
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
        if let Some(file) = &self.file {
            write!(f, " (file: {})", file)?;
        }
        if let Some(schema) = &self.schema {
            write!(f, " (schema: {})", schema)?;
        }
        if let Some(path) = &self.field_path {
            write!(f, " (field: {})", path)?;
        }
        if let Some(candidates) = &self.candidates {
            write!(f, " [{}]", candidates.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for coverage operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoverageError {
    /// A `$ref` or response type names a schema absent from the schema set
    #[error("Schema not found: {schema}")]
    UnknownSchema { schema: String },

    /// The schema document itself is not usable
    #[error("Invalid schema document: {reason}")]
    InvalidSchemaDocument { reason: String },

    /// Fixture content could not be parsed under either encoding
    #[error("Malformed fixture {file}: {reason}")]
    MalformedFixture { file: String, reason: String },

    /// Fixtures that match no response type and are not error fixtures
    #[error("{} fixture(s) match no response type", files.len())]
    UnclassifiedFixtures { files: Vec<String> },

    /// Recursion went deeper than the configured safeguard
    #[error("Recursion limit of {max_depth} exceeded at {path}")]
    RecursionLimit { path: String, max_depth: usize },

    /// An enum value of a field has the same name as a nested property
    #[error("Enum value `{name}` collides with a nested field at {path}")]
    FieldCollision { path: String, name: String },

    /// A serialized coverage report does not follow the report format
    #[error("Invalid coverage report: {reason}")]
    InvalidReport { reason: String },

    /// Two coverage trees being diffed have different key sets
    #[error("Different keys in the coverage reports at {path}")]
    ShapeMismatch {
        path: String,
        only_in_old: Vec<String>,
        only_in_new: Vec<String>,
    },
}

impl From<CoverageError> for ExError {
    fn from(err: CoverageError) -> Self {
        let message = err.to_string();
        match err {
            CoverageError::UnknownSchema { schema } => ExError::new(ExErrorKind::UnknownSchema)
                .with_schema(schema)
                .with_message(message),

            CoverageError::InvalidSchemaDocument { .. } => {
                ExError::new(ExErrorKind::InvalidSchema).with_message(message)
            }

            CoverageError::MalformedFixture { file, reason } => {
                ExError::new(ExErrorKind::MalformedFixture)
                    .with_op("parse_document")
                    .with_file(file)
                    .with_message(reason)
            }

            CoverageError::UnclassifiedFixtures { files } => {
                ExError::new(ExErrorKind::UnclassifiedFixture)
                    .with_op("classify_corpus")
                    .with_message(message)
                    .with_candidates(files)
            }

            CoverageError::RecursionLimit { path, .. } => {
                ExError::new(ExErrorKind::RecursionLimit)
                    .with_op("compute_coverage")
                    .with_field_path(path)
                    .with_message(message)
            }

            CoverageError::FieldCollision { path, .. } => {
                ExError::new(ExErrorKind::InvalidSchema)
                    .with_op("compute_coverage")
                    .with_field_path(path)
                    .with_message(message)
            }

            CoverageError::InvalidReport { .. } => {
                ExError::new(ExErrorKind::InvalidReport).with_message(message)
            }

            CoverageError::ShapeMismatch {
                path,
                only_in_old,
                only_in_new,
            } => ExError::new(ExErrorKind::ShapeMismatch)
                .with_op("diff_reports")
                .with_field_path(path)
                .with_message(format!(
                    "keys only in old: [{}], keys only in new: [{}]",
                    only_in_old.join(", "),
                    only_in_new.join(", ")
                )),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
