use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntryError {
    #[error("Missing required attribute: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Attribute '{field}' has value '{value}', expected {expected}")]
    TypeMismatch {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Document '{document}' is not valid UTF-8")]
    InvalidEncoding { document: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Failed to load '{document}': {source}")]
    DocumentLoadError {
        document: String,
        #[source]
        source: Box<EntryError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Record,
    Document,
    Configuration,
    Io,
    Output,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EntryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EntryError::MissingRequiredField { .. } | EntryError::TypeMismatch { .. } => {
                ErrorCategory::Record
            }
            EntryError::XmlError(_) | EntryError::InvalidEncoding { .. } => ErrorCategory::Document,
            EntryError::IoError(_) => ErrorCategory::Io,
            EntryError::SerializationError(_) | EntryError::CsvError(_) => ErrorCategory::Output,
            EntryError::ConfigError { .. }
            | EntryError::ConfigValidationError { .. }
            | EntryError::InvalidConfigValueError { .. }
            | EntryError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EntryError::ProcessingError { .. } => ErrorCategory::Internal,
            EntryError::DocumentLoadError { source, .. } => source.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Record => ErrorSeverity::Medium,
            ErrorCategory::Document | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Io => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// 缺少的屬性名稱（若有）
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            EntryError::MissingRequiredField { field } => Some(*field),
            EntryError::DocumentLoadError { source, .. } => source.missing_field(),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EntryError::MissingRequiredField { field } => format!(
                "Add the '{}' attribute to the <PDB> element, or use --on-error skip to ignore this entry",
                field
            ),
            EntryError::TypeMismatch { field, expected, .. } => {
                format!("Make sure '{}' contains {}", field, expected)
            }
            EntryError::XmlError(_) => "Check that the document is well-formed XML".to_string(),
            EntryError::InvalidEncoding { .. } => "Re-encode the document as UTF-8".to_string(),
            EntryError::IoError(_) => {
                "Check that the file exists and the base path is correct".to_string()
            }
            EntryError::SerializationError(_) | EntryError::CsvError(_) => {
                "Try a different output format or output path".to_string()
            }
            EntryError::ConfigError { .. }
            | EntryError::ConfigValidationError { .. }
            | EntryError::InvalidConfigValueError { .. }
            | EntryError::MissingConfigError { .. } => {
                "Review the configuration file and command line options".to_string()
            }
            EntryError::ProcessingError { .. } => "Re-run with --verbose for details".to_string(),
            EntryError::DocumentLoadError { source, .. } => source.recovery_suggestion(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EntryError::DocumentLoadError { document, source } => {
                format!("Could not load {}: {}", document, source.user_friendly_message())
            }
            EntryError::MissingRequiredField { field } => {
                format!("A structure entry is missing the required '{}' attribute", field)
            }
            EntryError::TypeMismatch { field, value, .. } => {
                format!("The '{}' attribute has an unusable value '{}'", field, value)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EntryError>;
