//! Error types for song document validation and parsing.

use thiserror::Error;

/// Error codes for song document validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Metadata errors (E001-E009)
    /// E001: Unsupported format tag
    UnsupportedFormat,
    /// E002: BPM out of valid range
    BpmOutOfRange,
    /// E003: Bar count out of valid range
    BarsOutOfRange,
    /// E004: Step count out of valid range
    StepsOutOfRange,
    /// E005: Step count does not equal bars * 16
    StepCountMismatch,

    // Track errors (E010-E019)
    /// E010: Pattern step index >= total steps
    StepIndexOutOfRange,
    /// E011: Pattern indices not strictly ascending (or duplicated)
    PatternNotAscending,
    /// E012: Parallel array length does not match pattern length
    ParallelArrayMismatch,
    /// E013: Velocity value outside [0, 1]
    VelocityOutOfRange,
    /// E014: Ghost-note step index >= total steps
    GhostNoteOutOfRange,
    /// E015: Track volume is not a finite number
    VolumeNotFinite,

    // Effects errors (E020-E029)
    /// E020: Effect parameter outside its documented range
    EffectOutOfRange,

    // Arrangement errors (E030-E039)
    /// E030: Section bar range is invalid or outside the song
    SectionBarsInvalid,
    /// E031: Section references an unknown track
    UnknownSectionTrack,
    /// E032: Section active-track literal is not "all"
    InvalidActiveTracks,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedFormat => "E001",
            ErrorCode::BpmOutOfRange => "E002",
            ErrorCode::BarsOutOfRange => "E003",
            ErrorCode::StepsOutOfRange => "E004",
            ErrorCode::StepCountMismatch => "E005",
            ErrorCode::StepIndexOutOfRange => "E010",
            ErrorCode::PatternNotAscending => "E011",
            ErrorCode::ParallelArrayMismatch => "E012",
            ErrorCode::VelocityOutOfRange => "E013",
            ErrorCode::GhostNoteOutOfRange => "E014",
            ErrorCode::VolumeNotFinite => "E015",
            ErrorCode::EffectOutOfRange => "E020",
            ErrorCode::SectionBarsInvalid => "E030",
            ErrorCode::UnknownSectionTrack => "E031",
            ErrorCode::InvalidActiveTracks => "E032",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for song document validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Missing or empty title
    MissingTitle,
    /// W002: Track volume below the audible floor while unmuted
    SilentTrack,
    /// W003: Track has an empty pattern
    EmptyPattern,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::MissingTitle => "W001",
            WarningCode::SilentTrack => "W002",
            WarningCode::EmptyPattern => "W003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "tracks.kick.pattern\[3\]").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Result of validating a song document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// Validation errors. A document with any error must be rejected whole.
    pub errors: Vec<ValidationError>,
    /// Non-fatal warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Returns true if validation produced no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds a validation error.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a validation warning.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merges another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Error returned when a document cannot be parsed or fails validation.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input was not valid JSON for the document shape.
    #[error("invalid song document JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but violated its contract.
    #[error("document failed validation: {}", summarize(.0))]
    Invalid(ValidationResult),
}

fn summarize(result: &ValidationResult) -> String {
    match result.errors.first() {
        Some(first) if result.errors.len() == 1 => first.to_string(),
        Some(first) => format!("{} (+{} more)", first, result.errors.len() - 1),
        None => "unknown error".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ErrorCode::UnsupportedFormat.code(), "E001");
        assert_eq!(ErrorCode::StepIndexOutOfRange.code(), "E010");
        assert_eq!(ErrorCode::SectionBarsInvalid.code(), "E030");
        assert_eq!(WarningCode::MissingTitle.code(), "W001");
    }

    #[test]
    fn display_includes_path() {
        let err = ValidationError::with_path(
            ErrorCode::BpmOutOfRange,
            "bpm must be 60-200, got 500",
            "metadata.bpm",
        );
        let rendered = err.to_string();
        assert!(rendered.contains("E002"));
        assert!(rendered.contains("metadata.bpm"));
    }

    #[test]
    fn invalid_summary_counts_errors() {
        let mut result = ValidationResult::default();
        result.add_error(ValidationError::new(ErrorCode::BpmOutOfRange, "bpm"));
        result.add_error(ValidationError::new(ErrorCode::BarsOutOfRange, "bars"));
        let err = DocumentError::Invalid(result);
        assert!(err.to_string().contains("+1 more"));
    }
}
