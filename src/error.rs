use crate::io::LoadError;

/// Main error type for the library.
#[derive(Debug)]
pub enum FusionError {
    /// Used when the volume construction parameters cannot describe a valid grid.
    InvalidConfiguration(String),
    /// Used when per-frame inputs disagree in shape.
    InvalidInput(String),
    /// Used when the distance field holds no surface to extract.
    ExtractionFailed(String),
    Io(std::io::Error),
    Parser(String),
}

impl std::fmt::Display for FusionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FusionError::InvalidConfiguration(err) => write!(f, "Configuration error: {}", err),
            FusionError::InvalidInput(err) => write!(f, "Input error: {}", err),
            FusionError::ExtractionFailed(err) => write!(f, "Extraction error: {}", err),
            FusionError::Io(err) => write!(f, "IO error: {}", err),
            FusionError::Parser(err) => write!(f, "Parser error: {}", err),
        }
    }
}

impl FusionError {
    /// Create a error with the kind `InvalidConfiguration`.
    /// # Arguments
    /// * `msg` - The error message.
    pub fn invalid_configuration<T: ToString>(msg: T) -> Self {
        FusionError::InvalidConfiguration(msg.to_string())
    }

    /// Create a error with the kind `InvalidInput`.
    pub fn invalid_input<T: ToString>(msg: T) -> Self {
        FusionError::InvalidInput(msg.to_string())
    }

    /// Create a error with the kind `ExtractionFailed`.
    pub fn extraction_failed<T: ToString>(msg: T) -> Self {
        FusionError::ExtractionFailed(msg.to_string())
    }
}

impl std::error::Error for FusionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FusionError::Io(err) => Some(err),
            FusionError::InvalidConfiguration(_) => None,
            FusionError::InvalidInput(_) => None,
            FusionError::ExtractionFailed(_) => None,
            FusionError::Parser(_) => None,
        }
    }
}

impl From<LoadError> for FusionError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::IO(err) => FusionError::Io(err),
            LoadError::ParseError(msg) => FusionError::Parser(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FusionError;
    use crate::io::{read_ply, LoadError};

    fn load_missing_mesh() -> Result<(), FusionError> {
        read_ply("does/not/exist.ply")?;
        Ok(())
    }

    #[test]
    fn test_codec_errors_propagate() {
        assert!(matches!(load_missing_mesh(), Err(FusionError::Io(_))));
    }

    #[test]
    fn test_load_error_mapping() {
        let io_err = LoadError::IO(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(matches!(FusionError::from(io_err), FusionError::Io(_)));

        let parse_err = LoadError::ParseError("bad header".to_string());
        match FusionError::from(parse_err) {
            FusionError::Parser(msg) => assert_eq!(msg, "bad header"),
            other => panic!("expected a parser error, got {}", other),
        }
    }
}
