//! Error types for ESOP collapsing and PLA handling
//!
//! Each error source has its own enum; operations that can fail for more
//! than one reason get a wrapper enum combining only the errors they can
//! actually produce. Everything converts into `io::Error` for callers that
//! funnel errors through IO results.

use std::fmt;
use std::io;

/// The input function has more variables than the 32 the packed cube
/// representation can hold.
///
/// Raised before any work is done, by the AIG collapser, the BDD extractor
/// and the PLA reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    /// The offending input count.
    pub n_inputs: u32,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot handle more than 32 input variables (function has {})",
            self.n_inputs
        )
    }
}

impl std::error::Error for CapacityError {}

impl From<CapacityError> for io::Error {
    fn from(err: CapacityError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

/// Errors in the structure of a PLA file.
///
/// Malformed cube lines are not errors: the reader reports and skips them,
/// continuing best-effort. These variants cover problems the reader cannot
/// recover from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaError {
    /// No `.i` directive before the first cube line.
    MissingInputDirective,
    /// No `.o` directive before the first cube line.
    MissingOutputDirective,
    /// The `.i` directive value is not a number.
    InvalidInputDirective {
        /// The invalid value string.
        value: String,
    },
    /// The `.o` directive value is not a number.
    InvalidOutputDirective {
        /// The invalid value string.
        value: String,
    },
    /// The declared input count exceeds the 32-variable capacity.
    Capacity(CapacityError),
}

impl fmt::Display for PlaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaError::MissingInputDirective => {
                write!(f, "PLA file has no .i directive before its cubes")
            }
            PlaError::MissingOutputDirective => {
                write!(f, "PLA file has no .o directive before its cubes")
            }
            PlaError::InvalidInputDirective { value } => {
                write!(f, "Invalid .i directive value: '{}'", value)
            }
            PlaError::InvalidOutputDirective { value } => {
                write!(f, "Invalid .o directive value: '{}'", value)
            }
            PlaError::Capacity(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PlaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlaError::Capacity(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CapacityError> for PlaError {
    fn from(err: CapacityError) -> Self {
        PlaError::Capacity(err)
    }
}

impl From<PlaError> for io::Error {
    fn from(err: PlaError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Errors produced while reading PLA data.
#[derive(Debug)]
pub enum PlaReadError {
    /// PLA format error.
    Pla(PlaError),
    /// IO error during reading.
    Io(io::Error),
}

impl fmt::Display for PlaReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaReadError::Pla(e) => write!(f, "PLA format error: {}", e),
            PlaReadError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for PlaReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlaReadError::Pla(e) => Some(e),
            PlaReadError::Io(e) => Some(e),
        }
    }
}

impl From<PlaError> for PlaReadError {
    fn from(err: PlaError) -> Self {
        PlaReadError::Pla(err)
    }
}

impl From<io::Error> for PlaReadError {
    fn from(err: io::Error) -> Self {
        PlaReadError::Io(err)
    }
}

impl From<PlaReadError> for io::Error {
    fn from(err: PlaReadError) -> Self {
        match err {
            PlaReadError::Io(e) => e,
            PlaReadError::Pla(e) => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

/// Errors produced while writing PLA data.
#[derive(Debug)]
pub enum PlaWriteError {
    /// IO error during writing.
    Io(io::Error),
}

impl fmt::Display for PlaWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaWriteError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for PlaWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlaWriteError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for PlaWriteError {
    fn from(err: io::Error) -> Self {
        PlaWriteError::Io(err)
    }
}

impl From<PlaWriteError> for io::Error {
    fn from(err: PlaWriteError) -> Self {
        match err {
            PlaWriteError::Io(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn capacity_error_message() {
        let err = CapacityError { n_inputs: 40 };
        assert!(err.to_string().contains("32"));
        assert!(err.to_string().contains("40"));
    }

    #[test]
    fn pla_error_messages() {
        let err = PlaError::InvalidInputDirective {
            value: "abc".to_string(),
        };
        assert!(err.to_string().contains("'abc'"));
        assert!(PlaError::MissingOutputDirective.to_string().contains(".o"));
    }

    #[test]
    fn read_error_wraps_sources() {
        let err: PlaReadError = PlaError::MissingInputDirective.into();
        assert!(matches!(err, PlaReadError::Pla(_)));
        assert!(err.source().is_some());

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: PlaReadError = io_err.into();
        assert!(matches!(err, PlaReadError::Io(_)));
    }

    #[test]
    fn io_conversion_preserves_io_errors() {
        let original = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let read_err = PlaReadError::Io(original);
        let io_err: io::Error = read_err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn capacity_converts_into_pla_error() {
        let err: PlaError = CapacityError { n_inputs: 33 }.into();
        assert!(matches!(err, PlaError::Capacity(_)));
        assert_eq!(io::Error::from(err).kind(), io::ErrorKind::InvalidData);
    }
}
