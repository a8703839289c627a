use std::{fmt, io};

#[derive(Debug)]
pub enum Error {
    InvalidData(String),
    InvalidConfig(String),
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    NonConvergence {
        error: f64,
        iterations: usize,
    },
    DegenerateRange {
        min: f64,
        max: f64,
    },
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "shape mismatch: {what} has len {actual}, expected {expected}"
            ),
            Error::NonConvergence { error, iterations } => write!(
                f,
                "network did not converge in {iterations} iterations (last error {error})"
            ),
            Error::DegenerateRange { min, max } => {
                write!(f, "cannot rescale data with observed range [{min}, {max}]")
            }
            Error::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl Error {
    /// Helper for the length checks done at every API boundary.
    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected != actual {
            return Err(Error::ShapeMismatch {
                what,
                expected,
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_len_reports_both_lengths() {
        assert!(Error::check_len("input", 2, 2).is_ok());

        let err = Error::check_len("input", 2, 3).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                what: "input",
                expected: 2,
                actual: 3
            }
        ));
        assert_eq!(err.to_string(), "shape mismatch: input has len 3, expected 2");
    }

    #[test]
    fn non_convergence_message_carries_error_and_iterations() {
        let err = Error::NonConvergence {
            error: 0.25,
            iterations: 10,
        };
        assert_eq!(
            err.to_string(),
            "network did not converge in 10 iterations (last error 0.25)"
        );
    }
}
