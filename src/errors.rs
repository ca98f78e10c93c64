//! All errors that can occur in the strainspread library.

use std::fmt;

pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Debug)]
pub enum SimulationError {
    /// Inconsistent or out of range configuration. Fatal for the run.
    ConfigurationError(String),
    /// A modelling invariant did not hold.
    ConsistencyViolation(String),
    /// Malformed graph input.
    InputFormatError(String),
    IoError(std::io::Error),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::ConfigurationError(message) => {
                write!(f, "ConfigurationError: {}", message)
            }
            SimulationError::ConsistencyViolation(message) => {
                write!(f, "ConsistencyViolation: {}", message)
            }
            SimulationError::InputFormatError(message) => {
                write!(f, "InputFormatError: {}", message)
            }
            SimulationError::IoError(error) => write!(f, "IoError: {}", error),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::IoError(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimulationError {
    fn from(error: std::io::Error) -> Self {
        SimulationError::IoError(error)
    }
}
