use thiserror::Error;

/// Errors raised while building circuits, evaluating costs or training.
#[derive(Debug, Error)]
pub enum VqcError {
    #[error("Expected {expected} parameters, but {actual} were provided")]
    ParameterCount { expected: usize, actual: usize },

    #[error("Index {0} out of bounds for the number of qubits {1}")]
    InvalidQubit(usize, usize),

    #[error("Control and target qubits cannot be the same (qubit {0})")]
    SameQubit(usize),

    #[error("Basis index {index} out of range for dimension {dimension}")]
    InvalidBasis { dimension: usize, index: usize },

    #[error("State vector length must be 4, but got {0}")]
    InvalidStateLength(usize),

    #[error("Invalid bit string '{0}' for a two qubit state")]
    InvalidBitString(String),

    #[error("Expected a vector of length {expected}, but got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Non-finite {quantity} at step {step}")]
    NonFinite { step: usize, quantity: &'static str },

    #[error("Invalid hyperparameter {name} = {value}")]
    InvalidHyperparameter { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, VqcError>;
