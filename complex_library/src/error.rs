use logger::{log, LogLevel};
use thiserror::Error;

use crate::mode::PhaseMode;

pub type ComplexResult<T> = Result<T, ComplexError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplexError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Cannot divide complex number by zero.")]
    DivideByZero,
    #[error("Complex number cannot be converted into a real instance because the imaginary component exists.")]
    InvalidConversion,
    #[error("Leading coefficient of a quadratic equation cannot be zero.")]
    InvalidEquation,
}

impl ComplexError {
    pub(crate) fn negative_radius() -> Self {
        ComplexError::InvalidArgument("Radius cannot be negative.".to_string()).logged()
    }

    pub(crate) fn phase_out_of_range(mode: PhaseMode) -> Self {
        ComplexError::InvalidArgument(format!(
            "Complex argument is not in range {} for the selected phase-mode \"{}\"",
            mode.range(),
            mode
        ))
        .logged()
    }

    pub(crate) fn logged(self) -> Self {
        log!(LogLevel::Error, "complex_library", "{}", self);
        self
    }
}
