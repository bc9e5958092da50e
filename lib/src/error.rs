//! Error types shared by parsing, balancing and equation algebra.

use malachite::Rational;
use thiserror::Error;

/// Errors that can occur while parsing or balancing chemical equations
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// Formula or equation text is malformed
    /// (unmatched delimiters, illegal characters, dangling letters or digits, missing arrow)
    #[error("invalid syntax: {0}")]
    InvalidSyntax(String),

    /// Element symbol is not in the periodic table
    #[error("unknown element symbol '{0}'")]
    UnknownElement(String),

    /// No valid integer coefficients exist for the reaction
    #[error(transparent)]
    Balancing(#[from] BalancingError),

    /// Operand is not compatible with the requested operation
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
}

impl Error {
    /// Creates an [`InvalidSyntax`](Error::InvalidSyntax) error
    pub fn syntax(details: impl Into<String>) -> Self {
        Self::InvalidSyntax(details.into())
    }

    /// Creates a [`TypeMismatch`](Error::TypeMismatch) error
    pub fn mismatch(details: impl Into<String>) -> Self {
        Self::TypeMismatch(details.into())
    }
}

/// Balancing failed: the stoichiometric matrix has no usable kernel vector.
///
/// Carries the exact kernel basis that was examined and, when the solver got
/// that far, the normalized ratio vector and the attempted integer solution.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct BalancingError {
    message: String,
    kernel: Vec<Vec<Rational>>,
    ratios: Option<Vec<Rational>>,
    solution: Option<Vec<i64>>,
}

impl BalancingError {
    /// Creates a new balancing error for the given kernel basis
    pub fn new(message: impl Into<String>, kernel: Vec<Vec<Rational>>) -> Self {
        Self {
            message: message.into(),
            kernel,
            ratios: None,
            solution: None,
        }
    }

    /// Attaches the normalized ratio vector
    pub fn with_ratios(mut self, ratios: Vec<Rational>) -> Self {
        self.ratios = Some(ratios);
        self
    }

    /// Attaches the attempted integer solution
    pub fn with_solution(mut self, solution: Vec<i64>) -> Self {
        self.solution = Some(solution);
        self
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the kernel (null space) basis vectors that were examined
    pub fn kernel(&self) -> &[Vec<Rational>] {
        &self.kernel
    }

    /// Returns the normalized ratio vector, if one was computed
    pub fn ratios(&self) -> Option<&[Rational]> {
        self.ratios.as_deref()
    }

    /// Returns the integer coefficients converted before a coefficient overflowed `i64`
    pub fn solution(&self) -> Option<&[i64]> {
        self.solution.as_deref()
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
