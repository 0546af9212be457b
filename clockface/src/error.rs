//! Errors raised by the face mapping

use thiserror::Error;

use crate::mode::ClockMode;

/// Misuse of the face mapping by the host
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FaceError {
    /// Value outside the domain of its mode
    #[error("value {value} is outside the {mode} domain")]
    InvalidValue { value: u32, mode: ClockMode },
    /// Tick layout with nothing to lay out
    #[error("tick layout needs a positive count and step (count {count}, step {step})")]
    InvalidLayout { count: usize, step: u32 },
}
