//! Physics faults
//!
//! Geometry that produces a zero-length normal or a non-finite vector cannot
//! be resolved into a position. These abort the current tick instead of
//! letting NaN leak into the ball state.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsError {
    /// A contact normal with zero length (ball center on a corner center)
    DegenerateNormal { context: &'static str },
    /// A computed vector with a NaN or infinite component
    NonFinite { context: &'static str },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateNormal { context } => {
                write!(f, "degenerate zero-length normal in {context}")
            }
            Self::NonFinite { context } => write!(f, "non-finite vector produced by {context}"),
        }
    }
}

impl std::error::Error for PhysicsError {}
