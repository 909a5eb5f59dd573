//! Error types for the confetti overlay.
//!
//! The simulation itself cannot fail once built; these cover construction
//! against a degenerate container and contract violations in the settings.

use std::fmt;

/// Errors that can occur while building a confetti simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfettiError {
    /// The container measured zero (or negative) width or height.
    EmptyContainer { width: f32, height: f32 },
    /// A settings value is outside the range the simulation supports.
    InvalidSettings(String),
}

impl fmt::Display for ConfettiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfettiError::EmptyContainer { width, height } => write!(
                f,
                "Confetti container has no area ({}x{}); it must be laid out before the overlay is created",
                width, height
            ),
            ConfettiError::InvalidSettings(msg) => write!(f, "Invalid confetti settings: {}", msg),
        }
    }
}

impl std::error::Error for ConfettiError {}

impl ConfettiError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ConfettiError::InvalidSettings(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_container_message_names_size() {
        let err = ConfettiError::EmptyContainer {
            width: 0.0,
            height: 480.0,
        };
        assert!(err.to_string().contains("0x480"));
    }
}
