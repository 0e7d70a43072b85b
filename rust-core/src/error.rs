//! Error taxonomy for coefficient generation
//!
//! Every failure is terminal for a single design run, so there is one flat
//! enum and no recovery paths.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoeffError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("{design} synthesis produced a non-finite tap at index {index}")]
    NonFiniteTap { design: &'static str, index: usize },

    #[error("Degenerate filter in {stage}: all coefficients are zero")]
    DegenerateFilter { stage: &'static str },

    #[error("DC-gain normalization requires a positive DC gain (found: {dc_gain})")]
    NonPositiveDcGain { dc_gain: f64 },
}

impl CoeffError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        CoeffError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type CoeffResult<T> = Result<T, CoeffError>;
