//! Fixed-point conversion and accumulator sizing

pub mod quantize;
pub mod normalize;
pub mod bit_growth;

pub use quantize::{FixedPointTaps, QuantizedTaps, Scaling, quantize, quantize_shared};
pub use normalize::{DcNormalization, normalize_dc_gain};
pub use bit_growth::{BitGrowthReport, bit_growth, worst_case_bit_growth};
