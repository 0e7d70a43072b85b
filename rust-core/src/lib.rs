//! FIR Coefficient Generator - fixed-point filter taps for hardware
//!
//! Synthesizes closed-form FIR impulse responses (windowed low-pass,
//! root-raised-cosine, complex band-edge), quantizes them to signed
//! fixed-point codes and sizes the accumulators that consume them.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod filters;
pub mod fixed_point;
pub mod pipeline;
pub mod report;
pub mod config;
pub mod logging;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{CoeffError, CoeffResult};
pub use filters::{DesignVariant, FilterSpec, WindowType};
pub use pipeline::{design, FilterDesign};
