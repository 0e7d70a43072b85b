//! FIR impulse-response synthesis

pub mod windows;
pub mod design;
pub mod rrc;
pub mod band_edge;

pub use windows::{WindowType, generate_window};
pub use design::{DesignVariant, FilterSpec, TapSequence, firwin, design_lowpass_fir};
pub use rrc::design_rrc_fir;
pub use band_edge::{ComplexTaps, design_band_edge_fir};
