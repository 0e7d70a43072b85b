//! Command-line configuration
//!
//! One subcommand per design. Required options are enforced by clap before
//! anything runs; value ranges are checked by `FilterSpec::validate`.

pub use clap::Parser;
use clap::{Args, Subcommand};

use crate::filters::design::{DEFAULT_COEFFICIENT_WIDTH_BITS, DEFAULT_INPUT_SAMPLE_WIDTH_BITS};
use crate::filters::{DesignVariant, FilterSpec, WindowType};
use crate::logging::{LogConfig, LogLevel};

/// Generate fixed-point FIR filter coefficients for hardware.
#[derive(Parser, Debug)]
#[command(name = "fir-coeffgen", version)]
pub struct Cli {
    /// Diagnostic log level (written to stderr).
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Debug logging with source locations. Overrides --log-level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Per-module filter directives, e.g. "fir_coeffgen::fixed_point=debug".
    #[arg(long, global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Windowed-sinc low-pass filter.
    /// For example: low-pass --sample-rate 2e6 --num-taps 11 --cutoff 100e3
    LowPass(LowPassArgs),

    /// Root-raised-cosine matched filter.
    /// Odd tap counts keep the filter delay an integer number of samples.
    /// For example: rrc --alpha 0.5 --symbol-rate 500e3 --sample-rate 2e6 --num-taps 21
    Rrc(PulseShapeArgs),

    /// Complex band-edge filter for an RRC-shaped signal,
    /// emitted as separate real and imaginary coefficient sets.
    BandEdge(PulseShapeArgs),
}

#[derive(Args, Debug)]
pub struct LowPassArgs {
    /// Cutoff frequency in hertz.
    #[arg(long)]
    pub cutoff: f64,

    /// Window applied to the ideal response.
    #[arg(long, value_enum, default_value_t = WindowType::Hamming)]
    pub window: WindowType,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct PulseShapeArgs {
    /// Roll-off factor, between 0 and 1.
    #[arg(long)]
    pub alpha: f64,

    /// Symbol rate, in symbols/sec.
    #[arg(long)]
    pub symbol_rate: f64,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Sampling frequency in hertz.
    #[arg(long)]
    pub sample_rate: f64,

    /// Number of taps in the filter.
    #[arg(long)]
    pub num_taps: usize,

    /// Number of bits used to store input samples.
    /// Coefficients should usually be 2 bits wider than this.
    #[arg(long, default_value_t = DEFAULT_INPUT_SAMPLE_WIDTH_BITS)]
    pub input_sample_width_bits: u32,

    /// Number of bits used to store coefficients.
    #[arg(long, default_value_t = DEFAULT_COEFFICIENT_WIDTH_BITS)]
    pub coefficient_width_bits: u32,
}

impl Cli {
    /// Build the immutable filter spec for this invocation
    pub fn filter_spec(&self) -> FilterSpec {
        let (design, common) = match &self.command {
            Command::LowPass(args) => (
                DesignVariant::LowPass {
                    cutoff_hz: args.cutoff,
                    window: args.window,
                },
                &args.common,
            ),
            Command::Rrc(args) => (
                DesignVariant::RootRaisedCosine {
                    alpha: args.alpha,
                    symbol_rate: args.symbol_rate,
                },
                &args.common,
            ),
            Command::BandEdge(args) => (
                DesignVariant::BandEdge {
                    alpha: args.alpha,
                    symbol_rate: args.symbol_rate,
                },
                &args.common,
            ),
        };

        FilterSpec {
            design,
            sample_rate: common.sample_rate,
            num_taps: common.num_taps,
            input_sample_width_bits: common.input_sample_width_bits,
            coefficient_width_bits: common.coefficient_width_bits,
        }
    }

    pub fn log_config(&self) -> LogConfig {
        let config = if self.verbose {
            LogConfig::development()
        } else {
            LogConfig {
                level: self.log_level,
                ..Default::default()
            }
        };

        LogConfig {
            filter: self.log_filter.clone(),
            ..config
        }
    }
}
