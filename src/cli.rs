//! Command-line interface definitions and argument parsing

use clap::Parser;

use crate::model::DEFAULT_SEED;
use crate::potential::MacroParams;

/// Parking-levy potential estimation and site segmentation CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the site table CSV. Omit to compute city-wide figures only.
    /// Required columns: Jenis, Kecamatan, Kelurahan, Lokasi,
    /// RATA-RATA YANG PARKIR
    #[arg(short, long)]
    pub input: Option<String>,

    /// Total registered two-wheelers in the city
    #[arg(long, default_value = "41564")]
    pub two_wheelers: u64,

    /// Total registered four-wheelers in the city
    #[arg(long, default_value = "13369")]
    pub four_wheelers: u64,

    /// Average parking tariff (Rp per paying vehicle)
    #[arg(long, default_value = "2000")]
    pub tariff: f64,

    /// Share of vehicles that pay the levy, in percent (0-100)
    #[arg(long, default_value = "25.0")]
    pub pay_fraction: f64,

    /// Official target as a share of potential, in percent (0-150)
    #[arg(long, default_value = "80.0")]
    pub target_realization: f64,

    /// Number of clusters for K-Means segmentation (1-3)
    #[arg(short = 'k', long, default_value = "3")]
    pub clusters: usize,

    /// Maximum iterations for K-Means algorithm
    #[arg(long, default_value = "300")]
    pub max_iters: usize,

    /// Tolerance for K-Means convergence
    #[arg(long, default_value = "1e-4")]
    pub tolerance: f64,

    /// RNG seed for K-Means initialization
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output path for the segmentation plot
    #[arg(short, long, default_value = "segmentation_plot.png")]
    pub output: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Validate macro parameter ranges and build [`MacroParams`].
    pub fn macro_params(&self) -> crate::Result<MacroParams> {
        if self.tariff < 0.0 {
            anyhow::bail!("tariff must not be negative, got {}", self.tariff);
        }
        if !(0.0..=100.0).contains(&self.pay_fraction) {
            anyhow::bail!(
                "pay fraction must be between 0 and 100 percent, got {}",
                self.pay_fraction
            );
        }
        if !(0.0..=150.0).contains(&self.target_realization) {
            anyhow::bail!(
                "target realization must be between 0 and 150 percent, got {}",
                self.target_realization
            );
        }

        Ok(MacroParams {
            two_wheelers: self.two_wheelers,
            four_wheelers: self.four_wheelers,
            tariff: self.tariff,
            pay_fraction_pct: self.pay_fraction,
            target_realization_pct: self.target_realization,
        })
    }
}
