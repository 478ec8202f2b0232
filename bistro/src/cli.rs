//! Command line arguments

use std::path::PathBuf;

use bistro_core::{ConfigError, StorefrontConfig, SubmitDelays};
use clap::Parser;
use rust_decimal::Decimal;

/// Bistro - a restaurant storefront in the terminal
#[derive(Parser, Debug)]
#[command(name = "bistro")]
#[command(about = "Browse the menu, order, book a table and manage the restaurant")]
pub struct Args {
    /// Seed data (JSON with menu, reservations, orders, reviews); bundled data otherwise
    #[arg(long, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Configuration file (JSON); every key is optional
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Delivery fee, overrides the config file
    #[arg(long)]
    pub delivery_fee: Option<Decimal>,

    /// Tax rate as a fraction (0.08875), overrides the config file
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Submit without the simulated network delay
    #[arg(long)]
    pub instant: bool,

    /// Write logs to this file; logging is off without it
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Defaults, then the config file, then command line overrides
    pub fn config(&self) -> Result<StorefrontConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => StorefrontConfig::from_path(path)?,
            None => StorefrontConfig::default(),
        };
        if let Some(fee) = self.delivery_fee {
            config = config.with_delivery_fee(fee)?;
        }
        if let Some(rate) = self.tax_rate {
            config = config.with_tax_rate(rate)?;
        }
        if self.instant {
            config = config.with_delays(SubmitDelays::instant());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["bistro"]).unwrap();
        assert!(args.seed.is_none());
        assert_eq!(args.log_level, "info");
        assert_eq!(args.config().unwrap(), StorefrontConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "bistro",
            "--delivery-fee",
            "3.50",
            "--tax-rate",
            "0.1",
            "--instant",
        ])
        .unwrap();
        let config = args.config().unwrap();

        assert_eq!(config.pricing.delivery_fee, Decimal::new(350, 2));
        assert_eq!(config.pricing.tax_rate, Decimal::new(1, 1));
        assert_eq!(config.delays.checkout, Duration::ZERO);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Args::try_parse_from(["bistro", "--tax-rate", "lots"]).is_err());

        let args = Args::try_parse_from(["bistro", "--delivery-fee=-1"]).unwrap();
        assert!(matches!(args.config(), Err(ConfigError::Invalid { key: "delivery_fee", .. })));
    }

    #[test]
    fn test_missing_config_file() {
        let args =
            Args::try_parse_from(["bistro", "--config", "/definitely/not/here.json"]).unwrap();
        assert!(matches!(args.config(), Err(ConfigError::Read { .. })));
    }
}
