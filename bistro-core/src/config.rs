//! Storefront configuration
//!
//! Every value has a default; a JSON file may override any subset:
//!
//! ```json
//! { "delivery_fee": 4.5, "tax_rate": 0.1, "checkout_delay_ms": 500, "notice_ttl_ms": 3000 }
//! ```

use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::money::Pricing;

/// Simulated round-trip time of each submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitDelays {
    pub checkout: Duration,
    pub reservation: Duration,
    pub review: Duration,
}

impl Default for SubmitDelays {
    fn default() -> Self {
        Self {
            checkout: Duration::from_millis(2000),
            reservation: Duration::from_millis(1500),
            review: Duration::from_millis(1000),
        }
    }
}

impl SubmitDelays {
    /// No waiting at all
    pub fn instant() -> Self {
        Self {
            checkout: Duration::ZERO,
            reservation: Duration::ZERO,
            review: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub pricing: Pricing,
    pub delays: SubmitDelays,
    /// How long a notice stays up before it dismisses itself
    pub notice_ttl: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            pricing: Pricing::default(),
            delays: SubmitDelays::default(),
            notice_ttl: Duration::from_secs(4),
        }
    }
}

/// On-disk shape; absent keys fall back to defaults
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    delivery_fee: Option<Decimal>,
    tax_rate: Option<Decimal>,
    checkout_delay_ms: Option<u64>,
    reservation_delay_ms: Option<u64>,
    review_delay_ms: Option<u64>,
    notice_ttl_ms: Option<u64>,
}

impl StorefrontConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(raw)?;
        let mut config = Self::default();

        if let Some(fee) = raw.delivery_fee {
            config = config.with_delivery_fee(fee)?;
        }
        if let Some(rate) = raw.tax_rate {
            config = config.with_tax_rate(rate)?;
        }
        if let Some(ms) = raw.checkout_delay_ms {
            config.delays.checkout = Duration::from_millis(ms);
        }
        if let Some(ms) = raw.reservation_delay_ms {
            config.delays.reservation = Duration::from_millis(ms);
        }
        if let Some(ms) = raw.review_delay_ms {
            config.delays.review = Duration::from_millis(ms);
        }
        if let Some(ms) = raw.notice_ttl_ms {
            if ms == 0 {
                return Err(ConfigError::Invalid {
                    key: "notice_ttl_ms",
                    reason: "must be greater than zero".into(),
                });
            }
            config.notice_ttl = Duration::from_millis(ms);
        }
        Ok(config)
    }

    /// Set the delivery fee; must not be negative
    pub fn with_delivery_fee(mut self, fee: Decimal) -> Result<Self, ConfigError> {
        if fee.is_sign_negative() {
            return Err(ConfigError::Invalid {
                key: "delivery_fee",
                reason: format!("{fee} is negative"),
            });
        }
        self.pricing.delivery_fee = fee;
        Ok(self)
    }

    /// Set the tax rate as a fraction (0.08875 for 8.875%)
    pub fn with_tax_rate(mut self, rate: Decimal) -> Result<Self, ConfigError> {
        if rate.is_sign_negative() || rate >= Decimal::ONE {
            return Err(ConfigError::Invalid {
                key: "tax_rate",
                reason: format!("{rate} is not a fraction between 0 and 1"),
            });
        }
        self.pricing.tax_rate = rate;
        Ok(self)
    }

    pub fn with_delays(mut self, delays: SubmitDelays) -> Self {
        self.delays = delays;
        self
    }
}
