//! Reward economy configuration

use crate::{ConfigError, DocketError, DocketResult};
use serde::{Deserialize, Serialize};

/// Reward economy configuration.
///
/// Values come from product, not code; `default()` matches the current
/// schedule and exchange rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Daily login bonus per consecutive-day streak. Index `streak - 1`;
    /// streaks past the end clamp to the last (highest) entry.
    pub daily_bonus_schedule: Vec<u32>,
    /// Exchange rate: coins required for one credit.
    pub coins_per_credit: u64,
    /// Hard cap on credits granted by a single monthly conversion,
    /// regardless of balance.
    pub monthly_credit_cap: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            daily_bonus_schedule: vec![5, 7, 10, 12, 15, 20, 30],
            coins_per_credit: 500,
            monthly_credit_cap: 7,
        }
    }
}

impl RewardConfig {
    /// Validate the configuration.
    ///
    /// Validates:
    /// - daily_bonus_schedule is non-empty and non-decreasing
    /// - coins_per_credit > 0
    /// - monthly_credit_cap > 0
    pub fn validate(&self) -> DocketResult<()> {
        if self.daily_bonus_schedule.is_empty() {
            return Err(DocketError::Config(ConfigError::InvalidValue {
                field: "daily_bonus_schedule".to_string(),
                value: "[]".to_string(),
                reason: "schedule must have at least one entry".to_string(),
            }));
        }

        if self.daily_bonus_schedule.windows(2).any(|w| w[0] > w[1]) {
            return Err(DocketError::Config(ConfigError::InvalidValue {
                field: "daily_bonus_schedule".to_string(),
                value: format!("{:?}", self.daily_bonus_schedule),
                reason: "schedule must be non-decreasing".to_string(),
            }));
        }

        if self.coins_per_credit == 0 {
            return Err(DocketError::Config(ConfigError::InvalidValue {
                field: "coins_per_credit".to_string(),
                value: self.coins_per_credit.to_string(),
                reason: "coins_per_credit must be greater than 0".to_string(),
            }));
        }

        if self.monthly_credit_cap == 0 {
            return Err(DocketError::Config(ConfigError::InvalidValue {
                field: "monthly_credit_cap".to_string(),
                value: self.monthly_credit_cap.to_string(),
                reason: "monthly_credit_cap must be greater than 0".to_string(),
            }));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RewardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_matches_product_values() {
        let config = RewardConfig::default();
        assert_eq!(config.daily_bonus_schedule, vec![5, 7, 10, 12, 15, 20, 30]);
        assert_eq!(config.coins_per_credit, 500);
        assert_eq!(config.monthly_credit_cap, 7);
    }

    #[test]
    fn test_empty_schedule_rejected() {
        let config = RewardConfig {
            daily_bonus_schedule: vec![],
            ..RewardConfig::default()
        };
        let result = config.validate();
        assert!(matches!(
            result,
            Err(DocketError::Config(ConfigError::InvalidValue { field, .. })) if field == "daily_bonus_schedule"
        ));
    }

    #[test]
    fn test_decreasing_schedule_rejected() {
        let config = RewardConfig {
            daily_bonus_schedule: vec![5, 10, 7],
            ..RewardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_exchange_rate_rejected() {
        let config = RewardConfig {
            coins_per_credit: 0,
            ..RewardConfig::default()
        };
        let result = config.validate();
        assert!(matches!(
            result,
            Err(DocketError::Config(ConfigError::InvalidValue { field, .. })) if field == "coins_per_credit"
        ));
    }
}
