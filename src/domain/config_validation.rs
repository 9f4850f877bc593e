//! Configuration validation.
//!
//! All config keys are checked before any data is fetched or simulated, so a
//! bad config surfaces as a single failure with no partial results.

use crate::domain::error::MacdvolError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), MacdvolError> {
    validate_dates(config)?;
    validate_initial_cash(config)?;
    validate_macd_periods(config)?;
    validate_volume_filter(config)?;
    Ok(())
}

fn validate_initial_cash(config: &dyn ConfigPort) -> Result<(), MacdvolError> {
    let value = config.get_double("backtest", "initial_cash", 100_000.0);
    if value <= 0.0 {
        return Err(MacdvolError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_cash".to_string(),
            reason: "initial_cash must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), MacdvolError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(MacdvolError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

pub fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, MacdvolError> {
    match value {
        None => Err(MacdvolError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| MacdvolError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}

fn validate_macd_periods(config: &dyn ConfigPort) -> Result<(), MacdvolError> {
    let fast = config.get_int("strategy", "fast_period", 12);
    let slow = config.get_int("strategy", "slow_period", 26);
    let signal = config.get_int("strategy", "signal_period", 9);

    for (key, value) in [
        ("fast_period", fast),
        ("slow_period", slow),
        ("signal_period", signal),
    ] {
        if value <= 0 {
            return Err(MacdvolError::ConfigInvalid {
                section: "strategy".to_string(),
                key: key.to_string(),
                reason: format!("{} must be positive", key),
            });
        }
    }

    if fast >= slow {
        return Err(MacdvolError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "fast_period".to_string(),
            reason: "fast_period must be less than slow_period".to_string(),
        });
    }
    Ok(())
}

fn validate_volume_filter(config: &dyn ConfigPort) -> Result<(), MacdvolError> {
    let window = config.get_int("strategy", "volume_window", 20);
    if window <= 0 {
        return Err(MacdvolError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "volume_window".to_string(),
            reason: "volume_window must be positive".to_string(),
        });
    }

    let factor = config.get_double("strategy", "volume_factor", 1.2);
    if factor <= 0.0 {
        return Err(MacdvolError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "volume_factor".to_string(),
            reason: "volume_factor must be positive".to_string(),
        });
    }
    Ok(())
}
