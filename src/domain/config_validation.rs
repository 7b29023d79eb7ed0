//! Configuration validation.
//!
//! Validates every `[staking]` and `[labels]` field before the engine runs,
//! so a divergent or unusable configuration is rejected up front rather than
//! discovered mid-sequence.

use crate::domain::error::StakewalkError;
use crate::ports::config_port::ConfigPort;

pub fn validate_staking_config(config: &dyn ConfigPort) -> Result<(), StakewalkError> {
    validate_initial_capital(config)?;
    validate_first_bet(config)?;
    validate_target_profit(config)?;
    validate_odds(config)?;
    validate_num_steps(config)?;
    validate_labels(config)?;
    Ok(())
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), StakewalkError> {
    let value = config.get_double("staking", "initial_capital", 0.0);
    if value <= 0.0 {
        return Err(StakewalkError::ConfigInvalid {
            section: "staking".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_first_bet(config: &dyn ConfigPort) -> Result<(), StakewalkError> {
    let value = config.get_double("staking", "first_bet", 0.0);
    if value <= 0.0 {
        return Err(StakewalkError::ConfigInvalid {
            section: "staking".to_string(),
            key: "first_bet".to_string(),
            reason: "first_bet must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_target_profit(config: &dyn ConfigPort) -> Result<(), StakewalkError> {
    let value = config.get_double("staking", "target_profit", 0.0);
    if value < 0.0 {
        return Err(StakewalkError::ConfigInvalid {
            section: "staking".to_string(),
            key: "target_profit".to_string(),
            reason: "target_profit must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_odds(config: &dyn ConfigPort) -> Result<(), StakewalkError> {
    let raw = match config.get_string("staking", "odds") {
        Some(s) => s,
        None => {
            return Err(StakewalkError::ConfigMissing {
                section: "staking".to_string(),
                key: "odds".to_string(),
            })
        }
    };
    let value: f64 = match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            return Err(StakewalkError::ConfigInvalid {
                section: "staking".to_string(),
                key: "odds".to_string(),
                reason: format!("expected a number, got '{}'", raw),
            })
        }
    };
    if value <= 0.0 {
        return Err(StakewalkError::DivergentOdds { odds: value });
    }
    Ok(())
}

fn validate_num_steps(config: &dyn ConfigPort) -> Result<(), StakewalkError> {
    let value = config.get_int("staking", "num_steps", 0);
    if value < 1 {
        return Err(StakewalkError::ConfigInvalid {
            section: "staking".to_string(),
            key: "num_steps".to_string(),
            reason: "num_steps must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_labels(config: &dyn ConfigPort) -> Result<(), StakewalkError> {
    if let Some(choices) = config.get_string("labels", "choices") {
        let any_non_empty = choices.split(',').any(|c| !c.trim().is_empty());
        if !any_non_empty {
            return Err(StakewalkError::ConfigInvalid {
                section: "labels".to_string(),
                key: "choices".to_string(),
                reason: "choices must contain at least one label".to_string(),
            });
        }
    }
    Ok(())
}
