//! Staking configuration and the loss-recovery recurrence.
//!
//! The recurrence carries `(bet, loss_streak)` between steps. A win pays
//! `bet * odds` and restarts the progression at `first_bet`; a loss adds the
//! stake to the loss streak and sizes the next stake to
//! `ceil((loss_streak + target_profit) / odds)`, so a winning recovery bet
//! always clears the whole streak plus at least one full profit target.

use super::error::StakewalkError;
use super::outcome::Outcome;

/// Ceiling on the all-loss simulation, in case a degenerate odds value makes
/// the stake sequence grow too slowly to exhaust capital.
pub const MAX_SURVIVAL_ITERATIONS: usize = 100_000;

/// Parameters of one staking sequence. Immutable while the sequence runs,
/// except for `num_steps` which only resizes the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct StakingConfig {
    pub initial_capital: f64,
    pub first_bet: f64,
    pub target_profit: f64,
    pub odds: f64,
    pub num_steps: usize,
}

impl StakingConfig {
    pub fn new(
        initial_capital: f64,
        first_bet: f64,
        target_profit: f64,
        odds: f64,
        num_steps: usize,
    ) -> Result<Self, StakewalkError> {
        if initial_capital <= 0.0 {
            return Err(StakewalkError::invalid_input(
                "initial_capital",
                "must be positive",
            ));
        }
        if first_bet <= 0.0 {
            return Err(StakewalkError::invalid_input("first_bet", "must be positive"));
        }
        if target_profit < 0.0 {
            return Err(StakewalkError::invalid_input(
                "target_profit",
                "must be non-negative",
            ));
        }
        if odds <= 0.0 {
            return Err(StakewalkError::DivergentOdds { odds });
        }
        if num_steps < 1 {
            return Err(StakewalkError::invalid_input(
                "num_steps",
                "must be at least 1",
            ));
        }
        Ok(StakingConfig {
            initial_capital,
            first_bet,
            target_profit,
            odds,
            num_steps,
        })
    }
}

/// Running tail of the recurrence. Always equal to folding [`advance`] over
/// the completed outcome list from [`StakeState::initial`]; a cache, never an
/// independent source of truth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StakeState {
    pub bet: f64,
    pub loss_streak: f64,
    pub balance: f64,
}

impl StakeState {
    pub fn initial(config: &StakingConfig) -> Self {
        StakeState {
            bet: config.first_bet,
            loss_streak: 0.0,
            balance: config.initial_capital,
        }
    }
}

/// Apply one outcome to the running state.
pub fn advance(state: StakeState, outcome: Outcome, config: &StakingConfig) -> StakeState {
    match outcome {
        Outcome::Win => StakeState {
            bet: config.first_bet,
            loss_streak: 0.0,
            balance: state.balance + state.bet * config.odds,
        },
        Outcome::Loss => {
            let loss_streak = state.loss_streak + state.bet;
            let bet = ((loss_streak + config.target_profit) / config.odds).ceil();
            StakeState {
                bet,
                loss_streak,
                balance: state.balance - state.bet,
            }
        }
        Outcome::Pending => state,
    }
}

/// How many consecutive losing steps the configured capital survives before
/// it can no longer cover the next stake. Advisory only; never gates entry.
pub fn max_survivable_steps(config: &StakingConfig) -> usize {
    let mut bet = config.first_bet;
    let mut loss_streak = 0.0;
    let mut capital = config.initial_capital;
    let mut steps = 0usize;

    while capital >= bet && steps < MAX_SURVIVAL_ITERATIONS {
        capital -= bet;
        loss_streak += bet;
        steps += 1;
        bet = ((loss_streak + config.target_profit) / config.odds).ceil();
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> StakingConfig {
        StakingConfig::new(1000.0, 30.0, 1.0, 1.0, 5).unwrap()
    }

    #[test]
    fn config_rejects_non_positive_capital() {
        let err = StakingConfig::new(0.0, 30.0, 1.0, 1.0, 5).unwrap_err();
        assert!(
            matches!(err, StakewalkError::InvalidInput { field, .. } if field == "initial_capital")
        );
    }

    #[test]
    fn config_rejects_non_positive_first_bet() {
        let err = StakingConfig::new(1000.0, -1.0, 1.0, 1.0, 5).unwrap_err();
        assert!(matches!(err, StakewalkError::InvalidInput { field, .. } if field == "first_bet"));
    }

    #[test]
    fn config_rejects_negative_target_profit() {
        let err = StakingConfig::new(1000.0, 30.0, -0.5, 1.0, 5).unwrap_err();
        assert!(
            matches!(err, StakewalkError::InvalidInput { field, .. } if field == "target_profit")
        );
    }

    #[test]
    fn config_allows_zero_target_profit() {
        assert!(StakingConfig::new(1000.0, 30.0, 0.0, 1.0, 5).is_ok());
    }

    #[test]
    fn config_rejects_zero_or_negative_odds_up_front() {
        let err = StakingConfig::new(1000.0, 30.0, 1.0, 0.0, 5).unwrap_err();
        assert!(matches!(err, StakewalkError::DivergentOdds { .. }));

        let err = StakingConfig::new(1000.0, 30.0, 1.0, -2.0, 5).unwrap_err();
        assert!(matches!(err, StakewalkError::DivergentOdds { odds } if odds == -2.0));
    }

    #[test]
    fn config_rejects_zero_steps() {
        let err = StakingConfig::new(1000.0, 30.0, 1.0, 1.0, 0).unwrap_err();
        assert!(matches!(err, StakewalkError::InvalidInput { field, .. } if field == "num_steps"));
    }

    #[test]
    fn initial_state_mirrors_config() {
        let config = sample_config();
        let state = StakeState::initial(&config);
        assert_eq!(state.bet, 30.0);
        assert_eq!(state.loss_streak, 0.0);
        assert_eq!(state.balance, 1000.0);
    }

    #[test]
    fn win_pays_odds_and_resets_progression() {
        let config = sample_config();
        let state = StakeState {
            bet: 62.0,
            loss_streak: 61.0,
            balance: 939.0,
        };
        let next = advance(state, Outcome::Win, &config);
        assert_eq!(next.bet, 30.0);
        assert_eq!(next.loss_streak, 0.0);
        assert_eq!(next.balance, 1001.0);
    }

    #[test]
    fn loss_accumulates_streak_and_sizes_recovery_bet() {
        let config = sample_config();
        let state = StakeState::initial(&config);
        let next = advance(state, Outcome::Loss, &config);
        // ceil((30 + 1) / 1) = 31
        assert_eq!(next.bet, 31.0);
        assert_eq!(next.loss_streak, 30.0);
        assert_eq!(next.balance, 970.0);
    }

    #[test]
    fn loss_recovery_ceil_rounds_up_on_fractional_odds() {
        let config = StakingConfig::new(1000.0, 30.0, 1.0, 1.5, 5).unwrap();
        let state = StakeState::initial(&config);
        let next = advance(state, Outcome::Loss, &config);
        // ceil((30 + 1) / 1.5) = ceil(20.67) = 21; 21 * 1.5 = 31.5 >= 31
        assert_eq!(next.bet, 21.0);
        assert!(next.bet * config.odds >= next.loss_streak + config.target_profit);
    }

    #[test]
    fn pending_leaves_state_untouched() {
        let config = sample_config();
        let state = StakeState {
            bet: 31.0,
            loss_streak: 30.0,
            balance: 970.0,
        };
        assert_eq!(advance(state, Outcome::Pending, &config), state);
    }

    #[test]
    fn survivable_steps_on_all_loss_path() {
        // 30 + 31 + 62 + 124 + 248 + 496 = 991 spent over six steps;
        // the seventh stake (992) exceeds the remaining 9.
        let config = sample_config();
        assert_eq!(max_survivable_steps(&config), 6);
    }

    #[test]
    fn survivable_steps_single_step_capital() {
        let config = StakingConfig::new(30.0, 30.0, 1.0, 1.0, 5).unwrap();
        assert_eq!(max_survivable_steps(&config), 1);
    }

    #[test]
    fn survivable_steps_hits_iteration_ceiling_on_slow_growth() {
        // Tiny first bet with a huge payout keeps the recovery stake at 1,
        // so capital drains one unit at a time.
        let config = StakingConfig::new(1e9, 1.0, 0.0, 1e9, 5).unwrap();
        assert_eq!(max_survivable_steps(&config), MAX_SURVIVAL_ITERATIONS);
    }
}
