//! Derived statistics over a staking sequence or a trade log.
//!
//! Summaries are computed on demand from the records, never stored.

use super::outcome::Outcome;
use super::sequence::Sequence;
use super::sizer::TradeLog;

/// Headline numbers for a staking session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub steps_recorded: usize,
    pub wins: usize,
    pub losses: usize,
    pub pending: usize,
    pub win_rate: f64,
    pub total_profit: f64,
    pub final_balance: f64,
    pub peak_bet: f64,
}

impl SessionSummary {
    pub fn compute(sequence: &Sequence) -> Self {
        let mut wins = 0usize;
        let mut losses = 0usize;
        let mut pending = 0usize;
        let mut peak_bet = 0.0_f64;

        for record in sequence.records() {
            match record.outcome {
                Outcome::Win => wins += 1,
                Outcome::Loss => losses += 1,
                Outcome::Pending => pending += 1,
            }
            if record.bet_in_force > peak_bet {
                peak_bet = record.bet_in_force;
            }
        }

        let decided = wins + losses;
        let win_rate = if decided > 0 {
            wins as f64 / decided as f64
        } else {
            0.0
        };

        SessionSummary {
            steps_recorded: sequence.records().len(),
            wins,
            losses,
            pending,
            win_rate,
            total_profit: sequence.total_profit(),
            final_balance: sequence.current_balance(),
            peak_bet,
        }
    }
}

/// Headline numbers for the fixed-risk trade log.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeLogSummary {
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub avg_return: f64,
    pub total_pnl: f64,
}

impl TradeLogSummary {
    pub fn compute(log: &TradeLog) -> Self {
        let mut wins = 0usize;
        let mut losses = 0usize;
        let mut total_pnl = 0.0_f64;

        for record in log.records() {
            match record.outcome {
                Outcome::Win => wins += 1,
                Outcome::Loss => losses += 1,
                Outcome::Pending => {}
            }
            total_pnl += record.pnl;
        }

        let decided = wins + losses;
        let win_rate = if decided > 0 {
            wins as f64 / decided as f64
        } else {
            0.0
        };
        let avg_return = if decided > 0 {
            total_pnl / decided as f64
        } else {
            0.0
        };

        TradeLogSummary {
            trades: log.len(),
            wins,
            losses,
            win_rate,
            avg_return,
            total_pnl,
        }
    }
}
