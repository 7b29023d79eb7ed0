//! Fixed-risk position sizing and the session trade log.
//!
//! Each sizing call is independent: there is no recurrence to replay, so the
//! log is display-only and append-only.

use chrono::NaiveDateTime;

use super::error::StakewalkError;
use super::outcome::Outcome;

/// Inputs for one fixed-risk sizing calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingRequest {
    pub capital: f64,
    pub risk_percent: f64,
    pub entry: f64,
    pub stop_loss: f64,
    pub target: f64,
    pub outcome: Outcome,
}

/// Result of a sizing calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sizing {
    pub position_size: f64,
    pub reward_to_risk: f64,
    pub pnl: f64,
    pub new_capital: f64,
}

/// Size a position so that a stop-out loses exactly `risk_percent` of
/// capital. Fails before any state is touched when the risk-per-unit term
/// would be zero or an input is out of range.
pub fn size_position(request: &SizingRequest) -> Result<Sizing, StakewalkError> {
    if request.capital <= 0.0 {
        return Err(StakewalkError::invalid_input("capital", "must be positive"));
    }
    if request.risk_percent < 0.0 {
        return Err(StakewalkError::invalid_input(
            "risk_percent",
            "must be non-negative",
        ));
    }
    for (field, value) in [
        ("entry", request.entry),
        ("stop_loss", request.stop_loss),
        ("target", request.target),
    ] {
        if value < 0.0 {
            return Err(StakewalkError::invalid_input(field, "must be non-negative"));
        }
    }
    if request.entry == request.stop_loss {
        return Err(StakewalkError::invalid_input(
            "stop_loss",
            "must differ from entry",
        ));
    }

    let risk_amount = request.capital * request.risk_percent / 100.0;
    let risk_per_unit = (request.entry - request.stop_loss).abs();
    let position_size = risk_amount / risk_per_unit;
    let reward_to_risk = (request.target - request.entry).abs() / risk_per_unit;

    let pnl = match request.outcome {
        Outcome::Win => (request.target - request.entry) * position_size,
        Outcome::Loss => (request.stop_loss - request.entry) * position_size,
        Outcome::Pending => 0.0,
    };

    Ok(Sizing {
        position_size,
        reward_to_risk,
        pnl,
        new_capital: request.capital + pnl,
    })
}

/// One immutable trade-log row. Never replayed; shown as entered.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub logged_at: NaiveDateTime,
    pub capital_before: f64,
    pub entry: f64,
    pub stop_loss: f64,
    pub target: f64,
    pub position_size: f64,
    pub reward_to_risk: f64,
    pub outcome: Outcome,
    pub pnl: f64,
    pub capital_after: f64,
    pub note: String,
}

/// Append-only log of sizing calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeLog {
    records: Vec<TradeRecord>,
}

impl TradeLog {
    pub fn new() -> Self {
        TradeLog::default()
    }

    pub fn record(
        &mut self,
        request: &SizingRequest,
        sizing: &Sizing,
        note: &str,
        logged_at: NaiveDateTime,
    ) -> &TradeRecord {
        self.records.push(TradeRecord {
            logged_at,
            capital_before: request.capital,
            entry: request.entry,
            stop_loss: request.stop_loss,
            target: request.target,
            position_size: sizing.position_size,
            reward_to_risk: sizing.reward_to_risk,
            outcome: request.outcome,
            pnl: sizing.pnl,
            capital_after: sizing.new_capital,
            note: note.to_string(),
        });
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
