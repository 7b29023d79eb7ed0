//! Staking sequence state: replay, append, undo, import.
//!
//! Every mutation path goes through the same fold. [`replay`] re-derives all
//! step records from the configuration and an outcome list; [`Sequence::append`]
//! is the O(1) incremental case and must agree with a replay from scratch.
//! Mutations validate before touching state, so a returned error leaves the
//! sequence exactly as it was.

use super::error::StakewalkError;
use super::outcome::Outcome;
use super::staking::{advance, StakeState, StakingConfig};
use crate::ports::label_port::LabelSource;

/// One derived row of the progression table. Fully determined by the
/// configuration and the outcomes up to and including this step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub step_index: usize,
    pub pattern_label: String,
    pub outcome: Outcome,
    pub bet_in_force: f64,
    pub next_bet: f64,
    pub loss_streak_after: f64,
    pub balance_after: f64,
}

/// An externally supplied history row. Derived columns are never imported;
/// they are recomputed by replay.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeEntry {
    pub step_index: usize,
    pub pattern_label: String,
    pub outcome: Outcome,
}

impl OutcomeEntry {
    pub fn new(step_index: usize, pattern_label: &str, outcome: Outcome) -> Self {
        OutcomeEntry {
            step_index,
            pattern_label: pattern_label.to_string(),
            outcome,
        }
    }
}

impl From<&StepRecord> for OutcomeEntry {
    fn from(record: &StepRecord) -> Self {
        OutcomeEntry {
            step_index: record.step_index,
            pattern_label: record.pattern_label.clone(),
            outcome: record.outcome,
        }
    }
}

/// Fold the recurrence over an ordered outcome list from the initial state.
///
/// Single source of truth for all derived state. Records are numbered 1..n in
/// list order; the returned state is the tail of the fold.
pub fn replay(config: &StakingConfig, entries: &[OutcomeEntry]) -> (Vec<StepRecord>, StakeState) {
    let mut state = StakeState::initial(config);
    let mut records = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let next = advance(state, entry.outcome, config);
        records.push(StepRecord {
            step_index: i + 1,
            pattern_label: entry.pattern_label.clone(),
            outcome: entry.outcome,
            bet_in_force: state.bet,
            next_bet: next.bet,
            loss_streak_after: next.loss_streak,
            balance_after: next.balance,
        });
        state = next;
    }

    (records, state)
}

/// One staking sequence: configuration, the planned label list, completed
/// records, and the cached tail state of the fold.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    config: StakingConfig,
    labels: Vec<String>,
    labels_locked: bool,
    records: Vec<StepRecord>,
    state: StakeState,
}

impl Sequence {
    pub fn new(config: StakingConfig, source: &mut dyn LabelSource) -> Self {
        let labels = (0..config.num_steps).map(|_| source.next_label()).collect();
        let state = StakeState::initial(&config);
        Sequence {
            config,
            labels,
            labels_locked: false,
            records: Vec::new(),
            state,
        }
    }

    pub fn config(&self) -> &StakingConfig {
        &self.config
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn labels_locked(&self) -> bool {
        self.labels_locked
    }

    pub fn lock_labels(&mut self, locked: bool) {
        self.labels_locked = locked;
    }

    pub fn current_bet(&self) -> f64 {
        self.state.bet
    }

    pub fn current_loss_streak(&self) -> f64 {
        self.state.loss_streak
    }

    pub fn current_balance(&self) -> f64 {
        self.state.balance
    }

    pub fn total_profit(&self) -> f64 {
        self.state.balance - self.config.initial_capital
    }

    /// The stake that would be in force after `outcome`, without mutating
    /// anything. Used for next-bet previews.
    pub fn preview_next_bet(&self, outcome: Outcome) -> f64 {
        advance(self.state, outcome, &self.config).bet
    }

    /// `(step_index, balance_after)` series for charting. A pure projection
    /// of the same records the table shows; the two cannot diverge.
    pub fn equity_series(&self) -> Vec<(usize, f64)> {
        self.records
            .iter()
            .map(|r| (r.step_index, r.balance_after))
            .collect()
    }

    /// Record the outcome for `step_index`. Outcomes are supplied in strict
    /// step order: the only recordable step is the one immediately after the
    /// last recorded step, and it must lie within the planned step count.
    pub fn append(
        &mut self,
        step_index: usize,
        outcome: Outcome,
    ) -> Result<StepRecord, StakewalkError> {
        let expected = self.records.len() + 1;
        if step_index != expected {
            return Err(StakewalkError::OutOfOrder {
                attempted: step_index,
                expected,
            });
        }
        let label = match self.labels.get(step_index - 1) {
            Some(label) => label.clone(),
            None => {
                return Err(StakewalkError::invalid_input(
                    "step_index",
                    "beyond the planned number of steps",
                ))
            }
        };

        let next = advance(self.state, outcome, &self.config);
        let record = StepRecord {
            step_index,
            pattern_label: label,
            outcome,
            bet_in_force: self.state.bet,
            next_bet: next.bet,
            loss_streak_after: next.loss_streak,
            balance_after: next.balance,
        };
        self.records.push(record.clone());
        self.state = next;
        Ok(record)
    }

    /// Remove the last record and re-derive the cached state by a full
    /// replay of what remains. Returns the removed record.
    pub fn undo(&mut self) -> Result<StepRecord, StakewalkError> {
        let removed = match self.records.pop() {
            Some(record) => record,
            None => {
                return Err(StakewalkError::invalid_input(
                    "history",
                    "no recorded steps to undo",
                ))
            }
        };
        let entries: Vec<OutcomeEntry> = self.records.iter().map(OutcomeEntry::from).collect();
        let (records, state) = replay(&self.config, &entries);
        self.records = records;
        self.state = state;
        Ok(removed)
    }

    /// Replace the whole history with externally supplied rows. Rows are
    /// sorted by step index and fully replayed; the imported length is
    /// authoritative for the label plan, which is then topped up with fresh
    /// labels out to the planned step count.
    pub fn import(&mut self, mut entries: Vec<OutcomeEntry>, source: &mut dyn LabelSource) {
        entries.sort_by_key(|e| e.step_index);
        let (records, state) = replay(&self.config, &entries);

        self.labels = records.iter().map(|r| r.pattern_label.clone()).collect();
        while self.labels.len() < self.config.num_steps {
            self.labels.push(source.next_label());
        }

        self.records = records;
        self.state = state;
    }

    /// Drop all records and re-derive the initial state. Regenerates the
    /// label plan unless it is locked.
    pub fn reset(&mut self, source: &mut dyn LabelSource) {
        self.records.clear();
        self.state = StakeState::initial(&self.config);
        if !self.labels_locked {
            self.labels = (0..self.config.num_steps)
                .map(|_| source.next_label())
                .collect();
        }
    }

    /// Resize the planned step count. Growing appends fresh labels; shrinking
    /// truncates the label plan but never the recorded history.
    pub fn set_num_steps(
        &mut self,
        num_steps: usize,
        source: &mut dyn LabelSource,
    ) -> Result<(), StakewalkError> {
        if num_steps < 1 {
            return Err(StakewalkError::invalid_input(
                "num_steps",
                "must be at least 1",
            ));
        }
        self.config.num_steps = num_steps;
        if self.labels.len() > num_steps {
            self.labels.truncate(num_steps);
        } else {
            while self.labels.len() < num_steps {
                self.labels.push(source.next_label());
            }
        }
        Ok(())
    }
}
