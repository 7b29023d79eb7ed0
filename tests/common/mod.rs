#![allow(dead_code)]

use stakewalk::domain::outcome::Outcome;
use stakewalk::domain::sequence::{OutcomeEntry, Sequence};
use stakewalk::domain::staking::StakingConfig;
use stakewalk::ports::label_port::LabelSource;

/// Deterministic label source: yields the scripted labels in order, then
/// falls back to numbered fillers.
pub struct ScriptedLabels {
    scripted: Vec<String>,
    issued: usize,
}

impl ScriptedLabels {
    pub fn new(labels: &[&str]) -> Self {
        ScriptedLabels {
            scripted: labels.iter().map(|s| s.to_string()).collect(),
            issued: 0,
        }
    }

    pub fn numbered() -> Self {
        ScriptedLabels::new(&[])
    }
}

impl LabelSource for ScriptedLabels {
    fn next_label(&mut self) -> String {
        let label = match self.scripted.get(self.issued) {
            Some(label) => label.clone(),
            None => format!("label-{}", self.issued + 1),
        };
        self.issued += 1;
        label
    }
}

pub fn sample_config() -> StakingConfig {
    StakingConfig::new(1000.0, 30.0, 1.0, 1.0, 5).unwrap()
}

pub fn sample_sequence() -> Sequence {
    Sequence::new(sample_config(), &mut ScriptedLabels::numbered())
}

pub fn entries_from(outcomes: &[Outcome]) -> Vec<OutcomeEntry> {
    outcomes
        .iter()
        .enumerate()
        .map(|(i, &outcome)| OutcomeEntry::new(i + 1, &format!("label-{}", i + 1), outcome))
        .collect()
}
