//! Random pattern-label source.

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;

use crate::ports::config_port::ConfigPort;
use crate::ports::label_port::LabelSource;

pub const DEFAULT_CHOICES: [&str; 2] = ["buy", "sell"];

/// Picks each label uniformly from a fixed choice set, like drawing a random
/// buy/sell pattern per step.
pub struct RandomLabelSource {
    choices: Vec<String>,
    rng: ThreadRng,
}

impl RandomLabelSource {
    pub fn new(choices: Vec<String>) -> Self {
        let choices = if choices.is_empty() {
            DEFAULT_CHOICES.iter().map(|s| s.to_string()).collect()
        } else {
            choices
        };
        RandomLabelSource {
            choices,
            rng: rand::thread_rng(),
        }
    }

    /// Build from the `[labels] choices` comma list, falling back to the
    /// defaults when the key is absent.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let choices = config
            .get_string("labels", "choices")
            .map(|raw| {
                raw.split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self::new(choices)
    }
}

impl LabelSource for RandomLabelSource {
    fn next_label(&mut self) -> String {
        self.choices
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }
}
