//! Three-valued trade outcome.

use std::fmt;

/// Outcome of a single step or trade. `Pending` is a placeholder: it moves no
/// money and leaves the staking recurrence untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Pending,
    Win,
    Loss,
}

impl Outcome {
    /// Parse a user- or file-supplied token. Case-insensitive; `-` is the
    /// pending marker used by exported tables.
    pub fn parse(token: &str) -> Option<Outcome> {
        match token.trim().to_lowercase().as_str() {
            "win" | "w" => Some(Outcome::Win),
            "loss" | "l" => Some(Outcome::Loss),
            "pending" | "-" => Some(Outcome::Pending),
            _ => None,
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::Pending)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Pending => "pending",
            Outcome::Win => "win",
            Outcome::Loss => "loss",
        };
        write!(f, "{}", s)
    }
}
