//! Domain error types.
//!
//! Every variant is a rejected operation, never a crash: validation runs
//! before any mutation, so a returned error implies prior state is untouched.

/// Top-level error type for stakewalk.
#[derive(Debug, thiserror::Error)]
pub enum StakewalkError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("odds must be positive, got {odds}: the recovery stake is undefined")]
    DivergentOdds { odds: f64 },

    #[error("step {attempted} is out of order: next recordable step is {expected}")]
    OutOfOrder { attempted: usize, expected: usize },

    #[error("import is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("malformed import row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("history file error: {reason}")]
    HistoryFile { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StakewalkError {
    pub fn invalid_input(field: &str, reason: &str) -> Self {
        StakewalkError::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<&StakewalkError> for std::process::ExitCode {
    fn from(err: &StakewalkError) -> Self {
        let code: u8 = match err {
            StakewalkError::Io(_) => 1,
            StakewalkError::ConfigParse { .. }
            | StakewalkError::ConfigMissing { .. }
            | StakewalkError::ConfigInvalid { .. } => 2,
            StakewalkError::InvalidInput { .. } | StakewalkError::DivergentOdds { .. } => 3,
            StakewalkError::OutOfOrder { .. } => 4,
            StakewalkError::MissingColumns { .. }
            | StakewalkError::MalformedRow { .. }
            | StakewalkError::HistoryFile { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_names() {
        let err = StakewalkError::MissingColumns {
            missing: vec!["step".to_string(), "outcome".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "import is missing required columns: step, outcome"
        );
    }

    #[test]
    fn out_of_order_names_both_steps() {
        let err = StakewalkError::OutOfOrder {
            attempted: 5,
            expected: 3,
        };
        assert_eq!(
            err.to_string(),
            "step 5 is out of order: next recordable step is 3"
        );
    }

    #[test]
    fn divergent_odds_reports_value() {
        let err = StakewalkError::DivergentOdds { odds: -0.5 };
        assert!(err.to_string().contains("-0.5"));
    }

    #[test]
    fn exit_codes_are_stable() {
        use std::process::ExitCode;

        let io: ExitCode = (&StakewalkError::Io(std::io::Error::other("x"))).into();
        assert_eq!(format!("{:?}", io), format!("{:?}", ExitCode::from(1)));

        let config: ExitCode = (&StakewalkError::ConfigMissing {
            section: "staking".into(),
            key: "odds".into(),
        })
            .into();
        assert_eq!(format!("{:?}", config), format!("{:?}", ExitCode::from(2)));

        let invalid: ExitCode = (&StakewalkError::invalid_input("entry", "x")).into();
        assert_eq!(format!("{:?}", invalid), format!("{:?}", ExitCode::from(3)));

        let order: ExitCode = (&StakewalkError::OutOfOrder {
            attempted: 2,
            expected: 1,
        })
            .into();
        assert_eq!(format!("{:?}", order), format!("{:?}", ExitCode::from(4)));

        let malformed: ExitCode = (&StakewalkError::MalformedRow {
            row: 1,
            reason: "x".into(),
        })
            .into();
        assert_eq!(
            format!("{:?}", malformed),
            format!("{:?}", ExitCode::from(5))
        );
    }
}
