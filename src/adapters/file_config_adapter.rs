//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[staking]
initial_capital = 1000.0
first_bet = 30.0
target_profit = 1.0
odds = 1.0
num_steps = 5

[labels]
choices = buy,sell
locked = false
"#;

    #[test]
    fn from_string_parses_staking_section() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_double("staking", "initial_capital", 0.0), 1000.0);
        assert_eq!(adapter.get_double("staking", "first_bet", 0.0), 30.0);
        assert_eq!(adapter.get_int("staking", "num_steps", 0), 5);
        assert_eq!(
            adapter.get_string("labels", "choices"),
            Some("buy,sell".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[staking]\nodds = 1.0\n").unwrap();
        assert_eq!(adapter.get_string("staking", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing_or_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[staking]\nnum_steps = abc\n").unwrap();
        assert_eq!(adapter.get_int("staking", "num_steps", 42), 42);
        assert_eq!(adapter.get_int("staking", "missing", 7), 7);
    }

    #[test]
    fn get_double_returns_default_for_missing_or_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[staking]\nfirst_bet = not_a_number\n").unwrap();
        assert_eq!(adapter.get_double("staking", "first_bet", 99.9), 99.9);
        assert_eq!(adapter.get_double("staking", "missing", 0.5), 0.5);
    }

    #[test]
    fn get_bool_parses_common_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[labels]\na = true\nb = yes\nc = 1\nd = no\n")
                .unwrap();
        assert!(adapter.get_bool("labels", "a", false));
        assert!(adapter.get_bool("labels", "b", false));
        assert!(adapter.get_bool("labels", "c", false));
        assert!(!adapter.get_bool("labels", "d", true));
        assert!(adapter.get_bool("labels", "missing", true));
    }

    #[test]
    fn non_ascii_label_choices_survive_parsing() {
        let adapter =
            FileConfigAdapter::from_string("[labels]\nchoices = พุธ,คอ\n").unwrap();
        assert_eq!(
            adapter.get_string("labels", "choices"),
            Some("พุธ,คอ".to_string())
        );
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_double("staking", "odds", 0.0), 1.0);
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }
}
