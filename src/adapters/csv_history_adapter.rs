//! CSV history adapter.
//!
//! Exports the full progression table and re-imports the three authoritative
//! columns (`step`, `pattern`, `outcome`). Derived columns are written for
//! human readers but ignored on load; replay recomputes them.

use std::path::Path;

use crate::domain::error::StakewalkError;
use crate::domain::outcome::Outcome;
use crate::domain::sequence::{OutcomeEntry, StepRecord};
use crate::ports::history_port::HistoryPort;

pub const REQUIRED_COLUMNS: [&str; 3] = ["step", "pattern", "outcome"];

pub struct CsvHistoryAdapter;

impl CsvHistoryAdapter {
    fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }
}

impl HistoryPort for CsvHistoryAdapter {
    fn load(&self, path: &Path) -> Result<Vec<OutcomeEntry>, StakewalkError> {
        let mut rdr =
            csv::Reader::from_path(path).map_err(|e| StakewalkError::HistoryFile {
                reason: format!("failed to open {}: {}", path.display(), e),
            })?;

        let headers = rdr
            .headers()
            .map_err(|e| StakewalkError::HistoryFile {
                reason: format!("failed to read header: {}", e),
            })?
            .clone();

        let mut indices = [0usize; REQUIRED_COLUMNS.len()];
        let mut missing = Vec::new();
        for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            match Self::column_index(&headers, name) {
                Some(idx) => *slot = idx,
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(StakewalkError::MissingColumns { missing });
        }
        let [step_idx, pattern_idx, outcome_idx] = indices;

        let mut entries = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let row = i + 1;
            let record = result.map_err(|e| StakewalkError::MalformedRow {
                row,
                reason: e.to_string(),
            })?;

            let step_raw = record.get(step_idx).unwrap_or("").trim();
            let step_index: usize =
                step_raw
                    .parse()
                    .map_err(|_| StakewalkError::MalformedRow {
                        row,
                        reason: format!("invalid step value '{}'", step_raw),
                    })?;

            let pattern_label = record.get(pattern_idx).unwrap_or("").to_string();

            let outcome_raw = record.get(outcome_idx).unwrap_or("");
            let outcome =
                Outcome::parse(outcome_raw).ok_or_else(|| StakewalkError::MalformedRow {
                    row,
                    reason: format!("unknown outcome '{}'", outcome_raw),
                })?;

            entries.push(OutcomeEntry {
                step_index,
                pattern_label,
                outcome,
            });
        }

        entries.sort_by_key(|e| e.step_index);
        Ok(entries)
    }

    fn save(&self, path: &Path, records: &[StepRecord]) -> Result<(), StakewalkError> {
        let mut wtr = csv::Writer::from_path(path).map_err(|e| StakewalkError::HistoryFile {
            reason: format!("failed to create {}: {}", path.display(), e),
        })?;

        wtr.write_record([
            "step",
            "pattern",
            "outcome",
            "bet",
            "next_bet",
            "loss_streak",
            "balance",
        ])
        .map_err(|e| StakewalkError::HistoryFile {
            reason: e.to_string(),
        })?;

        for record in records {
            wtr.write_record([
                record.step_index.to_string(),
                record.pattern_label.clone(),
                record.outcome.to_string(),
                record.bet_in_force.to_string(),
                record.next_bet.to_string(),
                record.loss_streak_after.to_string(),
                record.balance_after.to_string(),
            ])
            .map_err(|e| StakewalkError::HistoryFile {
                reason: e.to_string(),
            })?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Append one fixed-risk trade row to a CSV log, writing the header when the
/// file is new. The log is display-only; it is never re-imported.
pub fn append_trade_row(
    path: &Path,
    record: &crate::domain::sizer::TradeRecord,
) -> Result<(), StakewalkError> {
    let exists = path.exists();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if !exists {
        wtr.write_record([
            "logged_at",
            "capital_before",
            "entry",
            "stop_loss",
            "target",
            "position_size",
            "reward_to_risk",
            "outcome",
            "pnl",
            "capital_after",
            "note",
        ])
        .map_err(|e| StakewalkError::HistoryFile {
            reason: e.to_string(),
        })?;
    }

    wtr.write_record([
        record.logged_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        record.capital_before.to_string(),
        record.entry.to_string(),
        record.stop_loss.to_string(),
        record.target.to_string(),
        record.position_size.to_string(),
        record.reward_to_risk.to_string(),
        record.outcome.to_string(),
        record.pnl.to_string(),
        record.capital_after.to_string(),
        record.note.clone(),
    ])
    .map_err(|e| StakewalkError::HistoryFile {
        reason: e.to_string(),
    })?;

    wtr.flush()?;
    Ok(())
}
