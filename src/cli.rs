//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_history_adapter::{self, CsvHistoryAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::random_label_adapter::RandomLabelSource;
use crate::domain::config_validation::validate_staking_config;
use crate::domain::error::StakewalkError;
use crate::domain::outcome::Outcome;
use crate::domain::sequence::{Sequence, StepRecord};
use crate::domain::sizer::{size_position, SizingRequest, TradeRecord};
use crate::domain::staking::{max_survivable_steps, StakingConfig};
use crate::domain::summary::SessionSummary;
use crate::ports::config_port::ConfigPort;
use crate::ports::history_port::HistoryPort;

#[derive(Parser, Debug)]
#[command(
    name = "stakewalk",
    about = "Staking progression and position-sizing calculator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run an interactive staking session
    Session {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        import: Option<PathBuf>,
    },
    /// Replay an exported history and print the recomputed table
    Replay {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report how many all-loss steps the configured capital survives
    Precheck {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Size a single trade at fixed risk
    Size {
        #[arg(long)]
        capital: f64,
        #[arg(long)]
        risk_pct: f64,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        stop_loss: f64,
        #[arg(long)]
        target: f64,
        #[arg(long, default_value = "pending")]
        outcome: String,
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        log: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Session { config, import } => run_session(&config, import.as_deref()),
        Command::Replay {
            config,
            input,
            output,
        } => run_replay(&config, &input, output.as_deref()),
        Command::Precheck { config } => run_precheck(&config),
        Command::Size {
            capital,
            risk_pct,
            entry,
            stop_loss,
            target,
            outcome,
            note,
            log,
        } => run_size(
            capital,
            risk_pct,
            entry,
            stop_loss,
            target,
            &outcome,
            note.as_deref(),
            log.as_deref(),
        ),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StakewalkError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Read a validated `[staking]` section into a [`StakingConfig`].
pub fn build_staking_config(adapter: &dyn ConfigPort) -> Result<StakingConfig, StakewalkError> {
    StakingConfig::new(
        adapter.get_double("staking", "initial_capital", 0.0),
        adapter.get_double("staking", "first_bet", 0.0),
        adapter.get_double("staking", "target_profit", 0.0),
        adapter.get_double("staking", "odds", 0.0),
        adapter.get_int("staking", "num_steps", 0).max(0) as usize,
    )
}

fn load_validated_staking_config(path: &Path) -> Result<(FileConfigAdapter, StakingConfig), ExitCode> {
    eprintln!("Loading config from {}", path.display());
    let adapter = load_config(path)?;

    if let Err(e) = validate_staking_config(&adapter) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }

    match build_staking_config(&adapter) {
        Ok(config) => Ok((adapter, config)),
        Err(e) => {
            eprintln!("error: {e}");
            Err((&e).into())
        }
    }
}

fn print_table(sequence: &Sequence) {
    println!(
        "{:>4}  {:<12}  {:<8}  {:>12}  {:>12}  {:>12}",
        "step", "pattern", "outcome", "bet", "next_bet", "balance"
    );
    for record in sequence.records() {
        println!("{}", format_record(record));
    }
}

fn format_record(record: &StepRecord) -> String {
    format!(
        "{:>4}  {:<12}  {:<8}  {:>12.2}  {:>12.2}  {:>12.2}",
        record.step_index,
        record.pattern_label,
        record.outcome.to_string(),
        record.bet_in_force,
        record.next_bet,
        record.balance_after,
    )
}

fn print_summary(sequence: &Sequence) {
    let summary = SessionSummary::compute(sequence);
    eprintln!("\n=== Session Summary ===");
    eprintln!("Steps recorded:   {}", summary.steps_recorded);
    eprintln!(
        "Win / loss:       {} / {} ({:.1}% win rate)",
        summary.wins,
        summary.losses,
        summary.win_rate * 100.0
    );
    if summary.pending > 0 {
        eprintln!("Pending:          {}", summary.pending);
    }
    eprintln!("Peak bet:         {:.2}", summary.peak_bet);
    eprintln!("Final balance:    {:.2}", summary.final_balance);
    let sign = if summary.total_profit >= 0.0 { "+" } else { "" };
    eprintln!("Total profit:     {}{:.2}", sign, summary.total_profit);
}

fn run_session(config_path: &Path, import_path: Option<&Path>) -> ExitCode {
    let (adapter, config) = match load_validated_staking_config(config_path) {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    let mut labels = RandomLabelSource::from_config(&adapter);
    let mut sequence = Sequence::new(config, &mut labels);
    sequence.lock_labels(adapter.get_bool("labels", "locked", false));

    let history = CsvHistoryAdapter;
    if let Some(path) = import_path {
        match history.load(path) {
            Ok(entries) => {
                let count = entries.len();
                sequence.import(entries, &mut labels);
                eprintln!("Imported {} steps from {}", count, path.display());
            }
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    eprintln!(
        "If every step loses, capital covers {} steps",
        max_survivable_steps(sequence.config())
    );
    eprintln!(
        "Commands: w(in) l(oss) p(ending) undo next table summary reset steps <n> export <path> quit"
    );

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(1);
            }
        };
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or("");
        let argument = parts.next().map(str::trim);

        match command {
            "" => {}
            "w" | "win" => record_step(&mut sequence, Outcome::Win),
            "l" | "loss" => record_step(&mut sequence, Outcome::Loss),
            "p" | "pending" => record_step(&mut sequence, Outcome::Pending),
            "u" | "undo" => match sequence.undo() {
                Ok(removed) => eprintln!(
                    "Undid step {} ({}); bet is {:.2}, balance {:.2}",
                    removed.step_index,
                    removed.outcome,
                    sequence.current_bet(),
                    sequence.current_balance(),
                ),
                Err(e) => eprintln!("error: {e}"),
            },
            "t" | "table" => print_table(&sequence),
            "s" | "summary" => print_summary(&sequence),
            "n" | "next" => eprintln!(
                "Next bet if win: {:.2}; if loss: {:.2}",
                sequence.preview_next_bet(Outcome::Win),
                sequence.preview_next_bet(Outcome::Loss),
            ),
            "r" | "reset" => {
                sequence.reset(&mut labels);
                eprintln!(
                    "State reset; bet is {:.2}, balance {:.2}",
                    sequence.current_bet(),
                    sequence.current_balance(),
                );
            }
            "steps" => match argument.and_then(|a| a.parse::<usize>().ok()) {
                Some(num_steps) => match sequence.set_num_steps(num_steps, &mut labels) {
                    Ok(()) => eprintln!("Plan resized to {} steps", num_steps),
                    Err(e) => eprintln!("error: {e}"),
                },
                None => eprintln!("error: steps needs a positive number"),
            },
            "e" | "export" => match argument {
                Some(path) => {
                    let path = PathBuf::from(path);
                    match history.save(&path, sequence.records()) {
                        Ok(()) => eprintln!("History written to: {}", path.display()),
                        Err(e) => eprintln!("error: {e}"),
                    }
                }
                None => eprintln!("error: export needs a file path"),
            },
            "q" | "quit" => break,
            other => eprintln!("unknown command '{other}' (w/l/p, undo, table, summary, next, export <path>, quit)"),
        }
    }

    print_table(&sequence);
    print_summary(&sequence);
    ExitCode::SUCCESS
}

fn record_step(sequence: &mut Sequence, outcome: Outcome) {
    let step_index = sequence.records().len() + 1;
    match sequence.append(step_index, outcome) {
        Ok(record) => {
            println!("{}", format_record(&record));
            eprintln!(
                "Next bet: {:.2} (loss streak {:.2})",
                sequence.current_bet(),
                sequence.current_loss_streak(),
            );
        }
        Err(e) => eprintln!("error: {e}"),
    }
}

fn run_replay(config_path: &Path, input: &Path, output: Option<&Path>) -> ExitCode {
    let (adapter, config) = match load_validated_staking_config(config_path) {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    let mut labels = RandomLabelSource::from_config(&adapter);
    let mut sequence = Sequence::new(config, &mut labels);

    let history = CsvHistoryAdapter;
    let entries = match history.load(input) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Replaying {} steps from {}", entries.len(), input.display());
    sequence.import(entries, &mut labels);

    print_table(&sequence);
    print_summary(&sequence);

    if let Some(path) = output {
        match history.save(path, sequence.records()) {
            Ok(()) => eprintln!("\nHistory written to: {}", path.display()),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_precheck(config_path: &Path) -> ExitCode {
    let (_, config) = match load_validated_staking_config(config_path) {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    let steps = max_survivable_steps(&config);
    println!(
        "all-loss path: {} steps before capital cannot cover the next stake",
        steps
    );
    ExitCode::SUCCESS
}

fn run_size(
    capital: f64,
    risk_pct: f64,
    entry: f64,
    stop_loss: f64,
    target: f64,
    outcome: &str,
    note: Option<&str>,
    log: Option<&Path>,
) -> ExitCode {
    let outcome = match Outcome::parse(outcome) {
        Some(outcome) => outcome,
        None => {
            let err = StakewalkError::invalid_input(
                "outcome",
                "expected one of win, loss, pending",
            );
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let request = SizingRequest {
        capital,
        risk_percent: risk_pct,
        entry,
        stop_loss,
        target,
        outcome,
    };

    let sizing = match size_position(&request) {
        Ok(sizing) => sizing,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!("position_size:  {:.2}", sizing.position_size);
    println!("reward_to_risk: {:.2}", sizing.reward_to_risk);
    if outcome.is_decided() {
        println!("pnl:            {:.2}", sizing.pnl);
        println!("new_capital:    {:.2}", sizing.new_capital);
    }

    if let Some(path) = log {
        let record = TradeRecord {
            logged_at: chrono::Local::now().naive_local(),
            capital_before: request.capital,
            entry: request.entry,
            stop_loss: request.stop_loss,
            target: request.target,
            position_size: sizing.position_size,
            reward_to_risk: sizing.reward_to_risk,
            outcome: request.outcome,
            pnl: sizing.pnl,
            capital_after: sizing.new_capital,
            note: note.unwrap_or("").to_string(),
        };
        match csv_history_adapter::append_trade_row(path, &record) {
            Ok(()) => eprintln!("Logged to: {}", path.display()),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}
