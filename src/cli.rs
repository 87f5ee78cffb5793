use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about, allow_negative_numbers = true)]
pub struct Cli {
    /// Task number: 1 symbols, 2 useful rules, 3 FIRST sets, 4 FOLLOW sets,
    /// 5 predictive parser check
    pub task: Option<String>,

    /// Ignored
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// File containing the grammar (default: standard input)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>
}

// Leading integer of `arg` the way C `atoi` reads it: optional whitespace,
// an optional sign, then digits. No digits at all gives 0.
pub fn task_number(arg: &str) -> i64 {
    let arg = arg.trim_start();
    let (negative, digits) = match arg.as_bytes().first() {
        Some(b'-') => (true, &arg[1..]),
        Some(b'+') => (false, &arg[1..]),
        _ => (false, arg),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |n, d| n.saturating_mul(10).saturating_add(i64::from(d - b'0')));

    if negative { -value } else { value }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    ListSymbols,
    UsefulRules,
    FirstSets,
    FollowSets,
    // Accepted, but no check is performed
    PredictiveParser,
}

impl Task {
    pub fn from_number(number: i64) -> Option<Task> {
        match number {
            1 => Some(Task::ListSymbols),
            2 => Some(Task::UsefulRules),
            3 => Some(Task::FirstSets),
            4 => Some(Task::FollowSets),
            5 => Some(Task::PredictiveParser),
            _ => None,
        }
    }
}
