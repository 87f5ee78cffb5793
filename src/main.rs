use std::process::ExitCode;

use clap::Parser;

use firstfollow::analysis::first::first_sets;
use firstfollow::analysis::follow::follow_sets;
use firstfollow::analysis::useless::useful_rules;
use firstfollow::cli::{task_number, Cli, Task};
use firstfollow::grammar::Grammar;
use firstfollow::parser::{self, CompileErrorType};
use firstfollow::report;

fn run(task: Task, grammar: &Grammar) -> String {
    match task {
        Task::ListSymbols => report::list_symbols(grammar),
        Task::UsefulRules => report::list_rules(&useful_rules(grammar)),
        Task::FirstSets => report::list_first_sets(grammar, &first_sets(grammar)),
        Task::FollowSets => report::list_follow_sets(grammar, &follow_sets(grammar)),
        Task::PredictiveParser => String::new(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(task_arg) = cli.task else {
        println!("Error: missing argument");
        return ExitCode::FAILURE;
    };

    let parsed = match &cli.file {
        Some(path) => parser::parse_file(path),
        None => parser::parse_reader(std::io::stdin().lock(), "<stdin>"),
    };
    let grammar = match parsed {
        Ok(grammar) => grammar,
        Err(error) => {
            if !matches!(error.error, CompileErrorType::FileError(_)) {
                println!("SYNTAX ERROR !!!");
            }
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    let number = task_number(&task_arg);
    match Task::from_number(number) {
        Some(task) => print!("{}", run(task, &grammar)),
        None => println!("Error: unrecognized task number {}", number),
    }

    ExitCode::SUCCESS
}
