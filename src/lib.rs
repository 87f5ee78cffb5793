pub mod analysis;
pub mod cli;
pub mod error_handling;
pub mod grammar;
pub mod parser;
pub mod report;
