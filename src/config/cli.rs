use crate::domain::model::{Field, FormInput};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "adult-enrollment")]
#[command(about = "Registration form for the adult continuing-education program")]
pub struct Cli {
    /// Path to a TOML configuration file (defaults to environment variables)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate and submit one registration
    Submit(SubmitArgs),
    /// Fill in the form field by field on the terminal
    Interactive,
    /// Write the static HTML page with the program information and the form
    Page {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the program information and the employment status options
    Info,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SubmitArgs {
    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub age: String,

    #[arg(long, default_value = "")]
    pub email: String,

    /// One of the labels printed by `info`, e.g. "Estudiante"
    #[arg(long, default_value = "")]
    pub employment_status: String,

    #[arg(long, default_value = "")]
    pub reason: String,
}

impl SubmitArgs {
    /// CLI 參數的名稱，用於錯誤訊息
    pub fn flag_for(field: Field) -> &'static str {
        match field {
            Field::FirstName => "--first-name",
            Field::LastName => "--last-name",
            Field::Age => "--age",
            Field::Email => "--email",
            Field::EmploymentStatus => "--employment-status",
            Field::Reason => "--reason",
        }
    }
}

impl From<SubmitArgs> for FormInput {
    fn from(args: SubmitArgs) -> Self {
        FormInput {
            first_name: args.first_name,
            last_name: args.last_name,
            age: args.age,
            email: args.email,
            employment_status: args.employment_status,
            reason: args.reason,
        }
    }
}

/// 解讀 s/n 問題的回答；輸入結束 (EOF) 一律視為「否」
pub fn parse_confirmation(answer: Option<&str>, default: bool) -> bool {
    let Some(answer) = answer else {
        return false;
    };
    match answer.trim().to_lowercase().as_str() {
        "s" | "si" | "sí" | "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}
