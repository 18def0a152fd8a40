//! laborcheck CLI: labor-law compliance self-diagnosis.

use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use laborcheck_core::model::AnswerValue;
use laborcheck_core::profile::{EmploymentType, Industry};

mod commands;

#[derive(Parser)]
#[command(name = "laborcheck", version, about = "Labor-law compliance self-diagnosis")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the session records (overrides config)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter laborcheck.toml
    Init,

    /// Show or update the business profile
    Profile {
        /// Business name
        #[arg(long)]
        name: Option<String>,

        /// Industry (제조업, 서비스업, 건설업, IT, 기타)
        #[arg(long)]
        industry: Option<Industry>,

        /// Regular headcount
        #[arg(long)]
        employees: Option<u32>,

        /// Establishment date (YYYY-MM-DD)
        #[arg(long)]
        established: Option<NaiveDate>,

        /// Employment type present at the business (repeatable)
        #[arg(long = "employment-type")]
        employment_types: Vec<EmploymentType>,

        /// Contact email
        #[arg(long)]
        email: Option<String>,
    },

    /// Start a new diagnosis, discarding saved answers
    Start,

    /// Show the current question
    Show,

    /// Answer the current question and move to the next one
    Answer {
        /// Answer (예, 아니오, 일부, 모름, 확인필요, 해당없음 or yes/no/partial/...)
        value: AnswerValue,
    },

    /// Answer a question by index without moving
    Set {
        /// Question index (0-based)
        index: usize,
        value: AnswerValue,
    },

    /// Move to the next question
    Next,

    /// Move to the previous question
    Prev,

    /// Jump to a question or to the start of a category
    Goto {
        /// Question index (0-based)
        #[arg(required_unless_present = "category", conflicts_with = "category")]
        index: Option<usize>,

        /// Category id
        #[arg(long)]
        category: Option<usize>,
    },

    /// Show progress per category
    Status,

    /// List the questions
    Questions {
        /// Only list one category
        #[arg(long)]
        category: Option<usize>,
    },

    /// Show the diagnosis result
    Result {
        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Action plan items to list (defaults to config)
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = run(cli);

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config;
    let state_dir = cli.state_dir;
    let session = || commands::Session::load(config.as_deref(), state_dir.as_deref());

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Profile {
            name,
            industry,
            employees,
            established,
            employment_types,
            email,
        } => commands::profile::execute(
            &session()?,
            commands::profile::ProfileArgs {
                name,
                industry,
                employees,
                established,
                employment_types,
                email,
            },
        ),
        Commands::Start => commands::navigate::start(&session()?),
        Commands::Show => commands::navigate::show(&session()?),
        Commands::Answer { value } => commands::navigate::answer(&session()?, value),
        Commands::Set { index, value } => commands::navigate::set(&session()?, index, value),
        Commands::Next => commands::navigate::next(&session()?),
        Commands::Prev => commands::navigate::prev(&session()?),
        Commands::Goto { index, category } => {
            commands::navigate::goto(&session()?, index, category)
        }
        Commands::Status => commands::status::execute(&session()?),
        Commands::Questions { category } => commands::questions::execute(&session()?, category),
        Commands::Result {
            format,
            output,
            limit,
        } => commands::result::execute(&session()?, &format, output, limit),
    }
}
