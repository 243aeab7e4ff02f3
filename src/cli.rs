use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "compass",
    version,
    about = "Decision support CLI: weighted analysis, financing comparison and decision history"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// History file to read and write instead of the configured one
    #[arg(long, global = true)]
    pub history_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare financing against a consortium plan
    Finance(FinanceCommand),
    /// Rank options from a weighted-criteria file
    Rank(RankCommand),
    /// Ask the advice provider about a decision
    #[command(subcommand)]
    Advise(AdviseCommand),
    /// Record a final decision in the history
    #[command(subcommand)]
    Decide(DecideCommand),
    /// Inspect or clear recorded decisions
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FinanceChoice {
    Financing,
    Consortium,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum YesNoAnswer {
    Yes,
    No,
}

#[derive(Args)]
pub struct FinanceCommand {
    #[arg(long)]
    pub total_value: f64,
    #[arg(long, default_value_t = 0.0)]
    pub down_payment: f64,
    /// Interest rate in percent per month
    #[arg(long)]
    pub interest_rate: f64,
    #[arg(long)]
    pub installments: u32,
    /// Consortium credit value; defaults to --total-value
    #[arg(long)]
    pub consortium_value: Option<f64>,
    /// Consortium administrative fee in percent
    #[arg(long)]
    pub admin_fee: f64,
    #[arg(long)]
    pub consortium_installments: u32,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    #[arg(long)]
    pub context: Option<String>,
    /// Ask the advice provider to compare both options
    #[arg(long, requires = "context")]
    pub advise: bool,
    /// Print the advice prompt instead of calling the provider
    #[arg(long, requires = "advise")]
    pub dry_run: bool,
    /// Record the chosen option in the history
    #[arg(long, value_enum, requires = "context")]
    pub save: Option<FinanceChoice>,
}

#[derive(Args)]
pub struct RankCommand {
    /// TOML (or .json) file with context, criteria and options
    pub path: PathBuf,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    /// Record the named option as the final decision
    #[arg(long)]
    pub save: Option<String>,
}

#[derive(Subcommand)]
pub enum AdviseCommand {
    YesNo(AdviseYesNo),
    MultipleChoice(AdviseMultipleChoice),
    FinancialWeights(AdviseFinancialWeights),
    /// Suggest criteria and weights for a weighted-criteria file
    Weights(AdviseWeights),
}

#[derive(Args)]
pub struct AdviseYesNo {
    #[arg(long)]
    pub context: String,
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct AdviseMultipleChoice {
    #[arg(long)]
    pub context: String,
    /// Option as VALUE or VALUE:DESCRIPTION; repeat for each option
    #[arg(long = "option")]
    pub options: Vec<String>,
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct AdviseFinancialWeights {
    #[arg(long)]
    pub context: String,
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct AdviseWeights {
    pub path: PathBuf,
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum DecideCommand {
    YesNo(DecideYesNo),
    MultipleChoice(DecideMultipleChoice),
    FinancialAnalysis(DecideFinancialAnalysis),
}

#[derive(Args)]
pub struct DecideYesNo {
    #[arg(long)]
    pub context: String,
    #[arg(long, value_enum)]
    pub answer: YesNoAnswer,
}

#[derive(Args)]
pub struct DecideMultipleChoice {
    #[arg(long)]
    pub context: String,
    #[arg(long = "option")]
    pub options: Vec<String>,
    #[arg(long)]
    pub choice: String,
}

#[derive(Args)]
pub struct DecideFinancialAnalysis {
    #[arg(long)]
    pub context: String,
    #[arg(long)]
    pub fixed_cost: f64,
    #[arg(long)]
    pub variable_cost: f64,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    List(HistoryList),
    Clear,
}

#[derive(Args)]
pub struct HistoryList {
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    #[arg(long)]
    pub limit: Option<usize>,
}
