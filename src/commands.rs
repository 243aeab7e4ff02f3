use crate::advice::command::CommandProvider;
use crate::advice::{
    financial_spending_request, prompt, AdviceProvider, AdviceRequest, AdviceResponse,
    ChoiceOption,
};
use crate::calc::{ConsortiumInput, Criterion, DecisionOption, FinancingInput};
use crate::cli::{
    AdviseCommand, DecideCommand, FinanceChoice, FinanceCommand, HistoryCommand, RankCommand,
    ReportFormat, YesNoAnswer,
};
use crate::config;
use crate::error::{CompassError, Result};
use crate::history::{HistoryStore, DEFAULT_HISTORY_FILE};
use crate::report::{self, OutputFormat};
use crate::types::config::CompassConfig;
use crate::types::decision::{Answer, Decision};
use crate::types::report::{FinancialComparison, Ranking};
use crate::validate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_WEIGHTED_CONTEXT: &str = "Weighted Analysis";

/// Criteria and options as read from a `rank` or `advise weights` file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisFile {
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub criteria: Option<Vec<Criterion>>,
    #[serde(default)]
    pub options: Option<Vec<DecisionOption>>,
}

impl AnalysisFile {
    pub fn criteria(&self) -> &[Criterion] {
        self.criteria.as_deref().unwrap_or_default()
    }

    pub fn options(&self) -> &[DecisionOption] {
        self.options.as_deref().unwrap_or_default()
    }
}

pub fn load_analysis(path: &Path) -> Result<AnalysisFile> {
    if !path.exists() {
        return Err(CompassError::PathNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| {
            CompassError::InvalidInput(format!("{}: {}", path.display(), e))
        })
    } else {
        toml::from_str(&content).map_err(|e| {
            CompassError::InvalidInput(format!("{}: {}", path.display(), e))
        })
    }
}

/// Resolved settings shared by every command.
pub struct Session {
    pub config: CompassConfig,
    pub history_path: PathBuf,
}

impl Session {
    pub fn open(cwd: &Path, history_override: Option<PathBuf>) -> Result<Self> {
        let config = config::load_config(cwd)?;
        let history_path = resolve_history_path(cwd, history_override, &config);
        debug!(path = %history_path.display(), "using history file");
        Ok(Self {
            config,
            history_path,
        })
    }

    fn format(&self, flag: Option<ReportFormat>) -> OutputFormat {
        match flag {
            Some(ReportFormat::Json) => OutputFormat::Json,
            Some(ReportFormat::Md) => OutputFormat::Md,
            None => self
                .config
                .output_format()
                .and_then(OutputFormat::parse)
                .unwrap_or(OutputFormat::Md),
        }
    }

    fn history(&self) -> Result<HistoryStore> {
        HistoryStore::load(&self.history_path, self.config.max_history_entries())
    }

    fn record(&self, decision: Decision) -> Result<()> {
        let record = self.history()?.add(decision)?;
        println!("saved decision {} to {}", record.id, self.history_path.display());
        Ok(())
    }
}

fn resolve_history_path(
    cwd: &Path,
    history_override: Option<PathBuf>,
    config: &CompassConfig,
) -> PathBuf {
    if let Some(path) = history_override {
        return path;
    }
    if let Some(path) = config.history_path() {
        return cwd.join(path);
    }
    config::home_dir()
        .unwrap_or_else(|| cwd.to_path_buf())
        .join(DEFAULT_HISTORY_FILE)
}

pub fn finance(session: &Session, cmd: &FinanceCommand) -> Result<()> {
    let financing = FinancingInput {
        total_value: cmd.total_value,
        down_payment: cmd.down_payment,
        interest_rate: cmd.interest_rate,
        installments: cmd.installments,
    };
    let consortium = ConsortiumInput {
        total_value: cmd.consortium_value.unwrap_or(cmd.total_value),
        admin_fee: cmd.admin_fee,
        installments: cmd.consortium_installments,
    };
    validate::financing(&financing)?;
    validate::consortium(&consortium)?;

    let limits = session.config.validation_limits();
    let context = cmd
        .context
        .as_deref()
        .map(|text| validate::context(text, &limits))
        .transpose()?;

    let comparison = FinancialComparison::new(context.clone(), financing, consortium);
    println!(
        "{}",
        report::render_financial(&comparison, session.format(cmd.format))?
    );

    if cmd.advise {
        let request = financial_spending_request(
            context.clone().unwrap_or_default(),
            financing,
            consortium,
        );
        deliver_advice(session, &request, cmd.dry_run)?;
    }

    if let (Some(choice), Some(context)) = (cmd.save, context) {
        let decision = match choice {
            FinanceChoice::Financing => "Financing",
            FinanceChoice::Consortium => "Consortium",
        };
        session.record(Decision::FinancialSpending {
            context,
            options: vec!["Financing".to_string(), "Consortium".to_string()],
            decision: decision.to_string(),
        })?;
    }
    Ok(())
}

pub fn rank(session: &Session, cmd: &RankCommand) -> Result<()> {
    let analysis = load_analysis(&cmd.path)?;
    validate::weighted(analysis.criteria(), analysis.options())?;

    let context = analysis
        .context
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    let ranking = Ranking::new(context.clone(), analysis.criteria(), analysis.options());
    if !analysis.criteria().is_empty() && (ranking.weight_sum - 100.0).abs() > 0.001 {
        warn!(
            weight_sum = ranking.weight_sum,
            "criteria weights do not add up to 100%"
        );
    }
    println!(
        "{}",
        report::render_ranking(&ranking, session.format(cmd.format))?
    );

    if let Some(choice) = &cmd.save {
        let choice = validate::decision(choice)?;
        if !analysis
            .options()
            .iter()
            .any(|option| option.name.trim() == choice)
        {
            return Err(CompassError::InvalidInput(format!(
                "'{choice}' is not one of the ranked options"
            )));
        }
        let context = if context.is_empty() {
            DEFAULT_WEIGHTED_CONTEXT.to_string()
        } else {
            context
        };
        session.record(Decision::WeightedAnalysis {
            context,
            criteria: analysis.criteria().to_vec(),
            options: analysis.options().to_vec(),
            decision: choice,
        })?;
    }
    Ok(())
}

pub fn advise(session: &Session, cmd: &AdviseCommand) -> Result<()> {
    let limits = session.config.validation_limits();
    let (request, dry_run) = match cmd {
        AdviseCommand::YesNo(args) => (
            AdviceRequest::YesNo {
                context: validate::context(&args.context, &limits)?,
            },
            args.dry_run,
        ),
        AdviseCommand::MultipleChoice(args) => {
            let context = validate::context(&args.context, &limits)?;
            let options = validate::choices(&args.options, &limits)?
                .iter()
                .map(|raw| ChoiceOption::parse(raw))
                .collect();
            (AdviceRequest::MultipleChoice { context, options }, args.dry_run)
        }
        AdviseCommand::FinancialWeights(args) => (
            AdviceRequest::FinancialWeights {
                context: validate::context(&args.context, &limits)?,
            },
            args.dry_run,
        ),
        AdviseCommand::Weights(args) => {
            let analysis = load_analysis(&args.path)?;
            validate::weighted(analysis.criteria(), analysis.options())?;
            (
                AdviceRequest::WeightedSuggestions {
                    context: analysis.context.clone().unwrap_or_default(),
                    existing_criteria: analysis.criteria().to_vec(),
                    existing_options: analysis.options().to_vec(),
                },
                args.dry_run,
            )
        }
    };
    deliver_advice(session, &request, dry_run)
}

fn deliver_advice(session: &Session, request: &AdviceRequest, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("{}", prompt::render(request));
        println!("---");
        println!("{}", serde_json::to_string_pretty(request)?);
        return Ok(());
    }

    let command = session
        .config
        .advice_command()
        .ok_or(CompassError::NoAdviceProvider)?;
    let provider = CommandProvider::new(command)?;
    let response = provider.advise(request)?;
    println!("{}", format_advice(&response));
    Ok(())
}

pub fn format_advice(response: &AdviceResponse) -> String {
    match response {
        AdviceResponse::Advice(text) => text.clone(),
        AdviceResponse::CriteriaSuggestions(suggestions) => {
            let mut output = String::from("suggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!(
                    "- {} ({}%): {}\n",
                    suggestion.name, suggestion.weight, suggestion.rationale
                ));
            }
            output
        }
        AdviceResponse::FinancialWeights(suggestions) => {
            let mut output = String::from("suggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!(
                    "- fixed {:.2} / variable {:.2}: {}\n",
                    suggestion.fixed_cost_weight,
                    suggestion.variable_cost_weight,
                    suggestion.rationale
                ));
            }
            output
        }
    }
}

pub fn decide(session: &Session, cmd: &DecideCommand) -> Result<()> {
    let limits = session.config.validation_limits();
    let decision = match cmd {
        DecideCommand::YesNo(args) => Decision::YesNo {
            context: validate::context(&args.context, &limits)?,
            decision: match args.answer {
                YesNoAnswer::Yes => Answer::Yes,
                YesNoAnswer::No => Answer::No,
            },
        },
        DecideCommand::MultipleChoice(args) => {
            let context = validate::context(&args.context, &limits)?;
            let options = validate::choices(&args.options, &limits)?;
            let choice = validate::decision(&args.choice)?;
            if !options.contains(&choice) {
                return Err(CompassError::InvalidInput(format!(
                    "'{choice}' is not one of the options"
                )));
            }
            Decision::MultipleChoice {
                context,
                options,
                decision: choice,
            }
        }
        DecideCommand::FinancialAnalysis(args) => {
            for (field, value) in [
                ("fixed cost", args.fixed_cost),
                ("variable cost", args.variable_cost),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(CompassError::InvalidInput(format!(
                        "{field} must be a non-negative number (found {value})"
                    )));
                }
            }
            Decision::FinancialAnalysis {
                context: validate::context(&args.context, &limits)?,
                fixed_cost: args.fixed_cost,
                variable_cost: args.variable_cost,
            }
        }
    };
    session.record(decision)
}

pub fn history(session: &Session, cmd: &HistoryCommand) -> Result<()> {
    match cmd {
        HistoryCommand::List(args) => {
            let store = session.history()?;
            if store.is_empty() {
                debug!(path = %session.history_path.display(), "no decisions recorded yet");
            }
            let records = match args.limit {
                Some(limit) => &store.records()[..limit.min(store.len())],
                None => store.records(),
            };
            println!(
                "{}",
                report::render_history(records, session.format(args.format))?
            );
        }
        HistoryCommand::Clear => {
            HistoryStore::clear(&session.history_path)?;
            println!("history cleared");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_analysis_reads_toml_and_json() {
        let dir = TempDir::new().expect("temp dir should be created");
        let toml_path = dir.path().join("job.toml");
        fs::write(
            &toml_path,
            r#"
context = "Choose a job"

[[criteria]]
name = "Salary"
weight = 60

[[options]]
name = "Job A"
scores = { Salary = 8 }
"#,
        )
        .expect("toml should write");
        let analysis = load_analysis(&toml_path).expect("toml should load");
        assert_eq!(analysis.context.as_deref(), Some("Choose a job"));
        assert_eq!(analysis.criteria()[0].weight, 60.0);
        assert_eq!(analysis.options()[0].scores.get("Salary"), Some(&8.0));

        let json_path = dir.path().join("job.json");
        fs::write(
            &json_path,
            r#"{"criteria": [{"name": "Salary", "weight": 100}]}"#,
        )
        .expect("json should write");
        let analysis = load_analysis(&json_path).expect("json should load");
        assert!(analysis.options.is_none());
        assert!(analysis.options().is_empty());
    }

    #[test]
    fn load_analysis_reports_missing_file() {
        let err = load_analysis(Path::new("/nonexistent/analysis.toml"))
            .expect_err("missing file should fail");
        assert!(matches!(err, CompassError::PathNotFound(_)));
    }

    #[test]
    fn history_path_prefers_flag_then_config() {
        let cwd = Path::new("/work");
        let config: CompassConfig = toml::from_str(
            r#"
[history]
path = "team/history.json"
"#,
        )
        .expect("config should parse");

        assert_eq!(
            resolve_history_path(cwd, Some(PathBuf::from("/tmp/h.json")), &config),
            PathBuf::from("/tmp/h.json")
        );
        assert_eq!(
            resolve_history_path(cwd, None, &config),
            PathBuf::from("/work/team/history.json")
        );
        assert!(resolve_history_path(cwd, None, &CompassConfig::default())
            .ends_with(DEFAULT_HISTORY_FILE));
    }

    #[test]
    fn format_advice_lists_suggestions() {
        let rendered = format_advice(&AdviceResponse::CriteriaSuggestions(vec![
            crate::advice::CriterionSuggestion {
                name: "Cost".to_string(),
                weight: 50.0,
                rationale: "Budget is tight".to_string(),
            },
        ]));
        assert_eq!(rendered, "suggestions:\n- Cost (50%): Budget is tight\n");
    }
}
