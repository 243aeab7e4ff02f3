pub mod json;
pub mod md;

use crate::error::CompassError;
use crate::types::decision::DecisionRecord;
use crate::types::report::{FinancialComparison, Ranking};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "json" => Some(Self::Json),
            "md" => Some(Self::Md),
            _ => None,
        }
    }
}

pub fn render_financial(
    comparison: &FinancialComparison,
    format: OutputFormat,
) -> Result<String, CompassError> {
    match format {
        OutputFormat::Json => json::to_json(comparison).map_err(CompassError::Json),
        OutputFormat::Md => Ok(md::financial(comparison)),
    }
}

pub fn render_ranking(ranking: &Ranking, format: OutputFormat) -> Result<String, CompassError> {
    match format {
        OutputFormat::Json => json::to_json(ranking).map_err(CompassError::Json),
        OutputFormat::Md => Ok(md::ranking(ranking)),
    }
}

pub fn render_history(
    records: &[DecisionRecord],
    format: OutputFormat,
) -> Result<String, CompassError> {
    match format {
        OutputFormat::Json => json::to_json(&records).map_err(CompassError::Json),
        OutputFormat::Md => Ok(md::history(records)),
    }
}
