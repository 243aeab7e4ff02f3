use crate::calc::{Criterion, DecisionOption};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    #[serde(rename = "Yes/No")]
    YesNo,
    #[serde(rename = "Multiple Choice")]
    MultipleChoice,
    #[serde(rename = "Weighted Analysis")]
    WeightedAnalysis,
    #[serde(rename = "Financial Spending")]
    FinancialSpending,
    #[serde(rename = "Financial Analysis")]
    FinancialAnalysis,
}

impl DecisionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::YesNo => "Yes/No",
            Self::MultipleChoice => "Multiple Choice",
            Self::WeightedAnalysis => "Weighted Analysis",
            Self::FinancialSpending => "Financial Spending",
            Self::FinancialAnalysis => "Financial Analysis",
        }
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Decision {
    #[serde(rename = "Yes/No")]
    YesNo { context: String, decision: Answer },
    #[serde(rename = "Multiple Choice")]
    MultipleChoice {
        context: String,
        options: Vec<String>,
        decision: String,
    },
    #[serde(rename = "Weighted Analysis")]
    WeightedAnalysis {
        context: String,
        criteria: Vec<Criterion>,
        options: Vec<DecisionOption>,
        decision: String,
    },
    #[serde(rename = "Financial Spending")]
    FinancialSpending {
        context: String,
        options: Vec<String>,
        decision: String,
    },
    #[serde(rename = "Financial Analysis")]
    FinancialAnalysis {
        context: String,
        fixed_cost: f64,
        variable_cost: f64,
    },
}

impl Decision {
    pub fn kind(&self) -> DecisionKind {
        match self {
            Self::YesNo { .. } => DecisionKind::YesNo,
            Self::MultipleChoice { .. } => DecisionKind::MultipleChoice,
            Self::WeightedAnalysis { .. } => DecisionKind::WeightedAnalysis,
            Self::FinancialSpending { .. } => DecisionKind::FinancialSpending,
            Self::FinancialAnalysis { .. } => DecisionKind::FinancialAnalysis,
        }
    }

    pub fn context(&self) -> &str {
        match self {
            Self::YesNo { context, .. }
            | Self::MultipleChoice { context, .. }
            | Self::WeightedAnalysis { context, .. }
            | Self::FinancialSpending { context, .. }
            | Self::FinancialAnalysis { context, .. } => context,
        }
    }

    /// What was chosen, as shown in history listings.
    pub fn summary(&self) -> String {
        match self {
            Self::YesNo { decision, .. } => decision.to_string(),
            Self::MultipleChoice { decision, .. }
            | Self::WeightedAnalysis { decision, .. }
            | Self::FinancialSpending { decision, .. } => decision.clone(),
            Self::FinancialAnalysis {
                fixed_cost,
                variable_cost,
                ..
            } => format!("fixed {fixed_cost:.2} / variable {variable_cost:.2}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub id: String,
    pub date: String,
    #[serde(flatten)]
    pub decision: Decision,
}
