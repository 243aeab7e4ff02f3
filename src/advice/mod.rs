pub mod command;
pub mod prompt;

use crate::calc::{
    calculate_consortium_monthly_payment, calculate_consortium_total,
    calculate_financing_monthly_payment, calculate_financing_total, ConsortiumInput, Criterion,
    DecisionOption, FinancingInput,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ChoiceOption {
    /// Parses `value` or `value:description`.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((value, description)) if !description.trim().is_empty() => Self {
                value: value.trim().to_string(),
                description: Some(description.trim().to_string()),
            },
            Some((value, _)) => Self {
                value: value.trim().to_string(),
                description: None,
            },
            None => Self {
                value: raw.trim().to_string(),
                description: None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancingQuote {
    #[serde(flatten)]
    pub input: FinancingInput,
    pub monthly_payment: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConsortiumQuote {
    #[serde(flatten)]
    pub input: ConsortiumInput,
    pub monthly_payment: f64,
    pub total_cost: f64,
}

impl FinancingQuote {
    pub fn new(input: FinancingInput) -> Self {
        Self {
            input,
            monthly_payment: calculate_financing_monthly_payment(&input),
            total_cost: calculate_financing_total(&input),
        }
    }
}

impl ConsortiumQuote {
    pub fn new(input: ConsortiumInput) -> Self {
        Self {
            input,
            monthly_payment: calculate_consortium_monthly_payment(&input),
            total_cost: calculate_consortium_total(&input),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdviceRequest {
    YesNo {
        context: String,
    },
    MultipleChoice {
        context: String,
        options: Vec<ChoiceOption>,
    },
    FinancialSpending {
        context: String,
        financing: FinancingQuote,
        consortium: ConsortiumQuote,
    },
    FinancialWeights {
        context: String,
    },
    WeightedSuggestions {
        context: String,
        existing_criteria: Vec<Criterion>,
        existing_options: Vec<DecisionOption>,
    },
}

impl AdviceRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::YesNo { .. } => "yes_no",
            Self::MultipleChoice { .. } => "multiple_choice",
            Self::FinancialSpending { .. } => "financial_spending",
            Self::FinancialWeights { .. } => "financial_weights",
            Self::WeightedSuggestions { .. } => "weighted_suggestions",
        }
    }

    /// Whether the provider must answer with structured suggestions rather than prose.
    pub fn expects_suggestions(&self) -> bool {
        matches!(
            self,
            Self::FinancialWeights { .. } | Self::WeightedSuggestions { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSuggestion {
    pub name: String,
    pub weight: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialWeightSuggestion {
    pub fixed_cost_weight: f64,
    pub variable_cost_weight: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AdviceResponse {
    Advice(String),
    CriteriaSuggestions(Vec<CriterionSuggestion>),
    FinancialWeights(Vec<FinancialWeightSuggestion>),
}

pub trait AdviceProvider {
    fn advise(&self, request: &AdviceRequest) -> Result<AdviceResponse>;
}

/// Builds the financing-versus-consortium request with the computed
/// payments and totals merged in.
pub fn financial_spending_request(
    context: impl Into<String>,
    financing: FinancingInput,
    consortium: ConsortiumInput,
) -> AdviceRequest {
    AdviceRequest::FinancialSpending {
        context: context.into(),
        financing: FinancingQuote::new(financing),
        consortium: ConsortiumQuote::new(consortium),
    }
}
