use crate::advice::{ConsortiumQuote, FinancingQuote};
use crate::calc::{
    calculate_weighted_scores, financial_totals, weight_sum, ConsortiumInput, Criterion,
    DecisionOption, FinancialTotals, FinancingInput, RankedResult,
};
use serde::Serialize;

const TIE_TOLERANCE: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheaperOption {
    Financing,
    Consortium,
    Tie,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialComparison {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub financing: FinancingQuote,
    pub consortium: ConsortiumQuote,
    pub totals: FinancialTotals,
    pub cheaper: CheaperOption,
}

impl FinancialComparison {
    pub fn new(
        context: Option<String>,
        financing: FinancingInput,
        consortium: ConsortiumInput,
    ) -> Self {
        let totals = financial_totals(&financing, &consortium);
        let difference = totals.financing_total - totals.consortium_total;
        let cheaper = if difference.abs() < TIE_TOLERANCE {
            CheaperOption::Tie
        } else if difference < 0.0 {
            CheaperOption::Financing
        } else {
            CheaperOption::Consortium
        };

        Self {
            context,
            financing: FinancingQuote::new(financing),
            consortium: ConsortiumQuote::new(consortium),
            totals,
            cheaper,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Ranking {
    pub context: String,
    pub weight_sum: f64,
    pub results: Vec<RankedResult>,
}

impl Ranking {
    pub fn new(context: String, criteria: &[Criterion], options: &[DecisionOption]) -> Self {
        Self {
            context,
            weight_sum: weight_sum(criteria),
            results: calculate_weighted_scores(Some(criteria), Some(options)),
        }
    }

    pub fn leader(&self) -> Option<&RankedResult> {
        self.results.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn financing(interest_rate: f64) -> FinancingInput {
        FinancingInput {
            total_value: 50_000.0,
            down_payment: 10_000.0,
            interest_rate,
            installments: 48,
        }
    }

    fn consortium(admin_fee: f64) -> ConsortiumInput {
        ConsortiumInput {
            total_value: 50_000.0,
            admin_fee,
            installments: 60,
        }
    }

    #[test]
    fn comparison_picks_the_cheaper_total() {
        let comparison = FinancialComparison::new(None, financing(1.5), consortium(15.0));
        assert_eq!(comparison.cheaper, CheaperOption::Consortium);

        let comparison = FinancialComparison::new(None, financing(0.0), consortium(15.0));
        assert_eq!(comparison.cheaper, CheaperOption::Financing);
    }

    #[test]
    fn comparison_reports_ties() {
        let comparison = FinancialComparison::new(None, financing(0.0), consortium(0.0));
        assert_eq!(comparison.cheaper, CheaperOption::Tie);
    }

    #[test]
    fn ranking_exposes_leader_and_weight_sum() {
        let criteria = vec![
            Criterion {
                name: "Salary".to_string(),
                weight: 70.0,
            },
            Criterion {
                name: "Commute".to_string(),
                weight: 20.0,
            },
        ];
        let options = vec![
            DecisionOption {
                name: "Job A".to_string(),
                scores: HashMap::from([("Salary".to_string(), 6.0), ("Commute".to_string(), 9.0)]),
            },
            DecisionOption {
                name: "Job B".to_string(),
                scores: HashMap::from([("Salary".to_string(), 9.0), ("Commute".to_string(), 3.0)]),
            },
        ];
        let ranking = Ranking::new("Choose a job".to_string(), &criteria, &options);
        assert_eq!(ranking.leader().map(|r| r.name.as_str()), Some("Job B"));
        assert!((ranking.weight_sum - 90.0).abs() < 1e-9);
    }
}
