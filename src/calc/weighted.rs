use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    /// Relative importance in percent.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub name: String,
    #[serde(default)]
    pub scores: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub name: String,
    pub score: f64,
}

impl Criterion {
    fn counts(&self) -> bool {
        !self.name.is_empty() && self.weight != 0.0
    }
}

impl DecisionOption {
    pub fn weighted_score(&self, criteria: &[Criterion]) -> f64 {
        criteria
            .iter()
            .filter(|criterion| criterion.counts())
            .map(|criterion| {
                let score = self.scores.get(&criterion.name).copied().unwrap_or(0.0);
                score * (criterion.weight / 100.0)
            })
            .sum()
    }
}

/// Ranks options by their weighted score, highest first.
///
/// Absent inputs, or an empty criteria list, produce an empty ranking.
/// Options without a name are scored but left out of the result. Equal
/// scores keep their input order.
pub fn calculate_weighted_scores(
    criteria: Option<&[Criterion]>,
    options: Option<&[DecisionOption]>,
) -> Vec<RankedResult> {
    let (criteria, options) = match (criteria, options) {
        (Some(criteria), Some(options)) if !criteria.is_empty() => (criteria, options),
        _ => return Vec::new(),
    };

    let mut ranked = options
        .iter()
        .map(|option| RankedResult {
            name: option.name.clone(),
            score: option.weighted_score(criteria),
        })
        .filter(|result| !result.name.is_empty())
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

pub fn weight_sum(criteria: &[Criterion]) -> f64 {
    criteria
        .iter()
        .filter(|criterion| !criterion.name.is_empty())
        .map(|criterion| criterion.weight)
        .sum()
}
