//! Shape checks applied before any calculation or provider call.
//!
//! The calculators accept anything numeric; rejecting negative amounts,
//! short contexts and duplicate option names happens here instead.

use crate::calc::{ConsortiumInput, Criterion, DecisionOption, FinancingInput};
use crate::error::{CompassError, Result};
use crate::types::config::ValidationLimits;
use std::collections::HashSet;

fn invalid(message: impl Into<String>) -> CompassError {
    CompassError::InvalidInput(message.into())
}

pub fn context(text: &str, limits: &ValidationLimits) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.chars().count() < limits.min_context_len {
        return Err(invalid(format!(
            "please provide more context for the decision (at least {} characters)",
            limits.min_context_len
        )));
    }
    Ok(trimmed.to_string())
}

/// Drops blank entries and requires at least `min_options` to remain.
pub fn choices(options: &[String], limits: &ValidationLimits) -> Result<Vec<String>> {
    let kept = options
        .iter()
        .map(|option| option.trim())
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();
    if kept.len() < limits.min_options {
        return Err(invalid(format!(
            "please provide at least {} options",
            limits.min_options
        )));
    }
    Ok(kept)
}

pub fn decision(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid("decision cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn amount(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!(
            "{field} must be a non-negative number (found {value})"
        )));
    }
    Ok(())
}

/// Non-negative amounts, and at least one installment whenever a balance is financed.
pub fn financing(input: &FinancingInput) -> Result<()> {
    amount("financing total value", input.total_value)?;
    amount("financing down payment", input.down_payment)?;
    amount("financing interest rate", input.interest_rate)?;
    if input.installments == 0 && input.down_payment < input.total_value {
        return Err(invalid(
            "financing installments must be greater than 0 when a balance is financed",
        ));
    }
    Ok(())
}

pub fn consortium(input: &ConsortiumInput) -> Result<()> {
    amount("consortium total value", input.total_value)?;
    amount("consortium admin fee", input.admin_fee)
}

pub fn weighted(criteria: &[Criterion], options: &[DecisionOption]) -> Result<()> {
    for criterion in criteria {
        if !criterion.weight.is_finite() || !(0.0..=100.0).contains(&criterion.weight) {
            return Err(invalid(format!(
                "criterion '{}' weight must be between 0 and 100 (found {})",
                criterion.name, criterion.weight
            )));
        }
    }

    let mut seen = HashSet::new();
    for option in options {
        let name = option.name.trim();
        if !name.is_empty() && !seen.insert(name) {
            return Err(invalid(format!("duplicate option name: {name}")));
        }
        if let Some((criterion, score)) = option.scores.iter().find(|(_, score)| !score.is_finite()) {
            return Err(invalid(format!(
                "option '{}' has a non-numeric score for '{}': {}",
                option.name, criterion, score
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn limits() -> ValidationLimits {
        ValidationLimits::default()
    }

    #[test]
    fn context_rejects_short_text() {
        let err = context("  short   ", &limits()).expect_err("short context should fail");
        assert!(matches!(err, CompassError::InvalidInput(_)));
        assert!(err.to_string().contains("at least 10 characters"));
    }

    #[test]
    fn context_trims_accepted_text() {
        let text = context("  Should I buy a new laptop?  ", &limits()).expect("context is valid");
        assert_eq!(text, "Should I buy a new laptop?");
    }

    #[test]
    fn choices_drop_blanks_before_counting() {
        let options = vec!["A".to_string(), "  ".to_string()];
        assert!(choices(&options, &limits()).is_err());

        let options = vec!["A".to_string(), "".to_string(), " B ".to_string()];
        assert_eq!(
            choices(&options, &limits()).expect("two options remain"),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn decision_must_not_be_blank() {
        assert!(decision(" ").is_err());
        assert_eq!(decision(" Job A ").expect("decision is valid"), "Job A");
    }

    #[test]
    fn financing_rejects_negative_and_non_finite_amounts() {
        let valid = FinancingInput {
            total_value: 50_000.0,
            down_payment: 10_000.0,
            interest_rate: 1.5,
            installments: 48,
        };
        assert!(financing(&valid).is_ok());

        let negative = FinancingInput {
            down_payment: -1.0,
            ..valid
        };
        let err = financing(&negative).expect_err("negative down payment should fail");
        assert!(err.to_string().contains("financing down payment"));

        let infinite = FinancingInput {
            interest_rate: f64::INFINITY,
            ..valid
        };
        assert!(financing(&infinite).is_err());
    }

    #[test]
    fn financing_requires_installments_for_a_financed_balance() {
        let zero_rate = FinancingInput {
            total_value: 50_000.0,
            down_payment: 10_000.0,
            interest_rate: 0.0,
            installments: 0,
        };
        let err = financing(&zero_rate).expect_err("zero installments should fail");
        assert!(err.to_string().contains("installments must be greater than 0"));

        let with_rate = FinancingInput {
            interest_rate: 1.5,
            ..zero_rate
        };
        assert!(financing(&with_rate).is_err());

        let paid_upfront = FinancingInput {
            down_payment: 50_000.0,
            ..zero_rate
        };
        assert!(financing(&paid_upfront).is_ok());
    }

    #[test]
    fn consortium_rejects_negative_fee() {
        let input = ConsortiumInput {
            total_value: 50_000.0,
            admin_fee: -15.0,
            installments: 60,
        };
        let err = consortium(&input).expect_err("negative fee should fail");
        assert!(err.to_string().contains("admin fee"));
    }

    #[test]
    fn weighted_rejects_out_of_range_weight_and_duplicate_names() {
        let criteria = vec![Criterion {
            name: "Cost".to_string(),
            weight: 120.0,
        }];
        assert!(weighted(&criteria, &[]).is_err());

        let criteria = vec![Criterion {
            name: "Cost".to_string(),
            weight: 100.0,
        }];
        let option = DecisionOption {
            name: "A".to_string(),
            scores: HashMap::from([("Cost".to_string(), 5.0)]),
        };
        assert!(weighted(&criteria, &[option.clone()]).is_ok());

        let err = weighted(&criteria, &[option.clone(), option]).expect_err("duplicate should fail");
        assert!(err.to_string().contains("duplicate option name: A"));
    }
}
