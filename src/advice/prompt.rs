//! Prompt templates for each advice request.

use super::AdviceRequest;
use crate::calc::{Criterion, DecisionOption};
use std::fmt::Write;

const YES_NO_PROMPT: &str = r#"You are an assistant that helps people make Yes/No decisions.

Based on the context below, give advice that helps the user decide whether to go ahead ("Yes") or not ("No").

Context: {context}

Weigh the potential benefits, the risks and any alternatives. Keep the advice short and easy to follow,
focused on the user's best interest and well-being. Answer in a single paragraph."#;

const MULTIPLE_CHOICE_PROMPT: &str = r#"You are an assistant that helps people choose between several options.

Context: {context}

Options:
{options}
Analyse each option against the context, point out its strengths and weaknesses, and recommend the one
that fits best. Answer in Markdown."#;

const FINANCIAL_WEIGHTS_PROMPT: &str = r#"You are an expert financial advisor. Given the context below, suggest several different
weightings of fixed versus variable costs so the user can compare scenarios.

Context: {context}

Respond with JSON only, in this exact format:
{"suggestions": [{"fixed_cost_weight": 0.6, "variable_cost_weight": 0.4, "rationale": "..."}]}

Each suggestion's fixed_cost_weight and variable_cost_weight must sum to 1."#;

const WEIGHTED_SUGGESTIONS_PROMPT: &str = r#"You are an assistant for weighted multi-criteria decisions.

Context: {context}

Existing criteria:
{criteria}
Existing options:
{options}
Suggest criteria worth considering, each with a weight in percent and a short rationale. Keep useful
existing criteria and propose new ones where something important is missing.

Respond with JSON only, in this exact format:
{"suggestions": [{"name": "Cost", "weight": 40, "rationale": "..."}]}

Weights must sum to 100."#;

pub fn render(request: &AdviceRequest) -> String {
    match request {
        AdviceRequest::YesNo { context } => YES_NO_PROMPT.replace("{context}", context),
        AdviceRequest::MultipleChoice { context, options } => {
            let mut listed = String::new();
            for option in options {
                match &option.description {
                    Some(description) => {
                        let _ = writeln!(listed, "- {}: {}", option.value, description);
                    }
                    None => {
                        let _ = writeln!(listed, "- {}", option.value);
                    }
                }
            }
            MULTIPLE_CHOICE_PROMPT
                .replace("{context}", context)
                .replace("{options}", &listed)
        }
        AdviceRequest::FinancialSpending {
            context,
            financing,
            consortium,
        } => {
            let mut prompt = String::new();
            prompt.push_str(
                "You are an expert financial advisor. Analyse the decision below and give clear, concise advice in Markdown.\n\n",
            );
            let _ = writeln!(prompt, "Decision context: {context}\n");
            prompt.push_str("Option 1: Financing\n");
            let _ = writeln!(prompt, "- Asset value: {:.2}", financing.input.total_value);
            let _ = writeln!(prompt, "- Down payment: {:.2}", financing.input.down_payment);
            let _ = writeln!(
                prompt,
                "- Interest rate: {}% per month",
                financing.input.interest_rate
            );
            let _ = writeln!(prompt, "- Installments: {}", financing.input.installments);
            let _ = writeln!(
                prompt,
                "- **Monthly payment: {:.2}**",
                financing.monthly_payment
            );
            let _ = writeln!(prompt, "- **Total cost: {:.2}**\n", financing.total_cost);
            prompt.push_str("Option 2: Consortium\n");
            let _ = writeln!(prompt, "- Credit value: {:.2}", consortium.input.total_value);
            let _ = writeln!(prompt, "- Admin fee: {}%", consortium.input.admin_fee);
            let _ = writeln!(prompt, "- Installments: {}", consortium.input.installments);
            let _ = writeln!(
                prompt,
                "- **Monthly payment: {:.2}**",
                consortium.monthly_payment
            );
            let _ = writeln!(prompt, "- **Total cost: {:.2}**\n", consortium.total_cost);
            prompt.push_str(
                "Compare the pros and cons of each option using lists and bold text for the key points. \
Consider total cost, liquidity, time until the asset is acquired and anything else relevant. \
Finish with a reasoned recommendation. Be direct.",
            );
            prompt
        }
        AdviceRequest::FinancialWeights { context } => {
            FINANCIAL_WEIGHTS_PROMPT.replace("{context}", context)
        }
        AdviceRequest::WeightedSuggestions {
            context,
            existing_criteria,
            existing_options,
        } => WEIGHTED_SUGGESTIONS_PROMPT
            .replace("{context}", context)
            .replace("{criteria}", &list_criteria(existing_criteria))
            .replace("{options}", &list_options(existing_options)),
    }
}

fn list_criteria(criteria: &[Criterion]) -> String {
    if criteria.is_empty() {
        return "- none\n".to_string();
    }
    criteria
        .iter()
        .map(|criterion| format!("- {} ({}%)\n", criterion.name, criterion.weight))
        .collect()
}

fn list_options(options: &[DecisionOption]) -> String {
    if options.is_empty() {
        return "- none\n".to_string();
    }
    options
        .iter()
        .map(|option| format!("- {}\n", option.name))
        .collect()
}
