use crate::types::decision::DecisionRecord;
use crate::types::report::{CheaperOption, FinancialComparison, Ranking};

pub fn financial(comparison: &FinancialComparison) -> String {
    let mut output = String::new();
    output.push_str("# Financial Comparison\n\n");
    if let Some(context) = &comparison.context {
        output.push_str(&format!("Context: {context}\n\n"));
    }

    let financing = &comparison.financing;
    output.push_str("## Financing\n\n");
    output.push_str(&format!(
        "- value: {:.2}\n- down payment: {:.2}\n- interest rate: {}% per month\n- installments: {}\n- monthly payment: {:.2}\n- total cost: {:.2}\n\n",
        financing.input.total_value,
        financing.input.down_payment,
        financing.input.interest_rate,
        financing.input.installments,
        financing.monthly_payment,
        financing.total_cost
    ));

    let consortium = &comparison.consortium;
    output.push_str("## Consortium\n\n");
    output.push_str(&format!(
        "- value: {:.2}\n- admin fee: {}%\n- installments: {}\n- monthly payment: {:.2}\n- total cost: {:.2}\n\n",
        consortium.input.total_value,
        consortium.input.admin_fee,
        consortium.input.installments,
        consortium.monthly_payment,
        consortium.total_cost
    ));

    output.push_str("## Verdict\n\n");
    let difference = (comparison.totals.financing_total - comparison.totals.consortium_total).abs();
    match comparison.cheaper {
        CheaperOption::Financing => output.push_str(&format!(
            "Financing costs {difference:.2} less in total.\n"
        )),
        CheaperOption::Consortium => output.push_str(&format!(
            "Consortium costs {difference:.2} less in total.\n"
        )),
        CheaperOption::Tie => output.push_str("Both options cost the same in total.\n"),
    }

    output
}

pub fn ranking(ranking: &Ranking) -> String {
    let mut output = String::new();
    output.push_str("# Weighted Analysis\n\n");
    if !ranking.context.is_empty() {
        output.push_str(&format!("Context: {}\n\n", ranking.context));
    }
    output.push_str(&format!("Weight total: {:.1}%\n\n", ranking.weight_sum));

    if let Some(leader) = ranking.leader() {
        output.push_str(&format!("Top choice: {}\n\n", leader.name));
    }

    output.push_str("## Ranking\n\n");
    if ranking.results.is_empty() {
        output.push_str("- none\n");
    } else {
        for (position, result) in ranking.results.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} ({:.2})\n",
                position + 1,
                result.name,
                result.score
            ));
        }
    }

    output
}

pub fn history(records: &[DecisionRecord]) -> String {
    let mut output = String::new();
    output.push_str("# Decision History\n\n");
    if records.is_empty() {
        output.push_str("- none\n");
        return output;
    }

    for record in records {
        output.push_str(&format!(
            "- {} [{}] {}: {} ({})\n",
            record.date,
            record.decision.kind(),
            record.decision.context(),
            record.decision.summary(),
            record.id
        ));
    }
    output
}
