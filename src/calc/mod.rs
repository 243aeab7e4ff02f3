pub mod amortization;
pub mod weighted;

pub use amortization::{
    calculate_consortium_monthly_payment, calculate_consortium_total,
    calculate_financing_monthly_payment, calculate_financing_total, financial_totals,
    ConsortiumInput, FinancialTotals, FinancingInput,
};
pub use weighted::{calculate_weighted_scores, weight_sum, Criterion, DecisionOption, RankedResult};
