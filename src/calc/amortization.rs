use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancingInput {
    pub total_value: f64,
    pub down_payment: f64,
    /// Percent per period.
    pub interest_rate: f64,
    pub installments: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsortiumInput {
    pub total_value: f64,
    /// Flat administrative fee, percent of the total value.
    pub admin_fee: f64,
    pub installments: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialTotals {
    pub financing_total: f64,
    pub consortium_total: f64,
}

fn zero_if_nan(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Fixed installment of an annuity (Price table) schedule.
///
/// A zero interest rate splits the principal evenly and lets a zero
/// installment count propagate as a non-finite value.
pub fn calculate_financing_monthly_payment(input: &FinancingInput) -> f64 {
    let principal = input.total_value - input.down_payment;
    let periods = f64::from(input.installments);

    if input.interest_rate == 0.0 {
        return principal / periods;
    }

    let rate = input.interest_rate / 100.0;
    if principal <= 0.0 {
        return 0.0;
    }
    if input.installments == 0 {
        return principal;
    }

    let growth = (1.0 + rate).powf(periods);
    zero_if_nan(principal * (rate * growth) / (growth - 1.0))
}

pub fn calculate_financing_total(input: &FinancingInput) -> f64 {
    if input.down_payment >= input.total_value {
        return input.total_value;
    }
    let monthly = calculate_financing_monthly_payment(input);
    zero_if_nan(input.down_payment + monthly * f64::from(input.installments))
}

pub fn calculate_consortium_total(input: &ConsortiumInput) -> f64 {
    zero_if_nan(input.total_value * (1.0 + input.admin_fee / 100.0))
}

pub fn calculate_consortium_monthly_payment(input: &ConsortiumInput) -> f64 {
    if input.installments == 0 {
        return 0.0;
    }
    zero_if_nan(calculate_consortium_total(input) / f64::from(input.installments))
}

pub fn financial_totals(financing: &FinancingInput, consortium: &ConsortiumInput) -> FinancialTotals {
    FinancialTotals {
        financing_total: calculate_financing_total(financing),
        consortium_total: calculate_consortium_total(consortium),
    }
}
