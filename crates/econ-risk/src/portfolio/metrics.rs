use super::loans::Loan;
use super::scenarios::RiskScenario;
use serde::Serialize;
use std::collections::HashMap;

/// Loss-given-default assumption baked into expected-loss figures.
pub const LOSS_GIVEN_DEFAULT: f64 = 0.6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PortfolioMetrics {
    pub total_loans: usize,
    pub total_outstanding: f64,
    pub average_interest_rate: f64,
    pub average_credit_score: f64,
    pub portfolio_pd: f64,
    pub expected_loss: f64,
}

/// Book-level metrics. The portfolio PD is value-weighted (Σ pd·amount / Σ
/// amount); interest rate and credit score are plain means over the loan
/// count. An empty book yields an all-zero result rather than dividing by
/// zero.
pub fn portfolio_metrics(loans: &[Loan]) -> PortfolioMetrics {
    if loans.is_empty() {
        return PortfolioMetrics::default();
    }

    let total_loans = loans.len();
    let total_outstanding: f64 = loans.iter().map(|loan| loan.amount).sum();
    let average_interest_rate =
        loans.iter().map(|loan| loan.interest_rate).sum::<f64>() / total_loans as f64;
    let average_credit_score =
        loans.iter().map(|loan| f64::from(loan.credit_score)).sum::<f64>() / total_loans as f64;
    let portfolio_pd = loans
        .iter()
        .map(|loan| loan.probability_of_default * loan.amount)
        .sum::<f64>()
        / total_outstanding;
    let expected_loss = loans
        .iter()
        .map(|loan| loan.amount * loan.probability_of_default * LOSS_GIVEN_DEFAULT)
        .sum();

    PortfolioMetrics {
        total_loans,
        total_outstanding,
        average_interest_rate,
        average_credit_score,
        portfolio_pd,
        expected_loss,
    }
}

/// Applies a stress scenario, scaling each PD by the scenario multiplier and
/// capping at 1.0. Returns a new book; the input is untouched.
pub fn apply_stress(loans: &[Loan], scenario: &RiskScenario) -> Vec<Loan> {
    loans
        .iter()
        .map(|loan| {
            let mut stressed = loan.clone();
            stressed.probability_of_default =
                (loan.probability_of_default * scenario.impact_multiplier).min(1.0);
            stressed
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GroupExposure {
    pub total_amount: f64,
    pub loan_count: usize,
    pub avg_pd: f64,
}

pub fn exposure_by_region(loans: &[Loan]) -> HashMap<&'static str, GroupExposure> {
    group_exposure(loans, |loan| loan.region.name)
}

pub fn exposure_by_industry(loans: &[Loan]) -> HashMap<&'static str, GroupExposure> {
    group_exposure(loans, |loan| loan.industry.name)
}

fn group_exposure(
    loans: &[Loan],
    key: impl Fn(&Loan) -> &'static str,
) -> HashMap<&'static str, GroupExposure> {
    let mut weighted_pd: HashMap<&'static str, f64> = HashMap::new();
    let mut groups: HashMap<&'static str, GroupExposure> = HashMap::new();

    for loan in loans {
        let name = key(loan);
        let entry = groups.entry(name).or_default();
        entry.total_amount += loan.amount;
        entry.loan_count += 1;
        *weighted_pd.entry(name).or_default() += loan.probability_of_default * loan.amount;
    }

    for (name, exposure) in groups.iter_mut() {
        // amount > 0 per loan, so each group's total is positive
        exposure.avg_pd = weighted_pd[name] / exposure.total_amount;
    }

    groups
}
