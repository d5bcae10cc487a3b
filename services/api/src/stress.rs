use clap::Args;
use econ_risk::error::AppError;
use econ_risk::indicators::{classify, IndicatorKey};
use econ_risk::portfolio::{
    apply_stress, current_economic_state, exposure_by_industry, exposure_by_region,
    portfolio_metrics, sample_book, GroupExposure, Loan, RiskScenario,
};
use std::collections::{BTreeMap, HashMap};

#[derive(Args, Debug, Default)]
pub(crate) struct StressArgs {
    /// Scenario id: BASE, MILD_RECESSION, SEVERE_RECESSION, INFLATION_SPIKE or STAGFLATION
    #[arg(long, default_value = "BASE")]
    pub(crate) scenario: String,
    /// Include regional and industry breakdowns in the output
    #[arg(long)]
    pub(crate) breakdowns: bool,
}

/// Offline stress report over the sample book, for demos and smoke checks.
pub(crate) fn run(args: StressArgs) -> Result<(), AppError> {
    let scenario = RiskScenario::find(&args.scenario)
        .ok_or_else(|| AppError::UnknownScenario(args.scenario.clone()))?;

    let book = sample_book();
    let stressed = apply_stress(&book, &scenario);
    let metrics = portfolio_metrics(&stressed);

    println!("Scenario: {} ({})", scenario.name, scenario.id);
    println!("  {}", scenario.description);
    println!("  PD multiplier: {:.2}x", scenario.impact_multiplier);
    println!();
    println!(
        "Portfolio: {} loans, ${:.0} outstanding",
        metrics.total_loans, metrics.total_outstanding
    );
    println!(
        "  Avg rate {:.2}%  Avg credit score {:.0}",
        metrics.average_interest_rate, metrics.average_credit_score
    );
    println!(
        "  Portfolio PD {:.2}%  Expected loss ${:.0}",
        metrics.portfolio_pd * 100.0,
        metrics.expected_loss
    );
    println!("  Status mix: {}", status_mix(&book));

    println!();
    println!("Economic conditions:");
    let conditions = current_economic_state();
    for key in IndicatorKey::ordered() {
        let value = conditions.get(&key).copied();
        let tier = classify(key, value);
        match value {
            Some(reading) => println!(
                "  {:<10} {:>7.2} {:<6} {}",
                key.series_id(),
                reading,
                key.definition().unit,
                tier.label()
            ),
            None => println!("  {:<10} {:>7} {:<6} {}", key.series_id(), "n/a", "", tier.label()),
        }
    }

    if args.breakdowns {
        print_groups("By region", &exposure_by_region(&stressed));
        print_groups("By industry", &exposure_by_industry(&stressed));
    }

    Ok(())
}

fn status_mix(loans: &[Loan]) -> String {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for loan in loans {
        *counts.entry(loan.status.label()).or_default() += 1;
    }

    counts
        .iter()
        .map(|(label, count)| format!("{count} {label}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_groups(title: &str, groups: &HashMap<&'static str, GroupExposure>) {
    let mut names: Vec<_> = groups.keys().collect();
    names.sort_unstable();

    println!();
    println!("{title}:");
    for name in names {
        let group = &groups[name];
        println!(
            "  {:<28} ${:>12.0}  {:>3} loan(s)  avg PD {:.2}%",
            name,
            group.total_amount,
            group.loan_count,
            group.avg_pd * 100.0
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mix_labels_every_position() {
        let mix = status_mix(&sample_book());
        assert!(mix.contains("6 Current"), "{mix}");
        assert!(mix.contains("1 30 Days Past Due"), "{mix}");
        assert!(mix.contains("1 60 Days Past Due"), "{mix}");
    }
}
