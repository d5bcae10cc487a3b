use econ_risk::portfolio::{
    apply_stress, exposure_by_industry, exposure_by_region, portfolio_metrics, sample_book,
    RiskScenario, LOSS_GIVEN_DEFAULT,
};

#[test]
fn stressing_the_sample_book_scales_every_metric_consistently() {
    let book = sample_book();
    let baseline = portfolio_metrics(&book);

    for scenario in RiskScenario::catalog() {
        let stressed = apply_stress(&book, &scenario);
        let metrics = portfolio_metrics(&stressed);

        assert_eq!(metrics.total_loans, baseline.total_loans);
        assert!((metrics.total_outstanding - baseline.total_outstanding).abs() < 1e-9);
        assert!(
            (metrics.average_interest_rate - baseline.average_interest_rate).abs() < 1e-12,
            "stress must not touch interest rates"
        );

        // No sample PD reaches the 1.0 cap under the catalog multipliers, so
        // the portfolio PD scales exactly with the multiplier.
        assert!(
            (metrics.portfolio_pd - baseline.portfolio_pd * scenario.impact_multiplier).abs()
                < 1e-12,
            "{} PD did not scale",
            scenario.id
        );
        assert!(
            (metrics.expected_loss - baseline.expected_loss * scenario.impact_multiplier).abs()
                < 1e-6,
            "{} expected loss did not scale",
            scenario.id
        );
    }
}

#[test]
fn stressed_groups_still_reconcile_with_the_stressed_book() {
    let book = sample_book();
    let severe = RiskScenario::find("SEVERE_RECESSION").expect("catalog scenario");
    let stressed = apply_stress(&book, &severe);
    let metrics = portfolio_metrics(&stressed);

    let regions = exposure_by_region(&stressed);
    let industries = exposure_by_industry(&stressed);

    for groups in [&regions, &industries] {
        let total: f64 = groups.values().map(|g| g.total_amount).sum();
        let count: usize = groups.values().map(|g| g.loan_count).sum();
        assert!((total - metrics.total_outstanding).abs() < 1e-9);
        assert_eq!(count, metrics.total_loans);

        // Recombining the groups' weighted PDs must reproduce the book PD.
        let weighted: f64 = groups.values().map(|g| g.avg_pd * g.total_amount).sum();
        assert!((weighted / total - metrics.portfolio_pd).abs() < 1e-12);
    }

    // The sample book has eight distinct regions and industries.
    assert_eq!(regions.len(), 8);
    assert_eq!(industries.len(), 8);
}

#[test]
fn expected_loss_stays_consistent_with_the_lgd_constant_under_stress() {
    let book = sample_book();
    let stagflation = RiskScenario::find("STAGFLATION").expect("catalog scenario");
    let stressed = apply_stress(&book, &stagflation);
    let metrics = portfolio_metrics(&stressed);

    let exposure: f64 = stressed
        .iter()
        .map(|loan| loan.amount * loan.probability_of_default)
        .sum();
    assert!((metrics.expected_loss - LOSS_GIVEN_DEFAULT * exposure).abs() < 1e-6);
}
