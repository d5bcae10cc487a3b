use econ_risk::indicators::IndicatorKey;
use econ_risk::portfolio::{
    current_economic_state, economic_risk_impact, portfolio_summary, sample_segments,
};

#[test]
fn sample_exposure_view_is_internally_consistent() {
    let segments = sample_segments();
    let state = current_economic_state();
    let summary = portfolio_summary(&segments);

    assert!(summary.total_portfolio_value > 0.0);
    assert_eq!(
        summary.total_loan_count,
        segments.iter().map(|s| u64::from(s.loan_count)).sum::<u64>()
    );

    let min_score = segments
        .iter()
        .map(|s| s.current_risk_score)
        .fold(f64::INFINITY, f64::min);
    let max_score = segments
        .iter()
        .map(|s| s.current_risk_score)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(summary.avg_risk_score >= min_score && summary.avg_risk_score <= max_score);

    for segment in &segments {
        let impact = economic_risk_impact(segment, &state);

        assert!(impact.projected_loss <= 0.25 * segment.total_value + 1e-6);
        assert!(impact.impact_score >= 0.0);

        // Every surfaced factor genuinely clears the materiality floor.
        for factor in &impact.major_risk_factors {
            let weight = segment.risk_weights.get(factor).copied().unwrap_or(0.0);
            assert!(weight > 0.0, "{} surfaced an unweighted factor", segment.id);
        }
    }
}

#[test]
fn consumer_segments_are_sentiment_sensitive_in_the_snapshot() {
    // The snapshot carries depressed consumer sentiment, so heavily
    // sentiment-weighted segments must flag UMCSENT as a major factor.
    let segments = sample_segments();
    let state = current_economic_state();

    let personal = segments
        .iter()
        .find(|s| s.id == "PERSONAL")
        .expect("personal lending segment present");
    let impact = economic_risk_impact(personal, &state);
    assert!(impact.major_risk_factors.contains(&IndicatorKey::Umcsent));
    assert!(impact.projected_loss > 0.0);
}
