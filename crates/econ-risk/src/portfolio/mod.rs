pub mod exposure;
pub mod loans;
pub mod metrics;
pub mod scenarios;

pub use exposure::{
    current_economic_state, economic_risk_impact, portfolio_summary, sample_segments,
    EconomicState, PortfolioSegment, PortfolioSummary, PotentialLoss, SegmentRiskImpact,
};
pub use loans::{sample_book, GeographicRegion, IndustrySegment, Loan, LoanProduct, LoanStatus};
pub use metrics::{
    apply_stress, exposure_by_industry, exposure_by_region, portfolio_metrics, GroupExposure,
    PortfolioMetrics, LOSS_GIVEN_DEFAULT,
};
pub use scenarios::{EconomicFactors, RiskScenario};
