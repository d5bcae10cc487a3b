use crate::indicators::{IndicatorKey, RiskTier};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Latest observed value per indicator, as fed into segment sensitivity math.
pub type EconomicState = HashMap<IndicatorKey, f64>;

/// A weighted share of `impact_score` below this floor is not worth surfacing
/// as a major risk factor.
const MAJOR_FACTOR_FLOOR: f64 = 0.05;

/// Projected losses are capped at this fraction of segment value no matter
/// how large the raw impact score gets.
const LOSS_FRACTION_CAP: f64 = 0.25;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PotentialLoss {
    pub warning: f64,
    pub critical: f64,
}

/// A slice of the book grouped by product/sector, with per-indicator
/// sensitivity weights. Weights are independent coefficients in [0, 1]; they
/// are not a distribution and need not sum to 1.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSegment {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub total_value: f64,
    pub loan_count: u32,
    pub avg_loan_size: f64,
    pub risk_weights: HashMap<IndicatorKey, f64>,
    pub current_risk_score: f64,
    pub potential_loss: PotentialLoss,
    pub sector: &'static str,
    pub geography: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentRiskImpact {
    pub impact_score: f64,
    pub major_risk_factors: HashSet<IndicatorKey>,
    pub projected_loss: f64,
}

/// Normalized stress contribution of one indicator reading, floored at zero.
///
/// The reference points here are a calibration of their own; they deliberately
/// differ from the alerting thresholds in `crate::indicators` and must not be
/// folded into them.
fn risk_contribution(key: IndicatorKey, value: f64) -> f64 {
    let raw = match key {
        IndicatorKey::Unrate => (value - 3.5) / 2.5,
        IndicatorKey::Cpiaucsl => (value - 2.0) / 3.0,
        IndicatorKey::Gdp => (2.5 - value) / 2.5,
        IndicatorKey::Dff => (value - 4.0) / 3.0,
        IndicatorKey::Umcsent => (85.0 - value) / 15.0,
    };
    raw.max(0.0)
}

/// Composite risk impact of the current economic state on one segment.
///
/// Indicators absent from the segment's weight table contribute nothing; an
/// indicator becomes a major risk factor only when its weighted share exceeds
/// the floor strictly.
pub fn economic_risk_impact(
    segment: &PortfolioSegment,
    state: &EconomicState,
) -> SegmentRiskImpact {
    let mut impact_score = 0.0;
    let mut major_risk_factors = HashSet::new();

    for (&key, &value) in state {
        let weight = segment.risk_weights.get(&key).copied().unwrap_or(0.0);
        let weighted = risk_contribution(key, value) * weight;
        impact_score += weighted;
        if weighted > MAJOR_FACTOR_FLOOR {
            major_risk_factors.insert(key);
        }
    }

    let projected_loss = segment.total_value * impact_score.min(LOSS_FRACTION_CAP);

    SegmentRiskImpact {
        impact_score,
        major_risk_factors,
        projected_loss,
    }
}

/// Tiering for segment risk scores (a 1-5 style scale, not indicator units).
pub fn score_tier(score: f64) -> RiskTier {
    if score >= 3.5 {
        RiskTier::Critical
    } else if score >= 2.5 {
        RiskTier::Warning
    } else {
        RiskTier::Normal
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RiskDistribution {
    pub normal: f64,
    pub warning: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PortfolioSummary {
    pub total_portfolio_value: f64,
    pub total_loan_count: u64,
    pub avg_risk_score: f64,
    pub risk_distribution: RiskDistribution,
    pub total_potential_loss: PotentialLoss,
}

/// Portfolio-wide rollup: value-weighted risk score, value shares by score
/// tier, and summed potential losses. An empty segment list yields an
/// all-zero summary rather than dividing by zero.
pub fn portfolio_summary(segments: &[PortfolioSegment]) -> PortfolioSummary {
    if segments.is_empty() {
        return PortfolioSummary::default();
    }

    let total_portfolio_value: f64 = segments.iter().map(|s| s.total_value).sum();
    let total_loan_count: u64 = segments.iter().map(|s| u64::from(s.loan_count)).sum();
    let avg_risk_score = segments
        .iter()
        .map(|s| s.current_risk_score * s.total_value)
        .sum::<f64>()
        / total_portfolio_value;

    let mut distribution = RiskDistribution::default();
    let mut total_potential_loss = PotentialLoss::default();
    for segment in segments {
        match score_tier(segment.current_risk_score) {
            RiskTier::Critical => distribution.critical += segment.total_value,
            RiskTier::Warning => distribution.warning += segment.total_value,
            RiskTier::Normal => distribution.normal += segment.total_value,
        }
        total_potential_loss.warning += segment.potential_loss.warning;
        total_potential_loss.critical += segment.potential_loss.critical;
    }
    distribution.normal /= total_portfolio_value;
    distribution.warning /= total_portfolio_value;
    distribution.critical /= total_portfolio_value;

    PortfolioSummary {
        total_portfolio_value,
        total_loan_count,
        avg_risk_score,
        risk_distribution: distribution,
        total_potential_loss,
    }
}

/// Snapshot of indicator readings used when live data is not in play (the
/// exposure view is a static what-if, not a live feed).
pub fn current_economic_state() -> EconomicState {
    HashMap::from([
        (IndicatorKey::Unrate, 3.9),
        (IndicatorKey::Cpiaucsl, 3.2),
        (IndicatorKey::Gdp, 2.1),
        (IndicatorKey::Dff, 5.33),
        (IndicatorKey::Umcsent, 69.1),
    ])
}

/// The illustrative segment book for the exposure view.
pub fn sample_segments() -> Vec<PortfolioSegment> {
    vec![
        PortfolioSegment {
            id: "RES_MORTGAGE",
            name: "Residential Mortgages",
            description: "Owner-occupied fixed and adjustable rate mortgages",
            total_value: 2_400_000_000.0,
            loan_count: 8_500,
            avg_loan_size: 282_000.0,
            risk_weights: HashMap::from([
                (IndicatorKey::Unrate, 0.40),
                (IndicatorKey::Dff, 0.30),
                (IndicatorKey::Umcsent, 0.20),
                (IndicatorKey::Gdp, 0.10),
            ]),
            current_risk_score: 2.1,
            potential_loss: PotentialLoss {
                warning: 48_000_000.0,
                critical: 180_000_000.0,
            },
            sector: "Consumer Lending",
            geography: "National",
        },
        PortfolioSegment {
            id: "CRE",
            name: "Commercial Real Estate",
            description: "Office, retail and industrial property loans",
            total_value: 1_800_000_000.0,
            loan_count: 450,
            avg_loan_size: 4_000_000.0,
            risk_weights: HashMap::from([
                (IndicatorKey::Gdp, 0.35),
                (IndicatorKey::Dff, 0.35),
                (IndicatorKey::Unrate, 0.20),
                (IndicatorKey::Cpiaucsl, 0.10),
            ]),
            current_risk_score: 3.2,
            potential_loss: PotentialLoss {
                warning: 54_000_000.0,
                critical: 162_000_000.0,
            },
            sector: "Commercial Lending",
            geography: "Major Metros",
        },
        PortfolioSegment {
            id: "SMALL_BIZ",
            name: "Small Business Lending",
            description: "SBA and conventional small business loans",
            total_value: 950_000_000.0,
            loan_count: 3_200,
            avg_loan_size: 297_000.0,
            risk_weights: HashMap::from([
                (IndicatorKey::Gdp, 0.40),
                (IndicatorKey::Umcsent, 0.25),
                (IndicatorKey::Unrate, 0.25),
                (IndicatorKey::Cpiaucsl, 0.10),
            ]),
            current_risk_score: 2.8,
            potential_loss: PotentialLoss {
                warning: 28_500_000.0,
                critical: 76_000_000.0,
            },
            sector: "Business Lending",
            geography: "Regional",
        },
        PortfolioSegment {
            id: "AUTO",
            name: "Auto Loans",
            description: "New and used vehicle financing",
            total_value: 620_000_000.0,
            loan_count: 12_400,
            avg_loan_size: 50_000.0,
            risk_weights: HashMap::from([
                (IndicatorKey::Unrate, 0.45),
                (IndicatorKey::Umcsent, 0.30),
                (IndicatorKey::Cpiaucsl, 0.15),
                (IndicatorKey::Dff, 0.10),
            ]),
            current_risk_score: 2.3,
            potential_loss: PotentialLoss {
                warning: 15_500_000.0,
                critical: 43_400_000.0,
            },
            sector: "Consumer Lending",
            geography: "National",
        },
        PortfolioSegment {
            id: "PERSONAL",
            name: "Personal & Card Lending",
            description: "Unsecured personal loans and revolving credit",
            total_value: 480_000_000.0,
            loan_count: 28_000,
            avg_loan_size: 17_000.0,
            risk_weights: HashMap::from([
                (IndicatorKey::Unrate, 0.50),
                (IndicatorKey::Umcsent, 0.35),
                (IndicatorKey::Cpiaucsl, 0.20),
            ]),
            current_risk_score: 3.6,
            potential_loss: PotentialLoss {
                warning: 24_000_000.0,
                critical: 57_600_000.0,
            },
            sector: "Consumer Lending",
            geography: "National",
        },
        PortfolioSegment {
            id: "ENERGY_CI",
            name: "Energy Sector C&I",
            description: "Commercial and industrial credit to energy producers",
            total_value: 350_000_000.0,
            loan_count: 85,
            avg_loan_size: 4_100_000.0,
            risk_weights: HashMap::from([
                (IndicatorKey::Gdp, 0.30),
                (IndicatorKey::Dff, 0.25),
                (IndicatorKey::Cpiaucsl, 0.25),
                (IndicatorKey::Unrate, 0.10),
            ]),
            current_risk_score: 2.6,
            potential_loss: PotentialLoss {
                warning: 10_500_000.0,
                critical: 31_500_000.0,
            },
            sector: "Commercial Lending",
            geography: "Gulf Coast & Mountain West",
        },
    ]
}
