use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of FRED series the dashboard monitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorKey {
    Unrate,
    Cpiaucsl,
    Gdp,
    Dff,
    Umcsent,
}

impl IndicatorKey {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Unrate,
            Self::Cpiaucsl,
            Self::Gdp,
            Self::Dff,
            Self::Umcsent,
        ]
    }

    pub const fn series_id(self) -> &'static str {
        match self {
            Self::Unrate => "UNRATE",
            Self::Cpiaucsl => "CPIAUCSL",
            Self::Gdp => "GDP",
            Self::Dff => "DFF",
            Self::Umcsent => "UMCSENT",
        }
    }

    /// Case-insensitive lookup, used for path parameters like `/api/indicators/unrate`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "UNRATE" => Some(Self::Unrate),
            "CPIAUCSL" => Some(Self::Cpiaucsl),
            "GDP" => Some(Self::Gdp),
            "DFF" => Some(Self::Dff),
            "UMCSENT" => Some(Self::Umcsent),
            _ => None,
        }
    }

    pub const fn definition(self) -> &'static IndicatorDefinition {
        match self {
            Self::Unrate => &UNRATE,
            Self::Cpiaucsl => &CPIAUCSL,
            Self::Gdp => &GDP,
            Self::Dff => &DFF,
            Self::Umcsent => &UMCSENT,
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.series_id())
    }
}

/// Whether an elevated reading is a deterioration or an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsWorse,
    LowerIsWorse,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndicatorDefinition {
    pub key: IndicatorKey,
    pub name: &'static str,
    pub description: &'static str,
    pub unit: &'static str,
    pub warning_level: f64,
    pub critical_level: f64,
    pub impact: &'static str,
    pub direction: Direction,
}

const UNRATE: IndicatorDefinition = IndicatorDefinition {
    key: IndicatorKey::Unrate,
    name: "Unemployment Rate",
    description: "Civilian Unemployment Rate",
    unit: "%",
    warning_level: 4.5,
    critical_level: 6.0,
    impact: "Higher unemployment correlates with increased default risk",
    direction: Direction::HigherIsWorse,
};

const CPIAUCSL: IndicatorDefinition = IndicatorDefinition {
    key: IndicatorKey::Cpiaucsl,
    name: "Inflation Rate",
    description: "Consumer Price Index for All Urban Consumers",
    unit: "%",
    warning_level: 3.0,
    critical_level: 5.0,
    impact: "High inflation affects borrowers' ability to repay loans",
    direction: Direction::HigherIsWorse,
};

const GDP: IndicatorDefinition = IndicatorDefinition {
    key: IndicatorKey::Gdp,
    name: "GDP Growth",
    description: "Gross Domestic Product",
    unit: "%",
    warning_level: 1.5,
    critical_level: 0.0,
    impact: "Economic growth impacts credit demand and risk levels",
    direction: Direction::LowerIsWorse,
};

const DFF: IndicatorDefinition = IndicatorDefinition {
    key: IndicatorKey::Dff,
    name: "Federal Funds Rate",
    description: "Federal Funds Effective Rate",
    unit: "%",
    warning_level: 5.0,
    critical_level: 7.0,
    impact: "Interest rate changes affect refinancing and default risk",
    direction: Direction::HigherIsWorse,
};

const UMCSENT: IndicatorDefinition = IndicatorDefinition {
    key: IndicatorKey::Umcsent,
    name: "Consumer Sentiment",
    description: "University of Michigan Consumer Sentiment",
    unit: "Index",
    warning_level: 80.0,
    critical_level: 70.0,
    impact: "Consumer confidence impacts payment behavior",
    direction: Direction::LowerIsWorse,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Normal,
    Warning,
    Critical,
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// Maps the latest reading of an indicator to a risk tier.
///
/// A missing observation is never alarming: `None` classifies as `Normal`.
/// Threshold bounds are inclusive, so a value sitting exactly on a level
/// belongs to the worse tier.
pub fn classify(key: IndicatorKey, value: Option<f64>) -> RiskTier {
    let Some(value) = value else {
        return RiskTier::Normal;
    };

    let definition = key.definition();
    match definition.direction {
        Direction::HigherIsWorse => {
            if value >= definition.critical_level {
                RiskTier::Critical
            } else if value >= definition.warning_level {
                RiskTier::Warning
            } else {
                RiskTier::Normal
            }
        }
        Direction::LowerIsWorse => {
            if value <= definition.critical_level {
                RiskTier::Critical
            } else if value <= definition.warning_level {
                RiskTier::Warning
            } else {
                RiskTier::Normal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_observation_is_never_alarming() {
        for key in IndicatorKey::ordered() {
            assert_eq!(classify(key, None), RiskTier::Normal);
        }
    }

    #[test]
    fn unemployment_boundaries_are_inclusive() {
        assert_eq!(classify(IndicatorKey::Unrate, Some(4.499)), RiskTier::Normal);
        assert_eq!(classify(IndicatorKey::Unrate, Some(4.5)), RiskTier::Warning);
        assert_eq!(classify(IndicatorKey::Unrate, Some(5.9)), RiskTier::Warning);
        assert_eq!(classify(IndicatorKey::Unrate, Some(6.0)), RiskTier::Critical);
    }

    #[test]
    fn gdp_classifies_downward() {
        assert_eq!(classify(IndicatorKey::Gdp, Some(1.5000001)), RiskTier::Normal);
        assert_eq!(classify(IndicatorKey::Gdp, Some(1.5)), RiskTier::Warning);
        assert_eq!(classify(IndicatorKey::Gdp, Some(0.0)), RiskTier::Critical);
        assert_eq!(classify(IndicatorKey::Gdp, Some(-2.0)), RiskTier::Critical);
    }

    #[test]
    fn sentiment_classifies_downward() {
        assert_eq!(classify(IndicatorKey::Umcsent, Some(95.0)), RiskTier::Normal);
        assert_eq!(classify(IndicatorKey::Umcsent, Some(80.0)), RiskTier::Warning);
        assert_eq!(classify(IndicatorKey::Umcsent, Some(70.0)), RiskTier::Critical);
    }

    #[test]
    fn classification_is_monotone_in_the_worse_direction() {
        let rising = [2.0, 4.0, 4.5, 5.5, 6.0, 9.0];
        let mut previous = RiskTier::Normal;
        for value in rising {
            let tier = classify(IndicatorKey::Unrate, Some(value));
            assert!(tier >= previous, "tier regressed at {value}");
            previous = tier;
        }

        let falling = [110.0, 85.0, 80.0, 75.0, 70.0, 40.0];
        let mut previous = RiskTier::Normal;
        for value in falling {
            let tier = classify(IndicatorKey::Umcsent, Some(value));
            assert!(tier >= previous, "tier regressed at {value}");
            previous = tier;
        }
    }

    #[test]
    fn parse_accepts_any_case() {
        assert_eq!(IndicatorKey::parse("unrate"), Some(IndicatorKey::Unrate));
        assert_eq!(IndicatorKey::parse(" Dff "), Some(IndicatorKey::Dff));
        assert_eq!(IndicatorKey::parse("SP500"), None);
    }

    #[test]
    fn tiers_are_totally_ordered() {
        assert!(RiskTier::Normal < RiskTier::Warning);
        assert!(RiskTier::Warning < RiskTier::Critical);
    }
}
