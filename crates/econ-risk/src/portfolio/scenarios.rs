use serde::Serialize;

/// Percentage-point shifts a scenario assumes for the macro backdrop. These
/// are descriptive context for the dashboard; the stress math itself runs off
/// `impact_multiplier`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EconomicFactors {
    pub unemployment_change: f64,
    pub inflation_change: f64,
    pub gdp_growth_change: f64,
    pub interest_rate_change: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RiskScenario {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub economic_factors: EconomicFactors,
    pub impact_multiplier: f64,
}

const BASE: RiskScenario = RiskScenario {
    id: "BASE",
    name: "Base Case",
    description: "Current economic conditions continue",
    economic_factors: EconomicFactors {
        unemployment_change: 0.0,
        inflation_change: 0.0,
        gdp_growth_change: 0.0,
        interest_rate_change: 0.0,
    },
    impact_multiplier: 1.0,
};

const MILD_RECESSION: RiskScenario = RiskScenario {
    id: "MILD_RECESSION",
    name: "Mild Recession",
    description: "Moderate economic downturn with rising unemployment",
    economic_factors: EconomicFactors {
        unemployment_change: 2.0,
        inflation_change: -0.5,
        gdp_growth_change: -1.5,
        interest_rate_change: -1.0,
    },
    impact_multiplier: 1.5,
};

const SEVERE_RECESSION: RiskScenario = RiskScenario {
    id: "SEVERE_RECESSION",
    name: "Severe Recession",
    description: "Major economic contraction similar to 2008 financial crisis",
    economic_factors: EconomicFactors {
        unemployment_change: 4.5,
        inflation_change: -1.0,
        gdp_growth_change: -3.0,
        interest_rate_change: -2.5,
    },
    impact_multiplier: 2.5,
};

const INFLATION_SPIKE: RiskScenario = RiskScenario {
    id: "INFLATION_SPIKE",
    name: "High Inflation",
    description: "Persistent high inflation with aggressive rate hikes",
    economic_factors: EconomicFactors {
        unemployment_change: 1.0,
        inflation_change: 3.0,
        gdp_growth_change: -0.5,
        interest_rate_change: 3.0,
    },
    impact_multiplier: 1.8,
};

const STAGFLATION: RiskScenario = RiskScenario {
    id: "STAGFLATION",
    name: "Stagflation",
    description: "High inflation combined with economic stagnation",
    economic_factors: EconomicFactors {
        unemployment_change: 3.0,
        inflation_change: 4.0,
        gdp_growth_change: -2.0,
        interest_rate_change: 2.0,
    },
    impact_multiplier: 2.2,
};

impl RiskScenario {
    pub const fn catalog() -> [Self; 5] {
        [
            BASE,
            MILD_RECESSION,
            SEVERE_RECESSION,
            INFLATION_SPIKE,
            STAGFLATION,
        ]
    }

    /// The identity scenario: multiplier 1.0 leaves every PD untouched.
    pub const fn base() -> Self {
        BASE
    }

    /// Case-insensitive lookup by scenario id.
    pub fn find(id: &str) -> Option<Self> {
        Self::catalog()
            .into_iter()
            .find(|scenario| scenario.id.eq_ignore_ascii_case(id.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_five_scenarios_with_positive_multipliers() {
        let scenarios = RiskScenario::catalog();
        assert_eq!(scenarios.len(), 5);
        for scenario in scenarios {
            assert!(scenario.impact_multiplier > 0.0, "{}", scenario.id);
        }
    }

    #[test]
    fn base_case_is_the_identity() {
        assert_eq!(RiskScenario::base().impact_multiplier, 1.0);
        assert_eq!(RiskScenario::base().id, "BASE");
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(
            RiskScenario::find("stagflation").map(|s| s.id),
            Some("STAGFLATION")
        );
        assert_eq!(
            RiskScenario::find(" Mild_Recession ").map(|s| s.id),
            Some("MILD_RECESSION")
        );
        assert!(RiskScenario::find("MELTDOWN").is_none());
    }
}
