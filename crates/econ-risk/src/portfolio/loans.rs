use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LoanProduct {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GeographicRegion {
    pub id: &'static str,
    pub name: &'static str,
    pub state: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndustrySegment {
    pub id: &'static str,
    pub name: &'static str,
    pub sector: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoanStatus {
    #[serde(rename = "current")]
    Current,
    #[serde(rename = "past_due_30")]
    PastDue30,
    #[serde(rename = "past_due_60")]
    PastDue60,
    #[serde(rename = "past_due_90")]
    PastDue90,
    #[serde(rename = "default")]
    Default,
}

impl LoanStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::PastDue30 => "30 Days Past Due",
            Self::PastDue60 => "60 Days Past Due",
            Self::PastDue90 => "90 Days Past Due",
            Self::Default => "In Default",
        }
    }
}

/// One position in the book. Values are immutable: stress application clones
/// a loan and adjusts the clone, never the original.
#[derive(Debug, Clone, Serialize)]
pub struct Loan {
    pub id: &'static str,
    pub amount: f64,
    pub interest_rate: f64,
    pub term_months: u32,
    pub origination_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub product: LoanProduct,
    pub region: GeographicRegion,
    pub industry: IndustrySegment,
    pub credit_score: u16,
    pub ltv: f64,
    pub status: LoanStatus,
    pub probability_of_default: f64,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date literal")
}

/// The illustrative loan book the dashboard stresses. Rebuilt per call; the
/// analytics recompute from scratch on every scenario selection.
pub fn sample_book() -> Vec<Loan> {
    vec![
        Loan {
            id: "LOAN001",
            amount: 250_000.0,
            interest_rate: 4.25,
            term_months: 360,
            origination_date: date(2023, 3, 15),
            maturity_date: date(2053, 3, 15),
            product: LoanProduct {
                id: "MORTGAGE",
                name: "Residential Mortgage",
                description: "30-year fixed rate mortgage",
            },
            region: GeographicRegion {
                id: "CA_BAY",
                name: "San Francisco Bay Area",
                state: "CA",
            },
            industry: IndustrySegment {
                id: "TECH",
                name: "Technology",
                sector: "Information Technology",
            },
            credit_score: 750,
            ltv: 0.8,
            status: LoanStatus::Current,
            probability_of_default: 0.02,
        },
        Loan {
            id: "LOAN002",
            amount: 500_000.0,
            interest_rate: 6.75,
            term_months: 84,
            origination_date: date(2023, 6, 20),
            maturity_date: date(2030, 6, 20),
            product: LoanProduct {
                id: "COMMERCIAL",
                name: "Commercial Real Estate",
                description: "Commercial property loan",
            },
            region: GeographicRegion {
                id: "TX_DALLAS",
                name: "Dallas-Fort Worth",
                state: "TX",
            },
            industry: IndustrySegment {
                id: "RETAIL",
                name: "Retail Trade",
                sector: "Consumer Discretionary",
            },
            credit_score: 680,
            ltv: 0.75,
            status: LoanStatus::Current,
            probability_of_default: 0.045,
        },
        Loan {
            id: "LOAN003",
            amount: 75_000.0,
            interest_rate: 5.5,
            term_months: 60,
            origination_date: date(2023, 1, 10),
            maturity_date: date(2028, 1, 10),
            product: LoanProduct {
                id: "AUTO",
                name: "Auto Loan",
                description: "Vehicle financing",
            },
            region: GeographicRegion {
                id: "FL_MIAMI",
                name: "Miami-Dade",
                state: "FL",
            },
            industry: IndustrySegment {
                id: "HEALTHCARE",
                name: "Healthcare",
                sector: "Healthcare",
            },
            credit_score: 720,
            ltv: 0.9,
            status: LoanStatus::Current,
            probability_of_default: 0.03,
        },
        Loan {
            id: "LOAN004",
            amount: 150_000.0,
            interest_rate: 8.25,
            term_months: 36,
            origination_date: date(2023, 9, 5),
            maturity_date: date(2026, 9, 5),
            product: LoanProduct {
                id: "SBA",
                name: "SBA Business Loan",
                description: "Small business administration loan",
            },
            region: GeographicRegion {
                id: "NY_NYC",
                name: "New York City",
                state: "NY",
            },
            industry: IndustrySegment {
                id: "HOSPITALITY",
                name: "Hospitality",
                sector: "Consumer Discretionary",
            },
            credit_score: 640,
            ltv: 0.7,
            status: LoanStatus::PastDue30,
            probability_of_default: 0.12,
        },
        Loan {
            id: "LOAN005",
            amount: 300_000.0,
            interest_rate: 4.75,
            term_months: 300,
            origination_date: date(2023, 4, 18),
            maturity_date: date(2048, 4, 18),
            product: LoanProduct {
                id: "MORTGAGE",
                name: "Residential Mortgage",
                description: "25-year fixed rate mortgage",
            },
            region: GeographicRegion {
                id: "WA_SEATTLE",
                name: "Seattle Metropolitan",
                state: "WA",
            },
            industry: IndustrySegment {
                id: "FINANCE",
                name: "Financial Services",
                sector: "Financials",
            },
            credit_score: 780,
            ltv: 0.75,
            status: LoanStatus::Current,
            probability_of_default: 0.015,
        },
        Loan {
            id: "LOAN006",
            amount: 450_000.0,
            interest_rate: 7.5,
            term_months: 120,
            origination_date: date(2023, 8, 12),
            maturity_date: date(2033, 8, 12),
            product: LoanProduct {
                id: "COMMERCIAL",
                name: "Commercial Real Estate",
                description: "Office building loan",
            },
            region: GeographicRegion {
                id: "IL_CHICAGO",
                name: "Chicago Metro",
                state: "IL",
            },
            industry: IndustrySegment {
                id: "MANUFACTURING",
                name: "Manufacturing",
                sector: "Industrials",
            },
            credit_score: 700,
            ltv: 0.8,
            status: LoanStatus::Current,
            probability_of_default: 0.035,
        },
        Loan {
            id: "LOAN007",
            amount: 85_000.0,
            interest_rate: 9.75,
            term_months: 48,
            origination_date: date(2023, 7, 22),
            maturity_date: date(2027, 7, 22),
            product: LoanProduct {
                id: "PERSONAL",
                name: "Personal Loan",
                description: "Unsecured personal loan",
            },
            region: GeographicRegion {
                id: "GA_ATLANTA",
                name: "Atlanta Metro",
                state: "GA",
            },
            industry: IndustrySegment {
                id: "EDUCATION",
                name: "Education",
                sector: "Consumer Discretionary",
            },
            credit_score: 650,
            ltv: 0.0,
            status: LoanStatus::PastDue60,
            probability_of_default: 0.18,
        },
        Loan {
            id: "LOAN008",
            amount: 200_000.0,
            interest_rate: 5.25,
            term_months: 240,
            origination_date: date(2023, 5, 30),
            maturity_date: date(2043, 5, 30),
            product: LoanProduct {
                id: "MORTGAGE",
                name: "Residential Mortgage",
                description: "20-year fixed rate mortgage",
            },
            region: GeographicRegion {
                id: "CO_DENVER",
                name: "Denver Metro",
                state: "CO",
            },
            industry: IndustrySegment {
                id: "ENERGY",
                name: "Energy",
                sector: "Energy",
            },
            credit_score: 740,
            ltv: 0.85,
            status: LoanStatus::Current,
            probability_of_default: 0.025,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_book_holds_valid_positions() {
        let book = sample_book();
        assert_eq!(book.len(), 8);
        for loan in &book {
            assert!(loan.amount > 0.0, "{} has a non-positive amount", loan.id);
            assert!(
                (0.0..=1.0).contains(&loan.probability_of_default),
                "{} has a PD outside [0, 1]",
                loan.id
            );
            assert!(loan.maturity_date > loan.origination_date);
        }
    }
}
