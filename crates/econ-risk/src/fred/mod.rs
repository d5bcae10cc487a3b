use crate::config::FredConfig;
use crate::indicators::IndicatorKey;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Failures talking to or interpreting the upstream FRED API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("FRED request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("FRED API returned status {status}")]
    Upstream { status: StatusCode },
    #[error("observation value '{raw}' is not numeric")]
    Malformed { raw: String },
}

/// Raw observation as FRED serves it: the value is a string, with `"."`
/// standing in for a missing data point.
#[derive(Debug, Clone, Deserialize)]
pub struct FredObservation {
    pub date: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<FredObservation>,
}

/// The latest decoded data point for one indicator. `value: None` means the
/// series had no usable observation, which is distinct from a zero reading.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorReading {
    pub indicator: IndicatorKey,
    pub value: Option<f64>,
    pub observation_date: String,
}

/// Server-side FRED fetcher. Only constructible from a [`FredConfig`], which
/// cannot be loaded without the API credential.
#[derive(Debug, Clone)]
pub struct FredClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FredClient {
    pub fn new(config: &FredConfig) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetches observations for a series, most recent first.
    pub async fn series_observations(
        &self,
        series_id: &str,
        limit: usize,
    ) -> Result<Vec<FredObservation>, FetchError> {
        let url = format!("{}/series/observations", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("limit", &limit.to_string()),
                ("sort_order", "desc"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Upstream { status });
        }

        let body: ObservationsResponse = response.json().await?;
        Ok(body.observations)
    }

    /// Decodes the most recent observation for an indicator.
    pub async fn latest_value(&self, key: IndicatorKey) -> Result<IndicatorReading, FetchError> {
        let observations = self.series_observations(key.series_id(), 1).await?;
        decode_latest(key, observations)
    }
}

/// Decodes the newest observation into a reading. A series with no
/// observations at all yields `value: None` and an empty date.
fn decode_latest(
    key: IndicatorKey,
    observations: Vec<FredObservation>,
) -> Result<IndicatorReading, FetchError> {
    let Some(latest) = observations.into_iter().next() else {
        debug!(series = key.series_id(), "series returned no observations");
        return Ok(IndicatorReading {
            indicator: key,
            value: None,
            observation_date: String::new(),
        });
    };

    let value = parse_observation_value(&latest.value)?;
    Ok(IndicatorReading {
        indicator: key,
        value,
        observation_date: latest.date,
    })
}

/// FRED encodes a missing data point as the literal string `"."`.
pub fn parse_observation_value(raw: &str) -> Result<Option<f64>, FetchError> {
    if raw == "." {
        return Ok(None);
    }
    raw.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| FetchError::Malformed {
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_sentinel_decodes_to_missing() {
        assert_eq!(parse_observation_value(".").expect("sentinel ok"), None);
    }

    #[test]
    fn numeric_strings_decode() {
        assert_eq!(
            parse_observation_value("4.1").expect("numeric ok"),
            Some(4.1)
        );
        assert_eq!(
            parse_observation_value(" -0.3 ").expect("numeric ok"),
            Some(-0.3)
        );
    }

    #[test]
    fn garbage_is_a_malformed_error() {
        let err = parse_observation_value("n/a").expect_err("not numeric");
        assert!(matches!(err, FetchError::Malformed { raw } if raw == "n/a"));
    }

    #[test]
    fn empty_series_decodes_to_a_missing_reading() {
        let reading = decode_latest(IndicatorKey::Gdp, Vec::new()).expect("empty list is fine");
        assert_eq!(reading.indicator, IndicatorKey::Gdp);
        assert_eq!(reading.value, None);
        assert!(reading.observation_date.is_empty());
    }

    #[test]
    fn newest_observation_wins() {
        let observations = vec![
            FredObservation {
                date: "2026-07-01".to_string(),
                value: "4.2".to_string(),
            },
            FredObservation {
                date: "2026-06-01".to_string(),
                value: "4.1".to_string(),
            },
        ];

        let reading = decode_latest(IndicatorKey::Unrate, observations).expect("decodes");
        assert_eq!(reading.value, Some(4.2));
        assert_eq!(reading.observation_date, "2026-07-01");
    }
}
