//! Client for the server-side `/sort` endpoint.
//!
//! The service takes the array and the selected algorithm ids as
//! JSON-encoded query parameters and answers with a map from algorithm id
//! to either a step sequence with timing, or a per-algorithm error marker.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::time::Duration;

use crate::algo::AlgoId;
use crate::step::Step;

/// One attempt, no retries; this bounds how long a hung server can stall
/// the start action.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-algorithm result inside the response map.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AlgoOutcome {
    Run(AlgoRun),
    Error(AlgoError),
}

#[derive(Debug, Deserialize)]
pub struct AlgoRun {
    pub steps: Vec<Step>,
    /// Milliseconds. The reference server formats this as a string
    /// (`"12.34"`); newer servers send a plain number. Both decode here,
    /// anything unparseable becomes `None`.
    #[serde(default, deserialize_with = "time_taken_ms")]
    pub time_taken: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AlgoError {
    pub error: String,
}

pub type SortResponse = HashMap<String, AlgoOutcome>;

fn time_taken_ms<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
    })
}

pub struct SortClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SortClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET `{endpoint}/sort?array=[..]&algorithms=[..]`.
    pub async fn fetch_steps(
        &self,
        array: &[i64],
        algorithms: &[AlgoId],
    ) -> Result<SortResponse> {
        let url = format!("{}/sort", self.endpoint);
        tracing::debug!(%url, ?algorithms, len = array.len(), "fetching sort steps");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("array", serde_json::to_string(array)?),
                ("algorithms", serde_json::to_string(algorithms)?),
            ])
            .send()
            .await
            .with_context(|| format!("requesting {}", url))?
            .error_for_status()
            .context("sort service returned an error status")?;

        response
            .json()
            .await
            .context("decoding sort service response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_run_with_string_time() {
        // shape the reference server emits
        let json = r#"{
            "bubble": {
                "steps": [{"compare": [0, 1]}, {"swap": [0, 1]}],
                "time_taken": "12.34"
            }
        }"#;
        let response: SortResponse = serde_json::from_str(json).unwrap();
        match &response["bubble"] {
            AlgoOutcome::Run(run) => {
                assert_eq!(run.steps.len(), 2);
                assert_eq!(run.time_taken, Some(12.34));
            }
            AlgoOutcome::Error(_) => panic!("expected a run"),
        }
    }

    #[test]
    fn test_decode_run_with_numeric_time() {
        let json = r#"{"merge": {"steps": [], "time_taken": 0.5}}"#;
        let response: SortResponse = serde_json::from_str(json).unwrap();
        match &response["merge"] {
            AlgoOutcome::Run(run) => assert_eq!(run.time_taken, Some(0.5)),
            AlgoOutcome::Error(_) => panic!("expected a run"),
        }
    }

    #[test]
    fn test_decode_missing_time() {
        let json = r#"{"quick": {"steps": [{"pivot": 2}]}}"#;
        let response: SortResponse = serde_json::from_str(json).unwrap();
        match &response["quick"] {
            AlgoOutcome::Run(run) => assert_eq!(run.time_taken, None),
            AlgoOutcome::Error(_) => panic!("expected a run"),
        }
    }

    #[test]
    fn test_decode_error_marker() {
        let json = r#"{"bogo": {"error": "Unsupported algorithm", "time_taken": "N/A"}}"#;
        let response: SortResponse = serde_json::from_str(json).unwrap();
        match &response["bogo"] {
            AlgoOutcome::Error(e) => assert_eq!(e.error, "Unsupported algorithm"),
            AlgoOutcome::Run(_) => panic!("expected an error marker"),
        }
    }

    #[test]
    fn test_decode_mixed_response() {
        let json = r#"{
            "bubble": {"steps": [{"compare": [0, 1]}], "time_taken": "0.01"},
            "merge": {"error": "Unsupported algorithm", "time_taken": "N/A"}
        }"#;
        let response: SortResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(response["bubble"], AlgoOutcome::Run(_)));
        assert!(matches!(response["merge"], AlgoOutcome::Error(_)));
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let client = SortClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000");
    }
}
