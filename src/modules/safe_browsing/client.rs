use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::core::config::SafeBrowsingConfig;

/// Threat categories submitted with every lookup
const THREAT_TYPES: [&str; 4] = [
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SafeBrowsingError {
    #[error("Safe Browsing request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Safe Browsing returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Safe Browsing API key is not configured")]
    MissingApiKey,
}

/// A single threat reported for a URL
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatMatch {
    pub threat_type: String,
    #[serde(default)]
    pub platform_type: String,
    #[serde(default)]
    pub threat_entry_type: String,
    pub threat: ThreatEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatEntry {
    pub url: String,
}

/// Classifies URLs as safe or threat-bearing.
///
/// `lookup_urls` returns one entry per input URL, in input order; an empty
/// list for a URL means no threats were found.
#[async_trait]
pub trait UrlReputationChecker: Send + Sync {
    async fn lookup_urls(&self, urls: &[String])
        -> Result<Vec<Vec<ThreatMatch>>, SafeBrowsingError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindThreatMatchesRequest<'a> {
    client: ClientInfo<'a>,
    threat_info: ThreatInfo<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo<'a> {
    client_id: &'a str,
    client_version: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreatInfo<'a> {
    threat_types: &'a [&'a str],
    platform_types: &'a [&'a str],
    threat_entry_types: &'a [&'a str],
    threat_entries: Vec<ThreatEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct FindThreatMatchesResponse {
    #[serde(default)]
    matches: Vec<ThreatMatch>,
}

/// Google Safe Browsing Lookup API client
pub struct SafeBrowsingClient {
    http: Client,
    endpoint: String,
    api_key: String,
    client_id: String,
    client_version: String,
}

impl SafeBrowsingClient {
    pub fn new(config: &SafeBrowsingConfig, api_key: String) -> Result<Self, SafeBrowsingError> {
        if api_key.trim().is_empty() {
            return Err(SafeBrowsingError::MissingApiKey);
        }

        let http = Client::builder()
            .user_agent(format!("{}/{}", config.client_id, config.client_version))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/v4/threatMatches:find", config.server_url),
            api_key,
            client_id: config.client_id.clone(),
            client_version: config.client_version.clone(),
        })
    }
}

#[async_trait]
impl UrlReputationChecker for SafeBrowsingClient {
    async fn lookup_urls(
        &self,
        urls: &[String],
    ) -> Result<Vec<Vec<ThreatMatch>>, SafeBrowsingError> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        let body = FindThreatMatchesRequest {
            client: ClientInfo {
                client_id: &self.client_id,
                client_version: &self.client_version,
            },
            threat_info: ThreatInfo {
                threat_types: &THREAT_TYPES,
                platform_types: &["ANY_PLATFORM"],
                threat_entry_types: &["URL"],
                threat_entries: urls
                    .iter()
                    .map(|url| ThreatEntry { url: url.clone() })
                    .collect(),
            },
        };

        debug!("Safe Browsing lookup for {} url(s)", urls.len());

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SafeBrowsingError::Status { status, body });
        }

        let parsed: FindThreatMatchesResponse = response.json().await?;
        Ok(group_by_url(urls, parsed.matches))
    }
}

/// Distribute matches back onto the URLs they were reported for.
///
/// The service may report a threat under a canonicalized spelling of the
/// submitted URL. A match that lines up with no input is charged to every
/// input, so a reported threat can never be lost.
fn group_by_url(urls: &[String], matches: Vec<ThreatMatch>) -> Vec<Vec<ThreatMatch>> {
    let mut grouped: Vec<Vec<ThreatMatch>> = vec![Vec::new(); urls.len()];
    for threat in matches {
        match urls.iter().position(|u| *u == threat.threat.url) {
            Some(idx) => grouped[idx].push(threat),
            None => {
                tracing::warn!(
                    "Safe Browsing match for unsubmitted url {}, applying to all inputs",
                    threat.threat.url
                );
                for group in grouped.iter_mut() {
                    group.push(threat.clone());
                }
            }
        }
    }
    grouped
}
