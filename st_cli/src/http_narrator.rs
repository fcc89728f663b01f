//! HTTP narrative generator backed by a `generateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use swiss_tables::narrative::{
    Citation, NarrativeError, NarrativeGenerator, NarrativeReport, NarrativeRequest,
    NarrativeResult,
};

/// Narrative generator that calls a remote text generation API
pub struct HttpNarrator {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_attributions: Vec<Attribution>,
}

#[derive(Debug, Deserialize)]
struct Attribution {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

impl<'a> GenerateRequest<'a> {
    fn from_request(request: &'a NarrativeRequest) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: &request.context,
                }],
            }],
            system_instruction: request.system_instruction.as_deref().map(|text| Content {
                parts: vec![Part { text }],
            }),
            tools: if request.use_search {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            } else {
                Vec::new()
            },
        }
    }
}

impl GenerateResponse {
    /// First candidate's first text part, plus web citations that carry both
    /// a URI and a title
    fn into_report(self) -> NarrativeResult<NarrativeReport> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(NarrativeError::EmptyResponse)?;

        let text = candidate
            .content
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(NarrativeError::EmptyResponse)?;

        let sources = candidate
            .grounding_metadata
            .map(|m| m.grounding_attributions)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|a| {
                let web = a.web?;
                Some(Citation {
                    uri: web.uri?,
                    title: web.title?,
                })
            })
            .collect();

        Ok(NarrativeReport { text, sources })
    }
}

impl HttpNarrator {
    /// Create a new narrator for `api_url`, authenticated with `api_key`
    ///
    /// Every request, including reading the response body, is abandoned after
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_url,
            api_key,
            client,
        })
    }
}

/// Map a response status to the error the retry loop acts on
fn check_status(status: StatusCode) -> NarrativeResult<()> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(NarrativeError::RateLimited);
    }
    if !status.is_success() {
        return Err(NarrativeError::Http {
            status: status.as_u16(),
        });
    }
    Ok(())
}

fn transport_error(context: &str, e: &reqwest::Error) -> NarrativeError {
    if e.is_timeout() {
        NarrativeError::Transport(format!("{context}: request timed out"))
    } else {
        NarrativeError::Transport(format!("{context}: {e}"))
    }
}

#[async_trait]
impl NarrativeGenerator for HttpNarrator {
    async fn generate(&self, request: &NarrativeRequest) -> NarrativeResult<NarrativeReport> {
        let body = GenerateRequest::from_request(request);

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("Failed to send request", &e))?;

        let status = response.status();
        debug!("Narrative request returned {}", status);
        check_status(status)?;

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| transport_error("Failed to parse response", &e))?;
        parsed.into_report()
    }
}
