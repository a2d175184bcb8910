//! Chat-completions wire types and reply parsing.
//!
//! See: <https://platform.openai.com/docs/api-reference/chat>

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tripwise_core::{Category, DestinationRecord, RecommendationBatch, TripQuery, UpstreamError};

const SYSTEM_PROMPT: &str = "You are a local travel expert. Reply with a JSON array only, \
with no prose. Each element must be an object with the fields name (string), visitTime \
(minutes), travelTimeFromSource (minutes from the start location), distanceFromSource (km), \
distanceToSource (km back to the home address), rating (0 to 5), category (one of the listed \
categories) and popularity (1 to 10).";

/// Upper bound on suggestions requested per query.
const MAX_SUGGESTIONS: usize = 12;

/// Sampling temperature; low values keep numeric fields stable.
const TEMPERATURE: f64 = 0.2;

/// Request body for `POST {base}/chat/completions`.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

/// A single chat message.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: String) -> Self {
        Self {
            role: role.to_owned(),
            content,
        }
    }
}

/// Response body from the chat-completions endpoint.
///
/// Only the fields the recommender reads are modelled.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatResponse {
    /// Content of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

impl<'a> ChatRequest<'a> {
    /// Build the request asking for destinations suited to `query`.
    pub fn for_query(model: &'a str, query: &TripQuery) -> Self {
        Self {
            model,
            messages: vec![
                ChatMessage::new("system", SYSTEM_PROMPT.to_owned()),
                ChatMessage::new("user", describe_query(query)),
            ],
            temperature: TEMPERATURE,
        }
    }
}

fn describe_query(query: &TripQuery) -> String {
    let categories = Category::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let interests = if query.preferences.is_empty() {
        "no particular interests".to_owned()
    } else {
        query.preferences.tags().collect::<Vec<_>>().join(", ")
    };
    format!(
        "Suggest up to {MAX_SUGGESTIONS} places to visit starting from {start}, ending at \
         {home}, within {hours} hours. The traveller has {interests}. Allowed categories: \
         {categories}.",
        start = query.start_location,
        home = query.home_address,
        hours = query.available_hours,
    )
}

/// Remove a surrounding Markdown code fence, if present.
///
/// # Examples
/// ```
/// use tripwise_data::recommender::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
/// assert_eq!(strip_code_fence("  [2]  "), "[2]");
/// ```
#[must_use]
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = after_open
        .split_once('\n')
        .map_or(after_open, |(_lang, rest)| rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Interpret assistant content as a list of destination records.
///
/// Accepts a bare JSON array or an object carrying the array under
/// `destinations`. Each element is decoded and validated on its own.
///
/// # Errors
/// Returns [`UpstreamError::MalformedPayload`] when the content is not JSON
/// or holds no array of entries.
///
/// # Examples
/// ```
/// use tripwise_data::recommender::parse_recommendations;
///
/// let batch = parse_recommendations(
///     r#"[{"name": "Belém Tower", "visitTime": 45, "travelTimeFromSource": 20,
///          "distanceFromSource": 6, "rating": 4.5}, 42]"#,
/// )?;
/// assert_eq!(batch.destinations().len(), 1);
/// assert_eq!(batch.excluded().len(), 1);
/// # Ok::<(), tripwise_core::UpstreamError>(())
/// ```
pub fn parse_recommendations(content: &str) -> Result<RecommendationBatch, UpstreamError> {
    let value: Value = serde_json::from_str(strip_code_fence(content)).map_err(|err| {
        UpstreamError::MalformedPayload {
            message: format!("reply is not JSON ({})", json_failure(&err)),
        }
    })?;
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("destinations") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(malformed("reply object has no destinations array")),
        },
        _ => return Err(malformed("reply is neither an array nor an object")),
    };

    let batch = RecommendationBatch::from_records(
        entries
            .into_iter()
            .map(|entry| serde_json::from_value::<DestinationRecord>(entry).map_err(|e| e.to_string())),
    );
    for excluded in batch.excluded() {
        warn!(
            "excluded recommended entry {}: {}",
            excluded.index, excluded.reason
        );
    }
    Ok(batch)
}

fn malformed(message: &str) -> UpstreamError {
    UpstreamError::MalformedPayload {
        message: message.to_owned(),
    }
}

fn json_failure(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        serde_json::error::Category::Io => "io",
        serde_json::error::Category::Syntax => "syntax error",
        serde_json::error::Category::Data => "unexpected data",
        serde_json::error::Category::Eof => "truncated",
    }
}
