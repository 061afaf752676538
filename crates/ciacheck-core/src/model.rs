//! Request/response contract with the analysis backend.
//!
//! The backend answers `/analyze` with one of three JSON shapes that carry no
//! explicit tag. [`AnalysisResponse::decode`] turns them into an enum by field
//! presence: `error` first, then `details`, else the flat single-category
//! fields. Anything else is a decode error rather than a silent fallthrough.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{GatewayError, InputError};

/// One of the three CIA dimensions, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Confidentiality,
    Integrity,
    Availability,
}

impl Category {
    /// Fixed display order for full reports.
    pub const ALL: [Category; 3] = [
        Category::Confidentiality,
        Category::Integrity,
        Category::Availability,
    ];

    /// Key used on the wire and inside `details`.
    pub fn key(self) -> &'static str {
        match self {
            Category::Confidentiality => "confidentiality",
            Category::Integrity => "integrity",
            Category::Availability => "availability",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Confidentiality => "🔒",
            Category::Integrity => "🛡",
            Category::Availability => "⚡",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Confidentiality => "Confidentiality",
            Category::Integrity => "Integrity",
            Category::Availability => "Availability",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The category token a user action requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Single(Category),
    All,
}

impl Selection {
    /// Every token a trigger can carry.
    pub const TOKENS: [&'static str; 4] = ["confidentiality", "integrity", "availability", "all"];

    /// Map to the wire-level test type: "all" becomes "cia".
    pub fn test_type(self) -> TestType {
        match self {
            Selection::Single(Category::Confidentiality) => TestType::Confidentiality,
            Selection::Single(Category::Integrity) => TestType::Integrity,
            Selection::Single(Category::Availability) => TestType::Availability,
            Selection::All => TestType::Cia,
        }
    }

    /// The single requested category, `None` for "all".
    pub fn category(self) -> Option<Category> {
        match self {
            Selection::Single(category) => Some(category),
            Selection::All => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Selection::Single(category) => category.key(),
            Selection::All => "all",
        }
    }
}

impl FromStr for Selection {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confidentiality" => Ok(Selection::Single(Category::Confidentiality)),
            "integrity" => Ok(Selection::Single(Category::Integrity)),
            "availability" => Ok(Selection::Single(Category::Availability)),
            "all" => Ok(Selection::All),
            other => Err(InputError::UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Wire value of `test_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Confidentiality,
    Integrity,
    Availability,
    Cia,
}

impl TestType {
    pub fn as_str(self) -> &'static str {
        match self {
            TestType::Confidentiality => "confidentiality",
            TestType::Integrity => "integrity",
            TestType::Availability => "availability",
            TestType::Cia => "cia",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub url: String,
    pub test_type: TestType,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>, selection: Selection) -> Self {
        Self {
            url: url.into(),
            test_type: selection.test_type(),
        }
    }
}

/// Report for one CIA dimension, produced only by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryScore {
    pub score: u32,
    pub one_line: String,
    pub explanation: String,
    pub suggestion: String,
}

impl CategoryScore {
    /// Score clamped to a progress-bar percentage.
    pub fn percent(&self) -> u32 {
        self.score.min(100)
    }
}

/// One entry of a full report's `details`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOutcome {
    Scored(CategoryScore),
    /// The backend could not check this category (`{"error": "..."}`).
    Failed(String),
}

/// The full-report variant, answered for `test_type = "cia"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullReport {
    /// Average of the three scores; `null` when any category check failed.
    pub overall_score: Option<u32>,
    pub overall_summary: Option<String>,
    pub confidentiality: CategoryOutcome,
    pub integrity: CategoryOutcome,
    pub availability: CategoryOutcome,
}

impl FullReport {
    pub fn outcome(&self, category: Category) -> &CategoryOutcome {
        match category {
            Category::Confidentiality => &self.confidentiality,
            Category::Integrity => &self.integrity,
            Category::Availability => &self.availability,
        }
    }

    /// Entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, &CategoryOutcome)> {
        Category::ALL.into_iter().map(move |c| (c, self.outcome(c)))
    }
}

/// A decoded `/analyze` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResponse {
    Failed { error: String },
    Full(FullReport),
    Single(CategoryScore),
}

impl AnalysisResponse {
    /// Parse a raw body and decode it.
    pub fn from_json_str(body: &str) -> Result<Self, GatewayError> {
        let value: Value = serde_json::from_str(body)?;
        Self::decode(&value)
    }

    /// Discriminate the response shape by field presence.
    pub fn decode(value: &Value) -> Result<Self, GatewayError> {
        let object = value
            .as_object()
            .ok_or_else(|| GatewayError::decode("response body is not a JSON object"))?;

        if let Some(error) = error_field(object) {
            return Ok(AnalysisResponse::Failed { error });
        }

        if let Some(details) = object.get("details") {
            let details = details
                .as_object()
                .ok_or_else(|| GatewayError::decode("`details` is not an object"))?;
            let entry = |category: Category| -> Result<CategoryOutcome, GatewayError> {
                let raw = details.get(category.key()).ok_or_else(|| {
                    GatewayError::decode(format!("`details` has no `{}` entry", category))
                })?;
                decode_outcome(category, raw)
            };

            return Ok(AnalysisResponse::Full(FullReport {
                overall_score: object.get("score").and_then(Value::as_u64).map(clamp_u32),
                overall_summary: object
                    .get("one_line")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                confidentiality: entry(Category::Confidentiality)?,
                integrity: entry(Category::Integrity)?,
                availability: entry(Category::Availability)?,
            }));
        }

        let score = CategoryScore::deserialize(value)
            .map_err(|e| GatewayError::decode(format!("unrecognised response shape: {}", e)))?;
        Ok(AnalysisResponse::Single(score))
    }
}

/// A truthy scalar `error` field, as text.
///
/// `null`, `false`, `0` and `""` count as absent. Numbers and `true` render as
/// their JSON text.
fn error_field(object: &Map<String, Value>) -> Option<String> {
    match object.get("error")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn decode_outcome(category: Category, raw: &Value) -> Result<CategoryOutcome, GatewayError> {
    if let Some(error) = raw.as_object().and_then(error_field) {
        return Ok(CategoryOutcome::Failed(error));
    }
    CategoryScore::deserialize(raw)
        .map(CategoryOutcome::Scored)
        .map_err(|e| GatewayError::decode(format!("invalid `{}` entry: {}", category, e)))
}

fn clamp_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
