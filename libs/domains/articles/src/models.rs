use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_PAGE: u64 = 1;

/// Digits only; the empty string is allowed and means "use the default".
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]*$").unwrap());

/// An article as returned to clients.
///
/// Empty `description`/`image` and a missing `modified` are left out of the
/// JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
    pub created: DateTime<Utc>,
    /// RFC 3339, seconds precision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

/// Request body of `POST /v1/article`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ArticleInput {
    #[validate(
        required(message = "title is required"),
        length(min = 1, max = 100, message = "title must be between 1 and 100 characters")
    )]
    #[schema(example = "Clean architecture in practice", max_length = 100)]
    pub title: Option<String>,

    #[validate(
        required(message = "summary is required"),
        length(min = 1, max = 250, message = "summary must be between 1 and 250 characters")
    )]
    #[schema(max_length = 250)]
    pub summary: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 150, message = "image must be at most 150 characters"))]
    #[schema(max_length = 150)]
    pub image: Option<String>,
}

/// What the repository persists. `id: Some` targets an existing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveArticle {
    pub id: Option<i32>,
    pub title: String,
    pub summary: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created: DateTime<Utc>,
}

impl SaveArticle {
    /// New article from a validated request body.
    pub fn from_input(input: ArticleInput, created: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: input.title.unwrap_or_default(),
            summary: input.summary.unwrap_or_default(),
            description: input.description.filter(|d| !d.is_empty()),
            image: input.image.filter(|i| !i.is_empty()),
            created,
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}

/// Query string of `GET /v1/article`, still as sent by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QueryParams {
    /// Substring matched against the title
    pub q: Option<String>,

    /// One of `id`, `title`, `summary`, `created`, `modified`
    #[serde(rename = "orderBy")]
    #[validate(custom(function = "validate_order_by"))]
    pub order_by: Option<String>,

    /// `asc` or `desc`
    #[serde(rename = "sortBy")]
    #[validate(custom(function = "validate_sort_by"))]
    pub sort_by: Option<String>,

    #[validate(regex(path = *NUMERIC, message = "limit must be numeric"))]
    pub limit: Option<String>,

    #[validate(regex(path = *NUMERIC, message = "page must be numeric"))]
    pub page: Option<String>,
}

fn validate_order_by(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || OrderBy::parse(value).is_some() {
        return Ok(());
    }
    Err(ValidationError::new("order_by")
        .with_message("orderBy must be one of id, title, summary, created, modified".into()))
}

fn validate_sort_by(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || SortDirection::parse(value).is_some() {
        return Ok(());
    }
    Err(ValidationError::new("sort_by").with_message("sortBy must be asc or desc".into()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    Id,
    Title,
    Summary,
    #[default]
    Created,
    Modified,
}

impl OrderBy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "id" => Some(OrderBy::Id),
            "title" => Some(OrderBy::Title),
            "summary" => Some(OrderBy::Summary),
            "created" => Some(OrderBy::Created),
            "modified" => Some(OrderBy::Modified),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Parsed listing query. Never fails: anything unusable falls back to its
/// default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub q: String,
    pub order_by: OrderBy,
    pub sort: SortDirection,
    pub limit: u64,
    pub page: u64,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            order_by: OrderBy::default(),
            sort: SortDirection::default(),
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl ArticleQuery {
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn positive_or(value: Option<&str>, default: u64) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

impl From<QueryParams> for ArticleQuery {
    fn from(params: QueryParams) -> Self {
        Self {
            q: params.q.map(|q| q.trim().to_string()).unwrap_or_default(),
            order_by: params
                .order_by
                .as_deref()
                .and_then(OrderBy::parse)
                .unwrap_or_default(),
            sort: params
                .sort_by
                .as_deref()
                .and_then(SortDirection::parse)
                .unwrap_or_default(),
            limit: positive_or(params.limit.as_deref(), DEFAULT_LIMIT),
            page: positive_or(params.page.as_deref(), DEFAULT_PAGE),
        }
    }
}

/// One page of articles plus the number of rows matching the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlePage {
    pub data: Vec<Article>,
    pub total: u64,
}
