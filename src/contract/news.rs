// ABOUTME: News contract - location query request and the article payload.
// ABOUTME: Articles need a non-empty title and an http(s) URL to be kept.

use std::fmt;

use serde::Deserialize;

use super::ResultSchema;
use crate::tool::{Constraint, Contract, ParamSpec, ToolSpec};

pub const NEWS_TOOL: &str = "get_news";

/// Upper bound on articles scanned from one upstream response.
pub const MAX_ARTICLES: usize = 5;

/// Validated news request.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsRequest {
    pub location: String,
}

impl Contract for NewsRequest {
    fn spec() -> ToolSpec {
        ToolSpec::new(
            NEWS_TOOL,
            "Fetch today's latest news headlines about a location. Use when the \
             user asks what is happening in a city or country.",
            ResultSchema::Articles,
        )
        .param(
            ParamSpec::string("location", "City, region or country to search news for")
                .required()
                .constraint(Constraint::NonBlank),
        )
    }
}

/// A headline with a link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsArticle {
    pub title: String,
    pub url: url::Url,
}

impl NewsArticle {
    /// Build an article, rejecting blank titles and non-http(s) URLs.
    pub fn parse(title: &str, url: &str) -> Option<Self> {
        if title.trim().is_empty() {
            return None;
        }
        let url = url::Url::parse(url).ok()?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return None;
        }
        Some(Self {
            title: title.to_string(),
            url,
        })
    }
}

impl fmt::Display for NewsArticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.url)
    }
}
