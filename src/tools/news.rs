// ABOUTME: NewsAdapter - searches today's articles about a location and keeps
// ABOUTME: the well-formed ones among the first few returned.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::http;
use crate::config::NewsConfig;
use crate::contract::{NewsArticle, NewsRequest, MAX_ARTICLES};
use crate::tool::{ContractTool, ToolAdapter, ToolFailure, ToolResult};

const SERVICE: &str = "News";

pub type NewsTool = ContractTool<NewsAdapter>;

/// Adapter over the news "everything" search endpoint.
pub struct NewsAdapter {
    client: reqwest::Client,
    config: NewsConfig,
}

impl NewsAdapter {
    pub fn new(client: reqwest::Client, config: NewsConfig) -> Self {
        Self { client, config }
    }
}

/// Scan the first articles of a search body, dropping malformed entries.
pub(crate) fn parse_articles(body: &Value) -> Result<Vec<NewsArticle>, ToolFailure> {
    let articles = body
        .get("articles")
        .and_then(Value::as_array)
        .ok_or_else(|| ToolFailure::upstream_format("News response has no articles list"))?;

    Ok(articles
        .iter()
        .take(MAX_ARTICLES)
        .enumerate()
        .filter_map(|(index, raw)| {
            let title = raw.get("title").and_then(Value::as_str).unwrap_or_default();
            let url = raw.get("url").and_then(Value::as_str).unwrap_or_default();
            let article = NewsArticle::parse(title, url);
            if article.is_none() {
                warn!(index, "dropping article without title or valid url");
            }
            article
        })
        .collect())
}

#[async_trait]
impl ToolAdapter for NewsAdapter {
    type Request = NewsRequest;

    async fn execute(&self, request: NewsRequest) -> ToolResult {
        info!(location = %request.location, "fetching news");

        let url = format!("{}/everything", self.config.base_url);
        let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
        debug!(%url, from = %today, "news request");

        let call = self.client.get(&url).query(&[
            ("q", request.location.as_str()),
            ("from", today.as_str()),
            ("sortBy", "publishedAt"),
            ("apiKey", self.config.api_key.as_str()),
        ]);

        let result = http::get_json(call)
            .await
            .map_err(|e| e.into_failure(SERVICE))
            .and_then(|body| parse_articles(&body));

        match result {
            Ok(articles) if articles.is_empty() => {
                warn!(location = %request.location, "no news articles found");
                ToolResult::empty(format!("No news articles found for {}", request.location))
            }
            Ok(articles) => {
                info!(count = articles.len(), "news fetched");
                ToolResult::success(articles)
            }
            Err(failure) => {
                error!(error = %failure, "news request failed");
                failure.into()
            }
        }
    }
}
