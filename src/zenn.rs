use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Request};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, Result};

pub const DEFAULT_COUNT: u32 = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Latest,
    Daily,
    Weekly,
    Monthly,
    AllTime,
}

impl Order {
    pub const ALL: [Order; 5] = [
        Order::Latest,
        Order::Daily,
        Order::Weekly,
        Order::Monthly,
        Order::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Latest => "latest",
            Order::Daily => "daily",
            Order::Weekly => "weekly",
            Order::Monthly => "monthly",
            Order::AllTime => "alltime",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubjectKind {
    User,
    Topic,
}

impl SubjectKind {
    pub fn param(&self) -> &'static str {
        match self {
            SubjectKind::User => "username",
            SubjectKind::Topic => "topicname",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SubjectKind::User => "user",
            SubjectKind::Topic => "topic",
        }
    }
}

/// One upstream lookup. `subject` keeps the caller's spelling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleQuery {
    pub subject: String,
    pub kind: SubjectKind,
    pub count: u32,
    pub order: Order,
}

impl ArticleQuery {
    pub fn by_user(username: impl Into<String>, count: u32, order: Order) -> Result<Self> {
        Self::new(username.into(), SubjectKind::User, count, order)
    }

    pub fn by_topic(topicname: impl Into<String>, count: u32, order: Order) -> Result<Self> {
        Self::new(topicname.into(), SubjectKind::Topic, count, order)
    }

    fn new(subject: String, kind: SubjectKind, count: u32, order: Order) -> Result<Self> {
        if subject.trim().is_empty() {
            return Err(AppError::InvalidParams(format!("{} must not be empty", kind.param())));
        }
        if count == 0 {
            return Err(AppError::InvalidParams("count must be at least 1".to_string()));
        }
        Ok(Self { subject, kind, count, order })
    }

    /// Value sent upstream: topics are space-stripped and lowercased to match Zenn slugs.
    pub fn subject_param(&self) -> String {
        match self.kind {
            SubjectKind::User => self.subject.clone(),
            SubjectKind::Topic => normalize_topic(&self.subject),
        }
    }

    /// Query pairs in wire order.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            (self.kind.param(), self.subject_param()),
            ("count", self.count.to_string()),
            ("order", self.order.as_str().to_string()),
        ]
    }

    pub fn fetched_message(&self) -> String {
        format!("Fetched posts for {}: {}", self.kind.label(), self.subject)
    }
}

pub fn normalize_topic(topicname: &str) -> String {
    topicname.replace(' ', "").to_lowercase()
}

/// Upstream client. A fresh `reqwest::Client` is built per call and dropped when the call ends.
#[derive(Clone, Debug)]
pub struct ZennClient {
    endpoint: String,
    timeout: Duration,
}

impl ZennClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.zenn_endpoint.clone(), config.http_timeout)
    }

    fn http_client(&self, operation: &'static str) -> Result<Client> {
        // Redirects are reported as upstream failures, not followed.
        ClientBuilder::new()
            .timeout(self.timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|source| AppError::Transport { operation, source })
    }

    pub fn build_request(&self, client: &Client, query: &ArticleQuery, operation: &'static str) -> Result<Request> {
        client
            .get(&self.endpoint)
            .query(&query.query_pairs())
            .build()
            .map_err(|source| AppError::Transport { operation, source })
    }

    pub async fn fetch_articles(&self, query: &ArticleQuery, operation: &'static str) -> Result<Value> {
        let client = self.http_client(operation)?;
        let request = self.build_request(&client, query, operation)?;

        let response = client
            .execute(request)
            .await
            .map_err(|source| AppError::Transport { operation, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus { operation, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| AppError::Transport { operation, source })?;

        parse_article_list(&body, operation)
    }
}

/// Parses the body as-is; only the top-level `articles` array is checked.
pub fn parse_article_list(body: &str, operation: &'static str) -> Result<Value> {
    let value: Value = serde_json::from_str(body).map_err(|e| AppError::MalformedResponse {
        operation,
        details: e.to_string(),
    })?;

    match value.get("articles") {
        Some(Value::Array(_)) => Ok(value),
        _ => Err(AppError::MalformedResponse {
            operation,
            details: "expected an object with an `articles` array".to_string(),
        }),
    }
}
