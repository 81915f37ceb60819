//! The two Zenn tools exposed over MCP and the registry that dispatches to them.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::logging::Logger;
use crate::zenn::{ArticleQuery, DEFAULT_COUNT, Order, ZennClient};

pub const POSTS_BY_USERNAME: &str = "get_zenn_posts_by_username";
pub const POSTS_BY_TOPIC: &str = "get_zenn_posts_by_topic";

static ORDER_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let names: Vec<&str> = Order::ALL.iter().map(Order::as_str).collect();
    json!({
        "type": "string",
        "enum": names,
        "default": Order::default().as_str(),
        "description": "Sort order of the posts: latest, daily, weekly, monthly or alltime"
    })
});

static COUNT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "integer",
        "minimum": 1,
        "default": DEFAULT_COUNT,
        "description": "Number of posts to fetch"
    })
});

static ARTICLE_LIST_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "articles": {
                "type": "array",
                "items": { "type": "object", "additionalProperties": true }
            }
        },
        "required": ["articles"],
        "additionalProperties": true
    })
});

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn input_schema(&self) -> Value;

    fn output_schema(&self) -> Value {
        ARTICLE_LIST_SCHEMA.clone()
    }

    async fn execute(&self, arguments: Value) -> Result<Value>;
}

fn default_count() -> u32 {
    DEFAULT_COUNT
}

#[derive(Debug, Deserialize)]
struct PostsByUsernameArgs {
    username: String,
    #[serde(default = "default_count")]
    count: u32,
    #[serde(default)]
    order: Order,
}

#[derive(Debug, Deserialize)]
struct PostsByTopicArgs {
    topicname: String,
    #[serde(default = "default_count")]
    count: u32,
    #[serde(default)]
    order: Order,
}

/// Runs one query upstream and logs it under the tool's logger.
async fn run_query(zenn: &ZennClient, logger: &Logger, query: ArticleQuery, operation: &'static str) -> Result<Value> {
    let articles = zenn.fetch_articles(&query, operation).await?;
    logger.info(&query.fetched_message());
    logger.debug(&format!("Response data: {}", articles));
    Ok(articles)
}

pub struct PostsByUsernameTool {
    zenn: ZennClient,
    logger: Logger,
}

impl PostsByUsernameTool {
    pub fn new(zenn: ZennClient, logger: &Logger) -> Self {
        Self {
            zenn,
            logger: logger.scoped(POSTS_BY_USERNAME),
        }
    }
}

#[async_trait]
impl Tool for PostsByUsernameTool {
    fn name(&self) -> &'static str {
        POSTS_BY_USERNAME
    }

    fn description(&self) -> &'static str {
        "Fetches the posts of a Zenn user. Returns an object with an `articles` list."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "username": { "type": "string", "description": "Zenn username" },
                "count": COUNT_SCHEMA.clone(),
                "order": ORDER_SCHEMA.clone()
            },
            "required": ["username"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<Value> {
        let args: PostsByUsernameArgs =
            serde_json::from_value(arguments).map_err(|e| AppError::InvalidParams(e.to_string()))?;
        let query = ArticleQuery::by_user(args.username, args.count, args.order)?;
        run_query(&self.zenn, &self.logger, query, POSTS_BY_USERNAME).await
    }
}

pub struct PostsByTopicTool {
    zenn: ZennClient,
    logger: Logger,
}

impl PostsByTopicTool {
    pub fn new(zenn: ZennClient, logger: &Logger) -> Self {
        Self {
            zenn,
            logger: logger.scoped(POSTS_BY_TOPIC),
        }
    }
}

#[async_trait]
impl Tool for PostsByTopicTool {
    fn name(&self) -> &'static str {
        POSTS_BY_TOPIC
    }

    fn description(&self) -> &'static str {
        "Fetches the posts of a Zenn tech topic such as \"Python\" or \"JavaScript\". Returns an object with an `articles` list."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "topicname": {
                    "type": "string",
                    "description": "Zenn topic name, e.g. \"Python\", \"JavaScript\"; spaces and case are ignored"
                },
                "count": COUNT_SCHEMA.clone(),
                "order": ORDER_SCHEMA.clone()
            },
            "required": ["topicname"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<Value> {
        let args: PostsByTopicArgs =
            serde_json::from_value(arguments).map_err(|e| AppError::InvalidParams(e.to_string()))?;
        let query = ArticleQuery::by_topic(args.topicname, args.count, args.order)?;
        run_query(&self.zenn, &self.logger, query, POSTS_BY_TOPIC).await
    }
}

/// Registered tools, listed in registration order.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(zenn: ZennClient, logger: &Logger) -> Self {
        let tools: Vec<Box<dyn Tool>> = vec![
            Box::new(PostsByUsernameTool::new(zenn.clone(), logger)),
            Box::new(PostsByTopicTool::new(zenn, logger)),
        ];
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|tool| tool.name() == name).map(|tool| &**tool)
    }

    pub fn definitions(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "inputSchema": tool.input_schema(),
                    "outputSchema": tool.output_schema()
                })
            })
            .collect()
    }

    pub async fn call(&self, name: &str, arguments: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| AppError::InvalidParams(format!("Unknown tool: {}", name)))?;
        tool.execute(arguments).await
    }
}
