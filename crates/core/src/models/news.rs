use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::NewsId;

/// A news article from `/api/news`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsArticle {
    #[serde(rename = "_id", alias = "id")]
    pub id: NewsId,
    pub title: String,
    #[serde(alias = "description")]
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
