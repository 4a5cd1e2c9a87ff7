use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Comment,
    Submission,
}

/// A post or comment read from one of the monitored subreddits.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MonitoredItem {
    pub id: String,
    /// Fullname (`t1_...` / `t3_...`), used as the reply target.
    pub fullname: String,
    pub kind: ItemKind,
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: String,
}

impl MonitoredItem {
    pub fn comment(id: &str, body: &str, author: &str) -> Self {
        MonitoredItem {
            id: id.to_string(),
            fullname: format!("t1_{}", id),
            kind: ItemKind::Comment,
            title: None,
            body: Some(body.to_string()),
            author: author.to_string(),
        }
    }

    pub fn submission(id: &str, title: &str, author: &str) -> Self {
        MonitoredItem {
            id: id.to_string(),
            fullname: format!("t3_{}", id),
            kind: ItemKind::Submission,
            title: Some(title.to_string()),
            body: None,
            author: author.to_string(),
        }
    }
}
