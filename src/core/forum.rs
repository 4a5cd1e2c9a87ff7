use async_trait::async_trait;

use crate::error::coursebot::CourseBotError;
use crate::model::item::MonitoredItem;

/// Read and reply access to the monitored subreddits.
#[async_trait]
pub trait Forum: Send + Sync {
    async fn newest_comments(&self) -> Result<Vec<MonitoredItem>, CourseBotError>;

    async fn newest_submissions(&self, limit: usize) -> Result<Vec<MonitoredItem>, CourseBotError>;

    async fn reply(&self, item: &MonitoredItem, body: &str) -> Result<(), CourseBotError>;
}
