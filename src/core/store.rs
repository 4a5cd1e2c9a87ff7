use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::coursebot::{CourseBotError, ErrorKind};

/// The `serviced` namespace: item ids that already got a dispatch decision.
#[async_trait]
pub trait ServicedStore: Send + Sync {
    async fn is_serviced(&self, item_id: &str) -> Result<bool, CourseBotError>;

    /// Idempotent; marking twice leaves the same state.
    async fn mark_serviced(&self, item_id: &str) -> Result<(), CourseBotError>;
}

/// In-process store, lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    serviced: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.serviced.lock().map(|set| set.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ServicedStore for MemoryStore {
    async fn is_serviced(&self, item_id: &str) -> Result<bool, CourseBotError> {
        let set = self.serviced.lock().map_err(|err| poisoned(&err.to_string()))?;
        Ok(set.contains(item_id))
    }

    async fn mark_serviced(&self, item_id: &str) -> Result<(), CourseBotError> {
        let mut set = self.serviced.lock().map_err(|err| poisoned(&err.to_string()))?;
        set.insert(item_id.to_string());
        Ok(())
    }
}

fn poisoned(message: &str) -> CourseBotError {
    CourseBotError::new(ErrorKind::Store, message)
}
