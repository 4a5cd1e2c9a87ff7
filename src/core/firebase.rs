use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::core::store::ServicedStore;
use crate::error::coursebot::{CourseBotError, ErrorKind};
use crate::model::config::FirebaseConfig;

const NAMESPACE: &str = "serviced";

/// `serviced` records kept in a Firebase Realtime Database, over its REST API.
pub struct FirebaseStore {
    client: Client,
    database_url: Url,
    auth: Option<String>,
}

impl FirebaseStore {
    pub fn new(config: &FirebaseConfig) -> Result<Self, CourseBotError> {
        // `Url::join` replaces the last segment unless the base ends with `/`.
        let mut base = config.database_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(FirebaseStore {
            client: Client::new(),
            database_url: Url::parse(&base)?,
            auth: config.auth.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CourseBotError> {
        let mut url = self.database_url.join(path)?;
        if let Some(auth) = &self.auth {
            url.query_pairs_mut().append_pair("auth", auth);
        }
        Ok(url)
    }
}

/// A record counts as set unless it is null, false, 0, "" or an empty container.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn store_error(err: CourseBotError) -> CourseBotError {
    err.with_kind(ErrorKind::Store)
}

#[async_trait]
impl ServicedStore for FirebaseStore {
    async fn is_serviced(&self, item_id: &str) -> Result<bool, CourseBotError> {
        let url = self.endpoint(&format!("{}/{}.json", NAMESPACE, item_id))?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| store_error(err.into()))?;
        let value: Value = response.json().await.map_err(|err| store_error(err.into()))?;
        Ok(is_truthy(&value))
    }

    async fn mark_serviced(&self, item_id: &str) -> Result<(), CourseBotError> {
        let url = self.endpoint(&format!("{}.json", NAMESPACE))?;
        let payload = HashMap::from([(item_id, true)]);
        self.client
            .patch(url)
            .json(&payload)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| store_error(err.into()))?;
        debug!("Marked {} as serviced", item_id);
        Ok(())
    }
}
