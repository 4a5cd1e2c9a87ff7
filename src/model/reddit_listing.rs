use serde::{Deserialize, Serialize};

use crate::model::item::{ItemKind, MonitoredItem};

/// `GET /r/<subs>/comments` and `/r/<subs>/new` responses.
#[derive(Serialize, Deserialize, Debug)]
pub struct Listing {
    pub kind: String,
    pub data: ListingData,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ListingData {
    pub children: Vec<Thing>,
    pub after: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Thing {
    /// `t1` for comments, `t3` for submissions.
    pub kind: String,
    pub data: ThingData,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ThingData {
    pub id: String,
    pub name: String,
    pub author: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl Thing {
    pub fn into_item(self) -> Option<MonitoredItem> {
        let kind = match self.kind.as_str() {
            "t1" => ItemKind::Comment,
            "t3" => ItemKind::Submission,
            _ => return None,
        };
        let data = self.data;
        Some(MonitoredItem {
            id: data.id,
            fullname: data.name,
            kind,
            title: if kind == ItemKind::Submission { data.title } else { None },
            body: if kind == ItemKind::Comment { data.body } else { None },
            author: data.author.unwrap_or_else(|| "[deleted]".to_string()),
        })
    }
}

impl Listing {
    pub fn into_items(self) -> Vec<MonitoredItem> {
        self.data
            .children
            .into_iter()
            .filter_map(Thing::into_item)
            .collect()
    }
}

/// `POST /api/comment` with `api_type=json`.
#[derive(Serialize, Deserialize, Debug)]
pub struct CommentResponse {
    pub json: CommentResponseBody,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CommentResponseBody {
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}
