use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dao::kv_store::CollectionKey;

/// Document holding a whole collection: `{ _id: "gameData", _rev: .., value: [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchValueDocument {
    /// Collection key, used as the document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Current revision; absent on first write.
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    /// The whole collection.
    pub value: Value,
}

impl From<(CollectionKey, Value, Option<String>)> for CouchValueDocument {
    fn from((key, value, rev): (CollectionKey, Value, Option<String>)) -> Self {
        Self {
            id: key.as_str().to_owned(),
            rev,
            value,
        }
    }
}
