use serde::{Deserialize, Serialize};

/// One comic as it is fetched from the upstream api and kept in the store.
///
/// The json names `num` and `transcript` are shared with stores written by earlier
/// builds and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "num")]
    pub id: u32,
    #[serde(rename = "transcript", default)]
    pub payload: String,
}

impl Record {
    pub fn new(id: u32, payload: impl Into<String>) -> Record {
        Record { id, payload: payload.into() }
    }
}
