use serde::{Deserialize, Serialize};

/// One option of a backend dictionary (`/lab/dicts/*`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictItem {
    pub value: i32,
    pub label: String,
}
