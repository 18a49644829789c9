use serde::{Deserialize, Serialize};

/// Author entity - the owner of posts. Never mutated through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub name: String,
}
