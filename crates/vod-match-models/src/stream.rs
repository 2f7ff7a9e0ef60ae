use serde::{Deserialize, Serialize};

/// A playable item handed back to the host player
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamItem {
    pub name: String,
    pub description: String,
    pub url: String,
}
