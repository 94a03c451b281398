use serde::{Deserialize, Serialize};

/// A talent on the agency roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talent {
    pub id: i64,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl Talent {
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() || self.name.to_lowercase().contains(&query)
    }
}
