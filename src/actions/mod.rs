use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub desc: String,
    pub action: String, // `kind:verb:payload` dispatched by the launcher
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
}

pub mod snippets;
