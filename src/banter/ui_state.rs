use banter_model::conversation::ConversationEntry;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub bot_name: String,
    pub entries: Vec<ConversationEntry>,
}
