use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod conversation;
pub mod personality;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
    User,
    Bot,
}

impl Origin {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "user" => Some(Origin::User),
            "bot" => Some(Origin::Bot),
            _ => None,
        }
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Origin::User => "user",
            Origin::Bot => "bot",
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn origin_from_str() {
        assert_eq!(Origin::from_str("Bot"), Some(Origin::Bot));
        assert_eq!(Origin::from_str("user"), Some(Origin::User));
        assert_eq!(Origin::from_str("llm"), None);
    }
}
