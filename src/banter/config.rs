use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_bot_name")]
    pub bot_name: String,

    #[serde(default = "default_user_name")]
    pub user_name: String,

    /// Disables the artificial typing delay. Useful for development and testing.
    #[serde(default)]
    pub test_mode: bool,

    /// Bot entry seeded into a fresh conversation.
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,

    /// Bot entry seeded after a conversation reset.
    #[serde(default = "default_clear_message")]
    pub clear_message: String,

    #[serde(default = "default_typing_delay_base_ms")]
    pub typing_delay_base_ms: u64,

    #[serde(default = "default_typing_delay_per_char_ms")]
    pub typing_delay_per_char_ms: u64,

    #[serde(default = "default_typing_delay_max_ms")]
    pub typing_delay_max_ms: u64,

    #[serde(default = "default_static_serving_dir")]
    pub static_serving_dir: PathBuf,

    #[serde(default = "default_serving_addr")]
    pub serving_addr: String,
}

fn default_bot_name() -> String {
    "Bot".into()
}

fn default_user_name() -> String {
    "You".into()
}

fn default_welcome_message() -> String {
    "Tip: add context (goal, constraints, vibe) to get richer replies.".into()
}

fn default_clear_message() -> String {
    "All cleared! What's next on your mind?".into()
}

fn default_typing_delay_base_ms() -> u64 {
    600
}

fn default_typing_delay_per_char_ms() -> u64 {
    20
}

fn default_typing_delay_max_ms() -> u64 {
    2000
}

fn default_static_serving_dir() -> PathBuf {
    "ui/dist".into()
}

fn default_serving_addr() -> String {
    "0.0.0.0:3000".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            user_name: default_user_name(),
            test_mode: false,
            welcome_message: default_welcome_message(),
            clear_message: default_clear_message(),
            typing_delay_base_ms: default_typing_delay_base_ms(),
            typing_delay_per_char_ms: default_typing_delay_per_char_ms(),
            typing_delay_max_ms: default_typing_delay_max_ms(),
            static_serving_dir: default_static_serving_dir(),
            serving_addr: default_serving_addr(),
        }
    }
}

impl Config {
    /// Emulated typing latency, proportional to input length and capped.
    pub fn typing_delay(&self, input_chars: usize) -> Duration {
        if self.test_mode {
            return Duration::ZERO;
        }
        let ms = self
            .typing_delay_max_ms
            .min(self.typing_delay_base_ms + self.typing_delay_per_char_ms * input_chars as u64);
        Duration::from_millis(ms)
    }
}
