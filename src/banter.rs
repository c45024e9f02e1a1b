use banter_model::conversation::{Conversation, ConversationEntry};
use banter_model::personality::Personality;
use config::Config;
use futures_util::stream::{StreamExt as _, TryStreamExt as _};
use log::{debug, info};
use message_bus::{MessageBus, UiCommand};
use ui_state::UiState;

use crate::utils::print_err;

pub(crate) mod config;
pub(crate) mod message_bus;
pub(crate) mod store;
pub(crate) mod ui_state;

/// Shown when the command stream fails underneath the dispatcher.
const APOLOGY_REPLY: &str = "Something went wrong, but I am back now.";

pub struct Banter {
    conversation: Conversation,
    config: Config,
    personality: Personality,
}

impl Banter {
    pub fn new(config: Config, personality: Personality) -> Self {
        let mut conversation = Conversation::default();
        conversation.push(ConversationEntry::bot(
            &config.bot_name,
            &config.welcome_message,
        ));
        Banter {
            conversation,
            config,
            personality,
        }
    }

    pub async fn dispatch_ui_command(&mut self, ui_command: UiCommand) {
        match ui_command {
            UiCommand::InitializeUi => {}
            UiCommand::SubmitMessage(text) => self.submit_message(&text).await,
            UiCommand::ClearConversation => self.clear_conversation(),
            UiCommand::CloseApplication => {
                info!(
                    "Discarding conversation with {} entries.",
                    self.conversation.len()
                );
            }
        }
    }

    pub async fn dispatch_ui_commands(mut self, message_bus: MessageBus) {
        let mut ui_command_stream = message_bus.subscribe().ui_command_stream().boxed();
        loop {
            match ui_command_stream.try_next().await {
                Ok(Some(command @ UiCommand::CloseApplication)) => {
                    self.dispatch_ui_command(command).await;
                    break;
                }
                Ok(Some(command)) => {
                    self.dispatch_ui_command(command).await;
                }
                Ok(None) => {
                    break;
                }
                Err(e) => {
                    print_err(&e);
                    self.note_disruption();
                }
            }
            message_bus.send(self.ui_state().into())
        }
    }

    pub fn ui_state(&self) -> UiState {
        UiState {
            bot_name: self.config.bot_name.clone(),
            entries: self.conversation.entries().to_vec(),
        }
    }

    async fn submit_message(&mut self, text: &str) {
        let message = text.trim();
        if message.is_empty() {
            debug!("Ignoring whitespace-only submission");
            return;
        }
        self.conversation
            .push(ConversationEntry::user(&self.config.user_name, message));

        // Emulated typing latency only; reply selection itself is instant.
        let delay = self.config.typing_delay(message.chars().count());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let reply = quipster::craft_reply(
            message,
            self.conversation.entries(),
            &self.personality,
            &mut rand::thread_rng(),
        );
        self.conversation
            .push(ConversationEntry::bot(&self.config.bot_name, reply));
    }

    fn clear_conversation(&mut self) {
        info!(
            "Clearing conversation ({} entries)",
            self.conversation.len()
        );
        self.conversation.reset(ConversationEntry::bot(
            &self.config.bot_name,
            &self.config.clear_message,
        ));
    }

    fn note_disruption(&mut self) {
        self.conversation
            .push(ConversationEntry::bot(&self.config.bot_name, APOLOGY_REPLY));
    }
}
