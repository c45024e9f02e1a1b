use std::error::Error;
use std::io::{BufRead as _, BufReader, Write as _};

use banter_model::conversation::{Conversation, ConversationEntry};
use banter_model::personality::Personality;
use clap::Parser;
use clio::{Input, Output};
use serde_yaml;

/// CLI for chatting with a scripted personality
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File containing user messages, one per line
    #[clap(long, short, value_parser, default_value = "-")]
    input: Input,

    /// File containing a personality definition
    #[clap(long, value_parser)]
    personality_file: Option<Input>,

    /// File to write replies
    #[clap(long, short, value_parser, default_value = "-")]
    output: Output,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = Args::parse();
    let personality: Personality = match args.personality_file {
        Some(f) => serde_yaml::from_reader(f)?,
        None => Default::default(),
    };
    personality.validate()?;

    let mut conversation = Conversation::default();
    let mut rng = rand::thread_rng();
    for line in BufReader::new(args.input).lines() {
        let line = line?;
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        conversation.push(ConversationEntry::user("You", message));
        let reply = quipster::craft_reply(message, conversation.entries(), &personality, &mut rng);
        writeln!(args.output, "{reply}")?;
        conversation.push(ConversationEntry::bot("Bot", reply));
    }
    Ok(())
}
