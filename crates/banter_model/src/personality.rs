use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named cluster of trigger substrings and associated canned replies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicRule {
    pub label: String,
    pub terms: Vec<String>,
    pub replies: Vec<String>,
}

impl TopicRule {
    pub fn new(
        label: impl Into<String>,
        terms: impl IntoIterator<Item = impl Into<String>>,
        replies: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        TopicRule {
            label: label.into(),
            terms: terms.into_iter().map(Into::into).collect(),
            replies: replies.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Personality {
    #[serde(default)]
    pub greetings: Vec<String>,

    #[serde(default)]
    pub fallbacks: Vec<String>,

    #[serde(default)]
    pub topics: Vec<TopicRule>,
}

#[derive(Error, Debug)]
pub enum PersonalityError {
    #[error("no greetings configured")]
    NoGreetings,
    #[error("no fallbacks configured")]
    NoFallbacks,
    #[error("topic {0:?} has no terms")]
    NoTerms(String),
    #[error("topic {0:?} has no replies")]
    NoReplies(String),
}

impl Personality {
    /// Every candidate pool must be non-empty, otherwise reply selection
    /// could not guarantee a non-empty answer.
    pub fn validate(&self) -> Result<(), PersonalityError> {
        if self.greetings.is_empty() {
            return Err(PersonalityError::NoGreetings);
        }
        if self.fallbacks.is_empty() {
            return Err(PersonalityError::NoFallbacks);
        }
        for topic in &self.topics {
            if topic.terms.is_empty() {
                return Err(PersonalityError::NoTerms(topic.label.clone()));
            }
            if topic.replies.is_empty() {
                return Err(PersonalityError::NoReplies(topic.label.clone()));
            }
            for term in &topic.terms {
                // Matching runs on a lowercased surface, so such a term can never hit.
                if term.chars().any(|c| c.is_uppercase()) {
                    warn!("Topic {:?}: term {:?} contains uppercase characters", topic.label, term);
                }
            }
        }
        Ok(())
    }

    pub fn example() -> Self {
        Personality {
            greetings: vec![
                "Hey there! What's on your mind today?".into(),
                "Hi! Ready when you are — what can I help with?".into(),
                "Hello! Ask me anything or let me know what you’re working on.".into(),
            ],
            fallbacks: vec![
                "I'm not sure I understand that yet, but we can figure it out together.".into(),
                "That's new to me, but let's break it down and tackle it step by step.".into(),
                "I don't have that information, yet I can help brainstorm a strategy around it."
                    .into(),
            ],
            topics: vec![
                TopicRule::new(
                    "planning",
                    ["plan", "roadmap", "schedule", "timeline", "strateg"],
                    [
                        "A quick plan: clarify your objective, list the milestones, then break them into actionable next steps.",
                        "Let’s map it out: vision → milestones → weekly focus → daily tasks. Want to fill it in together?",
                        "Start with the outcome you want, then work backward to the next thing that moves you there.",
                    ],
                ),
                TopicRule::new(
                    "ideas",
                    ["idea", "brainstorm", "creative", "concept"],
                    [
                        "Try a “three angles” brainstorm: obvious, risky, and wildcard. Which sounds fun to explore?",
                        "Let’s riff! Describe your constraints and goal, and I’ll pitch variations.",
                        "Think of three audiences, then tailor the idea to each — you’ll discover fresh directions fast.",
                    ],
                ),
                TopicRule::new(
                    "motivation",
                    ["stuck", "motivation", "energy", "burnout", "tired"],
                    [
                        "Momentum hack: name one tiny task you can finish in under 5 minutes and celebrate it.",
                        "Energy check: hydrate, two deep breaths, and reset your intention — small rituals raise focus.",
                        "Try “time boxing” 20 minutes with a single goal. Short bursts make big tasks feel doable.",
                    ],
                ),
                TopicRule::new(
                    "tech",
                    ["code", "bug", "debug", "api", "database", "deploy"],
                    [
                        "Start by restating the problem: what did you expect, what happened, and what changed recently?",
                        "Log the inputs/outputs to isolate the breaking point — debugging is detective work with data.",
                        "Version control saves the day: checkpoint your state, experiment freely, and roll back if needed.",
                    ],
                ),
            ],
        }
    }
}

impl Default for Personality {
    fn default() -> Self {
        Personality::example()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn example_personality_is_valid() {
        assert!(Personality::example().validate().is_ok());
    }

    #[test]
    fn empty_greetings_rejected() {
        let personality = Personality {
            greetings: vec![],
            ..Personality::example()
        };
        assert!(matches!(
            personality.validate(),
            Err(PersonalityError::NoGreetings)
        ));
    }

    #[test]
    fn topic_without_replies_rejected() {
        let mut personality = Personality::example();
        personality.topics.push(TopicRule::new(
            "hollow",
            ["void"],
            Vec::<String>::new(),
        ));
        let err = personality.validate().unwrap_err();
        assert_eq!(&err.to_string(), "topic \"hollow\" has no replies");
    }
}
