use banter_model::conversation::ConversationEntry;
use banter_model::personality::{Personality, TopicRule};
use banter_model::Origin;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

/// Fixed follow-up used when the previous turn was bot-authored and the new
/// input matched nothing else.
pub const CONTINUATION_PROMPT: &str = "Let's build on that — what part should we tackle first?";

/// Canonical matching surface: lowercase, with everything outside
/// `[a-z0-9]` and whitespace replaced by a single space. Runs of spaces are
/// not collapsed.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct TopicMatch<'a> {
    pub topic: &'a TopicRule,
    pub hits: usize,
}

/// Scores every topic against already-normalized text. A term counts at most
/// once no matter how often it occurs; containment is plain substring search,
/// not token match. Zero-hit topics are dropped and the rest are sorted by
/// hit count. The sort is stable, so equal counts keep declaration order.
pub fn score_topics<'a>(normalized: &str, topics: &'a [TopicRule]) -> Vec<TopicMatch<'a>> {
    let mut matches: Vec<_> = topics
        .iter()
        .map(|topic| TopicMatch {
            topic,
            hits: topic
                .terms
                .iter()
                .filter(|term| normalized.contains(term.as_str()))
                .count(),
        })
        .filter(|m| m.hits > 0)
        .collect();
    matches.sort_by(|a, b| b.hits.cmp(&a.hits));
    matches
}

fn is_greeting(normalized: &str) -> bool {
    let re = Regex::new(r"^(hi|hello|hey|yo|sup)\b").unwrap();
    re.is_match(normalized)
}

/// Picks a reply for `input`, first match wins: greeting, then best-scoring
/// topic, then the continuation prompt when the last history entry is
/// bot-authored, then fallback. Total over every input including the empty
/// string. The injected `rng` makes selection reproducible under test.
pub fn craft_reply(
    input: &str,
    history: &[ConversationEntry],
    personality: &Personality,
    rng: &mut impl Rng,
) -> String {
    let normalized = normalize(input);
    if is_greeting(&normalized) {
        return pick(&personality.greetings, rng);
    }

    let matches = score_topics(&normalized, &personality.topics);
    if let Some(best) = matches.first() {
        debug!(
            "Matched topic {:?} with {} term hits",
            best.topic.label, best.hits
        );
        return pick(&best.topic.replies, rng);
    }

    if history.last().map(|e| e.origin) == Some(Origin::Bot) {
        return CONTINUATION_PROMPT.to_string();
    }

    pick(&personality.fallbacks, rng)
}

fn pick(pool: &[String], rng: &mut impl Rng) -> String {
    // Pools are validated non-empty when the personality is loaded.
    pool.choose(rng).expect("non-empty candidate pool").clone()
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const N: usize = 100;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn personality() -> Personality {
        Personality::example()
    }

    fn bot_turn() -> Vec<ConversationEntry> {
        vec![ConversationEntry::bot("Bot", "Welcome!")]
    }

    fn user_turn() -> Vec<ConversationEntry> {
        vec![ConversationEntry::user("You", "hm")]
    }

    #[test]
    fn normalize_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Hello, World!"), "hello  world ");
        assert_eq!(normalize("Q3 roadmap?"), "q3 roadmap ");
    }

    #[test]
    fn normalize_handles_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for text in ["Hello!", "ĄĆĘ łóść", "a  b\tc", "", "42?!", "déjà vu"] {
            assert_eq!(normalize(&normalize(text)), normalize(text));
        }
    }

    #[test]
    fn normalize_emits_only_lowercase_digits_and_whitespace() {
        for text in ["MiXeD CaSe 123", "§§§", "emoji 🤖 input", "Ünïcödé"] {
            assert!(normalize(text)
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace()));
        }
    }

    #[test]
    fn greeting_reply_comes_from_greeting_pool() {
        let personality = personality();
        let reply = craft_reply("Hello there", &[], &personality, &mut rng());
        assert!(personality.greetings.contains(&reply));
    }

    #[test]
    fn greeting_prefix_requires_word_boundary() {
        // "history" and "supper" start with greeting words but are not greetings.
        let personality = personality();
        for input in ["history lesson", "supper time"] {
            let reply = craft_reply(input, &[], &personality, &mut rng());
            assert!(!personality.greetings.contains(&reply), "{input}");
            assert!(personality.fallbacks.contains(&reply), "{input}");
        }
    }

    #[test]
    fn roadmap_input_matches_planning_topic() {
        let personality = personality();
        let planning = &personality.topics[0];
        assert_eq!(planning.label, "planning");
        let reply = craft_reply("Let's make a roadmap for Q3", &[], &personality, &mut rng());
        assert!(planning.replies.contains(&reply));
    }

    #[test]
    fn multi_hit_topic_beats_single_hit_topic() {
        // "plan" hits planning once; "debug the code" hits tech three times
        // (code, bug, debug).
        let personality = personality();
        let tech = personality
            .topics
            .iter()
            .find(|t| t.label == "tech")
            .unwrap();
        let reply = craft_reply("plan to debug the code", &[], &personality, &mut rng());
        assert!(tech.replies.contains(&reply));
    }

    #[test]
    fn equal_hits_resolve_to_declaration_order() {
        let personality = personality();
        let matches = score_topics("plan code", &personality.topics);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].topic.label, "planning");
        assert_eq!(matches[0].hits, 1);
        assert_eq!(matches[1].topic.label, "tech");
    }

    #[test]
    fn repeated_term_occurrences_count_once() {
        let personality = personality();
        let matches = score_topics("bug bug bug", &personality.topics);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].topic.label, "tech");
        assert_eq!(matches[0].hits, 1);
    }

    #[test]
    fn term_matches_inside_longer_words() {
        // Substring containment: "debugging" carries both "bug" and "debug".
        let personality = personality();
        let matches = score_topics("debugging", &personality.topics);
        assert_eq!(matches[0].topic.label, "tech");
        assert_eq!(matches[0].hits, 2);
    }

    #[test]
    fn continuation_after_bot_turn() {
        let reply = craft_reply("zzz qqq", &bot_turn(), &personality(), &mut rng());
        assert_eq!(reply, CONTINUATION_PROMPT);
    }

    #[test]
    fn no_continuation_after_user_turn() {
        let personality = personality();
        let reply = craft_reply("zzz qqq", &user_turn(), &personality, &mut rng());
        assert!(personality.fallbacks.contains(&reply));
    }

    #[test]
    fn unmatched_input_with_empty_history_falls_back() {
        let personality = personality();
        let reply = craft_reply("xylophone weather", &[], &personality, &mut rng());
        assert!(personality.fallbacks.contains(&reply));
    }

    #[test]
    fn empty_input_falls_through() {
        let personality = personality();
        let reply = craft_reply("", &[], &personality, &mut rng());
        assert!(personality.fallbacks.contains(&reply));
        let reply = craft_reply("", &bot_turn(), &personality, &mut rng());
        assert_eq!(reply, CONTINUATION_PROMPT);
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let personality = personality();
        for input in ["Hello there", "need a plan", "xylophone weather"] {
            let first = craft_reply(input, &[], &personality, &mut rng());
            let second = craft_reply(input, &[], &personality, &mut rng());
            assert_eq!(first, second, "{input}");
        }
    }

    #[test]
    fn replies_vary_across_draws() {
        let personality = personality();
        let mut rng = rand::thread_rng();
        let distinct = (0..N)
            .map(|_| craft_reply("Hello there", &[], &personality, &mut rng))
            .unique()
            .count();
        assert!(distinct > 1);
    }
}
