//! Canned reply tables and random selection

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use ahash::AHashMap;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::ConfigError;

/// Tables of pre-written replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    Greeting,
    Thank,
    HowAreYou,
    Capabilities,
    Love,
    Creator,
    Unknown,
}

impl ResponseKind {
    pub const ALL: [ResponseKind; 7] = [
        ResponseKind::Greeting,
        ResponseKind::Thank,
        ResponseKind::HowAreYou,
        ResponseKind::Capabilities,
        ResponseKind::Love,
        ResponseKind::Creator,
        ResponseKind::Unknown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResponseKind::Greeting => "greeting",
            ResponseKind::Thank => "thank",
            ResponseKind::HowAreYou => "how_are_you",
            ResponseKind::Capabilities => "capabilities",
            ResponseKind::Love => "love",
            ResponseKind::Creator => "creator",
            ResponseKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResponseKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResponseKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownResponseTable(s.to_string()))
    }
}

/// Candidate replies per [`ResponseKind`]. Every table is non-empty.
#[derive(Debug, Clone)]
pub struct ResponseTable {
    tables: AHashMap<ResponseKind, Vec<String>>,
}

impl ResponseTable {
    pub fn defaults(assistant_name: &str) -> Self {
        let n = assistant_name;
        let mut tables = AHashMap::with_capacity(ResponseKind::ALL.len());

        tables.insert(
            ResponseKind::Greeting,
            vec![
                format!("Hello there! I'm {n}. How can I assist you today?"),
                format!("Hi! It's {n} here. What can I do for you?"),
                format!("Greetings! {n} at your service. How may I help?"),
                "Hello! Nice to hear from you. What would you like to know?".to_string(),
            ],
        );
        tables.insert(
            ResponseKind::Thank,
            owned(&[
                "You're most welcome!",
                "Happy to help!",
                "Anytime! I'm here for you.",
                "Glad I could assist!",
                "My pleasure!",
            ]),
        );
        tables.insert(
            ResponseKind::HowAreYou,
            owned(&[
                "I'm functioning perfectly, thank you for asking!",
                "All systems are operational and I'm ready to help!",
                "I'm doing great! How about you?",
                "Wonderful! Just waiting to assist you.",
                "I'm fine, thanks! What's on your mind?",
            ]),
        );
        tables.insert(
            ResponseKind::Capabilities,
            vec![
                format!(
                    "I'm {n}, your voice assistant! I can:\n\
                     • Tell you the current time and date\n\
                     • Give weather updates\n\
                     • Share news headlines\n\
                     • Search the web for information\n\
                     • Perform calculations\n\
                     • Tell jokes\n\
                     • Have conversations with you\n\
                     Just speak naturally and I'll do my best to help!"
                ),
                format!(
                    "As {n}, I can help with:\n\
                     Time and date information\n\
                     Weather forecasts\n\
                     Latest news\n\
                     Internet searches\n\
                     Mathematical calculations\n\
                     Entertainment (jokes)\n\
                     General conversation\n\
                     What would you like to try first?"
                ),
            ],
        );
        tables.insert(
            ResponseKind::Love,
            owned(&[
                "Aww, that's sweet! I'm here to help you anytime.",
                "Thank you! I'm programmed to assist and support you.",
                "You're kind! I appreciate our conversations.",
                "That's lovely to hear! How can I help you today?",
            ]),
        );
        tables.insert(
            ResponseKind::Creator,
            owned(&[
                "I was created by a developer who wanted to build a helpful assistant like me!",
                "I'm the result of programming magic by someone who wanted to create a useful tool.",
                "A developer built me to be your helpful assistant. I'm glad to be here!",
                "I exist thanks to programming skills and a desire to create helpful technology.",
            ]),
        );
        tables.insert(
            ResponseKind::Unknown,
            owned(&[
                "I'm not sure I understand. Could you rephrase that?",
                "I didn't catch that. Could you try saying it differently?",
                "Could you explain what you mean?",
                "I want to help, but I need you to rephrase your question.",
                "Let me think... could you ask that in another way?",
            ]),
        );

        Self { tables }
    }

    /// Replace whole tables by name. Tables not mentioned keep their defaults.
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, ConfigError> {
        for (name, responses) in overrides {
            let kind: ResponseKind = name.parse()?;
            if responses.is_empty() || responses.iter().any(|r| r.trim().is_empty()) {
                return Err(ConfigError::EmptyResponseTable(name.clone()));
            }
            self.tables.insert(kind, responses.clone());
        }
        Ok(self)
    }

    pub fn responses(&self, kind: ResponseKind) -> &[String] {
        self.tables.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Uniformly random reply from one table.
    pub fn pick<R: Rng + ?Sized>(&self, kind: ResponseKind, rng: &mut R) -> &str {
        self.responses(kind)
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_table_non_empty() {
        let table = ResponseTable::defaults("Niley");
        for kind in ResponseKind::ALL {
            assert!(!table.responses(kind).is_empty(), "{kind}");
        }
    }

    #[test]
    fn test_assistant_name_substituted() {
        let table = ResponseTable::defaults("Juno");
        assert!(table
            .responses(ResponseKind::Greeting)
            .iter()
            .any(|r| r.contains("Juno")));
    }

    #[test]
    fn test_pick_is_reproducible_with_seed() {
        let table = ResponseTable::defaults("Niley");
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(
                table.pick(ResponseKind::Unknown, &mut a),
                table.pick(ResponseKind::Unknown, &mut b)
            );
        }
    }

    #[test]
    fn test_pick_comes_from_table() {
        let table = ResponseTable::defaults("Niley");
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let reply = table.pick(ResponseKind::Thank, &mut rng);
            assert!(table
                .responses(ResponseKind::Thank)
                .iter()
                .any(|r| r == reply));
        }
    }

    #[test]
    fn test_override_replaces_table() {
        let mut overrides = BTreeMap::new();
        overrides.insert("thank".to_string(), vec!["Cheers!".to_string()]);
        let table = ResponseTable::defaults("Niley")
            .with_overrides(&overrides)
            .unwrap();
        assert_eq!(table.responses(ResponseKind::Thank), ["Cheers!".to_string()]);
        assert!(table.responses(ResponseKind::Love).len() > 1);
    }

    #[test]
    fn test_override_rejects_unknown_and_empty() {
        let mut overrides = BTreeMap::new();
        overrides.insert("farewell".to_string(), vec!["Bye".to_string()]);
        assert!(matches!(
            ResponseTable::defaults("Niley").with_overrides(&overrides),
            Err(ConfigError::UnknownResponseTable(name)) if name == "farewell"
        ));

        let mut overrides = BTreeMap::new();
        overrides.insert("love".to_string(), Vec::new());
        assert!(matches!(
            ResponseTable::defaults("Niley").with_overrides(&overrides),
            Err(ConfigError::EmptyResponseTable(name)) if name == "love"
        ));
    }

    #[test]
    fn test_override_rejects_blank_entry() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "greeting".to_string(),
            vec!["".to_string(), "Hi".to_string()],
        );
        assert!(matches!(
            ResponseTable::defaults("Niley").with_overrides(&overrides),
            Err(ConfigError::EmptyResponseTable(name)) if name == "greeting"
        ));
    }

    #[test]
    fn test_capabilities_are_listed_line_by_line() {
        let table = ResponseTable::defaults("Niley");
        let replies = table.responses(ResponseKind::Capabilities);
        assert_eq!(replies.len(), 2);
        for reply in replies {
            assert!(reply.lines().count() > 5, "{reply}");
        }
        let lines: Vec<&str> = replies[1].lines().collect();
        assert_eq!(lines[0], "As Niley, I can help with:");
        assert_eq!(lines[1], "Time and date information");
        assert_eq!(lines.last(), Some(&"What would you like to try first?"));
    }
}
