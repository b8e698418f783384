//! Core data types for classification and dispatch results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named category of user request recognized by pattern matching.
///
/// Variant order is the default evaluation order of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Time,
    Date,
    Weather,
    News,
    Search,
    Joke,
    Name,
    Thank,
    HowAreYou,
    Capabilities,
    Calculate,
    Stop,
    Love,
    Creator,
}

impl Intent {
    /// All intents in priority order (first match wins).
    pub const ALL: [Intent; 15] = [
        Intent::Greeting,
        Intent::Time,
        Intent::Date,
        Intent::Weather,
        Intent::News,
        Intent::Search,
        Intent::Joke,
        Intent::Name,
        Intent::Thank,
        Intent::HowAreYou,
        Intent::Capabilities,
        Intent::Calculate,
        Intent::Stop,
        Intent::Love,
        Intent::Creator,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Time => "time",
            Intent::Date => "date",
            Intent::Weather => "weather",
            Intent::News => "news",
            Intent::Search => "search",
            Intent::Joke => "joke",
            Intent::Name => "name",
            Intent::Thank => "thank",
            Intent::HowAreYou => "how_are_you",
            Intent::Capabilities => "capabilities",
            Intent::Calculate => "calculate",
            Intent::Stop => "stop",
            Intent::Love => "love",
            Intent::Creator => "creator",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.name() == s)
            .ok_or_else(|| format!("unknown intent '{s}'"))
    }
}

/// Pairs an intent with the regular expression that recognizes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentDefinition {
    pub intent: Intent,
    pub pattern: String,
}

impl IntentDefinition {
    pub fn new(intent: Intent, pattern: impl Into<String>) -> Self {
        Self {
            intent,
            pattern: pattern.into(),
        }
    }
}

/// One user turn, trimmed, with its lower-cased form alongside
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Trimmed input with the speaker's capitalisation intact.
    pub text: String,
    /// Lower-cased `text`; what extractors and the fallback search see.
    pub normalized: String,
}

impl Utterance {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            normalized: text.to_lowercase(),
        })
    }

    pub fn word_count(&self) -> usize {
        self.normalized.split_whitespace().count()
    }
}

/// Represents a matched intent with its capture groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentMatch {
    pub intent: Intent,
    /// Capture groups 1..n in order; `None` where a group did not participate.
    pub captures: Vec<Option<String>>,
    pub utterance: Utterance,
}

impl IntentMatch {
    pub fn new(intent: Intent, captures: Vec<Option<String>>, utterance: Utterance) -> Self {
        Self {
            intent,
            captures,
            utterance,
        }
    }

    /// Capture group by its regex index (1-based).
    pub fn capture(&self, group: usize) -> Option<&str> {
        group
            .checked_sub(1)
            .and_then(|idx| self.captures.get(idx))
            .and_then(|c| c.as_deref())
    }
}

/// Result type for classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClassifyResult {
    #[serde(rename = "match")]
    Match(IntentMatch),
    #[serde(rename = "none")]
    NoMatch,
}

impl ClassifyResult {
    pub fn intent(&self) -> Option<Intent> {
        match self {
            ClassifyResult::Match(m) => Some(m.intent),
            ClassifyResult::NoMatch => None,
        }
    }
}

/// What the conversation loop gets back for one utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Reply {
    /// Natural-language text to be spoken.
    Say(String),
    /// End the current interaction. Never spoken aloud.
    Stop,
}

impl Reply {
    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::Say(text) => Some(text),
            Reply::Stop => None,
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Reply::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_names_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(intent.name().parse::<Intent>().unwrap(), intent);
        }
        assert!("weather_report".parse::<Intent>().is_err());
    }

    #[test]
    fn test_utterance_rejects_blank() {
        assert!(Utterance::parse("").is_none());
        assert!(Utterance::parse("   \t ").is_none());
    }

    #[test]
    fn test_utterance_normalizes() {
        let u = Utterance::parse("  Hello NILEY ").unwrap();
        assert_eq!(u.text, "Hello NILEY");
        assert_eq!(u.normalized, "hello niley");
        assert_eq!(u.word_count(), 2);
    }

    #[test]
    fn test_capture_is_one_based() {
        let m = IntentMatch::new(
            Intent::Name,
            vec![Some("my name is".into()), Some("Alex".into())],
            Utterance::parse("my name is Alex").unwrap(),
        );
        assert_eq!(m.capture(1), Some("my name is"));
        assert_eq!(m.capture(2), Some("Alex"));
        assert_eq!(m.capture(0), None);
        assert_eq!(m.capture(3), None);
    }

    #[test]
    fn test_classify_result_serializes_with_tag() {
        let json = serde_json::to_value(ClassifyResult::NoMatch).unwrap();
        assert_eq!(json["type"], "none");

        let m = IntentMatch::new(Intent::Joke, vec![], Utterance::parse("joke").unwrap());
        let json = serde_json::to_value(ClassifyResult::Match(m)).unwrap();
        assert_eq!(json["type"], "match");
        assert_eq!(json["intent"], "joke");
    }
}
