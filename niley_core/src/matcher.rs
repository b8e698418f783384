//! Intent classifier - ordered regex matching of user utterances

use ahash::AHashSet;
use regex::{Regex, RegexBuilder};

use crate::error::PatternError;
use crate::types::{ClassifyResult, Intent, IntentDefinition, IntentMatch, Utterance};

/// Built-in phrase patterns, in evaluation order.
///
/// `{name}` in the greeting pattern is replaced by the escaped assistant name.
/// Weather sits ahead of search because search triggers on "what is".
const BUILTIN_PATTERNS: [(Intent, &str); 15] = [
    (
        Intent::Greeting,
        r"\b(hello|hi|hey|good\s+morning|good\s+afternoon|good\s+evening)\b\s*({name})?",
    ),
    (
        Intent::Time,
        r"\b(what(?:'s|’s|\s+is)\s+the\s+time|what\s+time\s+is\s+it|current\s+time|time\s+now|tell\s+me\s+the\s+time)\b",
    ),
    (
        Intent::Date,
        r"\b(what(?:'s|’s|\s+is)\s+the\s+date|today(?:'s|’s)?\s+date|current\s+date)\b",
    ),
    (
        Intent::Weather,
        r"\b(weather|temperature|forecast|rain|sunny|cloudy)\b",
    ),
    (
        Intent::News,
        r"\b(news|headlines|current\s+events|what(?:'s|’s|\s+is)\s+happening)\b",
    ),
    (
        Intent::Search,
        r"\b(search\s+for|look\s+up|what\s+is|who\s+is|where\s+is|tell\s+me\s+about|explain)\b",
    ),
    (
        Intent::Joke,
        r"\b(tell\s+(?:me\s+)?a\s+joke|make\s+me\s+laugh|jokes?)\b",
    ),
    (
        Intent::Name,
        r"\b(my\s+name\s+is|call\s+me|i(?:'m|’m|\s+am)\s+called|i(?:'m|’m|\s+am))\s+([\w\s]+)",
    ),
    (
        Intent::Thank,
        r"\b(thank\s+you|thanks|appreciate|grateful)\b",
    ),
    (
        Intent::HowAreYou,
        r"\b(how\s+are\s+you|how\s+do\s+you\s+feel|are\s+you\s+ok)\b",
    ),
    (
        Intent::Capabilities,
        r"\b(what\s+can\s+you\s+do|your\s+abilities|capabilities|features|help)\b",
    ),
    (
        Intent::Calculate,
        r"\b(calculate|what\s+is|solve)\b(?:\s+([\d+\-*/().][\d+\-*/().\s]*)|[\s.?!]*$)",
    ),
    (
        Intent::Stop,
        r"\b(stop|exit|quit|goodbye|bye|see\s+you)\b",
    ),
    (
        Intent::Love,
        r"\b(love\s+you|like\s+you|adore\s+you)\b",
    ),
    (
        Intent::Creator,
        r"\b(who\s+made\s+you|who\s+created\s+you|your\s+creator|who\s+built\s+you)\b",
    ),
];

/// The built-in intent definitions for an assistant called `assistant_name`.
pub fn default_definitions(assistant_name: &str) -> Vec<IntentDefinition> {
    let name = regex::escape(&assistant_name.trim().to_lowercase());
    BUILTIN_PATTERNS
        .iter()
        .map(|(intent, pattern)| IntentDefinition::new(*intent, pattern.replace("{name}", &name)))
        .collect()
}

/// Classifies utterances into at most one intent.
///
/// Definitions are evaluated in order and the first match wins, so the
/// order of the list is the intent priority.
pub struct IntentClassifier {
    definitions: Vec<IntentDefinition>,
    compiled: Vec<(Intent, Regex)>,
}

impl IntentClassifier {
    pub fn new(assistant_name: &str) -> Result<Self, PatternError> {
        Self::with_definitions(default_definitions(assistant_name))
    }

    pub fn with_definitions(definitions: Vec<IntentDefinition>) -> Result<Self, PatternError> {
        let mut seen = AHashSet::with_capacity(definitions.len());
        let mut compiled = Vec::with_capacity(definitions.len());

        for def in &definitions {
            if !seen.insert(def.intent) {
                return Err(PatternError::DuplicateIntent(def.intent));
            }
            let regex = RegexBuilder::new(&def.pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| PatternError::InvalidPattern {
                    intent: def.intent,
                    source,
                })?;
            compiled.push((def.intent, regex));
        }

        Ok(Self {
            definitions,
            compiled,
        })
    }

    pub fn definitions(&self) -> &[IntentDefinition] {
        &self.definitions
    }

    /// Classify a raw utterance.
    ///
    /// Blank input is `NoMatch` without consulting any pattern.
    pub fn classify(&self, raw: &str) -> ClassifyResult {
        match Utterance::parse(raw) {
            Some(utterance) => self.classify_utterance(&utterance),
            None => ClassifyResult::NoMatch,
        }
    }

    /// Classify an already-normalized utterance.
    ///
    /// Patterns are case-insensitive and run over the trimmed text, so
    /// the match is the same as on the lower-cased form while captures
    /// keep the speaker's casing.
    pub fn classify_utterance(&self, utterance: &Utterance) -> ClassifyResult {
        for (intent, regex) in &self.compiled {
            if let Some(caps) = regex.captures(&utterance.text) {
                let captures = caps
                    .iter()
                    .skip(1)
                    .map(|group| group.map(|m| m.as_str().to_string()))
                    .collect();
                return ClassifyResult::Match(IntentMatch::new(
                    *intent,
                    captures,
                    utterance.clone(),
                ));
            }
        }
        ClassifyResult::NoMatch
    }
}
