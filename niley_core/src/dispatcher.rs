//! Command dispatcher - turns one utterance into one reply

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::AssistantConfig;
use crate::entities::ArgumentExtractor;
use crate::error::Result;
use crate::matcher::IntentClassifier;
use crate::responses::{ResponseKind, ResponseTable};
use crate::services::{Services, YOUR_LOCATION};
use crate::types::{ClassifyResult, Intent, IntentMatch, Reply, Utterance};

pub const SEARCH_PROMPT: &str = "What would you like me to search for?";
pub const CALCULATE_PROMPT: &str = "Please tell me what to calculate.";

/// Utterances with more words than this fall back to a web search.
const SEARCH_FALLBACK_WORD_LIMIT: usize = 2;

/// Names remembered across turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_name: String,
    pub assistant_name: String,
}

/// Classifies utterances and answers them from canned tables or [`Services`].
///
/// One call to [`process`](Self::process) runs to completion, including any
/// delegated service call, before it returns.
pub struct CommandDispatcher<S, R = StdRng> {
    classifier: IntentClassifier,
    extractor: ArgumentExtractor,
    responses: ResponseTable,
    session: Session,
    services: S,
    rng: R,
}

impl<S: Services> CommandDispatcher<S, StdRng> {
    pub fn new(services: S, config: &AssistantConfig) -> Result<Self> {
        Self::with_rng(services, config, StdRng::from_entropy())
    }
}

impl<S: Services, R: Rng> CommandDispatcher<S, R> {
    pub fn with_rng(services: S, config: &AssistantConfig, rng: R) -> Result<Self> {
        let classifier = IntentClassifier::new(&config.assistant_name)?;
        let responses = config.response_table()?;
        Ok(Self {
            classifier,
            extractor: ArgumentExtractor::new(),
            responses,
            session: Session {
                user_name: config.default_user_name.clone(),
                assistant_name: config.assistant_name.clone(),
            },
            services,
            rng,
        })
    }

    pub fn user_name(&self) -> &str {
        &self.session.user_name
    }

    pub fn assistant_name(&self) -> &str {
        &self.session.assistant_name
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn services(&self) -> &S {
        &self.services
    }

    /// Answer one utterance.
    ///
    /// Returns `None` for blank input, [`Reply::Stop`] when the user asks
    /// to end the interaction, and text to speak otherwise.
    pub fn process(&mut self, utterance: &str) -> Option<Reply> {
        let utterance = Utterance::parse(utterance)?;

        let reply = match self.classifier.classify_utterance(&utterance) {
            ClassifyResult::Match(m) => {
                tracing::debug!(intent = %m.intent, "classified utterance");
                self.dispatch(m)
            }
            ClassifyResult::NoMatch => self.fallback(&utterance),
        };
        Some(reply)
    }

    fn dispatch(&mut self, m: IntentMatch) -> Reply {
        let text = &m.utterance.normalized;
        let say = match m.intent {
            Intent::Greeting => self.canned(ResponseKind::Greeting),
            Intent::Time | Intent::Date => self.services.current_time_and_date(),
            Intent::Weather => {
                let city = self.extractor.extract_city(text);
                self.services
                    .weather(city.as_deref().unwrap_or(YOUR_LOCATION))
            }
            Intent::News => self.services.news(),
            Intent::Search => match self.extractor.extract_search_query(text) {
                Some(query) => self.services.web_search(&query),
                None => SEARCH_PROMPT.to_string(),
            },
            Intent::Joke => self.services.joke(),
            Intent::Name => self.introduce(m.capture(2)),
            Intent::Thank => self.canned(ResponseKind::Thank),
            Intent::HowAreYou => self.canned(ResponseKind::HowAreYou),
            Intent::Capabilities => self.canned(ResponseKind::Capabilities),
            Intent::Calculate => match self.extractor.extract_calculation(text) {
                Some(expression) => self.services.calculate(&expression),
                None => CALCULATE_PROMPT.to_string(),
            },
            Intent::Stop => return Reply::Stop,
            Intent::Love => self.canned(ResponseKind::Love),
            Intent::Creator => self.canned(ResponseKind::Creator),
        };
        Reply::Say(say)
    }

    fn fallback(&mut self, utterance: &Utterance) -> Reply {
        if utterance.word_count() > SEARCH_FALLBACK_WORD_LIMIT {
            tracing::debug!("no intent matched, searching the full utterance");
            Reply::Say(self.services.web_search(&utterance.normalized))
        } else {
            tracing::debug!("no intent matched");
            Reply::Say(self.canned(ResponseKind::Unknown))
        }
    }

    /// Remember the user's name. An empty capture keeps the current one.
    fn introduce(&mut self, captured: Option<&str>) -> String {
        let name = captured.map(str::trim).unwrap_or_default();
        if !name.is_empty() {
            tracing::info!(user_name = name, "user introduced themselves");
            self.session.user_name = name.to_string();
        }
        format!(
            "Nice to meet you, {}! I'm {}. How can I help you today?",
            self.session.user_name, self.session.assistant_name
        )
    }

    fn canned(&mut self, kind: ResponseKind) -> String {
        self.responses.pick(kind, &mut self.rng).to_string()
    }
}
