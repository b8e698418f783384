//! Niley core - command interpretation for a voice assistant
//!
//! Classifies transcribed utterances into a fixed set of intents, extracts
//! their arguments (city, search query, arithmetic), and answers from canned
//! reply tables or an injected [`Services`] collaborator.

pub mod calculator;
pub mod config;
pub mod dispatcher;
pub mod entities;
pub mod error;
pub mod matcher;
pub mod responses;
pub mod services;
pub mod types;

pub use config::{AssistantConfig, ServicesConfig};
pub use dispatcher::{CommandDispatcher, Session, CALCULATE_PROMPT, SEARCH_PROMPT};
pub use entities::ArgumentExtractor;
pub use error::{CalcError, ConfigError, NileyError, PatternError, ServiceError};
pub use matcher::{default_definitions, IntentClassifier};
pub use responses::{ResponseKind, ResponseTable};
pub use services::{Services, WebServices, YOUR_LOCATION};
pub use types::*;

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn niley_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyAssistant>()?;
    m.add_class::<PyIntentClassifier>()?;
    m.add_class::<PyArgumentExtractor>()?;
    m.add_function(wrap_pyfunction!(py_calculate, m)?)?;
    Ok(())
}
