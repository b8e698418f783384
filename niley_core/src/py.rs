//! Python bindings for the assistant core using PyO3

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::calculator;
use crate::config::AssistantConfig;
use crate::dispatcher::CommandDispatcher;
use crate::entities::ArgumentExtractor;
use crate::matcher::IntentClassifier;
use crate::services::WebServices;
use crate::types::{ClassifyResult, Reply};

/// Evaluate an arithmetic expression and describe the result (Python function)
#[pyfunction]
pub fn py_calculate(expression: &str) -> String {
    calculator::describe(expression)
}

/// Python wrapper for the dispatcher over live web services
#[pyclass]
pub struct PyAssistant {
    inner: CommandDispatcher<WebServices>,
}

#[pymethods]
impl PyAssistant {
    /// Build from an optional TOML config string
    #[new]
    #[pyo3(signature = (config_toml=None))]
    fn new(config_toml: Option<&str>) -> PyResult<Self> {
        let config = match config_toml {
            Some(text) => AssistantConfig::from_toml_str(text)
                .map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => AssistantConfig::default(),
        };
        let services = WebServices::new(config.services.clone());
        let inner = CommandDispatcher::new(services, &config)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Process one utterance
    ///
    /// Returns `None` for blank input, otherwise a dict with `type`
    /// (`"say"` or `"stop"`) and, for `"say"`, the `text`.
    fn process<'py>(
        &mut self,
        utterance: &str,
        py: Python<'py>,
    ) -> PyResult<Option<Bound<'py, PyDict>>> {
        let Some(reply) = self.inner.process(utterance) else {
            return Ok(None);
        };
        let dict = PyDict::new_bound(py);
        match reply {
            Reply::Say(text) => {
                dict.set_item("type", "say")?;
                dict.set_item("text", text)?;
            }
            Reply::Stop => {
                dict.set_item("type", "stop")?;
            }
        }
        Ok(Some(dict))
    }

    #[getter]
    fn user_name(&self) -> String {
        self.inner.user_name().to_string()
    }

    #[getter]
    fn assistant_name(&self) -> String {
        self.inner.assistant_name().to_string()
    }
}

/// Python wrapper for the intent classifier
#[pyclass]
pub struct PyIntentClassifier {
    classifier: IntentClassifier,
}

#[pymethods]
impl PyIntentClassifier {
    #[new]
    #[pyo3(signature = (assistant_name="Niley"))]
    fn new(assistant_name: &str) -> PyResult<Self> {
        let classifier =
            IntentClassifier::new(assistant_name).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { classifier })
    }

    /// Classify user input
    fn classify<'py>(&self, input: &str, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        match self.classifier.classify(input) {
            ClassifyResult::Match(m) => {
                dict.set_item("type", "match")?;
                dict.set_item("intent", m.intent.name())?;
                let captures = serde_json::to_string(&m.captures).map_err(|e| {
                    PyValueError::new_err(format!("Failed to serialize captures: {}", e))
                })?;
                dict.set_item("captures", captures)?;
                dict.set_item("normalized", m.utterance.normalized)?;
            }
            ClassifyResult::NoMatch => {
                dict.set_item("type", "none")?;
            }
        }
        Ok(dict)
    }

    /// Intent names in evaluation order
    fn intents(&self) -> Vec<&'static str> {
        self.classifier
            .definitions()
            .iter()
            .map(|d| d.intent.name())
            .collect()
    }
}

/// Python wrapper for argument extraction
#[pyclass]
pub struct PyArgumentExtractor {
    extractor: ArgumentExtractor,
}

#[pymethods]
impl PyArgumentExtractor {
    #[new]
    fn new() -> Self {
        Self {
            extractor: ArgumentExtractor::new(),
        }
    }

    fn extract_city(&self, text: &str) -> Option<String> {
        self.extractor.extract_city(&text.to_lowercase())
    }

    fn extract_search_query(&self, text: &str) -> Option<String> {
        self.extractor.extract_search_query(&text.to_lowercase())
    }

    fn extract_calculation(&self, text: &str) -> Option<String> {
        self.extractor.extract_calculation(&text.to_lowercase())
    }
}
