//! Argument extraction from classified utterances
//!
//! Each extractor expects the lower-cased utterance and returns `None`
//! when it finds nothing usable.

use regex::Regex;

/// Extract structured arguments (city, search query, arithmetic) from user input
pub struct ArgumentExtractor {
    city_patterns: Vec<Regex>,
    search_triggers: Regex,
    calculation_patterns: Vec<Regex>,
    non_arithmetic: Regex,
}

impl ArgumentExtractor {
    pub fn new() -> Self {
        // Compile regex patterns once - these should never fail
        let city_patterns = [
            r"weather in (\w+(?:\s+\w+)*)",
            r"weather at (\w+(?:\s+\w+)*)",
            r"weather for (\w+(?:\s+\w+)*)",
            r"temperature in (\w+(?:\s+\w+)*)",
            r"forecast for (\w+(?:\s+\w+)*)",
        ]
        .into_iter()
        .map(|p| Regex::new(p).expect("Invalid regex pattern"))
        .collect();

        let search_triggers = Regex::new(
            r"search for|look up|what is|who is|where is|tell me about|explain",
        )
        .expect("Invalid regex pattern");

        let calculation_patterns = [
            r"calculate\s+([\d+\-*/().\s]+)",
            r"what is\s+([\d+\-*/().\s]+)",
            r"solve\s+([\d+\-*/().\s]+)",
        ]
        .into_iter()
        .map(|p| Regex::new(p).expect("Invalid regex pattern"))
        .collect();

        let non_arithmetic = Regex::new(r"[^\d+\-*/().]").expect("Invalid regex pattern");

        Self {
            city_patterns,
            search_triggers,
            calculation_patterns,
            non_arithmetic,
        }
    }

    /// City named after "weather in", "forecast for" and similar phrases.
    pub fn extract_city(&self, text: &str) -> Option<String> {
        self.city_patterns
            .iter()
            .filter_map(|p| p.captures(text))
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
            .find(|city| !city.is_empty())
    }

    /// Removes every trigger phrase, wherever it occurs, and returns what's left.
    pub fn extract_search_query(&self, text: &str) -> Option<String> {
        let query = self.search_triggers.replace_all(text, "");
        let query = query.trim();
        if query.is_empty() {
            None
        } else {
            Some(query.to_string())
        }
    }

    /// Arithmetic after "calculate", "what is" or "solve".
    ///
    /// Falls back to keeping only digits and `+ - * / ( ) .` from the whole
    /// command.
    pub fn extract_calculation(&self, text: &str) -> Option<String> {
        let keyed = self
            .calculation_patterns
            .iter()
            .filter_map(|p| p.captures(text))
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
            .find(|expr| !expr.is_empty());
        if keyed.is_some() {
            return keyed;
        }

        let residue = self.non_arithmetic.replace_all(text, "");
        if residue.is_empty() {
            None
        } else {
            Some(residue.into_owned())
        }
    }
}

impl Default for ArgumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_city() {
        let extractor = ArgumentExtractor::new();
        assert_eq!(
            extractor.extract_city("weather in new york"),
            Some("new york".to_string())
        );
        assert_eq!(
            extractor.extract_city("what's the forecast for san francisco"),
            Some("san francisco".to_string())
        );
        assert_eq!(
            extractor.extract_city("temperature in oslo"),
            Some("oslo".to_string())
        );
    }

    #[test]
    fn test_extract_city_absent() {
        let extractor = ArgumentExtractor::new();
        assert_eq!(extractor.extract_city("what's the weather like"), None);
        assert_eq!(extractor.extract_city("is it sunny"), None);
    }

    #[test]
    fn test_city_stops_at_punctuation() {
        let extractor = ArgumentExtractor::new();
        assert_eq!(
            extractor.extract_city("weather in new york, please"),
            Some("new york".to_string())
        );
    }

    #[test]
    fn test_extract_search_query() {
        let extractor = ArgumentExtractor::new();
        assert_eq!(
            extractor.extract_search_query("search for artificial intelligence"),
            Some("artificial intelligence".to_string())
        );
        assert_eq!(
            extractor.extract_search_query("so who is ada lovelace"),
            Some("so  ada lovelace".to_string())
        );
        assert_eq!(
            extractor.extract_search_query("who is ada lovelace"),
            Some("ada lovelace".to_string())
        );
    }

    #[test]
    fn test_search_query_only_triggers() {
        let extractor = ArgumentExtractor::new();
        assert_eq!(extractor.extract_search_query("search for"), None);
        assert_eq!(extractor.extract_search_query("  explain  "), None);
    }

    #[test]
    fn test_extract_calculation() {
        let extractor = ArgumentExtractor::new();
        assert_eq!(
            extractor.extract_calculation("calculate 15 + 20"),
            Some("15 + 20".to_string())
        );
        assert_eq!(
            extractor.extract_calculation("solve (2 + 3) * 4"),
            Some("(2 + 3) * 4".to_string())
        );
    }

    #[test]
    fn test_calculation_fallback_strips() {
        let extractor = ArgumentExtractor::new();
        assert_eq!(
            extractor.extract_calculation("how much is 7*6 really"),
            Some("7*6".to_string())
        );
        assert_eq!(extractor.extract_calculation("calculate"), None);
        assert_eq!(extractor.extract_calculation("solve my problem"), None);
    }
}
