//! Production services backed by blocking HTTP lookups
//!
//! Uses `ureq` for requests and `scraper` for the search result pages.
//! Every lookup is bounded by the configured timeout.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use rand::seq::SliceRandom;
use scraper::{Html, Selector};
use serde::Deserialize;
use url::Url;

use super::{Services, YOUR_LOCATION};
use crate::calculator;
use crate::config::ServicesConfig;
use crate::error::ServiceError;

const SNIPPET_CHARS: usize = 250;
const WIKIPEDIA_CHARS: usize = 300;
const MIN_PARAGRAPH_CHARS: usize = 50;
const HEADLINE_COUNT: usize = 5;
const HEADLINE_CHARS: usize = 100;

pub const JOKES: [&str; 6] = [
    "Why don't scientists trust atoms? Because they make up everything!",
    "Why did the computer go to the doctor? Because it had a virus!",
    "What do you call a fake noodle? An impasta!",
    "Why don't eggs tell jokes? They'd crack each other up!",
    "What do you call a bear with no teeth? A gummy bear!",
    "Why did the math book look so sad? Because it had too many problems!",
];

/// [`Services`] over DuckDuckGo, wttr.in, ipinfo.io and Reddit.
pub struct WebServices {
    agent: ureq::Agent,
    config: ServicesConfig,
}

impl WebServices {
    pub fn new(config: ServicesConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build();
        tracing::debug!(timeout_secs = config.timeout_secs, "web services ready");
        Self { agent, config }
    }

    pub fn config(&self) -> &ServicesConfig {
        &self.config
    }

    fn fetch(&self, url: &str) -> Result<String, ServiceError> {
        Ok(self.agent.get(url).call()?.into_string()?)
    }

    fn locate(&self) -> String {
        let city = self
            .agent
            .get(&self.config.location_url)
            .timeout(Duration::from_secs(self.config.location_timeout_secs))
            .call()
            .map_err(ServiceError::from)
            .and_then(|resp| Ok(resp.into_string()?));

        match city {
            Ok(city) if !city.trim().is_empty() => city.trim().to_string(),
            Ok(_) => self.config.fallback_city.clone(),
            Err(e) => {
                tracing::debug!(error = %e, "location lookup failed, using fallback city");
                self.config.fallback_city.clone()
            }
        }
    }

    fn lookup_weather(&self, city: &str) -> Result<String, ServiceError> {
        let url = weather_url(&self.config.weather_url, city)?;
        let report = self.fetch(url.as_str())?;
        let report = report.trim();
        if report.is_empty() {
            return Err(ServiceError::Malformed("empty weather report".into()));
        }
        Ok(report.to_string())
    }

    fn lookup_news(&self) -> Result<Vec<String>, ServiceError> {
        let listing: Listing = self
            .agent
            .get(&self.config.news_url)
            .call()?
            .into_json()?;
        Ok(headlines(&listing))
    }

    fn lookup_search(&self, query: &str) -> Result<String, ServiceError> {
        let page = self
            .agent
            .get(&self.config.search_url)
            .query("q", query)
            .call()?
            .into_string()?;

        if let Some(snippet) = first_snippet(&page) {
            return Ok(format!("According to web search: {snippet}"));
        }

        if let Some(link) = wikipedia_link(&page) {
            match self.fetch(&link).map(|wiki| first_paragraph(&wiki)) {
                Ok(Some(summary)) => return Ok(format!("Wikipedia says: {summary}")),
                Ok(None) => {}
                Err(e) => tracing::debug!(error = %e, link = %link, "wikipedia fetch failed"),
            }
        }

        let topic = query.split_whitespace().next().unwrap_or(query);
        Ok(format!(
            "I found information about {topic} but need more specific details. Could you rephrase your question?"
        ))
    }
}

impl Services for WebServices {
    fn current_time_and_date(&self) -> String {
        format_time_and_date(Local::now().naive_local())
    }

    fn weather(&self, city: &str) -> String {
        let city = if city == YOUR_LOCATION {
            self.locate()
        } else {
            city.to_string()
        };
        tracing::info!(city = %city, "getting weather");

        match self.lookup_weather(&city) {
            Ok(report) => format!("Weather in {city}: {report}"),
            Err(ServiceError::Timeout) => format!(
                "The weather service is taking too long to answer for {city}. Please try again in a moment."
            ),
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "weather lookup failed");
                format!("Sorry, I couldn't get the weather for {city} right now. You can check any weather app for {city}.")
            }
        }
    }

    fn news(&self) -> String {
        tracing::info!("fetching news headlines");
        match self.lookup_news() {
            Ok(titles) if !titles.is_empty() => {
                format!("Top world news: {}", titles.join(" | "))
            }
            Ok(_) => "Today's important updates: Technology is advancing rapidly. Check news websites for latest updates.".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "news lookup failed");
                "For the latest news, please check your favorite news website or app.".to_string()
            }
        }
    }

    fn web_search(&self, query: &str) -> String {
        tracing::info!(query, "searching the web");
        match self.lookup_search(query) {
            Ok(answer) => answer,
            Err(ServiceError::Timeout) => "Search is taking too long. Please try again.".to_string(),
            Err(e) => {
                tracing::warn!(query, error = %e, "web search failed");
                "I'm having trouble searching right now. Please try again later.".to_string()
            }
        }
    }

    fn calculate(&self, expression: &str) -> String {
        calculator::describe(expression)
    }

    fn joke(&self) -> String {
        JOKES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(JOKES[0])
            .to_string()
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
}

fn headlines(listing: &Listing) -> Vec<String> {
    listing
        .data
        .children
        .iter()
        .take(HEADLINE_COUNT)
        .map(|child| truncate_chars(child.data.title.trim(), HEADLINE_CHARS))
        .filter(|title| !title.is_empty())
        .collect()
}

fn format_time_and_date(now: NaiveDateTime) -> String {
    format!(
        "The current time is {} on {}",
        now.format("%-I:%M %p"),
        now.format("%A, %B %d, %Y")
    )
}

fn weather_url(base: &str, city: &str) -> Result<Url, ServiceError> {
    let mut url = Url::parse(base).map_err(|e| ServiceError::Malformed(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ServiceError::Malformed(format!("cannot append a path to {base}")))?
        .pop_if_empty()
        .push(city);
    url.query_pairs_mut().append_pair("format", "3");
    Ok(url)
}

fn first_snippet(page: &str) -> Option<String> {
    let document = Html::parse_document(page);
    let sel = Selector::parse("div.result__snippet").ok()?;
    let el = document.select(&sel).next()?;
    let text = el.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(truncate_chars(text, SNIPPET_CHARS))
    }
}

/// The first result link, if it points at Wikipedia.
fn wikipedia_link(page: &str) -> Option<String> {
    let document = Html::parse_document(page);
    let sel = Selector::parse("a.result__url").ok()?;
    let el = document.select(&sel).next()?;
    let label = el.text().collect::<String>().to_lowercase();
    if !label.contains("wikipedia") {
        return None;
    }
    let href = el.value().attr("href")?.trim();
    if href.starts_with("//") {
        Some(format!("https:{href}"))
    } else if href.starts_with("http://") || href.starts_with("https://") {
        Some(href.to_string())
    } else {
        None
    }
}

fn first_paragraph(page: &str) -> Option<String> {
    let document = Html::parse_document(page);
    let sel = Selector::parse("p").ok()?;
    document
        .select(&sel)
        .map(|p| p.text().collect::<String>())
        .find(|text| !text.trim().is_empty() && text.chars().count() > MIN_PARAGRAPH_CHARS)
        .map(|text| truncate_chars(text.trim(), WIKIPEDIA_CHARS))
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_time_and_date_format() {
        let dt = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(21, 5, 0)
            .unwrap();
        assert_eq!(
            format_time_and_date(dt),
            "The current time is 9:05 PM on Sunday, October 18, 2026"
        );
    }

    #[test]
    fn test_weather_url_encodes_city() {
        let url = weather_url("https://wttr.in/", "new york").unwrap();
        assert_eq!(url.as_str(), "https://wttr.in/new%20york?format=3");
    }

    #[test]
    fn test_first_snippet() {
        let page = r#"<html><body>
            <div class="result"><div class="result__snippet"> Rust is a systems language. </div></div>
            <div class="result"><div class="result__snippet">Second</div></div>
        </body></html>"#;
        assert_eq!(
            first_snippet(page),
            Some("Rust is a systems language.".to_string())
        );
        assert_eq!(first_snippet("<html><body><p>nothing</p></body></html>"), None);
    }

    #[test]
    fn test_snippet_truncated() {
        let long = "x".repeat(400);
        let page = format!(r#"<div class="result__snippet">{long}</div>"#);
        assert_eq!(first_snippet(&page).unwrap().len(), SNIPPET_CHARS);
    }

    #[test]
    fn test_wikipedia_link() {
        let page = r#"<a class="result__url" href="//en.wikipedia.org/wiki/Rust"> en.wikipedia.org/wiki/Rust </a>"#;
        assert_eq!(
            wikipedia_link(page),
            Some("https://en.wikipedia.org/wiki/Rust".to_string())
        );

        let other = r#"<a class="result__url" href="https://example.com">example.com</a>"#;
        assert_eq!(wikipedia_link(other), None);
    }

    #[test]
    fn test_first_paragraph_skips_short() {
        let page = format!("<p>short</p><p>{}</p>", "word ".repeat(20));
        let para = first_paragraph(&page).unwrap();
        assert!(para.starts_with("word word"));
        assert_eq!(first_paragraph("<p>tiny</p>"), None);
    }

    #[test]
    fn test_headlines_from_listing() {
        let json = serde_json::json!({
            "data": { "children": [
                { "data": { "title": "One" } },
                { "data": { "title": "Two" } },
                { "data": { "title": "Three" } },
                { "data": { "title": "Four" } },
                { "data": { "title": "Five" } },
                { "data": { "title": "Six" } }
            ]}
        });
        let listing: Listing = serde_json::from_value(json).unwrap();
        assert_eq!(headlines(&listing), vec!["One", "Two", "Three", "Four", "Five"]);
    }

    #[test]
    fn test_joke_from_list() {
        let services = WebServices::new(ServicesConfig::default());
        let joke = services.joke();
        assert!(JOKES.contains(&joke.as_str()));
    }

    #[test]
    fn test_calculate_delegates_to_evaluator() {
        let services = WebServices::new(ServicesConfig::default());
        assert_eq!(services.calculate("15 + 20"), "The result is 35");
        assert_eq!(services.calculate("8 / 0"), "Cannot divide by zero.");
    }

    const REFUSED: &str = "http://127.0.0.1:1/";

    fn unreachable_config() -> ServicesConfig {
        ServicesConfig {
            timeout_secs: 1,
            location_timeout_secs: 1,
            search_url: REFUSED.to_string(),
            weather_url: REFUSED.to_string(),
            location_url: REFUSED.to_string(),
            news_url: REFUSED.to_string(),
            fallback_city: "Lisbon".to_string(),
            ..ServicesConfig::default()
        }
    }

    #[test]
    fn test_weather_failure_names_city() {
        let services = WebServices::new(unreachable_config());
        let reply = services.weather("oslo");
        assert!(
            reply.starts_with("Sorry, I couldn't get the weather for oslo right now"),
            "{reply}"
        );
    }

    #[test]
    fn test_weather_location_falls_back_to_configured_city() {
        let services = WebServices::new(unreachable_config());
        let reply = services.weather(YOUR_LOCATION);
        assert!(reply.contains("Lisbon"), "{reply}");
        assert!(!reply.contains(YOUR_LOCATION), "{reply}");
    }

    #[test]
    fn test_news_failure_points_elsewhere() {
        let services = WebServices::new(unreachable_config());
        assert_eq!(
            services.news(),
            "For the latest news, please check your favorite news website or app."
        );
    }

    #[test]
    fn test_search_failure_apologizes() {
        let services = WebServices::new(unreachable_config());
        assert_eq!(
            services.web_search("rust"),
            "I'm having trouble searching right now. Please try again later."
        );
    }

    #[test]
    fn test_search_timeout() {
        // accepts connections at the OS level but never answers
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let config = ServicesConfig {
            search_url: format!("http://{}/", listener.local_addr().unwrap()),
            ..unreachable_config()
        };
        let services = WebServices::new(config);
        assert_eq!(
            services.web_search("rust"),
            "Search is taking too long. Please try again."
        );
        drop(listener);
    }
}
