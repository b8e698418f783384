//! External capabilities the dispatcher delegates to
//!
//! Every method returns display-ready text. Implementations own all
//! recovery and apology wording; the dispatcher never inspects failures.

mod web;

pub use web::{WebServices, JOKES};

/// City placeholder handed to [`Services::weather`] when the user named none.
pub const YOUR_LOCATION: &str = "your location";

/// Time, weather, news, search, arithmetic and jokes.
///
/// Calls are blocking and must not panic; failures come back as text.
pub trait Services {
    fn current_time_and_date(&self) -> String;

    /// `city` may be [`YOUR_LOCATION`].
    fn weather(&self, city: &str) -> String;

    fn news(&self) -> String;

    fn web_search(&self, query: &str) -> String;

    /// Must describe division by zero and malformed input rather than fail.
    fn calculate(&self, expression: &str) -> String;

    fn joke(&self) -> String;
}

impl<T: Services + ?Sized> Services for &T {
    fn current_time_and_date(&self) -> String {
        (**self).current_time_and_date()
    }

    fn weather(&self, city: &str) -> String {
        (**self).weather(city)
    }

    fn news(&self) -> String {
        (**self).news()
    }

    fn web_search(&self, query: &str) -> String {
        (**self).web_search(query)
    }

    fn calculate(&self, expression: &str) -> String {
        (**self).calculate(expression)
    }

    fn joke(&self) -> String {
        (**self).joke()
    }
}

impl<T: Services + ?Sized> Services for Box<T> {
    fn current_time_and_date(&self) -> String {
        (**self).current_time_and_date()
    }

    fn weather(&self, city: &str) -> String {
        (**self).weather(city)
    }

    fn news(&self) -> String {
        (**self).news()
    }

    fn web_search(&self, query: &str) -> String {
        (**self).web_search(query)
    }

    fn calculate(&self, expression: &str) -> String {
        (**self).calculate(expression)
    }

    fn joke(&self) -> String {
        (**self).joke()
    }
}
