mod client;
pub mod models;
pub mod source;
pub mod time;
pub mod token;

pub use client::GoogleCalendarClient;
pub use models::{CalendarEvent, EventRecord};
pub use source::{CalendarDirectory, EventSource};
pub use token::{RedisTokenProvider, StaticTokenProvider, TokenProvider};
