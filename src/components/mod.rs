// Export components
pub mod google_calendar;
pub mod search;

// Re-export the search handle
pub use search::SearchHandle;
