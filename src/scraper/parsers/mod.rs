//! HTML parsers for procyclingstats.com pages.

pub mod results;

pub use results::{ResultsParser, DEFAULT_MAX_RESULTS};
