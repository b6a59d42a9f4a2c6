//! Conversion of government budget CSV files into nested JSON trees keyed by organizational
//! hierarchy, for the revenue and expenditure datasets of each fiscal year.

pub mod args;
pub mod commands;
mod error;
pub mod layout;
pub mod model;
pub mod parse;
#[cfg(test)]
mod test;
mod utils;

pub use error::Error;
pub use error::Result;
