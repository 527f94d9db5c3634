#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod app;
pub use app::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod governor;
pub use governor::*;

mod upstream;
pub use upstream::*;

mod api;
pub use api::*;

#[cfg(test)]
mod tests;
