//! CLI command implementations.

pub mod browse;
pub mod check;
pub mod items;
pub mod request;
pub mod run;
pub mod search;
pub mod sources;
