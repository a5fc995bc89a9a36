//! Core library for the `apibench` CLI.
//!
//! The engine has two halves: [`http::dispatch`] fans a fixed number of GET
//! requests out over a fixed pool of workers and returns one
//! [`metrics::RequestOutcome`] per call, and [`metrics::summarize`] turns
//! those outcomes into a [`metrics::RunReport`]. Neither half prints or
//! persists anything; rendering is left to the binary.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
