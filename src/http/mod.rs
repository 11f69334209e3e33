//! HTTP layer
//!
//! A thin bearer-token client over `reqwest` for talking to the Optical API.
//! Every upstream failure is terminal for the current run: there is no retry,
//! no backoff, and no rate limiting here.

mod client;

pub use client::OpticalClient;
