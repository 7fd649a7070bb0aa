//! Upstream feed access.
//!
//! A single [`FeedClient`] fetches JSON; the descriptor table and the generic
//! adapter turn each feed's envelope into a [`SourceResult`]. Adapters never
//! return errors: network, decode and envelope problems all become failed
//! results.

mod adapter;
mod client;
mod descriptor;
mod envelope;
mod error;
mod traffic;
mod types;
mod weather;

pub use adapter::{fetch_feed, mentions_rain, parse_feed, with_unit, KEY_AREAS};
pub use client::FeedClient;
pub use descriptor::*;
pub use envelope::{format_sg_timestamp, Snapshot};
pub use error::FeedError;
pub use traffic::round_coordinate;
pub use types::*;
pub use weather::{fetch_weather, merge_weather, WEATHER_FEEDS, WEATHER_SOURCE};
