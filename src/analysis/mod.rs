//! Fact aggregation and safety analysis.
//!
//! - [`IntentDetector`] decides which topics a query touches
//! - [`Aggregator`] fans out to the relevant adapters and merges a [`FactSet`]
//! - [`CheckKind::assess`] runs the threshold rules over that fact set

mod aggregator;
mod classify;
mod facts;
mod intent;

pub use aggregator::{Adapter, Aggregate, Aggregator};
pub use classify::*;
pub use facts::{FactSet, ALL_METRICS};
pub use intent::*;
