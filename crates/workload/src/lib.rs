//! Workload drivers for the PDP benchmark suite.
//!
//! Everything here runs against the [`backend::AccessControlBackend`] seam:
//! the live implementation submits signed transactions over RPC, while tests
//! substitute a scripted backend so sample ordering and flush durability can
//! be checked without a network.

pub mod backend;
pub mod fixtures;
pub mod gas;
pub mod latency;
pub mod results;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{AccessControlBackend, CallReceipt, DecisionRequest, Level};
pub use results::{
    FlushPolicy, GasLevelStats, GasResults, GasSample, LatencySample, LevelMap,
    ResponseTimeResults,
};
