//! NAICS reconciliation pipeline.
//!
//! Turns the four loaded source tables into one record per titles code:
//!
//! - **tables**: typed row extraction from loaded DataFrames
//! - **normalize**: validated code records and the known-code set
//! - **segment**: description cells to numbered, cleaned blocks
//! - **classify**: exclusion markers, example tails, narrative
//! - **exclusions**: reference recovery and the exclusion union
//! - **examples**: narrative example tails over index items
//! - **hierarchy**: level-4/level-5 description inheritance
//! - **assemble**: the final left join
//! - **frame**: output DataFrame conversion
//! - **pipeline**: [`reconcile`], the staged driver

pub mod assemble;
pub mod classify;
pub mod error;
pub mod examples;
pub mod exclusions;
pub mod frame;
mod group;
pub mod hierarchy;
pub mod normalize;
pub mod pipeline;
pub mod segment;
pub mod tables;

pub use error::{Result, TransformError};
pub use exclusions::{RECOVERY_DENYLIST, recover_exclusion_references};
pub use frame::{records_from_frame, records_to_frame};
pub use pipeline::{ReconcileStats, Reconciled, reconcile};
