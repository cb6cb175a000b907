//! Library side of the `naics` binary: logging setup, the staged run, and
//! artifact queries.

pub mod logging;
pub mod pipeline;
pub mod query;
