//! # Census Model
//!
//! Plain value types shared by the counter, the corrector, the expectation
//! calculator and the census pipeline.
//!
//! Design rule: NO graph storage, NO I/O, NO async here.
//! This module is pure data.

pub mod node;
pub mod motif;
pub mod outcome;
pub mod record;

pub use node::{NodeId, Edge};
pub use motif::{Motif, MotifVector, PartialMotifVector, MOTIF_COUNT};
pub use outcome::{Unavailable, LimitExceeded};
pub use record::{Place, NetworkSizes, CensusOutcome, CensusRecord};
