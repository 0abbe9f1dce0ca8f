//! Player behavior model: snapshot values, match records, and their line format.
//!
//! The mutable tracker that feeds these types lives in the runtime crate
//! because it owns persistence; everything here is pure data.

pub mod codec;
mod ema;
mod record;
mod snapshot;

pub use codec::{RecordFormatError, RecordParseError};
pub use ema::Ema;
pub use record::{Difficulty, MatchRecord};
pub use snapshot::BehaviorSnapshot;
