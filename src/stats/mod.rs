//! Derived statistics computation.
//!
//! Everything here is a pure, synchronous function over in-memory record
//! arrays, recomputed in full whenever its inputs change. Win-rate and
//! usage views run over the filtered subset; trend, delta and overview
//! views deliberately run over the unfiltered full set.
//!
//! Edge policy: unparsable dates normalize to timestamp 0 and are dropped
//! wherever chronology matters; unparsable rates are excluded from numeric
//! aggregates (never coerced to 0); empty groups are omitted from outputs
//! so "no data" is distinguishable from "zero".

mod delta;
mod overview;
mod summary;
mod trend;
mod usage;

pub use delta::*;
pub use overview::*;
pub use summary::*;
pub use trend::*;
pub use usage::*;
