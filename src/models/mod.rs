//! Core data models for the match tracker.

mod draft;
mod dto;
mod options;
mod rate_band;
mod record;
mod rule;
mod score;

#[cfg(test)]
pub(crate) use record::test_support;

pub use draft::*;
pub use dto::*;
pub use options::*;
pub use rate_band::*;
pub use record::*;
pub use rule::*;
pub use score::*;
