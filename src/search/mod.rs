//! Carbon-aware slot search.
//!
//! - [`slot`]: single-region bounded-window search ([`find_best`]).
//! - [`recommend`]: cross-region composition over the preference profile.
//! - [`order`]: the tie-break orderings both of them reduce with.

pub mod order;
pub mod recommend;
pub mod slot;
pub mod types;

pub use recommend::{Recommender, pick_global};
pub use slot::{Window, find_best};
pub use types::{Recommendation, SlotOutcome};
