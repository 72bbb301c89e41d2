//! Persisted user preferences: allowed regions and allowed shift window.

mod lock;
pub mod store;
pub mod types;

pub use store::{FileProfileStore, MemoryProfileStore, ProfileStore};
pub use types::{PreferenceProfile, ProfileUpdate, parse_region_list};
