//! # Archive Module
//!
//! The logic that decides what to add to and remove from an archive playlist.
//! Everything here works on immutable snapshots of remote state and only
//! talks to the outside world through [`crate::provider::PlaylistProvider`].
//!
//! - [`fetch`] - Loads a complete playlist snapshot page by page
//! - [`merge`] - Computes which candidates are genuinely new to a playlist
//! - [`recommend`] - Collects new recommendations seeded from a playlist
//! - [`dedup`] - Finds duplicate recordings and plans their removal

pub mod dedup;
pub mod fetch;
pub mod merge;
pub mod recommend;

pub use dedup::{find_duplicates, removal_batches};
pub use fetch::fetch_all_entries;
pub use merge::{KnownTracks, compute_additions};
pub use recommend::{DEFAULT_MAX_TRIES, RecommendationPlan, fetch_and_merge_recommendations};
