//! social-graph-core: In-memory social network engine.
//!
//! Users are nodes; friendships are undirected edges carrying an interaction
//! cost (lower = stronger tie). Provides mutation with cascading removal,
//! Dijkstra shortest paths over interaction cost, mutual friends and
//! friend-of-friend suggestions.
//! No I/O: drivers (console, bench) live in their own crates.

mod config;
mod error;
mod graph;
mod path;
mod relations;

pub use config::WeightRange;
pub use error::{GraphError, Result};
pub use graph::{DegreeResult, Friendship, NetworkView, SocialGraph, UserSummary, Weight};
pub use path::{shortest_path, WeightedPath};
pub use relations::{
    mutual_friends, suggested_friends, suggestion_ranking, Suggestion, MIN_MUTUAL_FRIENDS,
};
