use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::config::WeightRange;
use crate::error::{GraphError, Result};

/// Interaction cost of a friendship. Lower means a stronger tie.
pub type Weight = u32;

/// One side of an undirected friendship, as stored in a user's adjacency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Friendship {
    pub friend: String,
    pub weight: Weight,
}

/// A user and their friends, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub user: String,
    pub friends: Vec<Friendship>,
}

/// Snapshot of the whole network, users sorted by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkView {
    pub user_count: usize,
    pub edge_count: usize,
    pub users: Vec<UserSummary>,
}

/// Friend count for a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeResult {
    pub user: String,
    pub degree: usize,
}

/// In-memory social graph: user -> adjacency list of weighted friendships.
///
/// Friendships are stored in both endpoints' lists with the same weight.
/// A user is never its own friend, two users share at most one friendship,
/// and every friend listed is itself a user of the graph.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    adjacency: HashMap<String, Vec<Friendship>>,
    weights: WeightRange,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom accepted weight range instead of 1..=5.
    pub fn with_weight_range(weights: WeightRange) -> Self {
        Self {
            adjacency: HashMap::new(),
            weights,
        }
    }

    /// Pre-allocate for a known number of users.
    pub fn with_capacity(user_count: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(user_count),
            weights: WeightRange::default(),
        }
    }

    pub fn weight_range(&self) -> WeightRange {
        self.weights
    }

    /// Register a new user with no friends.
    pub fn add_user(&mut self, user: impl Into<String>) -> Result<()> {
        let user = user.into();
        if self.adjacency.contains_key(&user) {
            return Err(GraphError::AlreadyExists(user));
        }
        debug!(user = %user, "added user");
        self.adjacency.insert(user, Vec::new());
        Ok(())
    }

    /// Connect two existing, distinct, not-yet-friends users.
    ///
    /// Checks run in order: both users exist, no self-loop, no existing
    /// friendship, weight in range. Nothing is written until all pass.
    pub fn add_friendship(&mut self, a: &str, b: &str, weight: Weight) -> Result<()> {
        self.add_friendship_raw(a, b, i64::from(weight)).map(|_| ())
    }

    /// [`add_friendship`](Self::add_friendship) for a weight as typed at a
    /// prompt, which may be negative or too large for a [`Weight`]. Same
    /// check order; returns the stored weight.
    pub fn add_friendship_raw(&mut self, a: &str, b: &str, weight: i64) -> Result<Weight> {
        let a_friends = self.require(a)?;
        self.require(b)?;
        if a == b {
            return Err(GraphError::InvalidEdge(a.to_string()));
        }
        if a_friends.iter().any(|f| f.friend == b) {
            return Err(GraphError::EdgeExists {
                a: a.to_string(),
                b: b.to_string(),
            });
        }
        let weight = self.weights.check(weight)?;

        self.push_friend(a, b, weight);
        self.push_friend(b, a, weight);
        debug!(a, b, weight, "added friendship");
        Ok(weight)
    }

    /// Remove the friendship between `a` and `b` if there is one.
    ///
    /// Both users must exist; a missing friendship is a no-op.
    pub fn remove_friendship(&mut self, a: &str, b: &str) -> Result<()> {
        self.require(a)?;
        self.require(b)?;

        let removed = self.drop_friend(a, b);
        self.drop_friend(b, a);
        if removed {
            debug!(a, b, "removed friendship");
        } else {
            debug!(a, b, "no friendship to remove");
        }
        Ok(())
    }

    /// Remove a user and every friendship touching them.
    pub fn remove_user(&mut self, user: &str) -> Result<()> {
        let friends = self
            .adjacency
            .remove(user)
            .ok_or_else(|| GraphError::NotFound(user.to_string()))?;

        for f in &friends {
            self.drop_friend(&f.friend, user);
        }
        debug!(user, edges_removed = friends.len(), "removed user");
        Ok(())
    }

    pub fn contains_user(&self, user: &str) -> bool {
        self.adjacency.contains_key(user)
    }

    pub fn user_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of friendships, each counted once.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|v| v.len()).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// All user identifiers, in no particular order.
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Friends of `user` in insertion order.
    pub fn friends(&self, user: &str) -> Result<&[Friendship]> {
        self.require(user).map(Vec::as_slice)
    }

    /// Friend identifiers of `user`, weights dropped.
    pub fn friend_ids(&self, user: &str) -> Result<HashSet<&str>> {
        Ok(self
            .require(user)?
            .iter()
            .map(|f| f.friend.as_str())
            .collect())
    }

    /// Weight of the friendship between `a` and `b`, if they are friends.
    pub fn weight_between(&self, a: &str, b: &str) -> Option<Weight> {
        self.adjacency
            .get(a)?
            .iter()
            .find(|f| f.friend == b)
            .map(|f| f.weight)
    }

    /// Full structural snapshot for display.
    pub fn view_network(&self) -> NetworkView {
        let mut users: Vec<UserSummary> = self
            .adjacency
            .iter()
            .map(|(user, friends)| UserSummary {
                user: user.clone(),
                friends: friends.clone(),
            })
            .collect();
        users.sort_by(|a, b| a.user.cmp(&b.user));

        NetworkView {
            user_count: self.user_count(),
            edge_count: self.edge_count(),
            users,
        }
    }

    /// Users ranked by friend count.
    ///
    /// If `top_n` is 0, returns every user. Ties are broken by identifier
    /// (ascending).
    pub fn degree_ranking(&self, top_n: usize) -> Vec<DegreeResult> {
        let mut results: Vec<DegreeResult> = self
            .adjacency
            .iter()
            .map(|(user, friends)| DegreeResult {
                user: user.clone(),
                degree: friends.len(),
            })
            .collect();

        results.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.user.cmp(&b.user)));

        if top_n > 0 && top_n < results.len() {
            results.truncate(top_n);
        }
        results
    }

    fn require(&self, user: &str) -> Result<&Vec<Friendship>> {
        self.adjacency
            .get(user)
            .ok_or_else(|| GraphError::NotFound(user.to_string()))
    }

    fn push_friend(&mut self, user: &str, friend: &str, weight: Weight) {
        if let Some(list) = self.adjacency.get_mut(user) {
            list.push(Friendship {
                friend: friend.to_string(),
                weight,
            });
        }
    }

    /// Returns true if an entry was removed.
    fn drop_friend(&mut self, user: &str, friend: &str) -> bool {
        match self.adjacency.get_mut(user) {
            Some(list) => {
                let before = list.len();
                list.retain(|f| f.friend != friend);
                list.len() != before
            }
            None => false,
        }
    }
}
