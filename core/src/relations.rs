use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::Result;
use crate::graph::SocialGraph;

/// A candidate must be reachable through at least this many distinct friends.
pub const MIN_MUTUAL_FRIENDS: usize = 2;

/// A suggested friend and how many of the user's friends they share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub user: String,
    pub mutual_count: usize,
}

/// Users that are friends with both `a` and `b`. Weights are ignored.
pub fn mutual_friends(graph: &SocialGraph, a: &str, b: &str) -> Result<HashSet<String>> {
    let friends_a = graph.friend_ids(a)?;
    let friends_b = graph.friend_ids(b)?;

    Ok(friends_a
        .intersection(&friends_b)
        .map(|s| s.to_string())
        .collect())
}

/// Friends-of-friends of `user` reachable through at least
/// [`MIN_MUTUAL_FRIENDS`] distinct friends. Never contains `user` or any
/// existing friend. The set has no meaningful order.
pub fn suggested_friends(graph: &SocialGraph, user: &str) -> Result<HashSet<String>> {
    Ok(mutual_counts(graph, user)?
        .into_iter()
        .filter(|&(_, count)| count >= MIN_MUTUAL_FRIENDS)
        .map(|(candidate, _)| candidate.to_string())
        .collect())
}

/// Same candidates as [`suggested_friends`], strongest first.
///
/// Sorted by mutual-friend count descending, ties broken by identifier
/// (ascending).
pub fn suggestion_ranking(graph: &SocialGraph, user: &str) -> Result<Vec<Suggestion>> {
    let mut ranked: Vec<Suggestion> = mutual_counts(graph, user)?
        .into_iter()
        .filter(|&(_, count)| count >= MIN_MUTUAL_FRIENDS)
        .map(|(candidate, mutual_count)| Suggestion {
            user: candidate.to_string(),
            mutual_count,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.mutual_count
            .cmp(&a.mutual_count)
            .then_with(|| a.user.cmp(&b.user))
    });
    Ok(ranked)
}

/// candidate -> number of `user`'s friends that are also friends with it.
fn mutual_counts<'g>(graph: &'g SocialGraph, user: &str) -> Result<HashMap<&'g str, usize>> {
    let direct = graph.friend_ids(user)?;
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for &friend in &direct {
        for fof in graph.friends(friend)? {
            let candidate = fof.friend.as_str();
            if candidate != user && !direct.contains(candidate) {
                *counts.entry(candidate).or_insert(0) += 1;
            }
        }
    }

    Ok(counts)
}

impl SocialGraph {
    /// See [`mutual_friends`].
    pub fn mutual_friends(&self, a: &str, b: &str) -> Result<HashSet<String>> {
        mutual_friends(self, a, b)
    }

    /// See [`suggested_friends`].
    pub fn suggested_friends(&self, user: &str) -> Result<HashSet<String>> {
        suggested_friends(self, user)
    }

    /// See [`suggestion_ranking`].
    pub fn suggestion_ranking(&self, user: &str) -> Result<Vec<Suggestion>> {
        suggestion_ranking(self, user)
    }
}
