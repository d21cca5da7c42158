use thiserror::Error;

/// Failure of a graph operation.
///
/// Every operation validates before it mutates, so the graph is unchanged
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A referenced user is not in the graph.
    #[error("user '{0}' not found")]
    NotFound(String),

    /// `add_user` with an identifier that is already taken.
    #[error("user '{0}' already exists")]
    AlreadyExists(String),

    /// `add_friendship` between two users that are already friends.
    #[error("friendship between '{a}' and '{b}' already exists")]
    EdgeExists { a: String, b: String },

    /// `add_friendship` from a user to itself.
    #[error("user '{0}' cannot be friends with themselves")]
    InvalidEdge(String),

    /// Interaction weight outside the accepted range.
    #[error("interaction weight {weight} is outside the accepted range {min}..={max}")]
    InvalidWeight { weight: i64, min: u32, max: u32 },

    /// `start` and `end` are in different components.
    #[error("no connection between '{start}' and '{end}'")]
    NoPath { start: String, end: String },
}

impl GraphError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GraphError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
