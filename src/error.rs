//! Error types for aggregate builds
//!
//! A build call distinguishes two levels of failure. A [`BranchFailure`]
//! marks one request in the resolver graph that fetched nothing; the call
//! still completes and returns whatever resolved. An [`EngineError`] is a
//! failure of the call itself.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::{EntityKind, Id};
use crate::repository::RepositoryError;

/// Identifying filters of one resolver request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RequestKey {
    pub id: Option<Id>,
    pub user_id: Option<Id>,
    pub entity_id: Option<Id>,
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(id) = self.id {
            parts.push(format!("id={id}"));
        }
        if let Some(user_id) = self.user_id {
            parts.push(format!("user_id={user_id}"));
        }
        if let Some(entity_id) = self.entity_id {
            parts.push(format!("entity_id={entity_id}"));
        }
        if parts.is_empty() {
            f.write_str("[*]")
        } else {
            write!(f, "[{}]", parts.join(" "))
        }
    }
}

/// Why one branch of the graph produced nothing
#[derive(Debug, Clone, Error)]
pub enum FailureCause {
    #[error("fetch failed: {0}")]
    Fetch(Arc<RepositoryError>),

    #[error("no rows matched")]
    Empty,

    #[error("no resolver running for {0}")]
    NotStarted(EntityKind),

    #[error("{0} is not a declared child")]
    Undeclared(EntityKind),

    #[error("resolver for {0} closed before accepting the request")]
    Closed(EntityKind),

    #[error("nesting depth {depth} exceeds limit {limit}")]
    DepthExceeded { depth: usize, limit: usize },
}

/// Failure of one resolver request
#[derive(Debug, Clone, Error)]
#[error("{kind} {request}: {cause}")]
pub struct BranchFailure {
    pub kind: EntityKind,
    pub request: RequestKey,
    /// Nesting depth of the pipeline the request ran in, 0 for the top-level call
    pub depth: usize,
    pub cause: FailureCause,
}

impl BranchFailure {
    pub fn is_empty_result(&self) -> bool {
        matches!(self.cause, FailureCause::Empty)
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self.cause, FailureCause::Fetch(_))
    }
}

/// Failure of a whole build call
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("aggregate incomplete, {} branch failure(s): {}", .failures.len(), summarize(.failures))]
    Incomplete { failures: Vec<BranchFailure> },

    #[error("build cancelled after {} branch failure(s)", .failures.len())]
    Cancelled { failures: Vec<BranchFailure> },

    #[error("resolver task failed: {0}")]
    Resolver(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Branch failures carried by this error, if any
    pub fn failures(&self) -> &[BranchFailure] {
        match self {
            Self::Incomplete { failures } | Self::Cancelled { failures } => failures,
            _ => &[],
        }
    }

    /// Process exit code for the command line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Incomplete { .. } => 3,
            Self::NotFound(_) => 4,
            Self::Config(_) => 2,
            Self::Cancelled { .. } | Self::Resolver(_) => 1,
        }
    }
}

fn summarize(failures: &[BranchFailure]) -> String {
    const SHOWN: usize = 3;
    let mut parts: Vec<String> = failures.iter().take(SHOWN).map(|f| f.to_string()).collect();
    if failures.len() > SHOWN {
        parts.push(format!("and {} more", failures.len() - SHOWN));
    }
    parts.join("; ")
}
