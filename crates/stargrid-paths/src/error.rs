//! Error type for search invocation.

use std::error::Error;
use std::fmt;

/// Fatal conditions for a single `find_path` call.
///
/// "No path exists" is deliberately *not* represented here: it is a
/// first-class negative result (`Ok(None)`), not a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathError {
    /// No cell is currently designated as the start node.
    StartUnset,
    /// No cell is currently designated as the end node.
    EndUnset,
    /// The search was cancelled through its [`SearchControl`] handle.
    ///
    /// [`SearchControl`]: crate::SearchControl
    Cancelled,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartUnset => write!(f, "start node must be designated before searching"),
            Self::EndUnset => write!(f, "end node must be designated before searching"),
            Self::Cancelled => write!(f, "search cancelled"),
        }
    }
}

impl Error for PathError {}
