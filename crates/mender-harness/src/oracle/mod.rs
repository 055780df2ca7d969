//! The build oracle: the only judge of whether a tentative edit is kept.

mod command;
mod test_doubles;

pub use command::CommandOracle;
pub use test_doubles::{ClosureOracle, ScriptedOracle};

use crate::error::HarnessError;

/// Outcome of one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildVerdict {
    /// The build succeeded.
    Pass,
    /// The build failed.
    Fail,
}

impl BuildVerdict {
    /// Returns true for [`BuildVerdict::Pass`].
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl From<bool> for BuildVerdict {
    fn from(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::Fail }
    }
}

/// Verifies the tree as it currently is on disk.
///
/// Each call is one synchronous build. Implementations must not retry: the
/// verdict is taken as authoritative.
pub trait BuildOracle {
    /// Runs the build once.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::OracleUnavailable`] when the build cannot be
    /// run at all, as opposed to running and failing.
    fn verify(&self) -> Result<BuildVerdict, HarnessError>;
}
