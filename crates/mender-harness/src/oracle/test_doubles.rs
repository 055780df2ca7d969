//! Deterministic oracles for tests and behavioural specs.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use super::{BuildOracle, BuildVerdict};
use crate::error::HarnessError;

/// Replays a fixed sequence of verdicts.
///
/// Once the script runs out the fallback verdict is returned, or the oracle
/// reports itself unavailable when there is no fallback.
#[derive(Debug)]
pub struct ScriptedOracle {
    script: RefCell<VecDeque<BuildVerdict>>,
    fallback: Option<BuildVerdict>,
    calls: Cell<usize>,
}

impl ScriptedOracle {
    /// Replays `verdicts`, then passes.
    #[must_use]
    pub fn new(verdicts: impl IntoIterator<Item = BuildVerdict>) -> Self {
        Self {
            script: RefCell::new(verdicts.into_iter().collect()),
            fallback: Some(BuildVerdict::Pass),
            calls: Cell::new(0),
        }
    }

    /// An oracle whose every build passes.
    #[must_use]
    pub fn passing() -> Self {
        Self::new([])
    }

    /// An oracle whose every build fails.
    #[must_use]
    pub fn failing() -> Self {
        Self::new([]).with_fallback(BuildVerdict::Fail)
    }

    /// Replaces the verdict used after the script is exhausted.
    #[must_use]
    pub fn with_fallback(mut self, verdict: BuildVerdict) -> Self {
        self.fallback = Some(verdict);
        self
    }

    /// Makes every build after the script report the oracle as unavailable.
    #[must_use]
    pub fn unavailable_after_script(mut self) -> Self {
        self.fallback = None;
        self
    }

    /// Number of builds requested so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl BuildOracle for ScriptedOracle {
    fn verify(&self) -> Result<BuildVerdict, HarnessError> {
        self.calls.set(self.calls.get() + 1);
        let next = self.script.borrow_mut().pop_front().or(self.fallback);
        next.ok_or_else(|| HarnessError::OracleUnavailable {
            program: String::from("scripted oracle"),
            message: String::from("script exhausted"),
        })
    }
}

/// Delegates each build to a closure.
///
/// Useful when the verdict depends on what is on disk, standing in for a
/// compiler that rejects particular content.
pub struct ClosureOracle<F> {
    judge: F,
}

impl<F> ClosureOracle<F>
where
    F: Fn() -> BuildVerdict,
{
    /// Wraps `judge`.
    #[must_use]
    pub const fn new(judge: F) -> Self {
        Self { judge }
    }
}

impl<F> BuildOracle for ClosureOracle<F>
where
    F: Fn() -> BuildVerdict,
{
    fn verify(&self) -> Result<BuildVerdict, HarnessError> {
        Ok((self.judge)())
    }
}
