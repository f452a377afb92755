//! Sequential check runner.
//!
//! Runs every registered check exactly once, in order, and keeps only
//! aggregate counters. A failing check is recorded and the loop moves on.

use tracing::debug;

use crate::checks::{registry, run_check, CheckDef, CheckOutcome};
use crate::config::SmokeConfig;
use crate::error::{SmokeError, SmokeResult};
use crate::probe::NodeRpc;

/// Runner lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Created, not started
    Idle,
    /// Executing checks
    Running,
    /// Every check has produced an outcome
    Completed,
}

/// Pass/fail counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Checks that passed
    pub succeeded: usize,
    /// Checks that failed
    pub failed: usize,
}

impl RunSummary {
    /// Number of outcomes recorded.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Count one outcome.
    pub fn record(&mut self, outcome: &CheckOutcome) {
        if outcome.is_passed() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Terminal verdict: any failure fails the run.
    pub fn verdict(&self) -> SmokeResult<()> {
        if self.failed > 0 {
            return Err(SmokeError::ChecksFailed {
                failed: self.failed,
                total: self.total(),
            });
        }
        Ok(())
    }
}

/// One-shot runner over an ordered list of checks.
pub struct CheckRunner<'a> {
    checks: &'a [CheckDef],
    state: RunState,
    summary: RunSummary,
}

impl<'a> CheckRunner<'a> {
    /// Create an idle runner over `checks`.
    pub fn new(checks: &'a [CheckDef]) -> Self {
        Self {
            checks,
            state: RunState::Idle,
            summary: RunSummary::default(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Counters recorded so far.
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Execute every check once in registration order.
    ///
    /// Returns [`SmokeError::AlreadyRun`] if this runner has been started
    /// before.
    pub async fn run<R>(&mut self, rpc: &R, config: &SmokeConfig) -> SmokeResult<RunSummary>
    where
        R: NodeRpc + ?Sized,
    {
        if self.state != RunState::Idle {
            return Err(SmokeError::AlreadyRun);
        }

        self.state = RunState::Running;
        debug!(checks = self.checks.len(), chain = config.chain(), "run started");

        for check in self.checks {
            let outcome = run_check(check, rpc, config).await;
            self.summary.record(&outcome);
        }

        self.state = RunState::Completed;
        debug!(
            succeeded = self.summary.succeeded,
            failed = self.summary.failed,
            "run completed"
        );

        Ok(self.summary)
    }
}

/// Run the full registered battery against `rpc`.
pub async fn run_all<R>(rpc: &R, config: &SmokeConfig) -> SmokeResult<RunSummary>
where
    R: NodeRpc + ?Sized,
{
    CheckRunner::new(registry()).run(rpc, config).await
}
