//! Smoke-test framework for a blockchain node's HTTP RPC surface.
//!
//! - `config`: target node, chain identifier and credentials
//! - `probe`: one GET plus JSON decode per endpoint
//! - `payload`: decoded bodies and typed field lookups
//! - `checks`: the fixed check registry and outcome evaluation
//! - `runner`: sequential execution and the aggregate verdict

pub mod checks;
pub mod config;
pub mod error;
pub mod payload;
pub mod probe;
pub mod runner;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use checks::{evaluate, registry, run_check, CheckDef, CheckFailure, CheckOutcome, Predicate};
pub use config::{SmokeConfig, DEFAULT_TIMEOUT};
pub use error::{SmokeError, SmokeResult};
pub use payload::{Payload, Shape, Violation};
pub use probe::{NodeRpc, ProbeError, ProbeResponse, RpcClient};
pub use runner::{run_all, CheckRunner, RunState, RunSummary};
