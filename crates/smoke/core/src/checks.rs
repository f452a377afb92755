//! Check registry and outcome evaluation.
//!
//! Each check is a declarative record: an endpoint path, the payload shape
//! that endpoint returns, and the predicates its payload must satisfy.
//! [`evaluate`] turns a probe result into exactly one [`CheckOutcome`].

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, info};

use crate::config::SmokeConfig;
use crate::payload::{field, number_field, str_field, Payload, Shape, Violation};
use crate::probe::{NodeRpc, ProbeError, ProbeResponse};

/// Placeholder substituted with the chain identifier in endpoint paths.
pub const CHAIN_PLACEHOLDER: &str = "{chain}";

/// Lifecycle phase every observed worker must report.
pub const RUNNING_PHASE: &str = "running";

/// Semantic assertion over a decoded payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate {
    /// Numeric field strictly greater than zero.
    GreaterThanZero(&'static str),
    /// Numeric field different from zero.
    NonZero(&'static str),
    /// String field holding a decimal number different from zero.
    NonZeroDecimal(&'static str),
    /// String field equal to a literal.
    Equals {
        field: &'static str,
        expected: &'static str,
    },
    /// Apply the inner predicates to the first element of an array payload.
    FirstElement(&'static [Predicate]),
}

impl Predicate {
    /// Evaluate against a whole payload.
    pub fn check(&self, payload: &Payload) -> Result<(), Violation> {
        match (self, payload) {
            (Predicate::FirstElement(inner), Payload::Array(items)) => {
                let first = items.first().ok_or(Violation::EmptySequence)?;
                let object = first.as_object().ok_or_else(|| {
                    Violation::InFirstElement(Box::new(Violation::WrongType {
                        field: "[0]".into(),
                        expected: "an object",
                    }))
                })?;
                inner
                    .iter()
                    .try_for_each(|p| p.check_object(object))
                    .map_err(|v| Violation::InFirstElement(Box::new(v)))
            }
            (Predicate::FirstElement(_), other) => Err(Violation::ShapeMismatch {
                expected: Shape::Array,
                actual: other.shape(),
            }),
            (_, Payload::Object(map)) => self.check_object(map),
            (_, other) => Err(Violation::ShapeMismatch {
                expected: Shape::Object,
                actual: other.shape(),
            }),
        }
    }

    fn check_object(&self, map: &Map<String, Value>) -> Result<(), Violation> {
        match *self {
            Predicate::GreaterThanZero(path) => {
                let value = number_field(map, path)?;
                if value > 0.0 {
                    Ok(())
                } else {
                    Err(Violation::NotPositive {
                        field: path.to_string(),
                        value,
                    })
                }
            }
            Predicate::NonZero(path) => {
                let value = number_field(map, path)?;
                if value != 0.0 {
                    Ok(())
                } else {
                    Err(Violation::Zero {
                        field: path.to_string(),
                        value: field(map, path)?.to_string(),
                    })
                }
            }
            Predicate::NonZeroDecimal(path) => {
                let raw = str_field(map, path)?;
                let value: f64 = raw.trim().parse().map_err(|_| Violation::WrongType {
                    field: path.to_string(),
                    expected: "a decimal string",
                })?;
                if value != 0.0 {
                    Ok(())
                } else {
                    Err(Violation::Zero {
                        field: path.to_string(),
                        value: format!("{:?}", raw),
                    })
                }
            }
            Predicate::Equals { field, expected } => {
                let actual = str_field(map, field)?;
                if actual == expected {
                    Ok(())
                } else {
                    Err(Violation::Mismatch {
                        field: field.to_string(),
                        expected: expected.to_string(),
                        actual: actual.to_string(),
                    })
                }
            }
            Predicate::FirstElement(_) => Err(Violation::ShapeMismatch {
                expected: Shape::Array,
                actual: Shape::Object,
            }),
        }
    }
}

/// One registered check.
#[derive(Debug, Clone, Copy)]
pub struct CheckDef {
    /// Stable identifier
    pub name: &'static str,
    /// Endpoint path, may contain [`CHAIN_PLACEHOLDER`]
    pub path: &'static str,
    /// Expected payload shape
    pub shape: Shape,
    /// Predicates, evaluated in order
    pub predicates: &'static [Predicate],
}

impl CheckDef {
    /// Endpoint path with the chain identifier filled in.
    pub fn render_path(&self, chain: &str) -> String {
        self.path.replace(CHAIN_PLACEHOLDER, chain)
    }
}

const PHASE_RUNNING: Predicate = Predicate::Equals {
    field: "status.phase",
    expected: RUNNING_PHASE,
};

const fn check(
    name: &'static str,
    path: &'static str,
    shape: Shape,
    predicates: &'static [Predicate],
) -> CheckDef {
    CheckDef {
        name,
        path,
        shape,
        predicates,
    }
}

static REGISTRY: [CheckDef; 21] = [
    check("known_heads_of_chain", "/chains/{chain}/blocks", Shape::Array, &[]),
    check("head_block_details", "/chains/{chain}/blocks/head", Shape::Object, &[]),
    check("chain_identifier", "/chains/{chain}/chain_id", Shape::Text, &[]),
    check(
        "current_checkpoint",
        "/chains/{chain}/checkpoint",
        Shape::Object,
        &[Predicate::GreaterThanZero("block.level")],
    ),
    check("rpc_docs", "/describe?recurse=true", Shape::Object, &[]),
    check("list_p2p_connections", "/network/connections", Shape::Array, &[]),
    check("list_peers", "/network/peers", Shape::Array, &[]),
    check("list_pool_connection_points", "/network/points", Shape::Array, &[]),
    check("self_peer_id", "/network/self", Shape::Text, &[]),
    check(
        "node_bandwidth_stats",
        "/network/stat",
        Shape::Object,
        &[
            Predicate::NonZeroDecimal("total_sent"),
            Predicate::NonZeroDecimal("total_recv"),
        ],
    ),
    check("supported_network_version", "/network/version", Shape::Object, &[]),
    check("list_protocols", "/protocols", Shape::Array, &[]),
    check("garbage_collector_stats", "/stats/gc", Shape::Object, &[]),
    check("memory_usage_stats", "/stats/memory", Shape::Object, &[]),
    check(
        "block_validator_worker_state",
        "/workers/block_validator",
        Shape::Object,
        &[PHASE_RUNNING],
    ),
    check("list_chain_validators", "/workers/chain_validators", Shape::Array, &[]),
    check(
        "chain_validator_worker_state",
        "/workers/chain_validators/{chain}",
        Shape::Object,
        &[PHASE_RUNNING],
    ),
    check(
        "worker_ddb_state",
        "/workers/chain_validators/{chain}/ddb",
        Shape::Object,
        &[
            Predicate::NonZero("active_chains"),
            Predicate::NonZero("active_connections"),
        ],
    ),
    check(
        "list_validator_workers",
        "/workers/chain_validators/{chain}/peers_validators",
        Shape::Array,
        &[],
    ),
    check(
        "list_prevalidators",
        "/workers/prevalidators",
        Shape::Array,
        &[Predicate::FirstElement(&[PHASE_RUNNING])],
    ),
    check(
        "state_of_prevalidator",
        "/workers/prevalidators/{chain}",
        Shape::Object,
        &[PHASE_RUNNING],
    ),
];

/// The fixed battery, in registration order.
pub fn registry() -> &'static [CheckDef] {
    &REGISTRY
}

/// Why a check failed. Displays as `<path> <detail>`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckFailure {
    /// The request failed or the body did not decode
    #[error("{path} {error}")]
    Probe { path: String, error: ProbeError },

    /// Non-200 status or an empty payload
    #[error("{path} {status} {payload}")]
    Unhealthy {
        path: String,
        status: u16,
        payload: Payload,
    },

    /// A predicate rejected the payload
    #[error("{path} {status} {violation}")]
    Violated {
        path: String,
        status: u16,
        violation: Violation,
    },
}

/// Result of a single check.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// Healthy response, every predicate held
    Passed { path: String, status: u16 },
    /// See [`CheckFailure`]
    Failed(CheckFailure),
}

impl CheckOutcome {
    /// Whether the check passed.
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed { .. })
    }
}

/// Classify a probe result for `check`.
///
/// Order: probe error, then non-200 status or empty payload, then the
/// check's predicates in declaration order.
pub fn evaluate(
    check: &CheckDef,
    path: &str,
    result: Result<ProbeResponse, ProbeError>,
) -> CheckOutcome {
    let response = match result {
        Ok(response) => response,
        Err(error) => {
            return CheckOutcome::Failed(CheckFailure::Probe {
                path: path.to_string(),
                error,
            })
        }
    };

    if response.status != 200 || response.payload.is_empty() {
        return CheckOutcome::Failed(CheckFailure::Unhealthy {
            path: path.to_string(),
            status: response.status,
            payload: response.payload,
        });
    }

    match check
        .predicates
        .iter()
        .try_for_each(|p| p.check(&response.payload))
    {
        Ok(()) => CheckOutcome::Passed {
            path: path.to_string(),
            status: response.status,
        },
        Err(violation) => CheckOutcome::Failed(CheckFailure::Violated {
            path: path.to_string(),
            status: response.status,
            violation,
        }),
    }
}

/// Probe the check's endpoint, evaluate the result and log it.
pub async fn run_check<R>(check: &CheckDef, rpc: &R, config: &SmokeConfig) -> CheckOutcome
where
    R: NodeRpc + ?Sized,
{
    let path = check.render_path(config.chain());
    let result = rpc.probe(&path, check.shape).await;
    let outcome = evaluate(check, &path, result);

    match &outcome {
        CheckOutcome::Passed { path, status } => info!("PASSED: {} {}", path, status),
        CheckOutcome::Failed(failure) => error!("FAILED: {}", failure),
    }

    outcome
}
