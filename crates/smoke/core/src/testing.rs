//! Test fixtures: payloads a healthy node returns for each registered check.

use serde_json::{json, Value};

use crate::checks::CheckDef;

/// Body a healthy node would return for `check`.
pub fn healthy_payload(check: &CheckDef) -> Value {
    match check.name {
        "known_heads_of_chain" => json!([["BLockGenesisGenesisGenesisGenesisGenesisf79b5d1CoW2"]]),
        "head_block_details" => json!({
            "protocol": "PtParisBxoLz5gzMmn3d9WBQNoPSZakgnkMC2VNuQ3KXfUtUQeZ",
            "chain_id": "NetXdQprcVkpaWU",
            "hash": "BLockGenesisGenesisGenesisGenesisGenesisf79b5d1CoW2",
            "header": {"level": 5_200_000, "proto": 19}
        }),
        "chain_identifier" => json!("NetXdQprcVkpaWU"),
        "current_checkpoint" => json!({
            "block": {"level": 5_199_872, "hash": "BLockGenesisGenesisGenesisGenesisGenesisf79b5d1CoW2"},
            "history_mode": "full"
        }),
        "rpc_docs" => json!({"static": {"subdirs": {"suffixes": []}}}),
        "list_p2p_connections" => json!([{
            "incoming": false,
            "peer_id": "idtSXnQ9kgk4NAoy9e8yG8RJvMC5hR",
            "id_point": {"addr": "::ffff:10.0.0.7", "port": 9732}
        }]),
        "list_peers" => json!([["idtSXnQ9kgk4NAoy9e8yG8RJvMC5hR", {"state": "running"}]]),
        "list_pool_connection_points" => json!([["10.0.0.7:9732", {"trusted": false}]]),
        "self_peer_id" => json!("idrXpSLjbvgMnVDHhC4yZRPtTnPPJ5"),
        "node_bandwidth_stats" => json!({
            "total_sent": "1503220",
            "total_recv": "8812048",
            "current_inflow": 120,
            "current_outflow": 64
        }),
        "supported_network_version" => json!({
            "chain_name": "TEZOS_MAINNET",
            "distributed_db_version": 2,
            "p2p_version": 1
        }),
        "list_protocols" => json!(["PtParisBxoLz5gzMmn3d9WBQNoPSZakgnkMC2VNuQ3KXfUtUQeZ"]),
        "garbage_collector_stats" => json!({"minor_words": 1.2e9, "heap_words": 83_968}),
        "memory_usage_stats" => json!({"page_size": 4096, "size": 190_000, "resident": 52_000}),
        "block_validator_worker_state" => worker_state(),
        "list_chain_validators" => json!([{"chain_id": "NetXdQprcVkpaWU", "status": {"phase": "running"}}]),
        "chain_validator_worker_state" => worker_state(),
        "worker_ddb_state" => json!({
            "p2p_readers": 4,
            "active_chains": 1,
            "active_connections": 6,
            "active_peers": 6
        }),
        "list_validator_workers" => json!([{
            "peer_id": "idtSXnQ9kgk4NAoy9e8yG8RJvMC5hR",
            "status": {"phase": "running"}
        }]),
        "list_prevalidators" => json!([{"chain_id": "NetXdQprcVkpaWU", "status": {"phase": "running"}}]),
        "state_of_prevalidator" => worker_state(),
        _ => json!({"ok": true}),
    }
}

fn worker_state() -> Value {
    json!({
        "status": {"phase": "running", "since": "2026-10-18T09:00:00Z"},
        "pending_requests": [],
        "backlog": []
    })
}
