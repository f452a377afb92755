//! node-smoke binary entry point

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    node_smoke::finish(node_smoke::run().await)
}
