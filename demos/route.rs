//! Example: Routing inputs with one-shot operations
//!
//! Run with: cargo run --example route -- <host> <output> <input>
//!
//! This example demonstrates:
//! - One-based port numbering, as printed on the front panel
//! - `simple_*` operations that connect and disconnect by themselves
//! - Telling a refused route apart from a failed call
//!
//! Set `RUST_LOG=hdmi_matrix=debug` to see every frame on the wire.

use hdmi_matrix::{ClientConfig, HdmiMatrix, IndexMode};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> hdmi_matrix::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "192.168.1.60".to_string());
    // Indices are parsed by the client; a typo surfaces as InvalidArgument
    let output = args.next().unwrap_or_else(|| "1".to_string());
    let input = args.next().unwrap_or_else(|| "1".to_string());

    // =========================================================================
    // Configure the client
    // =========================================================================

    let config = ClientConfig::new(host)
        .with_index_mode(IndexMode::OneBased)
        .with_timeout(Duration::from_secs(3));
    let mut matrix = HdmiMatrix::with_config(config);

    // =========================================================================
    // Route and verify
    // =========================================================================

    println!("=== Routing input {} to output {} ===\n", input, output);

    if matrix.simple_map_io(output.as_str(), input.as_str())? {
        println!("Device confirmed the route");
    } else {
        println!("Device confirmed a different route");
    }

    let current = matrix.simple_get_output(output.as_str())?;
    println!("Output {} now shows input {}", output, current);

    Ok(())
}
