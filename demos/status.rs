//! Example: Reading the routing table over a manual session
//!
//! Run with: cargo run --example status -- <host>
//!
//! This example demonstrates:
//! - Opening one connection for several operations
//! - Reading every output, then a single output
//! - Closing the session explicitly

use hdmi_matrix::{HdmiMatrix, IndexMode, INPUT_COUNT, OUTPUT_COUNT};
use tracing_subscriber::EnvFilter;

fn main() -> hdmi_matrix::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "192.168.1.60".to_string());

    let mut matrix = HdmiMatrix::new(host, IndexMode::ZeroBased);
    matrix.connect()?;

    println!("=== {} inputs x {} outputs ===\n", INPUT_COUNT, OUTPUT_COUNT);

    let outputs = matrix.get_outputs()?;
    for (output, input) in outputs.iter() {
        println!("output {} <- input {}", output, input);
    }

    // A single output costs the same request as the full table
    let first = matrix.get_output(0)?;
    println!("\nOutput 0 shows input {}", first);

    matrix.disconnect();
    Ok(())
}
