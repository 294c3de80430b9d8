//! Watch an MHUB matrix and print every status update.
//!
//! Usage: cargo run --example watch -- [base-url]

use hdanywhere_mhub::{MhubClient, StatusMonitor, StatusUpdate};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://10.0.0.60".to_string());

    let monitor = StatusMonitor::new(MhubClient::new(&base_url)?);
    let mut updates = monitor.subscribe();
    monitor.start();

    println!("watching {base_url}, ctrl-c to quit");
    while let Some(update) = updates.recv().await {
        match update {
            StatusUpdate::Online(routing) => {
                let pairs: Vec<String> = routing
                    .iter()
                    .map(|(output, input)| format!("{output}<-{input}"))
                    .collect();
                println!("online: {}", pairs.join(" "));
            }
            StatusUpdate::Offline(err) => println!("offline: {err}"),
        }
    }

    Ok(())
}
