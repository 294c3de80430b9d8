//! Rust library for controlling HDANYWHERE MHUB HDMI matrix switchers
//!
//! This library provides an async API for driving an MHUB matrix switch
//! (N video inputs routed to M outputs) over its HTTP/JSON control
//! protocol. It supports:
//!
//! - Querying the current routing state
//! - Orchestrated multi-output switching with per-output error collection
//! - Named routing presets and preset matching for UI highlighting
//! - A recurring status poll with offline tolerance and sleep/wake recovery
//!
//! # Quick Start
//!
//! ```no_run
//! use hdanywhere_mhub::{
//!     match_preset, Input, MhubClient, Output, Preset, RoutingTable, StatusMonitor, Switcher,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MhubClient::new("http://10.0.0.60")?;
//!
//!     // Define the preset catalog (static configuration data)
//!     let presets = vec![
//!         Preset::new(
//!             "office",
//!             "Office",
//!             RoutingTable::from([(Output::A, Input::I4), (Output::C, Input::I3)]),
//!         ),
//!         Preset::new(
//!             "hall",
//!             "Hall",
//!             RoutingTable::from([(Output::A, Input::I2), (Output::C, Input::I1)]),
//!         ),
//!     ];
//!
//!     // Apply a preset and inspect the confirmed state
//!     let switcher = Switcher::new(client.clone());
//!     let outcome = switcher.apply_preset(&presets[0]).await;
//!     if let Some(table) = outcome.snapshot.routing() {
//!         match match_preset(&presets, table) {
//!             Some(preset) => println!("now on preset: {}", preset.title),
//!             None => println!("unknown configuration"),
//!         }
//!     }
//!
//!     // Watch the device for status changes
//!     let monitor = StatusMonitor::new(client);
//!     let mut updates = monitor.subscribe();
//!     monitor.start();
//!     while let Some(update) = updates.recv().await {
//!         println!("status: {update:?}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized into several layers:
//!
//! - **Protocol**: envelope codec and wire types for the MHUB JSON API
//! - **Client**: one-shot HTTP calls (status query, single-output switch)
//! - **Types**: routing tables, presets, and matching rules
//! - **Switcher**: serialized multi-output switch orchestration
//! - **Monitor**: recurring status poll with start/stop and wake recovery
//!
//! Switch dispatch is serialized on purpose: the appliance does not
//! reliably accept concurrent switch commands. The switcher also waits a
//! fixed settle delay before re-reading status, because the device echoes
//! its pre-switch routing when queried immediately after a switch.

mod client;
mod error;
mod monitor;
mod protocol;
mod subscription;
mod switcher;
mod types;

// Public exports
pub use client::{MatrixDevice, MhubClient};
pub use error::{MhubError, Result};
pub use monitor::{StatusMonitor, POLL_INTERVAL};
pub use protocol::{
    Envelope, ResponseError, ResponseHeader, StatusResponse, SwitchAck, Zone, ZoneState,
};
pub use subscription::{StatusReceiver, StatusUpdate};
pub use switcher::{Switcher, SETTLE_DELAY};
pub use types::{
    match_preset, Input, Output, Preset, RoutingTable, StatusSnapshot, SwitchOutcome,
};
