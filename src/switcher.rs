use std::time::Duration;

use crate::client::MatrixDevice;
use crate::types::{Preset, RoutingTable, StatusSnapshot, SwitchOutcome};

/// How long to wait after the last switch command before trusting a status
/// read. The device echoes its pre-switch routing when queried right after
/// a switch, so this wait is a correctness requirement of the hardware,
/// not a tuning knob.
pub const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Orchestrates multi-output routing changes against a device.
///
/// The switcher owns no state of its own; it is a coordinator over the
/// injected device. Dispatch is serialized: the appliance does not
/// reliably accept concurrent switch commands.
#[derive(Debug, Clone)]
pub struct Switcher<D> {
    device: D,
}

impl<D: MatrixDevice> Switcher<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Drive the device to the target routing and confirm the result.
    ///
    /// Issues one switch command per entry, one at a time in ascending
    /// output order. A failed output does not abort the rest; every error
    /// is collected. After a non-empty batch the settle delay elapses
    /// before the confirming status query. An empty target skips straight
    /// to the query.
    ///
    /// There is no rollback: outputs that switched stay switched even when
    /// others failed. The caller decides whether to retry via `errors`.
    pub async fn apply_routing(&self, target: &RoutingTable) -> SwitchOutcome {
        let mut errors = Vec::new();

        if !target.is_empty() {
            for (&output, &input) in target {
                if let Err(e) = self.device.switch_one(output, input).await {
                    tracing::warn!("switching output {output} to input {input} failed: {e}");
                    errors.push(e);
                }
            }

            tokio::time::sleep(SETTLE_DELAY).await;
        }

        match self.device.get_status().await {
            Ok(table) => SwitchOutcome {
                snapshot: StatusSnapshot::Online(table),
                errors,
            },
            Err(e) => {
                tracing::warn!("post-switch status query failed: {e}");
                errors.push(e);
                SwitchOutcome {
                    snapshot: StatusSnapshot::Offline,
                    errors,
                }
            }
        }
    }

    /// Apply a named preset's routing.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hdanywhere_mhub::{Input, MhubClient, Output, Preset, RoutingTable, Switcher};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let switcher = Switcher::new(MhubClient::new("http://10.0.0.60")?);
    ///     let preset = Preset::new(
    ///         "hall",
    ///         "Hall",
    ///         RoutingTable::from([(Output::A, Input::I2), (Output::C, Input::I1)]),
    ///     );
    ///     let outcome = switcher.apply_preset(&preset).await;
    ///     println!("applied with {} errors", outcome.errors.len());
    ///     Ok(())
    /// }
    /// ```
    pub async fn apply_preset(&self, preset: &Preset) -> SwitchOutcome {
        tracing::info!("applying preset {} ({})", preset.id, preset.title);
        self.apply_routing(&preset.routing).await
    }
}
