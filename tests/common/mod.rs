#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::time::Instant;

use hdanywhere_mhub::{
    Input, MatrixDevice, MhubError, Output, Result, RoutingTable, SwitchAck,
};

/// A device call recorded by the scripted device, with the (tokio) time it
/// was made at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Status,
    Switch(Output, Input),
}

struct Inner {
    calls: Mutex<Vec<(Call, Instant)>>,
    routing: Mutex<RoutingTable>,
    fail_status: AtomicBool,
    fail_outputs: Mutex<BTreeSet<Output>>,
}

/// In-memory stand-in for an MHUB device.
///
/// Records every call with its timestamp, applies successful switches to
/// its own routing table, and can be scripted to fail status queries or
/// individual outputs.
#[derive(Clone)]
pub struct ScriptedDevice {
    inner: Arc<Inner>,
}

impl ScriptedDevice {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                calls: Mutex::new(Vec::new()),
                routing: Mutex::new(RoutingTable::new()),
                fail_status: AtomicBool::new(false),
                fail_outputs: Mutex::new(BTreeSet::new()),
            }),
        }
    }

    pub fn set_routing(&self, routing: RoutingTable) {
        *self.inner.routing.lock().unwrap() = routing;
    }

    pub fn fail_status(&self, fail: bool) {
        self.inner.fail_status.store(fail, Ordering::SeqCst);
    }

    /// Make switch commands for the given output fail
    pub fn fail_output(&self, output: Output) {
        self.inner.fail_outputs.lock().unwrap().insert(output);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }

    pub fn timed_calls(&self) -> Vec<(Call, Instant)> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn switch_calls(&self) -> Vec<(Output, Input)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Switch(output, input) => Some((output, input)),
                Call::Status => None,
            })
            .collect()
    }

    pub fn status_queries(&self) -> usize {
        self.calls()
            .into_iter()
            .filter(|call| *call == Call::Status)
            .count()
    }
}

impl MatrixDevice for ScriptedDevice {
    async fn get_status(&self) -> Result<RoutingTable> {
        self.inner
            .calls
            .lock()
            .unwrap()
            .push((Call::Status, Instant::now()));

        if self.inner.fail_status.load(Ordering::SeqCst) {
            Err(MhubError::EmptyPayload)
        } else {
            Ok(self.inner.routing.lock().unwrap().clone())
        }
    }

    async fn switch_one(&self, output: Output, input: Input) -> Result<SwitchAck> {
        self.inner
            .calls
            .lock()
            .unwrap()
            .push((Call::Switch(output, input), Instant::now()));

        if self.inner.fail_outputs.lock().unwrap().contains(&output) {
            return Err(MhubError::DeviceReported("E2".to_string()));
        }

        self.inner.routing.lock().unwrap().insert(output, input);
        Ok(SwitchAck {
            input_id: input,
            output_id: output,
        })
    }
}
