//! Wire types and codec for the MHUB HTTP/JSON control protocol.
//!
//! Every endpoint answers with the same envelope shape:
//! `{ "data": ..., "header": { "version": ... }, "error": { "code": ... } }`.
//! Wire field names are snake_case and map directly onto the Rust fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{MhubError, Result};
use crate::types::{Input, Output, RoutingTable};

/// Response envelope wrapping every payload the device sends
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub header: Option<ResponseHeader>,
    pub error: Option<ResponseError>,
}

/// Envelope header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseHeader {
    pub version: Option<String>,
}

/// Device-level error report inside the envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseError {
    pub code: Option<String>,
}

/// Payload of the status endpoint: one entry per zone the device exposes
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// A zone with its ordered state list
#[derive(Debug, Clone, Deserialize)]
pub struct Zone {
    pub zone_id: Option<String>,
    #[serde(default)]
    pub state: Vec<ZoneState>,
}

/// One state entry of a zone; the first entry carries the routing pair
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneState {
    pub output_id: Option<Output>,
    pub input_id: Option<Input>,
    pub display_power: Option<String>,
}

/// Payload acknowledging a single switch command
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchAck {
    pub input_id: Input,
    pub output_id: Output,
}

impl StatusResponse {
    /// Fold the zone list into a routing table.
    ///
    /// Only the first state entry of each zone is meaningful routing state;
    /// zones whose first entry lacks either id are skipped.
    pub fn routing(&self) -> RoutingTable {
        self.zones
            .iter()
            .filter_map(|zone| zone.state.first())
            .filter_map(|state| Some((state.output_id?, state.input_id?)))
            .collect()
    }
}

/// Decode a response body into its payload.
///
/// A present `data` object wins. Without one, a present `error.code` means
/// the device rejected the request; neither means an empty payload. JSON
/// that does not fit the envelope at all is a decode failure.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_slice(body)?;
    match envelope.data {
        Some(data) => Ok(data),
        None => match envelope.error.and_then(|e| e.code) {
            Some(code) => Err(MhubError::DeviceReported(code)),
            None => Err(MhubError::EmptyPayload),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_data_payload() {
        let body = br#"{
            "data": { "input_id": "3", "output_id": "c" },
            "header": { "version": "8.31" },
            "error": null
        }"#;
        let ack: SwitchAck = decode(body).unwrap();
        assert_eq!(ack.output_id, Output::C);
        assert_eq!(ack.input_id, Input::I3);
    }

    #[test]
    fn null_data_with_code_is_device_reported() {
        let body = br#"{ "data": null, "header": { "version": "8.31" }, "error": { "code": "E1" } }"#;
        let err = decode::<StatusResponse>(body).unwrap_err();
        assert!(matches!(err, MhubError::DeviceReported(code) if code == "E1"));
    }

    #[test]
    fn null_data_without_code_is_empty_payload() {
        let body = br#"{ "data": null, "error": null }"#;
        let err = decode::<StatusResponse>(body).unwrap_err();
        assert!(matches!(err, MhubError::EmptyPayload));

        // An error object with a null code carries no usable information
        // either, so it falls into the same bucket.
        let body = br#"{ "data": null, "error": { "code": null } }"#;
        let err = decode::<StatusResponse>(body).unwrap_err();
        assert!(matches!(err, MhubError::EmptyPayload));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let err = decode::<StatusResponse>(b"<html>not json</html>").unwrap_err();
        assert!(matches!(err, MhubError::Decode(_)));
    }

    #[test]
    fn routing_takes_first_state_entry_per_zone() {
        let body = br#"{
            "data": {
                "zones": [
                    {
                        "zone_id": "1",
                        "state": [
                            { "output_id": "a", "input_id": "4", "display_power": "on" },
                            { "output_id": "a", "input_id": "1", "display_power": "off" }
                        ]
                    },
                    {
                        "zone_id": "2",
                        "state": [
                            { "output_id": "c", "input_id": "3" }
                        ]
                    }
                ]
            },
            "error": null
        }"#;
        let status: StatusResponse = decode(body).unwrap();
        let routing = status.routing();
        assert_eq!(
            routing,
            RoutingTable::from([(Output::A, Input::I4), (Output::C, Input::I3)])
        );
    }

    #[test]
    fn routing_skips_incomplete_zones() {
        let body = br#"{
            "data": {
                "zones": [
                    { "zone_id": "1", "state": [ { "display_power": "on" } ] },
                    { "zone_id": "2", "state": [] },
                    { "zone_id": "3", "state": [ { "output_id": "f", "input_id": "2" } ] }
                ]
            },
            "error": null
        }"#;
        let status: StatusResponse = decode(body).unwrap();
        assert_eq!(
            status.routing(),
            RoutingTable::from([(Output::F, Input::I2)])
        );
    }
}
