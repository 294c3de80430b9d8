use std::future::Future;

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::Result;
use crate::protocol::{self, StatusResponse, SwitchAck};
use crate::types::{Input, Output, RoutingTable};

/// The device operations the orchestrator and monitor are built on.
///
/// `MhubClient` is the real implementation; tests substitute scripted
/// devices. Calls are one-shot and never retried at this layer; retry
/// policy belongs to the caller.
pub trait MatrixDevice {
    /// Query the current routing state
    fn get_status(&self) -> impl Future<Output = Result<RoutingTable>> + Send;

    /// Switch a single output to an input.
    ///
    /// The protocol has no batch switch; one output per call is all the
    /// device understands.
    fn switch_one(
        &self,
        output: Output,
        input: Input,
    ) -> impl Future<Output = Result<SwitchAck>> + Send;
}

/// HTTP client for the MHUB control API
///
/// # Example
///
/// ```no_run
/// use hdanywhere_mhub::MhubClient;
/// use hdanywhere_mhub::MatrixDevice;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MhubClient::new("http://10.0.0.60")?;
///     let routing = client.get_status().await?;
///     for (output, input) in &routing {
///         println!("{output} <- {input}");
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MhubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MhubClient {
    /// Create a client for the matrix at the given base URL, e.g.
    /// `http://10.0.0.60`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Base URL of the device this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` and decode the response envelope.
    ///
    /// Failures before any body is received map to `Transport`; everything
    /// with a body goes through the protocol codec.
    async fn request<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path)?;
        tracing::debug!("GET {url}");

        let response = self.http.get(url).send().await?;
        let body = response.bytes().await?;

        protocol::decode(&body)
    }
}

impl MatrixDevice for MhubClient {
    async fn get_status(&self) -> Result<RoutingTable> {
        let status: StatusResponse = self.request("/api/data/200/").await?;
        let routing = status.routing();
        tracing::debug!("status reports {} routed outputs", routing.len());
        Ok(routing)
    }

    async fn switch_one(&self, output: Output, input: Input) -> Result<SwitchAck> {
        tracing::info!("switching output {output} to input {input}");
        self.request(&format!("/api/control/switch/{output}/{input}"))
            .await
    }
}
