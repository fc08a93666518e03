/*
[INPUT]:  Endpoint plus values written by client options
[OUTPUT]: Accumulated client configuration and its transport slot
[POS]:    HTTP layer - per-client configuration state
[UPDATE]: When adding configuration fields or changing transport ownership
*/

use reqwest::header::HeaderMap;

use crate::http::transport::{Transport, TransportSettings};
use crate::http::{LighterError, Result};

/// State accumulated while a client is being built.
///
/// Mutated only by [`ClientOption`](crate::http::ClientOption)s during
/// [`ClientBuilder::build`](crate::http::ClientBuilder::build); read-only
/// once the client exists.
#[derive(Debug, Clone)]
pub struct ClientConfiguration {
    endpoint: String,
    pub(crate) default_headers: HeaderMap,
    pub(crate) fat_finger_protection: bool,
    pub(crate) channel_name: String,
    pub(crate) transport: Option<Transport>,
}

impl ClientConfiguration {
    pub(crate) fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(LighterError::EmptyEndpoint);
        }

        Ok(Self {
            endpoint,
            default_headers: HeaderMap::new(),
            fat_finger_protection: true,
            channel_name: String::new(),
            transport: None,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Headers attached to every request built by the client
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    pub fn fat_finger_protection(&self) -> bool {
        self.fat_finger_protection
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    /// Transport settings, or `None` when the caller supplied a client
    pub fn transport_settings(&self) -> Option<&TransportSettings> {
        match &self.transport {
            Some(Transport::Settings(settings)) => Some(settings),
            _ => None,
        }
    }

    /// Get or create the transport settings options write into.
    ///
    /// Repeated calls return the same instance. A caller-supplied client is
    /// never replaced; transport options against it fail instead.
    pub(crate) fn ensure_transport(&mut self) -> Result<&mut TransportSettings> {
        match self
            .transport
            .get_or_insert_with(|| Transport::Settings(TransportSettings::default()))
        {
            Transport::Settings(settings) => Ok(settings),
            Transport::Prebuilt(_) => Err(LighterError::Config(
                "transport options cannot modify a caller-supplied HTTP client".to_string(),
            )),
        }
    }

    /// Install a caller-built client. Fails if the slot is already taken.
    pub(crate) fn install_transport(&mut self, client: reqwest::Client) -> Result<()> {
        match self.transport {
            None => {
                self.transport = Some(Transport::Prebuilt(client));
                Ok(())
            }
            Some(Transport::Settings(_)) => Err(LighterError::Config(
                "HTTP client supplied after transport options were applied".to_string(),
            )),
            Some(Transport::Prebuilt(_)) => Err(LighterError::Config(
                "HTTP client already supplied".to_string(),
            )),
        }
    }
}
