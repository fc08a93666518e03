/*
[INPUT]:  Endpoint, client options and transport settings
[OUTPUT]: Configured LighterClient and configuration errors
[POS]:    HTTP layer - client construction for the REST API
[UPDATE]: When adding options or changing client behavior
*/

pub mod client;
pub mod config;
pub mod error;
pub mod options;
pub mod profile;
pub mod transport;

pub use error::{LighterError, Result};

pub use client::{ClientBuilder, LighterClient};
pub use config::ClientConfiguration;
pub use options::{
    ClientOption, set_fat_finger_protection, with_channel_name, with_custom_headers, with_dialer,
    with_http_client, with_local_addr, with_pool_limits, with_proxy, with_timeout,
    with_tls_policy, without_proxy,
};
pub use profile::ClientConfig;
pub use transport::{Dialer, ProxyRule, TlsPolicy, Transport, TransportSettings};
