/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Lighter adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    ClientBuilder,
    ClientConfig,
    ClientConfiguration,
    ClientOption,
    Dialer,
    LighterClient,
    LighterError,
    ProxyRule,
    Result,
    TlsPolicy,
    TransportSettings,
};

// Re-export all types
pub use types::*;
