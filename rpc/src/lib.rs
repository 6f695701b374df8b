//! `enginelink-rpc` — host-chain transport for the embedded EVM engine.
//!
//! The engine lives inside a contract account on the host chain. Every
//! engine operation is a method on that account, reached through this
//! crate. It provides:
//!
//! - `RpcTransport` trait: the seam the engine client talks through
//! - `NearRpcTransport`: JSON-RPC over HTTP with signed host transactions
//! - `MockTransport`: scripted in-memory transport for testing
//! - `ConnectionConfig` / `SignerKey`: explicit connection settings
//! - `TransportError`: everything that can go wrong on the wire

pub mod error;
pub mod types;
pub mod traits;
pub mod near;
pub mod mock;

// Re-export commonly used types at the crate root.
pub use error::TransportError;
pub use types::{ConnectionConfig, SignerKey};
pub use traits::RpcTransport;
pub use near::NearRpcTransport;
pub use mock::{MockTransport, RecordedRequest, MOCK_ENGINE_VERSION};
