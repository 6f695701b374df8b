//! `enginelink-client` — drives an embedded EVM engine from the host side.
//!
//! This crate installs and initializes the engine, deploys contracts and
//! bridged tokens into it, builds ABI-encoded calls against deployed
//! contracts and decodes the engine's submission results. It enforces:
//!
//! - **Lifecycle ordering:** deploys and calls only once the engine is `Ready`
//! - **Byte-exact decoding:** truncated responses are errors, never padded
//! - **No implicit configuration:** connection and init settings are values
//! - **No hidden recovery:** transport failures surface unmodified
//!
//! The primary entry points are [`EngineClient`] and [`DeploymentOrchestrator`].

pub mod error;
pub mod config;
pub mod interface;
pub mod transaction;
pub mod client;
pub mod deployment;

pub use error::ClientError;
pub use config::{ClientConfig, EngineInitConfig};
pub use interface::{ContractInterface, FunctionDescriptor};
pub use transaction::TransactionBuilder;
pub use client::{extract_token_address, EngineClient};
pub use deployment::{DeploymentOrchestrator, DeploymentPlan};
