//! `enginelink-primitives` — foundational types for talking to an embedded EVM engine.
//!
//! This crate provides the value types shared by the RPC transport and the
//! engine client: 20-byte addresses, call payloads, submission results,
//! the engine lifecycle state, the engine's binary response codec, the
//! borsh argument encodings the engine expects, and Solidity ABI encoding.
//!
//! Nothing here performs I/O.

pub mod types;
pub mod error;
pub mod execution;
pub mod codec;
pub mod abi;
pub mod crypto;

// Re-export commonly used types at the crate root for convenience.
pub use types::{Address, ADDRESS_LEN, ZERO_ADDRESS};
pub use error::{AbiError, CodecError};
pub use execution::{CallPayload, DeploymentRecord, EngineState, SubmitResult};
pub use codec::{decode_submit_result, encode_submit_result, SUBMIT_RESULT_HEADER_LEN};
pub use abi::{ParamType, Token};
