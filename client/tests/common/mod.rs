//! Shared test helpers for integration tests.
//!
//! Provides a client wired to the in-memory transport, canned engine
//! responses and fixed addresses used across all integration test files.

#![allow(dead_code)]

use enginelink_client::{ClientConfig, EngineClient, EngineInitConfig};
use enginelink_primitives::codec::{encode_args, TransactionStatus};
use enginelink_primitives::{encode_submit_result, Address, SubmitResult};
use enginelink_rpc::{ConnectionConfig, MockTransport};

/// Stand-in for the engine runtime image.
pub const ENGINE_IMAGE: &[u8] = b"\0asm\x01\0\0\0engine";

/// Host-chain token bridged in the deployment tests.
pub const SOURCE_ID: &str = "token.node0";

// ── Addresses ──

pub fn token_address() -> Address {
    Address::new([0x7e; 20])
}

pub fn alice() -> Address {
    Address::new([0xa1; 20])
}

pub fn bob() -> Address {
    Address::new([0xb0; 20])
}

// ── Clients ──

/// Client against the local preset, backed by a fresh mock.
pub fn mock_client() -> (EngineClient<MockTransport>, MockTransport) {
    let mock = MockTransport::new();
    let config = ClientConfig::with_connection(ConnectionConfig::local());
    (EngineClient::new(config, mock.clone()), mock)
}

/// Client that has already been installed and initialized.
pub async fn ready_client() -> (EngineClient<MockTransport>, MockTransport) {
    let (mut client, mock) = mock_client();
    client.install(ENGINE_IMAGE).await.expect("install");
    client
        .initialize(&EngineInitConfig::default())
        .await
        .expect("initialize");
    (client, mock)
}

// ── Engine responses ──

/// Encoded `SubmitResult` as the engine returns it.
pub fn submit_response(status: bool, gas_used: u64, result: &[u8]) -> Vec<u8> {
    encode_submit_result(&SubmitResult {
        status,
        gas_used,
        result: result.to_vec(),
    })
    .expect("result fits the length field")
}

/// `deploy_erc20_token` response carrying `address`.
pub fn token_response(address: Address) -> Vec<u8> {
    let mut raw = 20u32.to_le_bytes().to_vec();
    raw.extend_from_slice(address.as_bytes());
    raw
}

/// Successful `view` response returning a single uint256 word.
pub fn view_word(value: u128) -> Vec<u8> {
    let mut word = vec![0u8; 16];
    word.extend_from_slice(&value.to_be_bytes());
    encode_args(&TransactionStatus::Succeed(word))
}

/// Read the low 128 bits of a uint256 return word.
pub fn word_to_u128(word: &[u8]) -> u128 {
    assert_eq!(word.len(), 32, "expected one ABI word");
    let mut low = [0u8; 16];
    low.copy_from_slice(&word[16..]);
    u128::from_be_bytes(low)
}
