//! Determinism tests: identical inputs always produce identical bytes.

mod common;

use enginelink_client::{ContractInterface, TransactionBuilder};
use enginelink_primitives::{decode_submit_result, Token};
use enginelink_rpc::RecordedRequest;

use common::*;

// ── Payload construction ──

#[test]
fn test_repeated_builds_identical() {
    let erc20 = ContractInterface::evm_erc20();
    let builder = TransactionBuilder::new(&erc20);

    let payloads: Vec<_> = (0..5)
        .map(|_| builder.mint(token_address(), alice(), 1_000_000).unwrap())
        .collect();
    for p in &payloads[1..] {
        assert_eq!(p, &payloads[0]);
    }
}

#[test]
fn test_independent_interfaces_agree() {
    let json = r#"[
        { "type": "function", "name": "transfer",
          "inputs": [{ "name": "to", "type": "address" }, { "name": "amount", "type": "uint256" }] }
    ]"#;
    let parsed = ContractInterface::from_abi_json(json).unwrap();
    let builtin = ContractInterface::evm_erc20();
    let args = [Token::from(bob()), Token::uint(7u64)];

    let a = TransactionBuilder::new(&parsed).build(token_address(), "transfer", &args).unwrap();
    let b = TransactionBuilder::new(&builtin).build(token_address(), "transfer", &args).unwrap();
    assert_eq!(a, b);
    assert_eq!(hex::encode(&a.data()[..4]), "a9059cbb");
}

#[test]
fn test_different_amounts_differ() {
    let erc20 = ContractInterface::evm_erc20();
    let builder = TransactionBuilder::new(&erc20);
    let a = builder.mint(token_address(), alice(), 1).unwrap();
    let b = builder.mint(token_address(), alice(), 2).unwrap();
    assert_ne!(a.data(), b.data());
    assert_eq!(a.data()[..a.data().len() - 1], b.data()[..b.data().len() - 1]);
}

// ── Decoding ──

#[test]
fn test_decode_is_stable() {
    let raw = submit_response(true, 42, &[1, 2, 3]);
    let first = decode_submit_result(&raw).unwrap();
    for _ in 0..5 {
        assert_eq!(decode_submit_result(&raw).unwrap(), first);
    }
}

// ── Client requests ──

#[tokio::test]
async fn test_two_clients_send_identical_requests() {
    let mut recorded = Vec::new();
    for _ in 0..2 {
        let (client, mock) = ready_client().await;
        let erc20 = ContractInterface::evm_erc20();
        let payload = TransactionBuilder::new(&erc20)
            .mint(token_address(), alice(), 500)
            .unwrap();
        mock.respond("call", submit_response(true, 1, &[]));
        client.submit(&payload).await.unwrap();
        recorded.push(mock.requests());
    }
    assert_eq!(recorded[0], recorded[1]);
    assert!(matches!(recorded[0].last(), Some(RecordedRequest::Call { method, .. }) if method == "call"));
}
