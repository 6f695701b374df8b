//! End-to-end tests: deploy through the orchestrator, then drive the
//! deployed token with built payloads, all against the in-memory engine.

mod common;

use enginelink_client::{
    ClientError, ContractInterface, DeploymentOrchestrator, DeploymentPlan, TransactionBuilder,
};
use enginelink_primitives::codec::{FunctionCallArgs, ViewCallArgs};
use enginelink_primitives::{EngineState, Token};
use enginelink_rpc::RecordedRequest;

use common::*;

#[tokio::test]
async fn test_deploy_token_then_mint_and_query() {
    let (mut client, mock) = mock_client();
    mock.respond("deploy_erc20_token", token_response(token_address()));

    let record = DeploymentOrchestrator::new(&mut client)
        .deploy_token(ENGINE_IMAGE, &DeploymentPlan::default(), SOURCE_ID)
        .await
        .unwrap();
    assert_eq!(record.source_id, SOURCE_ID);
    assert_eq!(record.deployed_address, token_address());
    assert_eq!(client.state(), EngineState::Ready);

    let erc20 = ContractInterface::evm_erc20();
    let builder = TransactionBuilder::new(&erc20);

    mock.respond("call", submit_response(true, 36_000, &[]));
    let mint = builder.mint(record.deployed_address, alice(), 1_000).unwrap();
    let outcome = client.submit(&mint).await.unwrap();
    assert!(outcome.status);
    assert_eq!(outcome.gas_used, 36_000);

    mock.respond("view", view_word(1_000));
    let query = builder.balance_of(record.deployed_address, alice()).unwrap();
    let balance = client.view(&query).await.unwrap();
    assert!(balance.status);
    assert_eq!(word_to_u128(&balance.result), 1_000);

    assert_eq!(
        mock.methods(),
        vec!["new", "get_version", "deploy_erc20_token", "call", "view"]
    );

    let requests = mock.requests();
    assert!(matches!(&requests[0], RecordedRequest::Deploy { code } if code == ENGINE_IMAGE));

    let RecordedRequest::Call { args, .. } = &requests[4] else {
        panic!("expected call request");
    };
    let call: FunctionCallArgs = borsh::from_slice(args).unwrap();
    assert_eq!(call.contract, token_address().into_bytes());
    assert_eq!(call.input, mint.data());

    let RecordedRequest::View { args, .. } = &requests[5] else {
        panic!("expected view request");
    };
    let view: ViewCallArgs = borsh::from_slice(args).unwrap();
    assert_eq!(view.input, query.data());
}

#[tokio::test]
async fn test_reverted_withdraw_is_an_outcome() {
    let (client, mock) = ready_client().await;
    let erc20 = ContractInterface::evm_erc20();
    let builder = TransactionBuilder::new(&erc20);

    // Error(string) revert payload prefix.
    mock.respond("call", submit_response(false, 24_000, &[0x08, 0xc3, 0x79, 0xa0]));
    let withdraw = builder
        .withdraw_to_near(token_address(), "bob.node0", 10)
        .unwrap();
    let outcome = client.submit(&withdraw).await.unwrap();
    assert!(outcome.is_revert());
    assert_eq!(outcome.result_hex(), "08c379a0");
}

#[tokio::test]
async fn test_deploy_contract_with_constructor_args() {
    let (mut client, mock) = mock_client();
    mock.respond("deploy_code", submit_response(true, 1_200_000, token_address().as_bytes()));

    let erc20 = ContractInterface::evm_erc20();
    let deploy_data = TransactionBuilder::new(&erc20)
        .deploy_payload(
            &[0x60, 0x80, 0x60, 0x40],
            &[
                Token::String("TestToken".into()),
                Token::String("TT".into()),
                Token::uint(18u8),
                Token::Address(Default::default()),
            ],
        )
        .unwrap();

    let record = DeploymentOrchestrator::new(&mut client)
        .deploy_contract(ENGINE_IMAGE, &DeploymentPlan::default(), "test-token", &deploy_data)
        .await
        .unwrap();
    assert_eq!(record.source_id, "test-token");
    assert_eq!(record.deployed_address, token_address());

    let requests = mock.requests();
    let RecordedRequest::Call { method, args } = requests.last().unwrap() else {
        panic!("expected deploy_code call");
    };
    assert_eq!(method, "deploy_code");
    assert_eq!(args, &deploy_data);
}

#[tokio::test]
async fn test_deploy_contract_revert_surfaces() {
    let (mut client, mock) = mock_client();
    mock.respond("deploy_code", submit_response(false, 500, &[]));

    let err = DeploymentOrchestrator::new(&mut client)
        .deploy_contract(ENGINE_IMAGE, &DeploymentPlan::default(), "broken", &[0xfe])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::DeployReverted(ref r) if r.gas_used == 500));
    assert_eq!(client.state(), EngineState::Ready);
}

#[tokio::test]
async fn test_second_deployment_reinstalls() {
    let (mut client, mock) = mock_client();
    mock.respond("deploy_erc20_token", token_response(token_address()));
    mock.respond("deploy_erc20_token", token_response(bob()));

    let plan = DeploymentPlan::default();
    let mut orchestrator = DeploymentOrchestrator::new(&mut client);
    let first = orchestrator.deploy_token(ENGINE_IMAGE, &plan, SOURCE_ID).await.unwrap();
    let second = orchestrator.deploy_token(ENGINE_IMAGE, &plan, "other.node0").await.unwrap();
    assert_eq!(first.deployed_address, token_address());
    assert_eq!(second.deployed_address, bob());

    let installs = mock
        .requests()
        .iter()
        .filter(|r| matches!(r, RecordedRequest::Deploy { .. }))
        .count();
    assert_eq!(installs, 2);
}
