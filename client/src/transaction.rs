//! Call payload construction.
//!
//! Pure encoding, no I/O: the same interface, target, function and
//! arguments always produce the same bytes.

use enginelink_primitives::abi::{self, encode_function_call};
use enginelink_primitives::{AbiError, Address, CallPayload, Token};

use crate::interface::ContractInterface;

/// Builds [`CallPayload`]s against a contract interface.
#[derive(Debug, Clone, Copy)]
pub struct TransactionBuilder<'a> {
    interface: &'a ContractInterface,
}

impl<'a> TransactionBuilder<'a> {
    pub fn new(interface: &'a ContractInterface) -> Self {
        Self { interface }
    }

    /// Interface calls are checked against.
    pub fn interface(&self) -> &'a ContractInterface {
        self.interface
    }

    /// Encode a call of `function` on the contract at `to`.
    pub fn build(&self, to: Address, function: &str, args: &[Token]) -> Result<CallPayload, AbiError> {
        let descriptor = self.interface.function(function, args.len())?;
        let data = encode_function_call(&descriptor.name, &descriptor.inputs, args)?;
        Ok(CallPayload::new(to, data))
    }

    /// Creation code followed by the encoded constructor arguments, ready
    /// for `deploy_code`.
    pub fn deploy_payload(&self, bytecode: &[u8], args: &[Token]) -> Result<Vec<u8>, AbiError> {
        abi::check_args("constructor", self.interface.constructor(), args)?;
        let mut data = bytecode.to_vec();
        data.extend_from_slice(&abi::encode(args));
        Ok(data)
    }

    // ── Token helpers ──

    /// `decimals()`
    pub fn decimals(&self, token: Address) -> Result<CallPayload, AbiError> {
        self.build(token, "decimals", &[])
    }

    /// `balanceOf(address)`
    pub fn balance_of(&self, token: Address, owner: Address) -> Result<CallPayload, AbiError> {
        self.build(token, "balanceOf", &[owner.into()])
    }

    /// `mint(address,uint256)`
    pub fn mint(&self, token: Address, to: Address, amount: u128) -> Result<CallPayload, AbiError> {
        self.build(token, "mint", &[to.into(), Token::uint(amount)])
    }

    /// `withdrawToNear(bytes,uint256)`: burn `amount` and release it to
    /// `recipient`, taken as raw bytes. An [`Address`] encodes as its 20
    /// bytes, an account id as its UTF-8 text.
    pub fn withdraw_to_near(
        &self,
        token: Address,
        recipient: impl AsRef<[u8]>,
        amount: u128,
    ) -> Result<CallPayload, AbiError> {
        self.build(
            token,
            "withdrawToNear",
            &[Token::Bytes(recipient.as_ref().to_vec()), Token::uint(amount)],
        )
    }
}
