//! Wire encoding for engine requests and responses.
//!
//! ## Submission result (little-endian)
//!
//! ```text
//! [status: 1 byte]          0 = failure, any nonzero = success
//! [gas_used: 8 bytes LE]    u64
//! [result_length: 4 bytes]  i32 LE
//! [result: result_length bytes]
//! ```
//!
//! Bytes after the declared result are ignored; the engine may append
//! metadata the caller does not know about.
//!
//! ## Request arguments
//!
//! Arguments to the engine's host-chain methods (`call`, `view`,
//! `deploy_erc20_token`, `new`) are borsh-encoded structs.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::CodecError;
use crate::execution::SubmitResult;
use crate::types::{Address, ADDRESS_LEN};

/// Size of the fixed header before the result bytes.
pub const SUBMIT_RESULT_HEADER_LEN: usize = 1 + 8 + 4;

/// Length of the tag preceding the address in a token deployment response.
pub const TOKEN_ADDRESS_PREFIX_LEN: usize = 4;

/// A cursor for reading bytes during decoding.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let end = self.pos.checked_add(n).filter(|end| *end <= self.data.len());
        let Some(end) = end else {
            return Err(CodecError::TruncatedBuffer {
                needed: self.pos.saturating_add(n),
                available: self.data.len(),
            });
        };
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32, CodecError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.read_bytes(4)?);
        Ok(u32::from_le_bytes(buf))
    }

    fn read_u64(&mut self) -> Result<u64, CodecError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.read_bytes(8)?);
        Ok(u64::from_le_bytes(buf))
    }

    fn read_i32(&mut self) -> Result<i32, CodecError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.read_bytes(4)?);
        Ok(i32::from_le_bytes(buf))
    }
}

// ── Submission result ──

/// Decode the engine's binary submission response.
pub fn decode_submit_result(data: &[u8]) -> Result<SubmitResult, CodecError> {
    if data.len() < SUBMIT_RESULT_HEADER_LEN {
        return Err(CodecError::TruncatedBuffer {
            needed: SUBMIT_RESULT_HEADER_LEN,
            available: data.len(),
        });
    }

    let mut r = Reader::new(data);
    let status = r.read_u8()? != 0;
    let gas_used = r.read_u64()?;
    let result_len = r.read_i32()?;
    if result_len < 0 {
        return Err(CodecError::NegativeLength(result_len));
    }
    let result = r.read_bytes(result_len as usize)?.to_vec();

    Ok(SubmitResult {
        status,
        gas_used,
        result,
    })
}

/// Encode a submission result in the engine's response layout.
///
/// Fails with [`CodecError::LengthOverflow`] if the result is longer than
/// the header's `i32` length field can declare.
pub fn encode_submit_result(result: &SubmitResult) -> Result<Vec<u8>, CodecError> {
    let declared = result_length_field(result.result.len())?;
    let mut buf = Vec::with_capacity(SUBMIT_RESULT_HEADER_LEN + result.result.len());
    buf.push(u8::from(result.status));
    buf.extend_from_slice(&result.gas_used.to_le_bytes());
    buf.extend_from_slice(&declared.to_le_bytes());
    buf.extend_from_slice(&result.result);
    Ok(buf)
}

fn result_length_field(len: usize) -> Result<i32, CodecError> {
    i32::try_from(len).map_err(|_| CodecError::LengthOverflow(len))
}

// ── Token deployment response ──

/// Extract the token address from a `deploy_erc20_token` response.
///
/// The response is a borsh byte vector: a u32 LE length tag that must be
/// 20, then exactly 20 address bytes.
pub fn decode_token_address(raw: &[u8]) -> Result<Address, CodecError> {
    let expected = TOKEN_ADDRESS_PREFIX_LEN + ADDRESS_LEN;
    if raw.len() < expected {
        return Err(CodecError::TruncatedBuffer {
            needed: expected,
            available: raw.len(),
        });
    }

    let mut r = Reader::new(raw);
    let tag = r.read_u32()?;
    if tag as usize != ADDRESS_LEN {
        return Err(CodecError::InvalidAddressFormat(format!(
            "token response length tag is {tag}, expected {ADDRESS_LEN}"
        )));
    }
    if raw.len() != expected {
        return Err(CodecError::InvalidAddressFormat(format!(
            "token response is {} bytes, expected {expected}",
            raw.len()
        )));
    }

    Address::from_slice(r.read_bytes(ADDRESS_LEN)?)
}

// ── Request arguments ──

/// Arguments of the engine's `call` method.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct FunctionCallArgs {
    pub contract: [u8; ADDRESS_LEN],
    pub input: Vec<u8>,
}

/// Arguments of the engine's read-only `view` method.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ViewCallArgs {
    pub sender: [u8; ADDRESS_LEN],
    pub address: [u8; ADDRESS_LEN],
    /// Attached value, 256-bit big-endian.
    pub amount: [u8; 32],
    pub input: Vec<u8>,
}

/// Arguments of the engine's `deploy_erc20_token` method.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DeployErc20TokenArgs {
    /// Host-chain fungible token account bridged by the new contract.
    pub nep141: String,
}

/// Arguments of the engine's `new` (initialization) method.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct NewCallArgs {
    /// Chain id, 256-bit big-endian.
    pub chain_id: [u8; 32],
    pub owner_id: String,
    pub bridge_prover_id: String,
    pub upgrade_delay_blocks: u64,
}

/// Outcome of a `view` call as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum TransactionStatus {
    Succeed(Vec<u8>),
    Revert(Vec<u8>),
    OutOfGas,
    OutOfFund,
    OutOfOffset,
    CallTooDeep,
}

impl TransactionStatus {
    /// Fold into a [`SubmitResult`]. Views report no gas.
    pub fn into_submit_result(self) -> SubmitResult {
        let (status, result) = match self {
            Self::Succeed(data) => (true, data),
            Self::Revert(data) => (false, data),
            Self::OutOfGas | Self::OutOfFund | Self::OutOfOffset | Self::CallTooDeep => {
                (false, Vec::new())
            }
        };
        SubmitResult {
            status,
            gas_used: 0,
            result,
        }
    }
}

/// Borsh-encode any argument struct.
pub fn encode_args<T: BorshSerialize>(args: &T) -> Vec<u8> {
    // Writing into a Vec cannot fail.
    borsh::to_vec(args).unwrap_or_default()
}

/// Decode a `view` response.
pub fn decode_view_result(raw: &[u8]) -> Result<SubmitResult, CodecError> {
    let status = TransactionStatus::try_from_slice(raw).map_err(|_| CodecError::TruncatedBuffer {
        needed: raw.len().saturating_add(1),
        available: raw.len(),
    })?;
    Ok(status.into_submit_result())
}

/// Encode a u128 as a 256-bit big-endian word.
pub fn u128_to_be_word(v: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&v.to_be_bytes());
    word
}
