//! Solidity ABI encoding for contract calls and constructors.
//!
//! Supports the subset of the ABI the bridged contracts use: `address`,
//! `uintN`, `bool`, `bytesN`, `bytes` and `string`. Static values occupy
//! one 32-byte head word; dynamic values put an offset in the head and
//! their length-prefixed, zero-padded contents in the tail.

use core::fmt;

use crate::codec::u128_to_be_word;
use crate::crypto::keccak256;
use crate::error::AbiError;
use crate::types::Address;

/// Size of one ABI word.
pub const WORD_LEN: usize = 32;

/// Size of a function selector.
pub const SELECTOR_LEN: usize = 4;

/// A declared parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Address,
    /// Unsigned integer of the given bit width (8..=256, multiple of 8).
    Uint(u16),
    Bool,
    /// Fixed-size byte array, 1..=32 bytes.
    FixedBytes(u8),
    Bytes,
    String,
}

impl ParamType {
    /// Parse a canonical Solidity type name.
    pub fn parse(name: &str) -> Result<Self, AbiError> {
        let unsupported = || AbiError::UnsupportedType(name.to_string());
        match name {
            "address" => Ok(Self::Address),
            "bool" => Ok(Self::Bool),
            "bytes" => Ok(Self::Bytes),
            "string" => Ok(Self::String),
            "uint" => Ok(Self::Uint(256)),
            _ => {
                if let Some(bits) = name.strip_prefix("uint") {
                    let bits: u16 = bits.parse().map_err(|_| unsupported())?;
                    if bits == 0 || bits > 256 || bits % 8 != 0 {
                        return Err(unsupported());
                    }
                    Ok(Self::Uint(bits))
                } else if let Some(len) = name.strip_prefix("bytes") {
                    let len: u8 = len.parse().map_err(|_| unsupported())?;
                    if len == 0 || len as usize > WORD_LEN {
                        return Err(unsupported());
                    }
                    Ok(Self::FixedBytes(len))
                } else {
                    Err(unsupported())
                }
            }
        }
    }

    /// Dynamic types are encoded through the tail.
    pub fn is_dynamic(self) -> bool {
        matches!(self, Self::Bytes | Self::String)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Bool => write!(f, "bool"),
            Self::FixedBytes(len) => write!(f, "bytes{len}"),
            Self::Bytes => write!(f, "bytes"),
            Self::String => write!(f, "string"),
        }
    }
}

/// An argument value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Address(Address),
    /// 256-bit big-endian unsigned integer.
    Uint([u8; WORD_LEN]),
    Bool(bool),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
}

impl Token {
    /// An unsigned integer from a native value.
    pub fn uint(value: impl Into<u128>) -> Self {
        Self::Uint(u128_to_be_word(value.into()))
    }

    /// Short kind name used in error messages.
    fn kind(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::Uint(_) => "uint",
            Self::Bool(_) => "bool",
            Self::FixedBytes(_) => "fixed bytes",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
        }
    }

    /// Check this value against a declared type.
    fn fits(&self, ty: ParamType) -> bool {
        match (self, ty) {
            (Self::Address(_), ParamType::Address) => true,
            (Self::Bool(_), ParamType::Bool) => true,
            (Self::Bytes(_), ParamType::Bytes) => true,
            (Self::String(_), ParamType::String) => true,
            (Self::FixedBytes(b), ParamType::FixedBytes(len)) => b.len() == len as usize,
            (Self::Uint(word), ParamType::Uint(bits)) => {
                let used = WORD_LEN - bits as usize / 8;
                word[..used].iter().all(|b| *b == 0)
            }
            _ => false,
        }
    }
}

impl From<Address> for Token {
    fn from(addr: Address) -> Self {
        Self::Address(addr)
    }
}

/// Canonical signature, e.g. `mint(address,uint256)`.
pub fn signature(name: &str, inputs: &[ParamType]) -> String {
    let params: Vec<String> = inputs.iter().map(ToString::to_string).collect();
    format!("{}({})", name, params.join(","))
}

/// First four bytes of the Keccak-256 hash of the signature.
pub fn selector(name: &str, inputs: &[ParamType]) -> [u8; SELECTOR_LEN] {
    let hash = keccak256(signature(name, inputs).as_bytes());
    let mut out = [0u8; SELECTOR_LEN];
    out.copy_from_slice(&hash[..SELECTOR_LEN]);
    out
}

/// Validate `args` against `inputs`, naming `function` in errors.
pub fn check_args(function: &str, inputs: &[ParamType], args: &[Token]) -> Result<(), AbiError> {
    if inputs.len() != args.len() {
        return Err(AbiError::ArityMismatch {
            function: function.to_string(),
            expected: inputs.len(),
            got: args.len(),
        });
    }
    for (index, (ty, arg)) in inputs.iter().zip(args).enumerate() {
        if !arg.fits(*ty) {
            return Err(AbiError::TypeMismatch {
                function: function.to_string(),
                index,
                expected: ty.to_string(),
                got: arg.kind().to_string(),
            });
        }
    }
    Ok(())
}

// ── Encoding helpers ──

fn pad_right(buf: &mut Vec<u8>, data: &[u8]) {
    buf.extend_from_slice(data);
    let rem = data.len() % WORD_LEN;
    if rem != 0 {
        buf.resize(buf.len() + WORD_LEN - rem, 0);
    }
}

fn length_word(len: usize) -> [u8; WORD_LEN] {
    u128_to_be_word(len as u128)
}

fn encode_static(buf: &mut Vec<u8>, token: &Token) {
    match token {
        Token::Address(addr) => {
            buf.extend_from_slice(&[0u8; WORD_LEN - 20]);
            buf.extend_from_slice(addr.as_bytes());
        }
        Token::Uint(word) => buf.extend_from_slice(word),
        Token::Bool(v) => buf.extend_from_slice(&u128_to_be_word(u128::from(*v))),
        Token::FixedBytes(bytes) => pad_right(buf, bytes),
        Token::Bytes(_) | Token::String(_) => {}
    }
}

fn encode_dynamic(buf: &mut Vec<u8>, token: &Token) {
    let data: &[u8] = match token {
        Token::Bytes(bytes) => bytes,
        Token::String(s) => s.as_bytes(),
        _ => return,
    };
    buf.extend_from_slice(&length_word(data.len()));
    pad_right(buf, data);
}

/// ABI-encode a tuple of already type-checked arguments.
pub fn encode(args: &[Token]) -> Vec<u8> {
    let head_len = args.len() * WORD_LEN;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for arg in args {
        match arg {
            Token::Bytes(_) | Token::String(_) => {
                head.extend_from_slice(&length_word(head_len + tail.len()));
                encode_dynamic(&mut tail, arg);
            }
            _ => encode_static(&mut head, arg),
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Selector followed by the encoded arguments.
pub fn encode_function_call(
    name: &str,
    inputs: &[ParamType],
    args: &[Token],
) -> Result<Vec<u8>, AbiError> {
    check_args(name, inputs, args)?;
    let mut data = selector(name, inputs).to_vec();
    data.extend_from_slice(&encode(args));
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors() {
        assert_eq!(hex::encode(selector("balanceOf", &[ParamType::Address])), "70a08231");
        assert_eq!(hex::encode(selector("decimals", &[])), "313ce567");
        assert_eq!(
            hex::encode(selector("mint", &[ParamType::Address, ParamType::Uint(256)])),
            "40c10f19"
        );
        assert_eq!(
            hex::encode(selector("transfer", &[ParamType::Address, ParamType::Uint(256)])),
            "a9059cbb"
        );
    }

    #[test]
    fn test_parse_types() {
        assert_eq!(ParamType::parse("uint256").unwrap(), ParamType::Uint(256));
        assert_eq!(ParamType::parse("uint8").unwrap(), ParamType::Uint(8));
        assert_eq!(ParamType::parse("uint").unwrap(), ParamType::Uint(256));
        assert_eq!(ParamType::parse("bytes32").unwrap(), ParamType::FixedBytes(32));
        assert_eq!(ParamType::parse("bytes").unwrap(), ParamType::Bytes);
        assert!(ParamType::parse("uint7").is_err());
        assert!(ParamType::parse("uint264").is_err());
        assert!(ParamType::parse("bytes33").is_err());
        assert!(ParamType::parse("tuple").is_err());
        assert!(ParamType::parse("int256").is_err());
    }

    #[test]
    fn test_encode_address_and_amount() {
        let addr = Address::new([0x61; 20]);
        let data = encode(&[Token::Address(addr), Token::uint(201u64)]);
        assert_eq!(data.len(), 64);
        assert!(data[..12].iter().all(|b| *b == 0));
        assert_eq!(&data[12..32], &[0x61; 20]);
        assert_eq!(data[63], 201);
        assert!(data[32..63].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encode_dynamic_string() {
        // ("TT", 18): offset word, uint word, length word, padded data
        let data = encode(&[Token::String("TT".into()), Token::uint(18u8)]);
        assert_eq!(data.len(), 4 * WORD_LEN);
        assert_eq!(data[31], 0x40); // tail starts after two head words
        assert_eq!(data[63], 18);
        assert_eq!(data[95], 2);
        assert_eq!(&data[96..98], b"TT");
        assert!(data[98..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encode_two_dynamic_offsets() {
        let data = encode(&[Token::Bytes(vec![1; 33]), Token::String("a".into())]);
        // first tail: 32 (len) + 64 (33 bytes padded) = 96 bytes
        assert_eq!(data[31], 0x40);
        assert_eq!(data[63], 0x40 + 96);
        assert_eq!(data.len(), 64 + 96 + 64);
    }

    #[test]
    fn test_check_args_arity() {
        let err = check_args("mint", &[ParamType::Address, ParamType::Uint(256)], &[]).unwrap_err();
        assert!(matches!(err, AbiError::ArityMismatch { expected: 2, got: 0, .. }));
    }

    #[test]
    fn test_check_args_type() {
        let err = check_args("balanceOf", &[ParamType::Address], &[Token::Bool(true)]).unwrap_err();
        assert!(matches!(err, AbiError::TypeMismatch { index: 0, .. }));
    }

    #[test]
    fn test_uint_width_enforced() {
        assert!(check_args("f", &[ParamType::Uint(8)], &[Token::uint(255u8)]).is_ok());
        assert!(check_args("f", &[ParamType::Uint(8)], &[Token::uint(256u16)]).is_err());
    }

    #[test]
    fn test_encode_function_call_prefix() {
        let data = encode_function_call("decimals", &[], &[]).unwrap();
        assert_eq!(data, vec![0x31, 0x3c, 0xe5, 0x67]);
    }
}
