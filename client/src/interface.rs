//! Typed contract interface descriptions.
//!
//! A [`ContractInterface`] lists the functions a contract exposes and the
//! parameter types of each, which is all the transaction builder needs.
//! It can be written out in code, read from the `abi` array of a compiled
//! artifact, or taken from [`ContractInterface::evm_erc20`].

use serde::Deserialize;
use serde_json::Value;

use enginelink_primitives::abi::{self, SELECTOR_LEN};
use enginelink_primitives::{AbiError, ParamType};

/// One callable function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub name: String,
    pub inputs: Vec<ParamType>,
}

impl FunctionDescriptor {
    /// Create a descriptor.
    pub fn new(name: impl Into<String>, inputs: Vec<ParamType>) -> Self {
        Self {
            name: name.into(),
            inputs,
        }
    }

    /// Canonical signature, e.g. `balanceOf(address)`.
    pub fn signature(&self) -> String {
        abi::signature(&self.name, &self.inputs)
    }

    /// Four-byte function selector.
    pub fn selector(&self) -> [u8; SELECTOR_LEN] {
        abi::selector(&self.name, &self.inputs)
    }
}

/// The callable surface of a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractInterface {
    functions: Vec<FunctionDescriptor>,
    constructor: Vec<ParamType>,
}

#[derive(Deserialize)]
struct AbiParam {
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Deserialize)]
struct AbiEntry {
    #[serde(rename = "type", default = "default_entry_type")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParam>,
}

fn default_entry_type() -> String {
    "function".into()
}

fn parse_params(params: &[AbiParam]) -> Result<Vec<ParamType>, AbiError> {
    params.iter().map(|p| ParamType::parse(&p.ty)).collect()
}

impl ContractInterface {
    /// Build an interface from functions and constructor parameters.
    pub fn new(functions: Vec<FunctionDescriptor>, constructor: Vec<ParamType>) -> Self {
        Self {
            functions,
            constructor,
        }
    }

    /// Read a JSON ABI: either the bare entry array or an artifact object
    /// carrying it under `abi`.
    ///
    /// Events, errors, fallback and receive entries are skipped. A function
    /// using a type outside the supported subset fails the whole parse.
    pub fn from_abi_json(text: &str) -> Result<Self, AbiError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| AbiError::InvalidInterface(e.to_string()))?;
        let entries = match value {
            Value::Array(_) => value,
            Value::Object(mut obj) => obj
                .remove("abi")
                .ok_or_else(|| AbiError::InvalidInterface("artifact has no abi member".into()))?,
            _ => return Err(AbiError::InvalidInterface("expected array or object".into())),
        };
        let entries: Vec<AbiEntry> =
            serde_json::from_value(entries).map_err(|e| AbiError::InvalidInterface(e.to_string()))?;

        let mut interface = Self::default();
        for entry in entries {
            match entry.kind.as_str() {
                "function" => interface
                    .functions
                    .push(FunctionDescriptor::new(entry.name, parse_params(&entry.inputs)?)),
                "constructor" => interface.constructor = parse_params(&entry.inputs)?,
                _ => {}
            }
        }
        Ok(interface)
    }

    /// The bridged ERC-20 token the engine deploys for host-chain tokens.
    pub fn evm_erc20() -> Self {
        use ParamType::{Address, Bytes, String, Uint};
        let f = FunctionDescriptor::new;
        Self::new(
            vec![
                f("name", vec![]),
                f("symbol", vec![]),
                f("decimals", vec![]),
                f("totalSupply", vec![]),
                f("balanceOf", vec![Address]),
                f("transfer", vec![Address, Uint(256)]),
                f("mint", vec![Address, Uint(256)]),
                f("withdrawToNear", vec![Bytes, Uint(256)]),
                f("withdrawToEthereum", vec![Address, Uint(256)]),
            ],
            vec![String, String, Uint(8), Address],
        )
    }

    /// All functions.
    pub fn functions(&self) -> &[FunctionDescriptor] {
        &self.functions
    }

    /// Constructor parameter types (empty if there is none).
    pub fn constructor(&self) -> &[ParamType] {
        &self.constructor
    }

    /// Find the function called `name` taking `arity` arguments.
    ///
    /// Overloads are told apart by argument count only.
    pub fn function(&self, name: &str, arity: usize) -> Result<&FunctionDescriptor, AbiError> {
        let mut candidates = self.functions.iter().filter(|f| f.name == name).peekable();
        let first = *candidates
            .peek()
            .ok_or_else(|| AbiError::UnknownFunction(name.to_string()))?;
        candidates
            .find(|f| f.inputs.len() == arity)
            .ok_or_else(|| AbiError::ArityMismatch {
                function: name.to_string(),
                expected: first.inputs.len(),
                got: arity,
            })
    }
}
