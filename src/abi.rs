// Contract ABI utilities
//
// Just enough of the Solidity ABI to talk to the ENS registry and resolvers.

use crate::error::{EnsQrError, Result};
use crate::namehash::{keccak256, Node};

/// The all-zero address as returned by `addr(bytes32)` for unset records
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// `resolver(bytes32)` on the ENS registry
pub const RESOLVER_SIGNATURE: &str = "resolver(bytes32)";

/// `addr(bytes32)` on a public resolver
pub const ADDR_SIGNATURE: &str = "addr(bytes32)";

/// `text(bytes32,string)` on a public resolver
pub const TEXT_SIGNATURE: &str = "text(bytes32,string)";

const WORD: usize = 32;

/// Utility functions for contract interaction
pub struct ContractUtils;

impl ContractUtils {
    /// Calculate function selector from signature
    /// Example: "transfer(address,uint256)" -> [0xa9, 0x05, 0x9c, 0xbb]
    pub fn function_selector(signature: &str) -> [u8; 4] {
        let hash = keccak256(signature.as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Encode uint256 for ABI
    pub fn encode_uint256(value: u64) -> Vec<u8> {
        let mut encoded = vec![0u8; WORD];
        encoded[24..32].copy_from_slice(&value.to_be_bytes());
        encoded
    }

    /// Encode a dynamic string tail: length word followed by right-padded bytes
    pub fn encode_string(value: &str) -> Vec<u8> {
        let bytes = value.as_bytes();
        let padded_len = bytes.len().div_ceil(WORD) * WORD;

        let mut encoded = Self::encode_uint256(bytes.len() as u64);
        encoded.extend_from_slice(bytes);
        encoded.resize(WORD + padded_len, 0);
        encoded
    }

    /// Decode uint256 from ABI, rejecting values that do not fit in a usize
    pub fn decode_usize(data: &[u8]) -> Result<usize> {
        if data.len() < WORD {
            return Err(EnsQrError::Abi("Invalid uint256 data length".to_string()));
        }
        if data[..24].iter().any(|b| *b != 0) {
            return Err(EnsQrError::Abi("uint256 value out of range".to_string()));
        }

        let bytes: [u8; 8] = data[24..32]
            .try_into()
            .map_err(|_| EnsQrError::Abi("Failed to extract uint256 bytes".to_string()))?;
        usize::try_from(u64::from_be_bytes(bytes))
            .map_err(|_| EnsQrError::Abi("uint256 value out of range".to_string()))
    }

    /// Decode address from ABI
    pub fn decode_address(data: &[u8]) -> Result<[u8; 20]> {
        if data.len() < WORD {
            return Err(EnsQrError::Abi("Invalid address data length".to_string()));
        }

        let address: [u8; 20] = data[12..32]
            .try_into()
            .map_err(|_| EnsQrError::Abi("Failed to extract address bytes".to_string()))?;
        Ok(address)
    }

    /// Decode a single dynamic `string` return value
    pub fn decode_string(data: &[u8]) -> Result<String> {
        let offset = Self::decode_usize(data)?;
        let len_end = offset
            .checked_add(WORD)
            .filter(|end| *end <= data.len())
            .ok_or_else(|| EnsQrError::Abi("String offset out of bounds".to_string()))?;

        let len = Self::decode_usize(&data[offset..len_end])?;
        let bytes = len_end
            .checked_add(len)
            .filter(|end| *end <= data.len())
            .map(|end| &data[len_end..end])
            .ok_or_else(|| EnsQrError::Abi("String length out of bounds".to_string()))?;

        String::from_utf8(bytes.to_vec())
            .map_err(|e| EnsQrError::Abi(format!("String is not UTF-8: {}", e)))
    }

    /// `resolver(node)` call data
    pub fn resolver_call(node: &Node) -> Vec<u8> {
        let selector = Self::function_selector(RESOLVER_SIGNATURE);
        [&selector[..], node.as_bytes()].concat()
    }

    /// `addr(node)` call data
    pub fn addr_call(node: &Node) -> Vec<u8> {
        let selector = Self::function_selector(ADDR_SIGNATURE);
        [&selector[..], node.as_bytes()].concat()
    }

    /// `text(node, key)` call data
    pub fn text_call(node: &Node, key: &str) -> Vec<u8> {
        let selector = Self::function_selector(TEXT_SIGNATURE);
        // Head: node word, then the offset of the string tail (two words in).
        let offset = Self::encode_uint256((2 * WORD) as u64);
        let tail = Self::encode_string(key);

        [&selector[..], node.as_bytes(), &offset, &tail].concat()
    }
}

/// Render an address with its EIP-55 mixed-case checksum
pub fn to_checksum_address(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let checksummed: String = lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect();

    format!("0x{}", checksummed)
}

/// Parse a `0x`-prefixed 20-byte address
pub fn parse_address(address: &str) -> Result<[u8; 20]> {
    let hex_str = address.strip_prefix("0x").unwrap_or(address);
    let bytes = hex::decode(hex_str)?;
    if bytes.len() != 20 {
        return Err(EnsQrError::Abi(format!(
            "Invalid address length: expected 20 bytes, got {}",
            bytes.len()
        )));
    }

    let mut out = [0u8; 20];
    out.copy_from_slice(&bytes);
    Ok(out)
}
