//! ENS node identifiers
//!
//! A node is the namehash of a name: starting from 32 zero bytes, each label
//! (right to left) is folded in as `keccak256(node ++ keccak256(label))`.

use serde::{Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;

use crate::error::{EnsQrError, Result};

/// 32-byte namehash of an ENS name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node([u8; 32]);

impl Node {
    /// The root node (namehash of the empty name)
    pub fn root() -> Self {
        Self([0u8; 32])
    }

    /// Raw bytes of the node
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Node {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// keccak-256 digest
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Lowercase each label of `name`, rejecting empty names and empty labels.
pub fn normalize(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EnsQrError::InvalidName("name is empty".to_string()));
    }

    let labels: Vec<String> = name.split('.').map(|label| label.to_lowercase()).collect();
    if labels.iter().any(|label| label.is_empty()) {
        return Err(EnsQrError::InvalidName(format!("empty label in {:?}", name)));
    }

    Ok(labels.join("."))
}

/// Compute the node identifier for a name
pub fn namehash(name: &str) -> Result<Node> {
    let normalized = normalize(name)?;

    let mut node = [0u8; 32];
    for label in normalized.rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        node = keccak256(&[&node[..], &label_hash[..]].concat());
    }

    Ok(Node(node))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namehash_known_values() {
        assert_eq!(
            namehash("eth").unwrap().to_string(),
            "0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"
        );
        assert_eq!(
            namehash("foo.eth").unwrap().to_string(),
            "0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f"
        );
    }

    #[test]
    fn test_namehash_is_case_insensitive() {
        assert_eq!(namehash("Foo.ETH").unwrap(), namehash("foo.eth").unwrap());
    }

    #[test]
    fn test_malformed_names_rejected() {
        assert!(matches!(namehash(""), Err(EnsQrError::InvalidName(_))));
        assert!(matches!(namehash("   "), Err(EnsQrError::InvalidName(_))));
        assert!(matches!(namehash("foo..eth"), Err(EnsQrError::InvalidName(_))));
        assert!(matches!(namehash(".eth"), Err(EnsQrError::InvalidName(_))));
        assert!(matches!(namehash("foo.eth."), Err(EnsQrError::InvalidName(_))));
    }

    #[test]
    fn test_root_node() {
        assert_eq!(Node::root().as_bytes(), &[0u8; 32]);
    }
}
