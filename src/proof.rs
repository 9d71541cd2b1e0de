//! Inclusion proofs as flat sequences of 48-byte node elements.
//!
//! A proof is transported either as raw bytes (48 per element) or as hex
//! (96 characters per element, `0x` optional). Element 0 is the synthetic
//! `(0x00…00, leaf_sum)` entry; the rest are sibling nodes, leaf level
//! first.

use crate::error::SchemaError;
use crate::node::{Node, NODE_SIZE};
use crate::schema::codec::decode_hex;

/// An inclusion proof: one element per tree level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionProof {
    nodes: Vec<Node>,
}

impl InclusionProof {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// The proof elements, synthetic leaf-sum entry first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Concatenated 48-byte elements.
    pub fn encode(&self) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(self.nodes.len() * NODE_SIZE);
        for node in &self.nodes {
            encoded.extend_from_slice(&node.serialize());
        }
        encoded
    }

    pub fn decode(data: &[u8]) -> Result<Self, SchemaError> {
        if data.len() % NODE_SIZE != 0 {
            return Err(SchemaError::Decode {
                field: "proof",
                reason: format!("length {} is not a multiple of {NODE_SIZE}", data.len()),
            });
        }
        let nodes = data
            .chunks_exact(NODE_SIZE)
            .map(|chunk| {
                let mut element = [0u8; NODE_SIZE];
                element.copy_from_slice(chunk);
                Node::deserialize(element)
            })
            .collect();
        Ok(Self { nodes })
    }

    /// Hex transport form, 96 characters per element.
    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }

    pub fn from_hex(input: &str) -> Result<Self, SchemaError> {
        Self::decode(&decode_hex(input, "proof")?)
    }
}

#[cfg(test)]
mod test {
    use super::InclusionProof;
    use crate::node::{Hasher, Keccak256, Node, NODE_SIZE};

    fn proof() -> InclusionProof {
        InclusionProof::new(vec![
            Node::new([0; 32], 500),
            Node::new(Keccak256::hash(b"sibling"), 12),
        ])
    }

    #[test]
    fn test_encode_concatenates_elements() {
        let encoded = proof().encode();
        assert_eq!(encoded.len(), 2 * NODE_SIZE);
        assert_eq!(&encoded[..32], &[0; 32]);
    }

    #[test]
    fn test_bytes_round_trip() {
        let original = proof();
        assert_eq!(InclusionProof::decode(&original.encode()).unwrap(), original);
    }

    #[test]
    fn test_hex_round_trip() {
        let original = proof();
        let hex = original.to_hex();
        assert_eq!(hex.len(), 2 * NODE_SIZE * 2);
        assert_eq!(InclusionProof::from_hex(&hex).unwrap(), original);
        let prefixed = format!("0x{hex}");
        assert_eq!(InclusionProof::from_hex(&prefixed).unwrap(), original);
    }

    #[test]
    fn test_decode_rejects_ragged_length() {
        assert!(InclusionProof::decode(&[0u8; NODE_SIZE + 1]).is_err());
    }
}
