//! Tree nodes and the hashing seam.

use std::fmt::Display;

use crate::constants::NULL_HASH;
use crate::error::TreeError;

/// Sum carried by every node, a 16-byte unsigned integer on the wire.
pub type Sum = u128;

/// Serialized size of a node: a 32-byte digest followed by the 16-byte
/// big-endian sum.
pub const NODE_SIZE: usize = 48;

/// Simple hash trait required to hash the nodes in the tree.
pub trait Hasher {
    fn hash(data: &[u8]) -> [u8; 32];
}

/// Keccak-256, the pre-NIST variant used throughout Ethereum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keccak256;

impl Hasher for Keccak256 {
    fn hash(data: &[u8]) -> [u8; 32] {
        use tiny_keccak::Hasher as _;

        let mut keccak = tiny_keccak::Keccak::v256();
        let mut output = [0u8; 32];
        keccak.update(data);
        keccak.finalize(&mut output);
        output
    }
}

/// A node in a Merkle sum tree: a digest paired with the sum of every leaf
/// below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    digest: [u8; 32],
    sum: Sum,
}

impl Node {
    pub fn new(digest: [u8; 32], sum: Sum) -> Self {
        Self { digest, sum }
    }

    /// The padding node for odd-sized levels: null digest, zero sum.
    pub fn empty_leaf() -> Self {
        Self {
            digest: NULL_HASH,
            sum: 0,
        }
    }

    /// Returns the digest of the node. NO HASHING IS DONE HERE.
    pub fn digest(&self) -> [u8; 32] {
        self.digest
    }

    /// Returns the sum of the node.
    pub fn sum(&self) -> Sum {
        self.sum
    }

    /// `digest ‖ big_endian(sum, 16)`, the form that is both hashed into
    /// parents and shipped as a proof element.
    pub fn serialize(&self) -> [u8; NODE_SIZE] {
        let mut out = [0u8; NODE_SIZE];
        out[..32].copy_from_slice(&self.digest);
        out[32..].copy_from_slice(&self.sum.to_be_bytes());
        out
    }

    /// Splits a 48-byte element back into digest and sum.
    pub fn deserialize(bytes: [u8; NODE_SIZE]) -> Self {
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&bytes[..32]);
        let mut sum = [0u8; 16];
        sum.copy_from_slice(&bytes[32..]);
        Self {
            digest,
            sum: Sum::from_be_bytes(sum),
        }
    }

    /// Combines two siblings into their parent. This function performs a
    /// hash and a checked addition.
    pub fn parent<H: Hasher>(left: &Node, right: &Node) -> Result<Node, TreeError> {
        let sum = left
            .sum
            .checked_add(right.sum)
            .ok_or(TreeError::SumOverflow)?;
        let digest = H::hash(
            [left.serialize().as_slice(), right.serialize().as_slice()]
                .concat()
                .as_slice(),
        );
        Ok(Node { digest, sum })
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Node {{ sum: {}, digest: {} }}",
            self.sum(),
            hex::encode(self.digest())
        )
    }
}

#[cfg(test)]
mod test {
    use hex_literal::hex;

    use super::{Hasher, Keccak256, Node, NODE_SIZE};
    use crate::constants::NULL_HASH;
    use crate::error::TreeError;

    #[test]
    fn test_keccak256_known_vectors() {
        assert_eq!(
            Keccak256::hash(b""),
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
        assert_eq!(
            Keccak256::hash(b"abc"),
            hex!("4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45")
        );
    }

    #[test]
    fn test_empty_leaf() {
        let empty = Node::empty_leaf();
        assert_eq!(empty.digest(), NULL_HASH);
        assert_eq!(empty.sum(), 0);
        assert_eq!(empty.serialize(), [0; NODE_SIZE]);
    }

    #[test]
    fn test_serialize_round_trip() {
        let node = Node::new(Keccak256::hash(b"leaf"), 1234567890);
        assert_eq!(Node::deserialize(node.serialize()), node);
    }

    #[test]
    fn test_serialize_layout() {
        let node = Node::new([0xab; 32], 0x0102);
        let bytes = node.serialize();
        assert_eq!(&bytes[..32], &[0xab; 32]);
        assert_eq!(&bytes[32..46], &[0; 14]);
        assert_eq!(&bytes[46..], &[0x01, 0x02]);
    }

    #[test]
    fn test_parent_hashes_concatenated_serializations() {
        let left = Node::new(Keccak256::hash(b"left"), 10);
        let right = Node::new(Keccak256::hash(b"right"), 32);
        let parent = Node::parent::<Keccak256>(&left, &right).unwrap();
        assert_eq!(parent.sum(), 42);
        let expected = Keccak256::hash(&[left.serialize(), right.serialize()].concat());
        assert_eq!(parent.digest(), expected);
    }

    #[test]
    fn test_parent_order_matters() {
        let left = Node::new(Keccak256::hash(b"left"), 10);
        let right = Node::new(Keccak256::hash(b"right"), 32);
        let forward = Node::parent::<Keccak256>(&left, &right).unwrap();
        let reversed = Node::parent::<Keccak256>(&right, &left).unwrap();
        assert_ne!(forward.digest(), reversed.digest());
    }

    #[test]
    fn test_parent_sum_overflow() {
        let left = Node::new([1; 32], u128::MAX);
        let right = Node::new([2; 32], 1);
        assert_eq!(
            Node::parent::<Keccak256>(&left, &right).unwrap_err(),
            TreeError::SumOverflow
        );
    }

    #[test]
    fn test_node_display() {
        let node = Node::new([0; 32], 7);
        assert_eq!(
            format!("{}", node),
            "Node { sum: 7, digest: 0000000000000000000000000000000000000000000000000000000000000000 }"
        );
    }
}
