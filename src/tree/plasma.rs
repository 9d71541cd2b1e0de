//! The plasma specialization: transaction leaves, range sums, and proof
//! verification binding transfers to implicit coin ranges.

use std::ops::Range;
use std::sync::Arc;

use bitvec::order::Lsb0;
use bitvec::view::BitView;

use super::MerkleSumTree;
use crate::constants::{MAX_COIN_ID, MIN_COIN_ID, NULL_HASH};
use crate::error::TreeError;
use crate::node::{Hasher, Keccak256, Node, Sum};
use crate::proof::InclusionProof;
use crate::schema::{CoinId, Transaction};

/// Outcome of a bounds-producing inclusion check.
///
/// `implicit_start..implicit_end` is the coin range the proof actually
/// covers; it extends the transfer's explicit range into the gaps encoded by
/// the leaf sums, which is what makes non-inclusion proofs possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InclusionBounds {
    pub valid: bool,
    pub implicit_start: Sum,
    pub implicit_end: Sum,
}

const INVALID: InclusionBounds = InclusionBounds {
    valid: false,
    implicit_start: 0,
    implicit_end: 0,
};

/// One flattened transfer range awaiting sum assignment. Transfers from the
/// same transaction share the encoded bytes.
struct ParsedLeaf {
    start: CoinId,
    end: CoinId,
    encoded: Arc<Vec<u8>>,
}

/// A Merkle sum tree over the transfers of one plasma block.
///
/// Each transfer becomes one leaf ordered by range start; leaf sums encode
/// the implicit boundaries between adjacent ranges so that the whole coin
/// space `[MIN_COIN_ID, MAX_COIN_ID]` is accounted for.
#[derive(Debug)]
pub struct PlasmaMerkleSumTree {
    tree: MerkleSumTree<Keccak256>,
}

impl PlasmaMerkleSumTree {
    /// Builds the block tree from its transactions, one leaf per transfer.
    pub fn new(transactions: &[Transaction]) -> Result<Self, TreeError> {
        let leaves = Self::parse_leaves(transactions)?;
        Ok(Self {
            tree: MerkleSumTree::new(leaves)?,
        })
    }

    /// Flattens transactions into sum-annotated leaves ordered by range
    /// start.
    ///
    /// A transaction with several transfers produces several leaves all
    /// bearing the same encoded bytes; proving any one of them proves the
    /// whole transaction was included.
    fn parse_leaves(transactions: &[Transaction]) -> Result<Vec<Node>, TreeError> {
        let mut parsed = Vec::new();
        for transaction in transactions {
            transaction.validate()?;
            let encoded = Arc::new(transaction.encode()?);
            for transfer in &transaction.transfers {
                parsed.push(ParsedLeaf {
                    start: transfer.start,
                    end: transfer.end,
                    encoded: encoded.clone(),
                });
            }
        }
        parsed.sort_by_key(|leaf| leaf.start);

        for pair in parsed.windows(2) {
            if pair[0].end > pair[1].start {
                return Err(TreeError::OverlappingRanges {
                    first_start: pair[0].start,
                    first_end: pair[0].end,
                    second_start: pair[1].start,
                    second_end: pair[1].end,
                });
            }
        }

        let count = parsed.len();
        let mut leaves = Vec::with_capacity(count);
        for (i, leaf) in parsed.iter().enumerate() {
            // Each sum reaches to the start of the next leaf; the first and
            // last stretch to the edges of the coin space.
            let sum = if count == 1 {
                MAX_COIN_ID
            } else if i == 0 {
                parsed[1].start - MIN_COIN_ID
            } else if i == count - 1 {
                MAX_COIN_ID - leaf.start
            } else {
                parsed[i + 1].start - leaf.start
            };
            leaves.push(Node::new(Keccak256::hash(&leaf.encoded), sum));
        }
        Ok(leaves)
    }

    /// Root node of the tree.
    pub fn root(&self) -> Node {
        self.tree.root()
    }

    /// All levels, leaves first.
    pub fn levels(&self) -> &[Vec<Node>] {
        self.tree.levels()
    }

    /// Number of levels.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Number of transfer leaves, excluding padding.
    pub fn leaf_count(&self) -> usize {
        self.tree.leaf_count()
    }

    /// Inclusion proof for the leaf at `index`.
    ///
    /// Element 0 is the synthetic `(0x00…00, leaf_sum)` entry carrying the
    /// leaf's own sum, which the verifier cannot recover from the leaf hash.
    /// The remaining elements are the sibling nodes on the way to the root.
    pub fn get_inclusion_proof(&self, index: usize) -> Result<InclusionProof, TreeError> {
        let leaf_count = self.tree.leaf_count();
        if index >= leaf_count {
            return Err(TreeError::IndexOutOfRange { index, leaf_count });
        }
        let mut nodes = Vec::with_capacity(self.tree.height());
        nodes.push(Node::new(NULL_HASH, self.tree.levels()[0][index].sum()));
        let mut position = index;
        for level in 0..self.tree.height() - 1 {
            nodes.push(self.tree.sibling(level, position));
            position >>= 1;
        }
        Ok(InclusionProof::new(nodes))
    }

    /// Recomputes the root from a proof and checks that the named transfer's
    /// explicit range sits inside the implicit range the proof covers.
    ///
    /// Pure and infallible: malformed input yields `valid == false`.
    pub fn check_inclusion_and_get_bounds(
        leaf_index: usize,
        transaction: &Transaction,
        transfer_index: usize,
        proof: &InclusionProof,
        root: &Node,
    ) -> InclusionBounds {
        let Some(transfer) = transaction.transfers.get(transfer_index) else {
            return INVALID;
        };
        let Some(first) = proof.nodes().first() else {
            return INVALID;
        };
        let Ok(encoded) = transaction.encode() else {
            return INVALID;
        };

        // The leaf-level bit sits at path index 0, so walking the proof
        // upward consumes the index bits least-significant first.
        let path = leaf_index.view_bits::<Lsb0>();
        let sibling_count = proof.nodes().len() - 1;
        if sibling_count < path.len() && path[sibling_count..].any() {
            return INVALID;
        }

        let mut computed = Node::new(Keccak256::hash(&encoded), first.sum());
        let mut left_sum: Sum = 0;
        let mut right_sum: Sum = 0;
        for (bit, sibling) in path.iter().zip(&proof.nodes()[1..]) {
            let parent = if *bit {
                left_sum = match left_sum.checked_add(sibling.sum()) {
                    Some(sum) => sum,
                    None => return INVALID,
                };
                Node::parent::<Keccak256>(sibling, &computed)
            } else {
                right_sum = match right_sum.checked_add(sibling.sum()) {
                    Some(sum) => sum,
                    None => return INVALID,
                };
                Node::parent::<Keccak256>(&computed, sibling)
            };
            computed = match parent {
                Ok(node) => node,
                Err(_) => return INVALID,
            };
        }

        let Some(implicit_end) = computed.sum().checked_sub(right_sum) else {
            return INVALID;
        };
        let valid_root = computed == *root;
        let valid_sum = transfer.start >= left_sum && transfer.end <= implicit_end;
        InclusionBounds {
            valid: valid_root && valid_sum,
            implicit_start: left_sum,
            implicit_end,
        }
    }

    /// Boolean form of [`Self::check_inclusion_and_get_bounds`].
    pub fn check_inclusion(
        leaf_index: usize,
        transaction: &Transaction,
        transfer_index: usize,
        proof: &InclusionProof,
        root: &Node,
    ) -> bool {
        Self::check_inclusion_and_get_bounds(leaf_index, transaction, transfer_index, proof, root)
            .valid
    }

    /// Proves that `range` was touched by no transfer in the block: it must
    /// sit inside the implicit range of the named leaf while staying
    /// disjoint from the transfer's explicit range.
    pub fn check_non_inclusion(
        range: Range<CoinId>,
        leaf_index: usize,
        transaction: &Transaction,
        transfer_index: usize,
        proof: &InclusionProof,
        root: &Node,
    ) -> bool {
        let Some(transfer) = transaction.transfers.get(transfer_index) else {
            return false;
        };
        let bounds = Self::check_inclusion_and_get_bounds(
            leaf_index,
            transaction,
            transfer_index,
            proof,
            root,
        );
        let inside = range.start >= bounds.implicit_start && range.end <= bounds.implicit_end;
        let disjoint = range.end <= transfer.start || range.start >= transfer.end;
        bounds.valid && inside && disjoint
    }
}
