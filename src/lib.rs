//! Plasma Merkle sum tree implementation
//!
//! Client-side core of a plasma-style layer-two protocol: a fixed-layout
//! transaction schema plus the authenticated data structure that proves
//! inclusion or non-inclusion of contiguous coin-ID ranges within a block.
//!
//! The tree supports:
//! - One leaf per transfer, ordered by range start
//! - Sum aggregation that encodes implicit range boundaries
//! - Inclusion proofs and range non-inclusion proofs
//! - Pure verification that reports failure as `false`, never as an error
//!
//! Trees are immutable once constructed; any number of readers may share
//! them without synchronization.

mod constants;
mod error;
mod node;
mod proof;
mod schema;
mod tree;

pub use constants::{COIN_ID_BYTES, MAX_COIN_ID, MIN_COIN_ID, NULL_HASH};
pub use error::{SchemaError, TreeError, ValidationKind};
pub use node::{Hasher, Keccak256, Node, Sum, NODE_SIZE};
pub use proof::InclusionProof;
pub use schema::{
    Address, CoinId, Signature, SignedTransaction, Transaction, Transfer, MAX_TRANSFERS,
};
pub use tree::{InclusionBounds, MerkleSumTree, PlasmaMerkleSumTree};

#[cfg(test)]
mod tests;
