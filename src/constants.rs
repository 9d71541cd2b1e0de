//! Protocol constants fixed by the surrounding plasma contracts.

use crate::node::Sum;

/// Smallest coin identifier in the coin space.
pub const MIN_COIN_ID: Sum = 0;

/// Largest coin identifier in the coin space, a 16-byte unsigned value.
/// Leaf sums over a whole block always add up to `MAX_COIN_ID - MIN_COIN_ID`.
pub const MAX_COIN_ID: Sum = u128::MAX;

/// Wire width of a coin identifier in transfer records.
pub const COIN_ID_BYTES: usize = 12;

/// The all-zero digest carried by empty leaves and the synthetic first
/// element of an inclusion proof.
pub const NULL_HASH: [u8; 32] = [0; 32];
