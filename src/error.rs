//! Error types for schema operations and tree construction.

use std::fmt;

use thiserror::Error;

use crate::node::Sum;

/// Reason a field failed semantic validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Not a well-formed Ethereum address (bad hex, length, or EIP-55 checksum).
    InvalidAddress,
    /// Integer does not fit the field's declared byte width.
    OutOfRange,
    /// Range with `start >= end`.
    InvalidRange,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidAddress => "invalid_address",
            Self::OutOfRange => "out_of_range",
            Self::InvalidRange => "invalid_range",
        })
    }
}

/// Error type for encoding, decoding and validating schema records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Malformed bytes or hex for the named field.
    #[error("failed to decode `{field}`: {reason}")]
    Decode {
        field: &'static str,
        reason: String,
    },
    /// Semantically invalid value for the named field.
    #[error("invalid `{field}`: {kind}")]
    Validation {
        field: &'static str,
        kind: ValidationKind,
    },
}

/// Error type for tree operations.
///
/// Verification never produces these: a proof that fails to verify is
/// reported as `false`, not as an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Construction was attempted with zero leaves.
    #[error("cannot build a tree from zero leaves")]
    EmptyTree,
    /// Two transfers claim overlapping coin ranges.
    #[error(
        "transfer ranges [{first_start}, {first_end}) and [{second_start}, {second_end}) overlap"
    )]
    OverlappingRanges {
        first_start: Sum,
        first_end: Sum,
        second_start: Sum,
        second_end: Sum,
    },
    /// A parent sum exceeded the 16-byte sum capacity.
    #[error("sum overflow while combining sibling nodes")]
    SumOverflow,
    /// Proof requested for an absent leaf.
    #[error("leaf index {index} out of range (tree has {leaf_count} leaves)")]
    IndexOutOfRange { index: usize, leaf_count: usize },
    /// Transaction serialization failed while parsing leaves.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
