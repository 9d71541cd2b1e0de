//! Ethereum-style 20-byte account addresses.
//!
//! On the wire an address is 20 raw bytes. In JSON and logs it is a
//! `0x`-prefixed hex string, lowercase or EIP-55 mixed case. Parsing accepts
//! either; mixed-case input must carry a valid EIP-55 checksum.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::codec::strip_hex_prefix;
use crate::error::{SchemaError, ValidationKind};
use crate::node::{Hasher, Keccak256};

/// A 20-byte account address. Canonical display form is `0x` plus lowercase
/// hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero address.
    pub const NULL: Address = Address([0; 20]);

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Borrows the underlying 20-byte array.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    /// EIP-55 mixed-case form: a hex digit is uppercased when the matching
    /// nibble of `keccak256(lowercase_hex)` is at least 8.
    pub fn to_checksum_string(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = Keccak256::hash(lower.as_bytes());
        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                digest[i / 2] >> 4
            } else {
                digest[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl FromStr for Address {
    type Err = SchemaError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        const INVALID: SchemaError = SchemaError::Validation {
            field: "address",
            kind: ValidationKind::InvalidAddress,
        };

        let digits = strip_hex_prefix(input);
        if digits.len() != 40 {
            return Err(INVALID);
        }
        let decoded = hex::decode(digits).map_err(|_| INVALID)?;
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&decoded);
        let address = Address(bytes);

        // All-lowercase and all-uppercase inputs carry no checksum.
        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && digits != &address.to_checksum_string()[2..] {
            return Err(INVALID);
        }
        Ok(address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
