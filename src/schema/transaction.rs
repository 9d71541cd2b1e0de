//! The transaction record: a block number plus its transfers.

use serde::{Deserialize, Serialize};

use super::codec::{decode_hex, put_uint, FieldReader};
use super::transfer::Transfer;
use crate::error::{SchemaError, ValidationKind};
use crate::node::{Hasher, Keccak256};

/// Byte width of the transfer-count prefix.
const COUNT_WIDTH: usize = 1;

/// Largest number of transfers a single transaction can carry.
pub const MAX_TRANSFERS: usize = 0xff;

/// A set of transfers bundled under one block number. The canonical byte
/// encoding is `block(4) ‖ count(1) ‖ transfer * count`; `hash` is the
/// keccak-256 digest of that encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub block: u32,
    pub transfers: Vec<Transfer>,
}

impl Transaction {
    pub fn new(block: u32, transfers: Vec<Transfer>) -> Self {
        Self { block, transfers }
    }

    /// Canonical fixed-layout encoding. Fields are concatenated in declared
    /// order with no framing; the transfer list is prefixed by its count.
    pub fn encode(&self) -> Result<Vec<u8>, SchemaError> {
        let mut buf = Vec::with_capacity(5 + self.transfers.len() * Transfer::ENCODED_SIZE);
        put_uint(&mut buf, self.block as u128, 4, "block")?;
        put_uint(&mut buf, self.transfers.len() as u128, COUNT_WIDTH, "count")?;
        for transfer in &self.transfers {
            transfer.encode_into(&mut buf)?;
        }
        Ok(buf)
    }

    pub(crate) fn decode_from(reader: &mut FieldReader<'_>) -> Result<Self, SchemaError> {
        let block = reader.uint(4, "block")? as u32;
        let count = reader.uint(COUNT_WIDTH, "count")? as usize;
        let mut transfers = Vec::with_capacity(count);
        for _ in 0..count {
            transfers.push(Transfer::decode_from(reader)?);
        }
        Ok(Self { block, transfers })
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SchemaError> {
        let mut reader = FieldReader::new(bytes);
        let transaction = Self::decode_from(&mut reader)?;
        reader.finish("transaction")?;
        Ok(transaction)
    }

    /// Decodes from hex, with or without the `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, SchemaError> {
        Self::decode(&decode_hex(input, "transaction")?)
    }

    /// Keccak-256 of the canonical encoding.
    pub fn hash(&self) -> Result<[u8; 32], SchemaError> {
        Ok(Keccak256::hash(&self.encode()?))
    }

    /// Runs per-field validators over the transfer list.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.transfers.len() > MAX_TRANSFERS {
            return Err(SchemaError::Validation {
                field: "count",
                kind: ValidationKind::OutOfRange,
            });
        }
        for transfer in &self.transfers {
            transfer.validate()?;
        }
        Ok(())
    }
}
