//! ECDSA signature layout and the signed transaction wrapper.

use serde::{Deserialize, Serialize};

use super::codec::{put_uint, FieldReader};
use super::transaction::Transaction;
use crate::error::SchemaError;

/// A recoverable secp256k1 signature in its fixed `v ‖ r ‖ s` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl Signature {
    /// Serialized size: `v(1) ‖ r(32) ‖ s(32)`.
    pub const ENCODED_SIZE: usize = 65;

    pub(crate) fn encode_into(&self, buf: &mut Vec<u8>) -> Result<(), SchemaError> {
        put_uint(buf, self.v as u128, 1, "v")?;
        buf.extend_from_slice(&self.r);
        buf.extend_from_slice(&self.s);
        Ok(())
    }

    pub(crate) fn decode_from(reader: &mut FieldReader<'_>) -> Result<Self, SchemaError> {
        let v = reader.uint(1, "v")? as u8;
        let mut r = [0u8; 32];
        r.copy_from_slice(reader.take(32, "r")?);
        let mut s = [0u8; 32];
        s.copy_from_slice(reader.take(32, "s")?);
        Ok(Self { v, r, s })
    }
}

/// A transaction together with one signature per transfer. The digest that
/// gets signed (and that the tree commits to) is the unsigned encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signatures: Vec<Signature>,
}

impl SignedTransaction {
    pub fn new(transaction: Transaction, signatures: Vec<Signature>) -> Self {
        Self {
            transaction,
            signatures,
        }
    }

    /// Unsigned transaction fields followed by the count-prefixed signature
    /// list.
    pub fn encode(&self) -> Result<Vec<u8>, SchemaError> {
        let mut buf = self.transaction.encode()?;
        put_uint(&mut buf, self.signatures.len() as u128, 1, "signature_count")?;
        for signature in &self.signatures {
            signature.encode_into(&mut buf)?;
        }
        Ok(buf)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SchemaError> {
        let mut reader = FieldReader::new(bytes);
        let transaction = Transaction::decode_from(&mut reader)?;
        let count = reader.uint(1, "signature_count")? as usize;
        let mut signatures = Vec::with_capacity(count);
        for _ in 0..count {
            signatures.push(Signature::decode_from(&mut reader)?);
        }
        reader.finish("signed_transaction")?;
        Ok(Self {
            transaction,
            signatures,
        })
    }

    /// The digest committed into the tree: keccak-256 of the unsigned
    /// encoding.
    pub fn hash(&self) -> Result<[u8; 32], SchemaError> {
        self.transaction.hash()
    }
}
