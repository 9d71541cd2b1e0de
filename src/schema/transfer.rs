//! The transfer record: one contiguous coin range changing hands.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::codec::{max_for_width, put_uint, FieldReader};
use crate::constants::COIN_ID_BYTES;
use crate::error::{SchemaError, ValidationKind};

/// Coin identifier; `UInt_12` on the wire.
pub type CoinId = u128;

/// An assertion that coin IDs `[start, end)` moved from `sender` to
/// `recipient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub sender: Address,
    pub recipient: Address,
    pub token: u32,
    pub start: CoinId,
    pub end: CoinId,
}

impl Transfer {
    /// Serialized size: `sender(20) ‖ recipient(20) ‖ token(4) ‖ start(12) ‖
    /// end(12)`.
    pub const ENCODED_SIZE: usize = 68;

    pub(crate) fn encode_into(&self, buf: &mut Vec<u8>) -> Result<(), SchemaError> {
        buf.extend_from_slice(self.sender.as_bytes());
        buf.extend_from_slice(self.recipient.as_bytes());
        put_uint(buf, self.token as u128, 4, "token")?;
        put_uint(buf, self.start, COIN_ID_BYTES, "start")?;
        put_uint(buf, self.end, COIN_ID_BYTES, "end")?;
        Ok(())
    }

    pub(crate) fn decode_from(reader: &mut FieldReader<'_>) -> Result<Self, SchemaError> {
        Ok(Self {
            sender: reader.address("sender")?,
            recipient: reader.address("recipient")?,
            token: reader.uint(4, "token")? as u32,
            start: reader.uint(COIN_ID_BYTES, "start")?,
            end: reader.uint(COIN_ID_BYTES, "end")?,
        })
    }

    /// Canonical fixed-layout encoding.
    pub fn encode(&self) -> Result<Vec<u8>, SchemaError> {
        let mut buf = Vec::with_capacity(Self::ENCODED_SIZE);
        self.encode_into(&mut buf)?;
        Ok(buf)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SchemaError> {
        let mut reader = FieldReader::new(bytes);
        let transfer = Self::decode_from(&mut reader)?;
        reader.finish("transfer")?;
        Ok(transfer)
    }

    /// Checks the range invariants: `start < end` and both ends inside the
    /// 12-byte coin-identifier width.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let wire_max = max_for_width(COIN_ID_BYTES);
        if self.start > wire_max {
            return Err(SchemaError::Validation {
                field: "start",
                kind: ValidationKind::OutOfRange,
            });
        }
        if self.end > wire_max {
            return Err(SchemaError::Validation {
                field: "end",
                kind: ValidationKind::OutOfRange,
            });
        }
        if self.start >= self.end {
            return Err(SchemaError::Validation {
                field: "end",
                kind: ValidationKind::InvalidRange,
            });
        }
        Ok(())
    }

    /// The half-open coin range this transfer covers.
    pub fn range(&self) -> Range<CoinId> {
        self.start..self.end
    }
}

#[cfg(test)]
mod test {
    use super::Transfer;
    use crate::error::{SchemaError, ValidationKind};
    use crate::schema::Address;

    fn transfer() -> Transfer {
        Transfer {
            sender: Address::from_bytes([0xaa; 20]),
            recipient: Address::from_bytes([0xbb; 20]),
            token: 1,
            start: 100,
            end: 200,
        }
    }

    #[test]
    fn test_encoded_size() {
        assert_eq!(transfer().encode().unwrap().len(), Transfer::ENCODED_SIZE);
    }

    #[test]
    fn test_layout() {
        let encoded = transfer().encode().unwrap();
        assert_eq!(&encoded[..20], &[0xaa; 20]);
        assert_eq!(&encoded[20..40], &[0xbb; 20]);
        assert_eq!(&encoded[40..44], &[0, 0, 0, 1]);
        assert_eq!(encoded[55], 100);
        assert_eq!(encoded[67], 200);
    }

    #[test]
    fn test_round_trip() {
        let original = transfer();
        let decoded = Transfer::decode(&original.encode().unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_short_input() {
        let err = Transfer::decode(&[0u8; 30]).unwrap_err();
        assert!(matches!(err, SchemaError::Decode { field: "recipient", .. }));
    }

    #[test]
    fn test_encode_rejects_oversized_coin_id() {
        let mut oversized = transfer();
        oversized.end = 1 << 96;
        assert_eq!(
            oversized.encode().unwrap_err(),
            SchemaError::Validation {
                field: "end",
                kind: ValidationKind::OutOfRange,
            }
        );
    }

    #[test]
    fn test_validate_inverted_range() {
        let mut inverted = transfer();
        inverted.end = inverted.start;
        assert_eq!(
            inverted.validate().unwrap_err(),
            SchemaError::Validation {
                field: "end",
                kind: ValidationKind::InvalidRange,
            }
        );
    }

    #[test]
    fn test_validate_ok() {
        transfer().validate().unwrap();
    }
}
