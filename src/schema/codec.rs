//! Fixed-width field codecs shared by every schema record.

use crate::error::{SchemaError, ValidationKind};
use crate::schema::Address;

/// Strips an optional `0x`/`0X` prefix.
pub(crate) fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Decodes a hex field, tolerating the `0x` prefix.
pub(crate) fn decode_hex(input: &str, field: &'static str) -> Result<Vec<u8>, SchemaError> {
    hex::decode(strip_hex_prefix(input)).map_err(|e| SchemaError::Decode {
        field,
        reason: e.to_string(),
    })
}

/// Largest value representable in `width` big-endian bytes.
pub(crate) const fn max_for_width(width: usize) -> u128 {
    if width >= 16 {
        u128::MAX
    } else {
        (1 << (width * 8)) - 1
    }
}

/// Appends `value` as a big-endian unsigned integer of `width` bytes.
pub(crate) fn put_uint(
    buf: &mut Vec<u8>,
    value: u128,
    width: usize,
    field: &'static str,
) -> Result<(), SchemaError> {
    if value > max_for_width(width) {
        return Err(SchemaError::Validation {
            field,
            kind: ValidationKind::OutOfRange,
        });
    }
    let be = value.to_be_bytes();
    buf.extend_from_slice(&be[be.len() - width..]);
    Ok(())
}

/// Cursor over an encoded record. Consumes the declared width of each field
/// in order and names the field that ran short.
pub(crate) struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Consumes the next `width` bytes.
    pub(crate) fn take(&mut self, width: usize, field: &'static str) -> Result<&'a [u8], SchemaError> {
        let remaining = self.buf.len() - self.pos;
        if remaining < width {
            return Err(SchemaError::Decode {
                field,
                reason: format!("need {width} bytes, {remaining} left"),
            });
        }
        let out = &self.buf[self.pos..self.pos + width];
        self.pos += width;
        Ok(out)
    }

    /// Consumes a big-endian unsigned integer of `width` bytes, `width <= 16`.
    pub(crate) fn uint(&mut self, width: usize, field: &'static str) -> Result<u128, SchemaError> {
        let bytes = self.take(width, field)?;
        let mut be = [0u8; 16];
        be[16 - width..].copy_from_slice(bytes);
        Ok(u128::from_be_bytes(be))
    }

    /// Consumes a 20-byte address.
    pub(crate) fn address(&mut self, field: &'static str) -> Result<Address, SchemaError> {
        let bytes = self.take(20, field)?;
        let mut out = [0u8; 20];
        out.copy_from_slice(bytes);
        Ok(Address::from_bytes(out))
    }

    /// Rejects trailing bytes once the declared fields are exhausted.
    pub(crate) fn finish(self, field: &'static str) -> Result<(), SchemaError> {
        let remaining = self.buf.len() - self.pos;
        if remaining != 0 {
            return Err(SchemaError::Decode {
                field,
                reason: format!("{remaining} trailing bytes"),
            });
        }
        Ok(())
    }
}
