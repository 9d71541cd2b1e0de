//! Fixed-layout serialization schema for protocol records.
//!
//! Every record encodes to a deterministic byte string: fields are
//! concatenated in declared order with no separators, integers are
//! big-endian at their declared widths, and variable-length lists carry a
//! count prefix. Decoding consumes exactly the declared widths and names the
//! field that failed.

mod address;
pub(crate) mod codec;
mod signature;
mod transaction;
mod transfer;

pub use address::Address;
pub use signature::{Signature, SignedTransaction};
pub use transaction::{Transaction, MAX_TRANSFERS};
pub use transfer::{CoinId, Transfer};
