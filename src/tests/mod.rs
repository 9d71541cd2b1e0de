//! Scenario and property tests exercising the whole crate surface.


use crate::{Address, Transaction, Transfer};

pub(crate) fn addr(byte: u8) -> Address {
    Address::from_bytes([byte; 20])
}

pub(crate) fn transfer(start: u128, end: u128) -> Transfer {
    Transfer {
        sender: addr(0xaa),
        recipient: addr(0xbb),
        token: 0,
        start,
        end,
    }
}

pub(crate) fn single(block: u32, start: u128, end: u128) -> Transaction {
    Transaction::new(block, vec![transfer(start, end)])
}
