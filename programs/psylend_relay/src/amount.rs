use anchor_lang::prelude::*;

/// Unit tag of an [`Amount`], numbered as the lending program numbers them on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmountUnits {
    Tokens = 0,
    DepositNotes = 1,
    LoanNotes = 2,
}

/// A quantity tagged with the unit the caller supplied it in. The lending program converts
/// between notes and tokens with its own exchange rates; the relay forwards the value as is.
///
/// Borsh lays the enum out as a one-byte variant index followed by the little-endian `u64`,
/// which is byte for byte the lending program's `{ units: u8, value: u64 }` argument.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Amount {
    Tokens(u64),
    DepositNotes(u64),
    LoanNotes(u64),
}

impl Amount {
    pub const WIRE_LEN: usize = 9;

    pub fn new(units: AmountUnits, value: u64) -> Self {
        match units {
            AmountUnits::Tokens => Amount::Tokens(value),
            AmountUnits::DepositNotes => Amount::DepositNotes(value),
            AmountUnits::LoanNotes => Amount::LoanNotes(value),
        }
    }

    pub fn units(&self) -> AmountUnits {
        match self {
            Amount::Tokens(_) => AmountUnits::Tokens,
            Amount::DepositNotes(_) => AmountUnits::DepositNotes,
            Amount::LoanNotes(_) => AmountUnits::LoanNotes,
        }
    }

    pub fn value(&self) -> u64 {
        match *self {
            Amount::Tokens(v) | Amount::DepositNotes(v) | Amount::LoanNotes(v) => v,
        }
    }

    /// Wire form used in instruction data.
    pub fn to_wire(&self) -> [u8; Self::WIRE_LEN] {
        let mut out = [0u8; Self::WIRE_LEN];
        out[0] = self.units() as u8;
        out[1..].copy_from_slice(&self.value().to_le_bytes());
        out
    }
}
