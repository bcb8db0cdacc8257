//! Read-only views over lending-program accounts, used by the diagnostic instructions.
//!
//! The relay never writes these accounts. Offsets are relative to the start of the account
//! struct, which follows the 8-byte Anchor discriminator.
use std::fmt;

use anchor_lang::prelude::*;

use crate::error::RelayError;

pub use uint_types::U192;

pub const DISCRIMINATOR_LEN: usize = 8;

#[allow(clippy::assign_op_pattern)]
#[allow(clippy::reversed_empty_ranges)]
mod uint_types {
    use uint::construct_uint;
    construct_uint! {
        pub struct U192(3);
    }
}

fn overflow() -> Error {
    error!(RelayError::MathOverflow)
}

/// Fixed-point value with 15 decimals, stored on chain as a 192-bit little-endian integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Number(U192);

impl Number {
    pub const PRECISION: u32 = 15;
    pub const ONE: Number = Number(U192([1_000_000_000_000_000, 0, 0]));
    pub const ZERO: Number = Number(U192([0, 0, 0]));
    const BPS: u64 = 100_000_000_000;
    pub const ENCODED_LEN: usize = 24;

    pub const fn from_raw(raw: U192) -> Self {
        Number(raw)
    }

    pub const fn raw(self) -> U192 {
        self.0
    }

    pub fn from_bps(bps: u16) -> Self {
        Number(U192::from(bps) * U192::from(Self::BPS))
    }

    pub fn from_u64(value: u64) -> Self {
        Number(U192::from(value) * Self::ONE.0)
    }

    /// Decodes the 24-byte on-chain form.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        require!(bytes.len() == Self::ENCODED_LEN, RelayError::InvalidAccountLayout);
        Ok(Number(U192::from_little_endian(bytes)))
    }

    pub fn to_le_bytes(self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        self.0.to_little_endian(&mut out);
        out
    }

    pub fn checked_add(self, other: Number) -> Result<Number> {
        self.0.checked_add(other.0).map(Number).ok_or_else(overflow)
    }

    pub fn checked_mul(self, other: Number) -> Result<Number> {
        self.0
            .checked_mul(other.0)
            .map(|p| Number(p / Self::ONE.0))
            .ok_or_else(overflow)
    }

    /// `self / other`. Both sides are scaled down together when `self * ONE` would overflow.
    pub fn checked_div(self, other: Number) -> Result<Number> {
        let ten = U192::from(10u8);
        let (mut num, mut den) = (self.0, other.0);
        while num.checked_mul(Self::ONE.0).is_none() {
            num = num / ten;
            den = den / ten;
        }
        (num * Self::ONE.0)
            .checked_div(den)
            .map(Number)
            .ok_or_else(overflow)
    }

    /// Native token units for a reserve with the given (negative) decimal exponent.
    pub fn as_u64(self, exponent: i32) -> Result<u64> {
        self.scaled(exponent, false)
    }

    pub fn as_u64_rounded(self, exponent: i32) -> Result<u64> {
        self.scaled(exponent, true)
    }

    fn scaled(self, exponent: i32, round: bool) -> Result<u64> {
        let shift = Self::PRECISION as i32 + exponent;
        let factor = U192::from(10u8)
            .checked_pow(U192::from(shift.unsigned_abs()))
            .ok_or_else(overflow)?;
        let value = if shift >= 0 {
            let half = if round { factor / U192::from(2u8) } else { U192::zero() };
            self.0.checked_add(half).ok_or_else(overflow)? / factor
        } else {
            self.0.checked_mul(factor).ok_or_else(overflow)?
        };
        require!(value <= U192::from(u64::MAX), RelayError::MathOverflow);
        Ok(value.low_u64())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let one = Self::ONE.0;
        write!(f, "{}.{:015}", self.0 / one, (self.0 % one).low_u64())
    }
}

/// Linear interpolation between (x0, y0) and (x1, y1). A degenerate segment yields `y1`.
pub fn interpolate(x: Number, x0: Number, x1: Number, y0: Number, y1: Number) -> Result<Number> {
    if x1 <= x0 {
        return Ok(y1);
    }
    let span = x1.0 - x0.0;
    let dx = x.0.clamp(x0.0, x1.0) - x0.0;
    let step = |dy: U192| -> Result<U192> {
        Ok(dx.checked_mul(dy).ok_or_else(overflow)? / span)
    };
    if y1 >= y0 {
        Ok(Number(y0.0 + step(y1.0 - y0.0)?))
    } else {
        Ok(Number(y0.0 - step(y0.0 - y1.0)?))
    }
}

/// Borrowed share of a reserve: `debt / (debt + deposits)`.
pub fn utilization_rate(outstanding_debt: Number, total_deposits: u64) -> Result<Number> {
    let total = outstanding_debt.checked_add(Number::from_u64(total_deposits))?;
    if total == Number::ZERO {
        return Ok(Number::ZERO);
    }
    outstanding_debt.checked_div(total)
}

fn read<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    let start = DISCRIMINATOR_LEN + offset;
    let slice = data
        .get(start..start + N)
        .ok_or_else(|| error!(RelayError::InvalidAccountLayout))?;
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    Ok(out)
}

fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey> {
    Ok(Pubkey::new_from_array(read::<32>(data, offset)?))
}

fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    Ok(u16::from_le_bytes(read::<2>(data, offset)?))
}

fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    Ok(u64::from_le_bytes(read::<8>(data, offset)?))
}

fn read_number(data: &[u8], offset: usize) -> Result<Number> {
    Number::from_le_bytes(&read::<{ Number::ENCODED_LEN }>(data, offset)?)
}

fn check_len(data: &[u8], len: usize) -> Result<()> {
    require!(
        data.len() >= DISCRIMINATOR_LEN + len,
        RelayError::InvalidAccountLayout
    );
    Ok(())
}

/// Interest-rate curve of a reserve, in basis points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateCurve {
    pub utilization_rate_1: u16,
    pub utilization_rate_2: u16,
    pub borrow_rate_0: u16,
    pub borrow_rate_1: u16,
    pub borrow_rate_2: u16,
    pub borrow_rate_3: u16,
}

impl RateCurve {
    /// Piecewise-linear borrow rate over three utilization regimes.
    pub fn interest_rate(&self, outstanding_debt: Number, total_deposits: u64) -> Result<Number> {
        let borrow_1 = Number::from_bps(self.borrow_rate_1);
        if total_deposits == 0 && outstanding_debt == Number::ZERO {
            return Ok(borrow_1);
        }
        let util = utilization_rate(outstanding_debt, total_deposits)?;

        let util_1 = Number::from_bps(self.utilization_rate_1);
        if util <= util_1 {
            let borrow_0 = Number::from_bps(self.borrow_rate_0);
            return interpolate(util, Number::ZERO, util_1, borrow_0, borrow_1);
        }

        let util_2 = Number::from_bps(self.utilization_rate_2);
        let borrow_2 = Number::from_bps(self.borrow_rate_2);
        if util <= util_2 {
            return interpolate(util, util_1, util_2, borrow_1, borrow_2);
        }

        let borrow_3 = Number::from_bps(self.borrow_rate_3);
        if util < Number::ONE {
            return interpolate(util, util_2, Number::ONE, borrow_2, borrow_3);
        }
        Ok(borrow_3)
    }
}

pub struct ReserveView<'a> {
    data: &'a [u8],
}

impl<'a> ReserveView<'a> {
    pub const LEN: usize = 5184;
    const INDEX: usize = 2;
    const EXPONENT: usize = 4;
    const MARKET: usize = 8;
    const VAULT: usize = 200;
    const CONFIG: usize = 768;
    const LOAN_ORIGINATION_FEE: usize = 794;
    const PSYFI_VAULT: usize = 832;
    const STATE: usize = 1600;

    pub fn new(data: &'a [u8]) -> Result<Self> {
        check_len(data, Self::LEN)?;
        Ok(Self { data })
    }

    pub fn index(&self) -> Result<u16> {
        read_u16(self.data, Self::INDEX)
    }

    pub fn exponent(&self) -> Result<i32> {
        Ok(i32::from_le_bytes(read::<4>(self.data, Self::EXPONENT)?))
    }

    pub fn market(&self) -> Result<Pubkey> {
        read_pubkey(self.data, Self::MARKET)
    }

    pub fn vault(&self) -> Result<Pubkey> {
        read_pubkey(self.data, Self::VAULT)
    }

    pub fn psyfi_vault(&self) -> Result<Option<Pubkey>> {
        let key = read_pubkey(self.data, Self::PSYFI_VAULT)?;
        Ok((key != Pubkey::default()).then_some(key))
    }

    pub fn rate_curve(&self) -> Result<RateCurve> {
        let at = |i: usize| read_u16(self.data, Self::CONFIG + 2 * i);
        Ok(RateCurve {
            utilization_rate_1: at(0)?,
            utilization_rate_2: at(1)?,
            borrow_rate_0: at(2)?,
            borrow_rate_1: at(3)?,
            borrow_rate_2: at(4)?,
            borrow_rate_3: at(5)?,
        })
    }

    pub fn loan_origination_fee_bps(&self) -> Result<u16> {
        read_u16(self.data, Self::LOAN_ORIGINATION_FEE)
    }

    /// Last accrual time, as cached by the lending program. May be stale.
    pub fn accrued_until(&self) -> Result<i64> {
        Ok(i64::from_le_bytes(read::<8>(self.data, Self::STATE)?))
    }

    pub fn outstanding_debt(&self) -> Result<Number> {
        read_number(self.data, Self::STATE + 8)
    }

    pub fn uncollected_fees(&self) -> Result<Number> {
        read_number(self.data, Self::STATE + 32)
    }

    pub fn total_deposits(&self) -> Result<u64> {
        read_u64(self.data, Self::STATE + 56)
    }

    pub fn total_deposit_notes(&self) -> Result<u64> {
        read_u64(self.data, Self::STATE + 64)
    }

    pub fn total_loan_notes(&self) -> Result<u64> {
        read_u64(self.data, Self::STATE + 72)
    }
}

/// Exchange rates the market caches for one reserve (tokens per note).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteRates {
    pub deposit_note_exchange_rate: Number,
    pub loan_note_exchange_rate: Number,
}

pub struct MarketView<'a> {
    data: &'a [u8],
}

impl<'a> MarketView<'a> {
    pub const LEN: usize = 16544;
    pub const MAX_RESERVES: usize = 32;
    const RESERVES: usize = 672;
    const RESERVE_INFO_LEN: usize = 496;
    const DEPOSIT_RATE: usize = 304;
    const LOAN_RATE: usize = 328;

    pub fn new(data: &'a [u8]) -> Result<Self> {
        check_len(data, Self::LEN)?;
        Ok(Self { data })
    }

    fn entry(&self, index: u16) -> Result<usize> {
        require!(
            (index as usize) < Self::MAX_RESERVES,
            RelayError::InvalidAccountLayout
        );
        Ok(Self::RESERVES + index as usize * Self::RESERVE_INFO_LEN)
    }

    pub fn reserve_at(&self, index: u16) -> Result<Pubkey> {
        read_pubkey(self.data, self.entry(index)?)
    }

    /// Cached rates, read regardless of cache age.
    pub fn note_rates(&self, index: u16) -> Result<NoteRates> {
        let base = self.entry(index)?;
        Ok(NoteRates {
            deposit_note_exchange_rate: read_number(self.data, base + Self::DEPOSIT_RATE)?,
            loan_note_exchange_rate: read_number(self.data, base + Self::LOAN_RATE)?,
        })
    }
}

/// One collateral or loan position of an obligation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub account: Pubkey,
    pub amount: Number,
    pub reserve_index: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionSide {
    Collateral,
    Loan,
}

pub struct ObligationView<'a> {
    data: &'a [u8],
}

impl<'a> ObligationView<'a> {
    pub const LEN: usize = 5632;
    pub const MAX_POSITIONS: usize = 16;
    const MARKET: usize = 8;
    const OWNER: usize = 40;
    const COLLATERAL: usize = 512;
    const LOANS: usize = 3072;
    const POSITION_LEN: usize = 160;

    pub fn new(data: &'a [u8]) -> Result<Self> {
        check_len(data, Self::LEN)?;
        Ok(Self { data })
    }

    pub fn market(&self) -> Result<Pubkey> {
        read_pubkey(self.data, Self::MARKET)
    }

    pub fn owner(&self) -> Result<Pubkey> {
        read_pubkey(self.data, Self::OWNER)
    }

    /// First registered position on `side` for the reserve at `reserve_index`.
    pub fn position(&self, side: PositionSide, reserve_index: u16) -> Result<Option<Position>> {
        let base = match side {
            PositionSide::Collateral => Self::COLLATERAL,
            PositionSide::Loan => Self::LOANS,
        };
        for slot in 0..Self::MAX_POSITIONS {
            let at = base + slot * Self::POSITION_LEN;
            let account = read_pubkey(self.data, at)?;
            if account == Pubkey::default() {
                continue;
            }
            let index = read_u16(self.data, at + 84)?;
            if index == reserve_index {
                return Ok(Some(Position {
                    account,
                    amount: read_number(self.data, at + 32)?,
                    reserve_index: index,
                }));
            }
        }
        Ok(None)
    }
}

/// Converts a note amount to native token units using a cached exchange rate.
pub fn notes_to_native(notes: Number, rate: Number, exponent: i32) -> Result<u64> {
    notes.checked_mul(rate)?.as_u64_rounded(exponent)
}
