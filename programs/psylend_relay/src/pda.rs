//! Program-derived addresses of the lending program's per-user accounts.
//!
//! Addresses are recomputed from their seeds on every call and never cached.
use anchor_lang::prelude::*;
use anchor_lang::solana_program::pubkey::{MAX_SEEDS, MAX_SEED_LEN};

use crate::error::RelayError;

pub const OBLIGATION_SEED: &[u8] = b"obligation";
pub const DEPOSIT_SEED: &[u8] = b"deposits";
pub const COLLATERAL_SEED: &[u8] = b"collateral";
pub const LOAN_SEED: &[u8] = b"loan";

/// Outcome of a bump search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Derivation {
    Found { address: Pubkey, bump: u8 },
    Exhausted,
}

impl Derivation {
    pub fn found(self) -> Result<(Pubkey, u8)> {
        match self {
            Derivation::Found { address, bump } => Ok((address, bump)),
            Derivation::Exhausted => err!(RelayError::SeedDerivationExhausted),
        }
    }
}

/// Walks bump seeds from 255 down to 0 and returns the first off-curve address.
/// Seed tuples the runtime would refuse (too many seeds or an oversized seed) never match.
pub fn search(seeds: &[&[u8]], program_id: &Pubkey) -> Derivation {
    if seeds.len() >= MAX_SEEDS || seeds.iter().any(|s| s.len() > MAX_SEED_LEN) {
        return Derivation::Exhausted;
    }
    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        with_bump.extend_from_slice(seeds);
        with_bump.push(&bump_seed);
        if let Ok(address) = Pubkey::create_program_address(&with_bump, program_id) {
            return Derivation::Found { address, bump };
        }
    }
    Derivation::Exhausted
}

/// Account kinds owned by the lending program, each with its fixed seed order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PdaKind<'a> {
    /// Signing authority of a market; the market address is the only seed.
    MarketAuthority { market: &'a Pubkey },
    Obligation { market: &'a Pubkey, owner: &'a Pubkey },
    Deposit { reserve: &'a Pubkey, depositor: &'a Pubkey },
    Collateral { reserve: &'a Pubkey, obligation: &'a Pubkey, owner: &'a Pubkey },
    Loan { reserve: &'a Pubkey, obligation: &'a Pubkey, owner: &'a Pubkey },
}

impl<'a> PdaKind<'a> {
    pub fn seeds(&self) -> Vec<&'a [u8]> {
        match *self {
            PdaKind::MarketAuthority { market } => vec![market.as_ref()],
            PdaKind::Obligation { market, owner } => {
                vec![OBLIGATION_SEED, market.as_ref(), owner.as_ref()]
            }
            PdaKind::Deposit { reserve, depositor } => {
                vec![DEPOSIT_SEED, reserve.as_ref(), depositor.as_ref()]
            }
            PdaKind::Collateral { reserve, obligation, owner } => {
                vec![COLLATERAL_SEED, reserve.as_ref(), obligation.as_ref(), owner.as_ref()]
            }
            PdaKind::Loan { reserve, obligation, owner } => {
                vec![LOAN_SEED, reserve.as_ref(), obligation.as_ref(), owner.as_ref()]
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PdaKind::MarketAuthority { .. } => "market_authority",
            PdaKind::Obligation { .. } => "obligation",
            PdaKind::Deposit { .. } => "deposit_account",
            PdaKind::Collateral { .. } => "collateral_account",
            PdaKind::Loan { .. } => "loan_account",
        }
    }

    pub fn derive(&self, program_id: &Pubkey) -> Derivation {
        search(&self.seeds(), program_id)
    }

    /// Re-derives the address and compares it with what the caller supplied. When the caller
    /// also passed a bump, it must be the canonical one.
    pub fn verify(&self, program_id: &Pubkey, supplied: &Pubkey, bump: Option<u8>) -> Result<u8> {
        let (expected, canonical) = self.derive(program_id).found()?;
        if expected != *supplied {
            msg!("pda:mismatch kind={} expected={} got={}", self.name(), expected, supplied);
            return err!(RelayError::AccountMismatch);
        }
        if let Some(b) = bump {
            if b != canonical {
                msg!("pda:bump kind={} expected={} got={}", self.name(), canonical, b);
                return err!(RelayError::AccountMismatch);
            }
        }
        Ok(canonical)
    }
}
