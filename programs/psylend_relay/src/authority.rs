use anchor_lang::prelude::*;

use crate::error::RelayError;
use crate::pda::search;

pub const RELAY_AUTHORITY_SEED: &[u8] = b"relay_authority";

/// The relay's own signing address for one market. Pooled custody accounts name it as their
/// owner, and the relay signs for it with `invoke_signed` instead of a private key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelayAuthority {
    market: Pubkey,
    address: Pubkey,
    bump: [u8; 1],
}

impl RelayAuthority {
    pub fn derive(market: &Pubkey) -> Result<Self> {
        let (address, bump) = search(&[RELAY_AUTHORITY_SEED, market.as_ref()], &crate::ID).found()?;
        Ok(Self {
            market: *market,
            address,
            bump: [bump],
        })
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn bump(&self) -> u8 {
        self.bump[0]
    }

    pub fn signer_seeds(&self) -> [&[u8]; 3] {
        [RELAY_AUTHORITY_SEED, self.market.as_ref(), &self.bump[..]]
    }
}

/// Resolves who authorises the owner role of a relayed instruction. A transaction signer needs
/// nothing extra; the market's relay authority gets its seeds; anything else is rejected.
pub fn authorize_owner(owner: &AccountInfo, market: &Pubkey) -> Result<Option<RelayAuthority>> {
    if owner.is_signer {
        return Ok(None);
    }
    let authority = RelayAuthority::derive(market)?;
    if *owner.key == authority.address {
        return Ok(Some(authority));
    }
    msg!("authority:unsigned owner={}", owner.key);
    err!(RelayError::MissingOwnerSignature)
}
