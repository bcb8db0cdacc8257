use anchor_lang::prelude::*;

use crate::amount::Amount;
use crate::authority::{authorize_owner, RelayAuthority};
use crate::network::LENDING_PROGRAM_ID;
use crate::pda::PdaKind;
use crate::{AmountRelayed, RelayOperation};

/// The accounts `Deposit` and `Withdraw` share for checks and the relay event.
pub struct DepositorChecks<'a, 'info> {
    pub market: &'a AccountInfo<'info>,
    pub market_authority: &'a AccountInfo<'info>,
    pub reserve: &'a AccountInfo<'info>,
    pub depositor: &'a AccountInfo<'info>,
    pub deposit_account: &'a AccountInfo<'info>,
}

impl<'a, 'info> DepositorChecks<'a, 'info> {
    /// Re-derives the market authority, and the deposit account when a bump is given, then
    /// authorises the depositor. `*_tokens` flavours pass no bump: their note account is
    /// caller-chosen custody.
    pub fn authorize(&self, deposit_bump: Option<u8>) -> Result<Option<RelayAuthority>> {
        PdaKind::MarketAuthority { market: self.market.key }.verify(
            &LENDING_PROGRAM_ID,
            self.market_authority.key,
            None,
        )?;
        if let Some(bump) = deposit_bump {
            PdaKind::Deposit {
                reserve: self.reserve.key,
                depositor: self.depositor.key,
            }
            .verify(&LENDING_PROGRAM_ID, self.deposit_account.key, Some(bump))?;
        }
        authorize_owner(self.depositor, self.market.key)
    }

    pub fn relayed(&self, operation: RelayOperation, amount: Amount, authority: Option<&RelayAuthority>) {
        emit!(AmountRelayed {
            operation,
            market: *self.market.key,
            reserve: *self.reserve.key,
            owner: *self.depositor.key,
            amount,
            signed_by_relay: authority.is_some(),
        });
    }
}
