use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use crate::builder::{self, AccrueInterestKeys};
use crate::dispatch;
use crate::error::RelayError;
use crate::network::LENDING_PROGRAM_ID;
use crate::pda::PdaKind;

/// Brings a reserve's interest accounting up to date. Also the precondition half of every
/// composed instruction.
#[derive(Accounts)]
pub struct AccrueInterest<'info> {
    /// CHECK: checked by the lending program
    #[account(mut)]
    pub market: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market`
    pub market_authority: UncheckedAccount<'info>,
    /// CHECK: checked by the lending program
    #[account(mut)]
    pub reserve: UncheckedAccount<'info>,
    /// CHECK: reserve's fee note vault
    #[account(mut)]
    pub fee_note_vault: UncheckedAccount<'info>,
    /// CHECK: reserve's deposit note mint
    #[account(mut)]
    pub deposit_note_mint: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
}

impl<'info> AccrueInterest<'info> {
    pub fn keys(&self) -> AccrueInterestKeys {
        AccrueInterestKeys {
            market: self.market.key(),
            market_authority: self.market_authority.key(),
            reserve: self.reserve.key(),
            fee_note_vault: self.fee_note_vault.key(),
            deposit_note_mint: self.deposit_note_mint.key(),
        }
    }

    pub fn account_infos(&self) -> Vec<AccountInfo<'info>> {
        vec![
            self.market.to_account_info(),
            self.market_authority.to_account_info(),
            self.reserve.to_account_info(),
            self.fee_note_vault.to_account_info(),
            self.deposit_note_mint.to_account_info(),
            self.token_program.to_account_info(),
            self.lending_program.to_account_info(),
        ]
    }

    pub fn verify(&self) -> Result<()> {
        PdaKind::MarketAuthority { market: self.market.key }.verify(
            &LENDING_PROGRAM_ID,
            self.market_authority.key,
            None,
        )?;
        Ok(())
    }

    /// The accrual half of a composed instruction must target the action's market and reserve.
    pub fn verify_pairs_with(&self, market: &Pubkey, reserve: &Pubkey) -> Result<()> {
        require_keys_eq!(self.market.key(), *market, RelayError::AccountMismatch);
        require_keys_eq!(self.reserve.key(), *reserve, RelayError::AccountMismatch);
        self.verify()
    }
}

pub fn handler(ctx: Context<AccrueInterest>) -> Result<()> {
    let accounts = &ctx.accounts;
    accounts.verify()?;
    let ix = builder::accrue_interest(&LENDING_PROGRAM_ID, &accounts.keys());
    dispatch::invoke(&ix, &accounts.account_infos(), None)
}
