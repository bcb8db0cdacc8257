use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use crate::amount::Amount;
use crate::builder::{self, DepositKeys};
use crate::dispatch;
use crate::error::RelayError;
use crate::network::LENDING_PROGRAM_ID;
use crate::RelayOperation;

use super::depositor::DepositorChecks;

/// Tokens in, deposit notes out. Serves `deposit` (notes land in the depositor's PDA) and
/// `deposit_tokens` (notes land in any note account the caller controls).
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// CHECK: checked by the lending program
    pub market: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market`
    pub market_authority: UncheckedAccount<'info>,
    /// CHECK: checked by the lending program
    #[account(mut)]
    pub reserve: UncheckedAccount<'info>,
    /// CHECK: reserve vault
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,
    /// CHECK: reserve deposit note mint
    #[account(mut)]
    pub deposit_note_mint: UncheckedAccount<'info>,
    /// CHECK: transaction signer or the relay authority of `market`
    pub depositor: UncheckedAccount<'info>,
    /// CHECK: re-derived for `deposit`; any note account for `deposit_tokens`
    #[account(mut)]
    pub deposit_account: UncheckedAccount<'info>,
    /// CHECK: token account the deposit is drawn from
    #[account(mut)]
    pub deposit_source: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
}

impl<'info> Deposit<'info> {
    pub fn keys(&self) -> DepositKeys {
        DepositKeys {
            market: self.market.key(),
            market_authority: self.market_authority.key(),
            reserve: self.reserve.key(),
            vault: self.vault.key(),
            deposit_note_mint: self.deposit_note_mint.key(),
            depositor: self.depositor.key(),
            deposit_account: self.deposit_account.key(),
            deposit_source: self.deposit_source.key(),
        }
    }

    pub fn account_infos(&self) -> Vec<AccountInfo<'info>> {
        vec![
            self.market.to_account_info(),
            self.market_authority.to_account_info(),
            self.reserve.to_account_info(),
            self.vault.to_account_info(),
            self.deposit_note_mint.to_account_info(),
            self.depositor.to_account_info(),
            self.deposit_account.to_account_info(),
            self.deposit_source.to_account_info(),
            self.token_program.to_account_info(),
            self.lending_program.to_account_info(),
        ]
    }

    pub fn checks(&self) -> DepositorChecks<'_, 'info> {
        DepositorChecks {
            market: &self.market,
            market_authority: &self.market_authority,
            reserve: &self.reserve,
            depositor: &self.depositor,
            deposit_account: &self.deposit_account,
        }
    }
}

pub fn handler(ctx: Context<Deposit>, bump: u8, amount: Amount) -> Result<()> {
    let accounts = &ctx.accounts;
    let checks = accounts.checks();
    let authority = checks.authorize(Some(bump))?;
    let ix = builder::deposit(&LENDING_PROGRAM_ID, &accounts.keys(), bump, amount);
    dispatch::invoke(&ix, &accounts.account_infos(), authority.as_ref())?;
    checks.relayed(RelayOperation::Deposit, amount, authority.as_ref());
    Ok(())
}

pub fn tokens_handler(ctx: Context<Deposit>, amount: Amount) -> Result<()> {
    let accounts = &ctx.accounts;
    let checks = accounts.checks();
    let authority = checks.authorize(None)?;
    let ix = builder::deposit_tokens(&LENDING_PROGRAM_ID, &accounts.keys(), amount);
    dispatch::invoke(&ix, &accounts.account_infos(), authority.as_ref())?;
    checks.relayed(RelayOperation::DepositTokens, amount, authority.as_ref());
    Ok(())
}
