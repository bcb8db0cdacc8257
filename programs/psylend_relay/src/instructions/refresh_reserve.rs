use anchor_lang::prelude::*;

use crate::builder::{self, RefreshPsyfiReserveKeys, RefreshReserveKeys};
use crate::dispatch;
use crate::error::RelayError;
use crate::network::LENDING_PROGRAM_ID;

/// Refreshes a reserve's cached oracle price.
#[derive(Accounts)]
pub struct RefreshReserve<'info> {
    /// CHECK: checked by the lending program
    #[account(mut)]
    pub market: UncheckedAccount<'info>,
    /// CHECK: checked by the lending program
    pub reserve: UncheckedAccount<'info>,
    /// CHECK: oracle price account configured on the reserve
    pub pyth_oracle_price: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
}

/// Refresh for reserves backed by a wrapped (yield-bearing) vault.
#[derive(Accounts)]
pub struct RefreshPsyfiReserve<'info> {
    /// CHECK: checked by the lending program
    #[account(mut)]
    pub market: UncheckedAccount<'info>,
    /// CHECK: checked by the lending program
    pub reserve: UncheckedAccount<'info>,
    /// CHECK: wrapped-vault account configured on the reserve
    pub psyfi_vault: UncheckedAccount<'info>,
    /// CHECK: oracle price account configured on the reserve
    pub pyth_oracle_price: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<RefreshReserve>) -> Result<()> {
    let a = &ctx.accounts;
    let keys = RefreshReserveKeys {
        market: a.market.key(),
        reserve: a.reserve.key(),
        pyth_oracle_price: a.pyth_oracle_price.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.reserve.to_account_info(),
        a.pyth_oracle_price.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    dispatch::invoke(&builder::refresh_reserve(&LENDING_PROGRAM_ID, &keys), &infos, None)
}

pub fn psyfi_handler(ctx: Context<RefreshPsyfiReserve>) -> Result<()> {
    let a = &ctx.accounts;
    let keys = RefreshPsyfiReserveKeys {
        market: a.market.key(),
        reserve: a.reserve.key(),
        psyfi_vault: a.psyfi_vault.key(),
        pyth_oracle_price: a.pyth_oracle_price.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.reserve.to_account_info(),
        a.psyfi_vault.to_account_info(),
        a.pyth_oracle_price.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    dispatch::invoke(&builder::refresh_psyfi_reserve(&LENDING_PROGRAM_ID, &keys), &infos, None)
}
