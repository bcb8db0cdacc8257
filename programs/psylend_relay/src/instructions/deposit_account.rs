use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use crate::authority::authorize_owner;
use crate::builder::{self, CloseDepositAccountKeys, InitDepositAccountKeys};
use crate::dispatch;
use crate::error::RelayError;
use crate::network::LENDING_PROGRAM_ID;
use crate::pda::PdaKind;
use crate::{AccountLifecycle, RelayOperation};

#[derive(Accounts)]
pub struct InitDepositAccount<'info> {
    /// CHECK: checked by the lending program
    pub market: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market`
    pub market_authority: UncheckedAccount<'info>,
    /// CHECK: checked by the lending program
    pub reserve: UncheckedAccount<'info>,
    /// CHECK: reserve deposit note mint
    pub deposit_note_mint: UncheckedAccount<'info>,
    /// CHECK: owner of the new deposit account; need not sign
    pub depositor: UncheckedAccount<'info>,
    /// CHECK: transaction signer or the relay authority of `market`
    #[account(mut)]
    pub payer: UncheckedAccount<'info>,
    /// CHECK: re-derived from `reserve` and `depositor`
    #[account(mut)]
    pub deposit_account: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

/// Closes an empty deposit account; lamports and any dust go to `receiver_account`.
#[derive(Accounts)]
pub struct CloseDepositAccount<'info> {
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
    #[account(mut)]
    pub depositor: UncheckedAccount<'info>,
    /// CHECK: re-derived from `reserve` and `depositor`
    #[account(mut)]
    pub deposit_account: UncheckedAccount<'info>,
    /// CHECK: token account of the reserve's mint
    #[account(mut)]
    pub receiver_account: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
}

pub fn init_handler(ctx: Context<InitDepositAccount>, bump: u8) -> Result<()> {
    let a = &ctx.accounts;
    let market = a.market.key;
    PdaKind::MarketAuthority { market }.verify(&LENDING_PROGRAM_ID, a.market_authority.key, None)?;
    PdaKind::Deposit { reserve: a.reserve.key, depositor: a.depositor.key }.verify(
        &LENDING_PROGRAM_ID,
        a.deposit_account.key,
        Some(bump),
    )?;
    let authority = authorize_owner(&a.payer, market)?;

    let keys = InitDepositAccountKeys {
        market: *market,
        market_authority: a.market_authority.key(),
        reserve: a.reserve.key(),
        deposit_note_mint: a.deposit_note_mint.key(),
        depositor: a.depositor.key(),
        payer: a.payer.key(),
        deposit_account: a.deposit_account.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.market_authority.to_account_info(),
        a.reserve.to_account_info(),
        a.deposit_note_mint.to_account_info(),
        a.depositor.to_account_info(),
        a.payer.to_account_info(),
        a.deposit_account.to_account_info(),
        a.token_program.to_account_info(),
        a.system_program.to_account_info(),
        a.rent.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    let ix = builder::init_deposit_account(&LENDING_PROGRAM_ID, &keys, bump);
    dispatch::invoke(&ix, &infos, authority.as_ref())?;
    emit!(AccountLifecycle {
        operation: RelayOperation::InitDepositAccount,
        market: keys.market,
        owner: keys.depositor,
        account: keys.deposit_account,
    });
    Ok(())
}

pub fn close_handler(ctx: Context<CloseDepositAccount>) -> Result<()> {
    let a = &ctx.accounts;
    let market = a.market.key;
    PdaKind::MarketAuthority { market }.verify(&LENDING_PROGRAM_ID, a.market_authority.key, None)?;
    PdaKind::Deposit { reserve: a.reserve.key, depositor: a.depositor.key }.verify(
        &LENDING_PROGRAM_ID,
        a.deposit_account.key,
        None,
    )?;
    let authority = authorize_owner(&a.depositor, market)?;

    let keys = CloseDepositAccountKeys {
        market: *market,
        market_authority: a.market_authority.key(),
        reserve: a.reserve.key(),
        vault: a.vault.key(),
        deposit_note_mint: a.deposit_note_mint.key(),
        depositor: a.depositor.key(),
        deposit_account: a.deposit_account.key(),
        receiver_account: a.receiver_account.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.market_authority.to_account_info(),
        a.reserve.to_account_info(),
        a.vault.to_account_info(),
        a.deposit_note_mint.to_account_info(),
        a.depositor.to_account_info(),
        a.deposit_account.to_account_info(),
        a.receiver_account.to_account_info(),
        a.token_program.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    let ix = builder::close_deposit_account(&LENDING_PROGRAM_ID, &keys);
    dispatch::invoke(&ix, &infos, authority.as_ref())?;
    emit!(AccountLifecycle {
        operation: RelayOperation::CloseDepositAccount,
        market: keys.market,
        owner: keys.depositor,
        account: keys.deposit_account,
    });
    Ok(())
}
