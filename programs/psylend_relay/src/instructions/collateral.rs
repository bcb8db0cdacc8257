use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_spl::token::Token;

use crate::amount::Amount;
use crate::authority::authorize_owner;
use crate::builder::{
    self, CloseCollateralAccountKeys, CollateralTransferKeys, InitCollateralAccountKeys,
};
use crate::dispatch;
use crate::error::RelayError;
use crate::network::LENDING_PROGRAM_ID;
use crate::pda::PdaKind;
use crate::{AccountLifecycle, AmountRelayed, RelayOperation};

#[derive(Accounts)]
pub struct InitCollateralAccount<'info> {
    /// CHECK: checked by the lending program
    pub market: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market`
    pub market_authority: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market` and `owner`
    #[account(mut)]
    pub obligation: UncheckedAccount<'info>,
    /// CHECK: checked by the lending program
    pub reserve: UncheckedAccount<'info>,
    /// CHECK: reserve deposit note mint
    pub deposit_note_mint: UncheckedAccount<'info>,
    /// CHECK: transaction signer or the relay authority of `market`
    #[account(mut)]
    pub owner: UncheckedAccount<'info>,
    /// CHECK: re-derived from `reserve`, `obligation` and `owner`
    #[account(mut)]
    pub collateral_account: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

/// Closes an empty collateral account. The paired deposit account is passed through but left
/// as it is.
#[derive(Accounts)]
pub struct CloseCollateralAccount<'info> {
    /// CHECK: checked by the lending program
    pub market: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market`
    pub market_authority: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market` and `owner`
    #[account(mut)]
    pub obligation: UncheckedAccount<'info>,
    /// CHECK: transaction signer or the relay authority of `market`
    #[account(mut)]
    pub owner: UncheckedAccount<'info>,
    /// CHECK: re-derived from `reserve`, `obligation` and `owner`
    #[account(mut)]
    pub collateral_account: UncheckedAccount<'info>,
    /// CHECK: re-derived from `reserve` and `owner`
    #[account(mut)]
    pub deposit_account: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
    /// CHECK: seed of the note account addresses only; not forwarded
    pub reserve: UncheckedAccount<'info>,
}

/// Moves deposit notes between a deposit account and a collateral account of the same owner.
/// Used by both `deposit_collateral` and `withdraw_collateral`.
#[derive(Accounts)]
pub struct CollateralTransfer<'info> {
    /// CHECK: checked by the lending program
    pub market: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market`
    pub market_authority: UncheckedAccount<'info>,
    /// CHECK: checked by the lending program
    pub reserve: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market` and `owner`
    #[account(mut)]
    pub obligation: UncheckedAccount<'info>,
    /// CHECK: transaction signer or the relay authority of `market`
    pub owner: UncheckedAccount<'info>,
    /// CHECK: re-derived from `reserve` and `owner`
    #[account(mut)]
    pub deposit_account: UncheckedAccount<'info>,
    /// CHECK: re-derived from `reserve`, `obligation` and `owner`
    #[account(mut)]
    pub collateral_account: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
}

pub fn init_handler(ctx: Context<InitCollateralAccount>, bump: u8) -> Result<()> {
    let a = &ctx.accounts;
    let (market, owner) = (a.market.key, a.owner.key);
    PdaKind::MarketAuthority { market }.verify(&LENDING_PROGRAM_ID, a.market_authority.key, None)?;
    PdaKind::Obligation { market, owner }.verify(&LENDING_PROGRAM_ID, a.obligation.key, None)?;
    PdaKind::Collateral { reserve: a.reserve.key, obligation: a.obligation.key, owner }.verify(
        &LENDING_PROGRAM_ID,
        a.collateral_account.key,
        Some(bump),
    )?;
    let authority = authorize_owner(&a.owner, market)?;

    let keys = InitCollateralAccountKeys {
        market: *market,
        market_authority: a.market_authority.key(),
        obligation: a.obligation.key(),
        reserve: a.reserve.key(),
        deposit_note_mint: a.deposit_note_mint.key(),
        owner: *owner,
        collateral_account: a.collateral_account.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.market_authority.to_account_info(),
        a.obligation.to_account_info(),
        a.reserve.to_account_info(),
        a.deposit_note_mint.to_account_info(),
        a.owner.to_account_info(),
        a.collateral_account.to_account_info(),
        a.token_program.to_account_info(),
        a.system_program.to_account_info(),
        a.rent.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    let ix = builder::init_collateral_account(&LENDING_PROGRAM_ID, &keys, bump);
    dispatch::invoke(&ix, &infos, authority.as_ref())?;
    emit!(AccountLifecycle {
        operation: RelayOperation::InitCollateralAccount,
        market: keys.market,
        owner: keys.owner,
        account: keys.collateral_account,
    });
    Ok(())
}

pub fn close_handler(ctx: Context<CloseCollateralAccount>) -> Result<()> {
    let a = &ctx.accounts;
    let (market, reserve, owner) = (a.market.key, a.reserve.key, a.owner.key);
    PdaKind::MarketAuthority { market }.verify(&LENDING_PROGRAM_ID, a.market_authority.key, None)?;
    PdaKind::Obligation { market, owner }.verify(&LENDING_PROGRAM_ID, a.obligation.key, None)?;
    PdaKind::Collateral { reserve, obligation: a.obligation.key, owner }.verify(
        &LENDING_PROGRAM_ID,
        a.collateral_account.key,
        None,
    )?;
    PdaKind::Deposit { reserve, depositor: owner }.verify(
        &LENDING_PROGRAM_ID,
        a.deposit_account.key,
        None,
    )?;
    let authority = authorize_owner(&a.owner, market)?;

    let keys = CloseCollateralAccountKeys {
        market: *market,
        market_authority: a.market_authority.key(),
        obligation: a.obligation.key(),
        owner: *owner,
        collateral_account: a.collateral_account.key(),
        deposit_account: a.deposit_account.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.market_authority.to_account_info(),
        a.obligation.to_account_info(),
        a.owner.to_account_info(),
        a.collateral_account.to_account_info(),
        a.deposit_account.to_account_info(),
        a.token_program.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    let ix = builder::close_collateral_account(&LENDING_PROGRAM_ID, &keys);
    dispatch::invoke(&ix, &infos, authority.as_ref())?;
    emit!(AccountLifecycle {
        operation: RelayOperation::CloseCollateralAccount,
        market: keys.market,
        owner: keys.owner,
        account: keys.collateral_account,
    });
    Ok(())
}

type TransferBuilder = fn(&Pubkey, &CollateralTransferKeys, u8, u8, Amount) -> Instruction;

fn transfer(
    ctx: Context<CollateralTransfer>,
    operation: RelayOperation,
    build: TransferBuilder,
    collateral_bump: u8,
    deposit_bump: u8,
    amount: Amount,
) -> Result<()> {
    let a = &ctx.accounts;
    let (market, reserve, owner) = (a.market.key, a.reserve.key, a.owner.key);
    PdaKind::MarketAuthority { market }.verify(&LENDING_PROGRAM_ID, a.market_authority.key, None)?;
    PdaKind::Obligation { market, owner }.verify(&LENDING_PROGRAM_ID, a.obligation.key, None)?;
    PdaKind::Deposit { reserve, depositor: owner }.verify(
        &LENDING_PROGRAM_ID,
        a.deposit_account.key,
        Some(deposit_bump),
    )?;
    PdaKind::Collateral { reserve, obligation: a.obligation.key, owner }.verify(
        &LENDING_PROGRAM_ID,
        a.collateral_account.key,
        Some(collateral_bump),
    )?;
    let authority = authorize_owner(&a.owner, market)?;

    let keys = CollateralTransferKeys {
        market: *market,
        market_authority: a.market_authority.key(),
        reserve: *reserve,
        obligation: a.obligation.key(),
        owner: *owner,
        deposit_account: a.deposit_account.key(),
        collateral_account: a.collateral_account.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.market_authority.to_account_info(),
        a.reserve.to_account_info(),
        a.obligation.to_account_info(),
        a.owner.to_account_info(),
        a.deposit_account.to_account_info(),
        a.collateral_account.to_account_info(),
        a.token_program.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    let ix = build(&LENDING_PROGRAM_ID, &keys, collateral_bump, deposit_bump, amount);
    dispatch::invoke(&ix, &infos, authority.as_ref())?;
    emit!(AmountRelayed {
        operation,
        market: keys.market,
        reserve: keys.reserve,
        owner: keys.owner,
        amount,
        signed_by_relay: authority.is_some(),
    });
    Ok(())
}

pub fn deposit_handler(
    ctx: Context<CollateralTransfer>,
    collateral_bump: u8,
    deposit_bump: u8,
    amount: Amount,
) -> Result<()> {
    transfer(
        ctx,
        RelayOperation::DepositCollateral,
        builder::deposit_collateral,
        collateral_bump,
        deposit_bump,
        amount,
    )
}

pub fn withdraw_handler(
    ctx: Context<CollateralTransfer>,
    collateral_bump: u8,
    deposit_bump: u8,
    amount: Amount,
) -> Result<()> {
    transfer(
        ctx,
        RelayOperation::WithdrawCollateral,
        builder::withdraw_collateral,
        collateral_bump,
        deposit_bump,
        amount,
    )
}
