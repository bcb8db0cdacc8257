use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use crate::amount::Amount;
use crate::authority::authorize_owner;
use crate::builder::{self, BorrowKeys, CloseLoanAccountKeys, InitLoanAccountKeys, RepayKeys};
use crate::dispatch;
use crate::error::RelayError;
use crate::network::LENDING_PROGRAM_ID;
use crate::pda::PdaKind;
use crate::{AccountLifecycle, AmountRelayed, RelayOperation};

#[derive(Accounts)]
pub struct InitLoanAccount<'info> {
    /// CHECK: checked by the lending program
    pub market: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market`
    pub market_authority: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market` and `owner`
    #[account(mut)]
    pub obligation: UncheckedAccount<'info>,
    /// CHECK: checked by the lending program
    pub reserve: UncheckedAccount<'info>,
    /// CHECK: reserve loan note mint
    pub loan_note_mint: UncheckedAccount<'info>,
    /// CHECK: transaction signer or the relay authority of `market`
    #[account(mut)]
    pub owner: UncheckedAccount<'info>,
    /// CHECK: re-derived from `reserve`, `obligation` and `owner`
    #[account(mut)]
    pub loan_account: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct CloseLoanAccount<'info> {
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
    pub loan_account: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
    /// CHECK: seed of the loan account address only; not forwarded
    pub reserve: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct Borrow<'info> {
    /// CHECK: checked by the lending program
    pub market: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market`
    pub market_authority: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market` and `borrower`
    #[account(mut)]
    pub obligation: UncheckedAccount<'info>,
    /// CHECK: checked by the lending program
    #[account(mut)]
    pub reserve: UncheckedAccount<'info>,
    /// CHECK: reserve vault
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,
    /// CHECK: reserve loan note mint
    #[account(mut)]
    pub loan_note_mint: UncheckedAccount<'info>,
    /// CHECK: transaction signer or the relay authority of `market`
    pub borrower: UncheckedAccount<'info>,
    /// CHECK: re-derived from `reserve`, `obligation` and `borrower`
    #[account(mut)]
    pub loan_account: UncheckedAccount<'info>,
    /// CHECK: token account receiving the borrowed tokens
    #[account(mut)]
    pub receiver_account: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
}

/// Repays a loan from any token account. Anyone may repay, so the obligation owner is named
/// separately from the payer and need not sign.
#[derive(Accounts)]
pub struct Repay<'info> {
    /// CHECK: checked by the lending program
    pub market: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market`
    pub market_authority: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market` and `obligation_owner`
    #[account(mut)]
    pub obligation: UncheckedAccount<'info>,
    /// CHECK: checked by the lending program
    #[account(mut)]
    pub reserve: UncheckedAccount<'info>,
    /// CHECK: reserve vault
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,
    /// CHECK: reserve loan note mint
    #[account(mut)]
    pub loan_note_mint: UncheckedAccount<'info>,
    /// CHECK: re-derived from `reserve`, `obligation` and `obligation_owner`
    #[account(mut)]
    pub loan_account: UncheckedAccount<'info>,
    /// CHECK: token account the repayment is drawn from
    #[account(mut)]
    pub payer_account: UncheckedAccount<'info>,
    /// CHECK: transaction signer or the relay authority of `market`
    pub payer: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
    /// CHECK: seed of the obligation and loan addresses only; not forwarded
    pub obligation_owner: UncheckedAccount<'info>,
}

pub fn init_handler(ctx: Context<InitLoanAccount>, bump: u8) -> Result<()> {
    let a = &ctx.accounts;
    let (market, owner) = (a.market.key, a.owner.key);
    PdaKind::MarketAuthority { market }.verify(&LENDING_PROGRAM_ID, a.market_authority.key, None)?;
    PdaKind::Obligation { market, owner }.verify(&LENDING_PROGRAM_ID, a.obligation.key, None)?;
    PdaKind::Loan { reserve: a.reserve.key, obligation: a.obligation.key, owner }.verify(
        &LENDING_PROGRAM_ID,
        a.loan_account.key,
        Some(bump),
    )?;
    let authority = authorize_owner(&a.owner, market)?;

    let keys = InitLoanAccountKeys {
        market: *market,
        market_authority: a.market_authority.key(),
        obligation: a.obligation.key(),
        reserve: a.reserve.key(),
        loan_note_mint: a.loan_note_mint.key(),
        owner: *owner,
        loan_account: a.loan_account.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.market_authority.to_account_info(),
        a.obligation.to_account_info(),
        a.reserve.to_account_info(),
        a.loan_note_mint.to_account_info(),
        a.owner.to_account_info(),
        a.loan_account.to_account_info(),
        a.token_program.to_account_info(),
        a.system_program.to_account_info(),
        a.rent.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    let ix = builder::init_loan_account(&LENDING_PROGRAM_ID, &keys, bump);
    dispatch::invoke(&ix, &infos, authority.as_ref())?;
    emit!(AccountLifecycle {
        operation: RelayOperation::InitLoanAccount,
        market: keys.market,
        owner: keys.owner,
        account: keys.loan_account,
    });
    Ok(())
}

pub fn close_handler(ctx: Context<CloseLoanAccount>) -> Result<()> {
    let a = &ctx.accounts;
    let (market, owner) = (a.market.key, a.owner.key);
    PdaKind::MarketAuthority { market }.verify(&LENDING_PROGRAM_ID, a.market_authority.key, None)?;
    PdaKind::Obligation { market, owner }.verify(&LENDING_PROGRAM_ID, a.obligation.key, None)?;
    PdaKind::Loan { reserve: a.reserve.key, obligation: a.obligation.key, owner }.verify(
        &LENDING_PROGRAM_ID,
        a.loan_account.key,
        None,
    )?;
    let authority = authorize_owner(&a.owner, market)?;

    let keys = CloseLoanAccountKeys {
        market: *market,
        market_authority: a.market_authority.key(),
        obligation: a.obligation.key(),
        owner: *owner,
        loan_account: a.loan_account.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.market_authority.to_account_info(),
        a.obligation.to_account_info(),
        a.owner.to_account_info(),
        a.loan_account.to_account_info(),
        a.token_program.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    let ix = builder::close_loan_account(&LENDING_PROGRAM_ID, &keys);
    dispatch::invoke(&ix, &infos, authority.as_ref())?;
    emit!(AccountLifecycle {
        operation: RelayOperation::CloseLoanAccount,
        market: keys.market,
        owner: keys.owner,
        account: keys.loan_account,
    });
    Ok(())
}

pub fn borrow_handler(ctx: Context<Borrow>, bump: u8, amount: Amount) -> Result<()> {
    let a = &ctx.accounts;
    let (market, owner) = (a.market.key, a.borrower.key);
    PdaKind::MarketAuthority { market }.verify(&LENDING_PROGRAM_ID, a.market_authority.key, None)?;
    PdaKind::Obligation { market, owner }.verify(&LENDING_PROGRAM_ID, a.obligation.key, None)?;
    PdaKind::Loan { reserve: a.reserve.key, obligation: a.obligation.key, owner }.verify(
        &LENDING_PROGRAM_ID,
        a.loan_account.key,
        Some(bump),
    )?;
    let authority = authorize_owner(&a.borrower, market)?;

    let keys = BorrowKeys {
        market: *market,
        market_authority: a.market_authority.key(),
        obligation: a.obligation.key(),
        reserve: a.reserve.key(),
        vault: a.vault.key(),
        loan_note_mint: a.loan_note_mint.key(),
        borrower: *owner,
        loan_account: a.loan_account.key(),
        receiver_account: a.receiver_account.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.market_authority.to_account_info(),
        a.obligation.to_account_info(),
        a.reserve.to_account_info(),
        a.vault.to_account_info(),
        a.loan_note_mint.to_account_info(),
        a.borrower.to_account_info(),
        a.loan_account.to_account_info(),
        a.receiver_account.to_account_info(),
        a.token_program.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    let ix = builder::borrow(&LENDING_PROGRAM_ID, &keys, bump, amount);
    dispatch::invoke(&ix, &infos, authority.as_ref())?;
    emit!(AmountRelayed {
        operation: RelayOperation::Borrow,
        market: keys.market,
        reserve: keys.reserve,
        owner: keys.borrower,
        amount,
        signed_by_relay: authority.is_some(),
    });
    Ok(())
}

pub fn repay_handler(ctx: Context<Repay>, amount: Amount) -> Result<()> {
    let a = &ctx.accounts;
    let (market, owner) = (a.market.key, a.obligation_owner.key);
    PdaKind::MarketAuthority { market }.verify(&LENDING_PROGRAM_ID, a.market_authority.key, None)?;
    PdaKind::Obligation { market, owner }.verify(&LENDING_PROGRAM_ID, a.obligation.key, None)?;
    PdaKind::Loan { reserve: a.reserve.key, obligation: a.obligation.key, owner }.verify(
        &LENDING_PROGRAM_ID,
        a.loan_account.key,
        None,
    )?;
    let authority = authorize_owner(&a.payer, market)?;

    let keys = RepayKeys {
        market: *market,
        market_authority: a.market_authority.key(),
        obligation: a.obligation.key(),
        reserve: a.reserve.key(),
        vault: a.vault.key(),
        loan_note_mint: a.loan_note_mint.key(),
        loan_account: a.loan_account.key(),
        payer_account: a.payer_account.key(),
        payer: a.payer.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.market_authority.to_account_info(),
        a.obligation.to_account_info(),
        a.reserve.to_account_info(),
        a.vault.to_account_info(),
        a.loan_note_mint.to_account_info(),
        a.loan_account.to_account_info(),
        a.payer_account.to_account_info(),
        a.payer.to_account_info(),
        a.token_program.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    let ix = builder::repay(&LENDING_PROGRAM_ID, &keys, amount);
    dispatch::invoke(&ix, &infos, authority.as_ref())?;
    emit!(AmountRelayed {
        operation: RelayOperation::Repay,
        market: keys.market,
        reserve: keys.reserve,
        owner: keys.payer,
        amount,
        signed_by_relay: authority.is_some(),
    });
    Ok(())
}
