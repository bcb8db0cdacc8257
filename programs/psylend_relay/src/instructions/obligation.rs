use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use crate::authority::authorize_owner;
use crate::builder::{self, CloseObligationKeys, InitObligationKeys};
use crate::dispatch;
use crate::error::RelayError;
use crate::network::LENDING_PROGRAM_ID;
use crate::pda::PdaKind;
use crate::{AccountLifecycle, RelayOperation};

#[derive(Accounts)]
pub struct InitObligation<'info> {
    /// CHECK: checked by the lending program
    pub market: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market`
    pub market_authority: UncheckedAccount<'info>,
    /// CHECK: transaction signer or the relay authority of `market`; pays for the obligation
    #[account(mut)]
    pub borrower: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market` and `borrower`
    #[account(mut)]
    pub obligation: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Closes an obligation that has no collateral and no loans left.
#[derive(Accounts)]
pub struct CloseObligation<'info> {
    /// CHECK: checked by the lending program
    pub market: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market`
    pub market_authority: UncheckedAccount<'info>,
    /// CHECK: transaction signer or the relay authority of `market`; receives the rent
    #[account(mut)]
    pub owner: UncheckedAccount<'info>,
    /// CHECK: re-derived from `market` and `owner`
    #[account(mut)]
    pub obligation: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = LENDING_PROGRAM_ID @ RelayError::InvalidLendingProgram)]
    pub lending_program: UncheckedAccount<'info>,
}

pub fn init_handler(ctx: Context<InitObligation>, bump: u8) -> Result<()> {
    let a = &ctx.accounts;
    let market = a.market.key;
    PdaKind::MarketAuthority { market }.verify(&LENDING_PROGRAM_ID, a.market_authority.key, None)?;
    PdaKind::Obligation { market, owner: a.borrower.key }.verify(
        &LENDING_PROGRAM_ID,
        a.obligation.key,
        Some(bump),
    )?;
    let authority = authorize_owner(&a.borrower, market)?;

    let keys = InitObligationKeys {
        market: *market,
        market_authority: a.market_authority.key(),
        borrower: a.borrower.key(),
        obligation: a.obligation.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.market_authority.to_account_info(),
        a.borrower.to_account_info(),
        a.obligation.to_account_info(),
        a.token_program.to_account_info(),
        a.system_program.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    let ix = builder::init_obligation(&LENDING_PROGRAM_ID, &keys, bump);
    dispatch::invoke(&ix, &infos, authority.as_ref())?;
    emit!(AccountLifecycle {
        operation: RelayOperation::InitObligation,
        market: keys.market,
        owner: keys.borrower,
        account: keys.obligation,
    });
    Ok(())
}

pub fn close_handler(ctx: Context<CloseObligation>) -> Result<()> {
    let a = &ctx.accounts;
    let market = a.market.key;
    PdaKind::MarketAuthority { market }.verify(&LENDING_PROGRAM_ID, a.market_authority.key, None)?;
    PdaKind::Obligation { market, owner: a.owner.key }.verify(
        &LENDING_PROGRAM_ID,
        a.obligation.key,
        None,
    )?;
    let authority = authorize_owner(&a.owner, market)?;

    let keys = CloseObligationKeys {
        market: *market,
        market_authority: a.market_authority.key(),
        owner: a.owner.key(),
        obligation: a.obligation.key(),
    };
    let infos = [
        a.market.to_account_info(),
        a.market_authority.to_account_info(),
        a.owner.to_account_info(),
        a.obligation.to_account_info(),
        a.lending_program.to_account_info(),
    ];
    let ix = builder::close_obligation(&LENDING_PROGRAM_ID, &keys);
    dispatch::invoke(&ix, &infos, authority.as_ref())?;
    emit!(AccountLifecycle {
        operation: RelayOperation::CloseObligation,
        market: keys.market,
        owner: keys.owner,
        account: keys.obligation,
    });
    Ok(())
}
