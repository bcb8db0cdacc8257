//! Read-only reporting over lending-program accounts.
//!
//! Values come from the caches the lending program keeps, so they lag by however long ago the
//! reserve was last accrued. Submit `accrue_interest` in the same transaction for exact figures.
use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::error::RelayError;
use crate::network::LENDING_PROGRAM_ID;
use crate::state::{
    notes_to_native, utilization_rate, MarketView, Number, ObligationView, PositionSide,
    ReserveView,
};

#[derive(Accounts)]
pub struct GetCurrentInterest<'info> {
    /// CHECK: owner and layout checked in the handler
    pub market: UncheckedAccount<'info>,
    /// CHECK: owner, layout and market checked in the handler
    pub reserve: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct GetReserveBalance<'info> {
    /// CHECK: owner and layout checked in the handler
    pub market: UncheckedAccount<'info>,
    /// CHECK: owner, layout and market checked in the handler
    pub reserve: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct GetUserBalance<'info> {
    /// CHECK: owner and layout checked in the handler
    pub market: UncheckedAccount<'info>,
    /// CHECK: owner, layout and market checked in the handler
    pub reserve: UncheckedAccount<'info>,
    /// CHECK: owner, layout and market checked in the handler
    pub obligation: UncheckedAccount<'info>,
    /// Deposit notes held outside the obligation, e.g. by `deposit_tokens` custody.
    pub deposit_note_account: Option<Account<'info, TokenAccount>>,
}

fn owned_by_lending(account: &AccountInfo) -> Result<()> {
    require_keys_eq!(*account.owner, LENDING_PROGRAM_ID, RelayError::AccountMismatch);
    Ok(())
}

/// Reserve index after checking that `reserve` is listed under `market` at that index.
fn listed_index(
    market: &MarketView,
    reserve: &ReserveView,
    market_key: &Pubkey,
    reserve_key: &Pubkey,
) -> Result<u16> {
    require_keys_eq!(reserve.market()?, *market_key, RelayError::AccountMismatch);
    let index = reserve.index()?;
    require_keys_eq!(market.reserve_at(index)?, *reserve_key, RelayError::AccountMismatch);
    Ok(index)
}

pub fn current_interest_handler(ctx: Context<GetCurrentInterest>) -> Result<()> {
    let a = &ctx.accounts;
    owned_by_lending(&a.market)?;
    owned_by_lending(&a.reserve)?;
    let market_data = a.market.try_borrow_data()?;
    let reserve_data = a.reserve.try_borrow_data()?;
    let market = MarketView::new(&market_data)?;
    let reserve = ReserveView::new(&reserve_data)?;
    listed_index(&market, &reserve, a.market.key, a.reserve.key)?;

    let debt = reserve.outstanding_debt()?;
    let deposits = reserve.total_deposits()?;
    let utilization = utilization_rate(debt, deposits)?;
    let rate = reserve.rate_curve()?.interest_rate(debt, deposits)?;
    msg!("utilization rate: {}", utilization);
    msg!("interest rate: {}", rate);
    Ok(())
}

pub fn reserve_balance_handler(ctx: Context<GetReserveBalance>) -> Result<()> {
    let a = &ctx.accounts;
    owned_by_lending(&a.market)?;
    owned_by_lending(&a.reserve)?;
    let market_data = a.market.try_borrow_data()?;
    let reserve_data = a.reserve.try_borrow_data()?;
    let market = MarketView::new(&market_data)?;
    let reserve = ReserveView::new(&reserve_data)?;
    let index = listed_index(&market, &reserve, a.market.key, a.reserve.key)?;

    let exponent = reserve.exponent()?;
    let deposits = reserve.total_deposits()?;
    let debt = reserve.outstanding_debt()?;
    let rates = market.note_rates(index)?;
    msg!("vault: {}", reserve.vault()?);
    if let Some(psyfi_vault) = reserve.psyfi_vault()? {
        msg!("psyfi vault: {}", psyfi_vault);
    }
    msg!("accrued until: {}", reserve.accrued_until()?);
    msg!("total deposits: {}", deposits);
    msg!("outstanding debt: {}", debt.as_u64(exponent)?);
    msg!("uncollected fees: {}", reserve.uncollected_fees()?.as_u64(exponent)?);
    msg!("loan origination fee bps: {}", reserve.loan_origination_fee_bps()?);
    msg!("deposit note supply: {}", reserve.total_deposit_notes()?);
    msg!("loan note supply: {}", reserve.total_loan_notes()?);
    msg!("deposit note exchange rate: {}", rates.deposit_note_exchange_rate);
    msg!("loan note exchange rate: {}", rates.loan_note_exchange_rate);
    Ok(())
}

pub fn user_balance_handler(ctx: Context<GetUserBalance>) -> Result<()> {
    let a = &ctx.accounts;
    owned_by_lending(&a.market)?;
    owned_by_lending(&a.reserve)?;
    owned_by_lending(&a.obligation)?;
    let market_data = a.market.try_borrow_data()?;
    let reserve_data = a.reserve.try_borrow_data()?;
    let obligation_data = a.obligation.try_borrow_data()?;
    let market = MarketView::new(&market_data)?;
    let reserve = ReserveView::new(&reserve_data)?;
    let obligation = ObligationView::new(&obligation_data)?;
    let index = listed_index(&market, &reserve, a.market.key, a.reserve.key)?;
    require_keys_eq!(obligation.market()?, a.market.key(), RelayError::AccountMismatch);
    msg!("obligation owner: {}", obligation.owner()?);

    let exponent = reserve.exponent()?;
    let rates = market.note_rates(index)?;
    if let Some(collateral) = obligation.position(PositionSide::Collateral, index)? {
        msg!("collateral notes: {}", collateral.amount);
        msg!(
            "collateral native: {}",
            notes_to_native(collateral.amount, rates.deposit_note_exchange_rate, exponent)?
        );
    }
    if let Some(loan) = obligation.position(PositionSide::Loan, index)? {
        msg!("loan notes: {}", loan.amount);
        msg!(
            "loan native: {}",
            notes_to_native(loan.amount, rates.loan_note_exchange_rate, exponent)?
        );
    }
    if let Some(notes) = &a.deposit_note_account {
        msg!("held deposit notes: {}", notes.amount);
        msg!(
            "held native: {}",
            notes_to_native(
                Number::from_u64(notes.amount),
                rates.deposit_note_exchange_rate,
                exponent
            )?
        );
    }
    Ok(())
}
