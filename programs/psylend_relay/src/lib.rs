// SPDX-License-Identifier: MIT
#![allow(unexpected_cfgs)]
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
use anchor_lang::prelude::*;

pub mod amount;
pub mod authority;
pub mod builder;
pub mod dispatch;
pub mod error;
pub mod flow;
pub mod instructions;
pub mod network;
pub mod pda;
pub mod sighash;
pub mod state;

use amount::Amount;
pub use instructions::*;

declare_id!("BVr85VrQhRJAixhUt68bmodrvzv5nQXdUMbuihRWqNGb");

#[program]
pub mod psylend_relay {
    use super::*;

    pub fn refresh_reserve(ctx: Context<RefreshReserve>) -> Result<()> {
        instructions::refresh_reserve::handler(ctx)
    }

    pub fn refresh_psyfi_reserve(ctx: Context<RefreshPsyfiReserve>) -> Result<()> {
        instructions::refresh_reserve::psyfi_handler(ctx)
    }

    pub fn accrue_interest(ctx: Context<AccrueInterest>) -> Result<()> {
        instructions::accrue_interest::handler(ctx)
    }

    pub fn init_obligation(ctx: Context<InitObligation>, bump: u8) -> Result<()> {
        instructions::obligation::init_handler(ctx, bump)
    }

    pub fn close_obligation(ctx: Context<CloseObligation>) -> Result<()> {
        instructions::obligation::close_handler(ctx)
    }

    pub fn init_deposit_account(ctx: Context<InitDepositAccount>, bump: u8) -> Result<()> {
        instructions::deposit_account::init_handler(ctx, bump)
    }

    pub fn close_deposit_account(ctx: Context<CloseDepositAccount>) -> Result<()> {
        instructions::deposit_account::close_handler(ctx)
    }

    pub fn deposit(ctx: Context<Deposit>, bump: u8, amount: Amount) -> Result<()> {
        instructions::deposit::handler(ctx, bump, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, bump: u8, amount: Amount) -> Result<()> {
        instructions::withdraw::handler(ctx, bump, amount)
    }

    /// Deposit whose notes go to a caller-chosen note account instead of the depositor's PDA.
    pub fn deposit_tokens(ctx: Context<Deposit>, amount: Amount) -> Result<()> {
        instructions::deposit::tokens_handler(ctx, amount)
    }

    pub fn withdraw_tokens(ctx: Context<Withdraw>, amount: Amount) -> Result<()> {
        instructions::withdraw::tokens_handler(ctx, amount)
    }

    pub fn init_collateral_account(ctx: Context<InitCollateralAccount>, bump: u8) -> Result<()> {
        instructions::collateral::init_handler(ctx, bump)
    }

    pub fn close_collateral_account(ctx: Context<CloseCollateralAccount>) -> Result<()> {
        instructions::collateral::close_handler(ctx)
    }

    pub fn deposit_collateral(
        ctx: Context<CollateralTransfer>,
        collateral_bump: u8,
        deposit_bump: u8,
        amount: Amount,
    ) -> Result<()> {
        instructions::collateral::deposit_handler(ctx, collateral_bump, deposit_bump, amount)
    }

    pub fn withdraw_collateral(
        ctx: Context<CollateralTransfer>,
        collateral_bump: u8,
        deposit_bump: u8,
        amount: Amount,
    ) -> Result<()> {
        instructions::collateral::withdraw_handler(ctx, collateral_bump, deposit_bump, amount)
    }

    pub fn init_loan_account(ctx: Context<InitLoanAccount>, bump: u8) -> Result<()> {
        instructions::loan::init_handler(ctx, bump)
    }

    pub fn close_loan_account(ctx: Context<CloseLoanAccount>) -> Result<()> {
        instructions::loan::close_handler(ctx)
    }

    pub fn borrow(ctx: Context<Borrow>, bump: u8, amount: Amount) -> Result<()> {
        instructions::loan::borrow_handler(ctx, bump, amount)
    }

    pub fn repay(ctx: Context<Repay>, amount: Amount) -> Result<()> {
        instructions::loan::repay_handler(ctx, amount)
    }

    /// Accrues the reserve, then deposits, as two CPIs.
    pub fn accrue_deposit(ctx: Context<AccrueDeposit>, bump: u8, amount: Amount) -> Result<()> {
        instructions::composed::deposit_handler(ctx, bump, amount)
    }

    pub fn accrue_withdraw(ctx: Context<AccrueWithdraw>, bump: u8, amount: Amount) -> Result<()> {
        instructions::composed::withdraw_handler(ctx, bump, amount)
    }

    pub fn accrue_deposit_tokens(ctx: Context<AccrueDeposit>, amount: Amount) -> Result<()> {
        instructions::composed::deposit_tokens_handler(ctx, amount)
    }

    pub fn accrue_withdraw_tokens(ctx: Context<AccrueWithdraw>, amount: Amount) -> Result<()> {
        instructions::composed::withdraw_tokens_handler(ctx, amount)
    }

    pub fn get_current_interest(ctx: Context<GetCurrentInterest>) -> Result<()> {
        instructions::diagnostics::current_interest_handler(ctx)
    }

    pub fn get_reserve_balance(ctx: Context<GetReserveBalance>) -> Result<()> {
        instructions::diagnostics::reserve_balance_handler(ctx)
    }

    pub fn get_user_balance(ctx: Context<GetUserBalance>) -> Result<()> {
        instructions::diagnostics::user_balance_handler(ctx)
    }

    pub fn dummy_cpi(ctx: Context<DummyCpi>) -> Result<()> {
        instructions::dummy_cpi::handler(ctx)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayOperation {
    InitObligation,
    CloseObligation,
    InitDepositAccount,
    CloseDepositAccount,
    Deposit,
    DepositTokens,
    Withdraw,
    WithdrawTokens,
    InitCollateralAccount,
    CloseCollateralAccount,
    DepositCollateral,
    WithdrawCollateral,
    InitLoanAccount,
    CloseLoanAccount,
    Borrow,
    Repay,
    AccrueDeposit,
    AccrueWithdraw,
    AccrueDepositTokens,
    AccrueWithdrawTokens,
}

/// SCHEMA FROZEN. Do not reorder/rename. Bump with V2 if changes are required.
#[event]
pub struct AmountRelayed {
    pub operation: RelayOperation,
    pub market: Pubkey,
    pub reserve: Pubkey,
    pub owner: Pubkey,
    pub amount: Amount,
    /// The CPI was signed with the market's relay authority seeds.
    pub signed_by_relay: bool,
}

/// SCHEMA FROZEN. Do not reorder/rename. Bump with V2 if changes are required.
#[event]
pub struct AccountLifecycle {
    pub operation: RelayOperation,
    pub market: Pubkey,
    pub owner: Pubkey,
    pub account: Pubkey,
}

/// Exposed schema snapshots (field names and order) for tests and tooling
pub const AMOUNT_RELAYED_FIELDS: &[&str] = &[
    "operation",
    "market",
    "reserve",
    "owner",
    "amount",
    "signed_by_relay",
];

pub const ACCOUNT_LIFECYCLE_FIELDS: &[&str] = &["operation", "market", "owner", "account"];
