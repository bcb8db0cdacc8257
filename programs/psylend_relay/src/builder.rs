//! Pure instruction builders for the lending program.
//!
//! Each function takes the addresses an instruction touches and returns the `Instruction` with
//! the account order, writability and signer flags the lending program expects. Nothing here
//! reads account data or dispatches anything.
use anchor_lang::prelude::*;
use anchor_lang::solana_program::{instruction::Instruction, system_program, sysvar};
use anchor_spl::token;

use crate::amount::Amount;
use crate::sighash::{global, names};

fn data(name: &str, args: &[&[u8]]) -> Vec<u8> {
    let mut out = global(name).to_vec();
    for arg in args {
        out.extend_from_slice(arg);
    }
    out
}

fn instruction(program_id: &Pubkey, accounts: Vec<AccountMeta>, data: Vec<u8>) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshReserveKeys {
    pub market: Pubkey,
    pub reserve: Pubkey,
    pub pyth_oracle_price: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshPsyfiReserveKeys {
    pub market: Pubkey,
    pub reserve: Pubkey,
    pub psyfi_vault: Pubkey,
    pub pyth_oracle_price: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccrueInterestKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub reserve: Pubkey,
    pub fee_note_vault: Pubkey,
    pub deposit_note_mint: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitObligationKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub borrower: Pubkey,
    pub obligation: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloseObligationKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub owner: Pubkey,
    pub obligation: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitDepositAccountKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub reserve: Pubkey,
    pub deposit_note_mint: Pubkey,
    pub depositor: Pubkey,
    pub payer: Pubkey,
    pub deposit_account: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloseDepositAccountKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub reserve: Pubkey,
    pub vault: Pubkey,
    pub deposit_note_mint: Pubkey,
    pub depositor: Pubkey,
    pub deposit_account: Pubkey,
    /// Receives the remaining tokens and the rent.
    pub receiver_account: Pubkey,
}

/// Shared by `deposit` and `deposit_tokens`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub reserve: Pubkey,
    pub vault: Pubkey,
    pub deposit_note_mint: Pubkey,
    pub depositor: Pubkey,
    pub deposit_account: Pubkey,
    pub deposit_source: Pubkey,
}

/// Shared by `withdraw` and `withdraw_tokens`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub reserve: Pubkey,
    pub vault: Pubkey,
    pub deposit_note_mint: Pubkey,
    pub depositor: Pubkey,
    pub deposit_account: Pubkey,
    pub withdraw_account: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitCollateralAccountKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub obligation: Pubkey,
    pub reserve: Pubkey,
    pub deposit_note_mint: Pubkey,
    pub owner: Pubkey,
    pub collateral_account: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloseCollateralAccountKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub obligation: Pubkey,
    pub owner: Pubkey,
    pub collateral_account: Pubkey,
    pub deposit_account: Pubkey,
}

/// Notes moving between a deposit account and a collateral account, either direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollateralTransferKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub reserve: Pubkey,
    pub obligation: Pubkey,
    pub owner: Pubkey,
    pub deposit_account: Pubkey,
    pub collateral_account: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitLoanAccountKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub obligation: Pubkey,
    pub reserve: Pubkey,
    pub loan_note_mint: Pubkey,
    pub owner: Pubkey,
    pub loan_account: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloseLoanAccountKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub obligation: Pubkey,
    pub owner: Pubkey,
    pub loan_account: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorrowKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub obligation: Pubkey,
    pub reserve: Pubkey,
    pub vault: Pubkey,
    pub loan_note_mint: Pubkey,
    pub borrower: Pubkey,
    pub loan_account: Pubkey,
    pub receiver_account: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepayKeys {
    pub market: Pubkey,
    pub market_authority: Pubkey,
    pub obligation: Pubkey,
    pub reserve: Pubkey,
    pub vault: Pubkey,
    pub loan_note_mint: Pubkey,
    pub loan_account: Pubkey,
    pub payer_account: Pubkey,
    pub payer: Pubkey,
}

pub fn refresh_reserve(program_id: &Pubkey, keys: &RefreshReserveKeys) -> Instruction {
    let accounts = vec![
        AccountMeta::new(keys.market, false),
        AccountMeta::new_readonly(keys.reserve, false),
        AccountMeta::new_readonly(keys.pyth_oracle_price, false),
    ];
    instruction(program_id, accounts, data(names::REFRESH_RESERVE, &[]))
}

pub fn refresh_psyfi_reserve(program_id: &Pubkey, keys: &RefreshPsyfiReserveKeys) -> Instruction {
    let accounts = vec![
        AccountMeta::new(keys.market, false),
        AccountMeta::new_readonly(keys.reserve, false),
        AccountMeta::new_readonly(keys.psyfi_vault, false),
        AccountMeta::new_readonly(keys.pyth_oracle_price, false),
    ];
    instruction(program_id, accounts, data(names::REFRESH_PSYFI_RESERVE, &[]))
}

pub fn accrue_interest(program_id: &Pubkey, keys: &AccrueInterestKeys) -> Instruction {
    let accounts = vec![
        AccountMeta::new(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new(keys.reserve, false),
        AccountMeta::new(keys.fee_note_vault, false),
        AccountMeta::new(keys.deposit_note_mint, false),
        AccountMeta::new_readonly(token::ID, false),
    ];
    instruction(program_id, accounts, data(names::ACCRUE_INTEREST, &[]))
}

pub fn init_obligation(program_id: &Pubkey, keys: &InitObligationKeys, bump: u8) -> Instruction {
    let accounts = vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new(keys.borrower, true),
        AccountMeta::new(keys.obligation, false),
        AccountMeta::new_readonly(token::ID, false),
        AccountMeta::new_readonly(system_program::ID, false),
    ];
    instruction(program_id, accounts, data(names::INIT_OBLIGATION, &[&[bump]]))
}

pub fn close_obligation(program_id: &Pubkey, keys: &CloseObligationKeys) -> Instruction {
    let accounts = vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new(keys.owner, true),
        AccountMeta::new(keys.obligation, false),
    ];
    instruction(program_id, accounts, data(names::CLOSE_OBLIGATION, &[]))
}

pub fn init_deposit_account(
    program_id: &Pubkey,
    keys: &InitDepositAccountKeys,
    bump: u8,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new_readonly(keys.reserve, false),
        AccountMeta::new_readonly(keys.deposit_note_mint, false),
        AccountMeta::new_readonly(keys.depositor, false),
        AccountMeta::new(keys.payer, true),
        AccountMeta::new(keys.deposit_account, false),
        AccountMeta::new_readonly(token::ID, false),
        AccountMeta::new_readonly(system_program::ID, false),
        AccountMeta::new_readonly(sysvar::rent::ID, false),
    ];
    instruction(program_id, accounts, data(names::INIT_DEPOSIT_ACCOUNT, &[&[bump]]))
}

pub fn close_deposit_account(program_id: &Pubkey, keys: &CloseDepositAccountKeys) -> Instruction {
    let accounts = vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new(keys.reserve, false),
        AccountMeta::new(keys.vault, false),
        AccountMeta::new(keys.deposit_note_mint, false),
        AccountMeta::new(keys.depositor, true),
        AccountMeta::new(keys.deposit_account, false),
        AccountMeta::new(keys.receiver_account, false),
        AccountMeta::new_readonly(token::ID, false),
    ];
    instruction(program_id, accounts, data(names::CLOSE_DEPOSIT_ACCOUNT, &[]))
}

fn deposit_metas(keys: &DepositKeys) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new(keys.reserve, false),
        AccountMeta::new(keys.vault, false),
        AccountMeta::new(keys.deposit_note_mint, false),
        AccountMeta::new_readonly(keys.depositor, true),
        AccountMeta::new(keys.deposit_account, false),
        AccountMeta::new(keys.deposit_source, false),
        AccountMeta::new_readonly(token::ID, false),
    ]
}

pub fn deposit(program_id: &Pubkey, keys: &DepositKeys, bump: u8, amount: Amount) -> Instruction {
    let args = data(names::DEPOSIT, &[&[bump], &amount.to_wire()]);
    instruction(program_id, deposit_metas(keys), args)
}

/// Deposit into any token account of the deposit-note mint rather than the depositor's PDA.
pub fn deposit_tokens(program_id: &Pubkey, keys: &DepositKeys, amount: Amount) -> Instruction {
    let args = data(names::DEPOSIT_TOKENS, &[&amount.to_wire()]);
    instruction(program_id, deposit_metas(keys), args)
}

fn withdraw_metas(keys: &WithdrawKeys) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new(keys.reserve, false),
        AccountMeta::new(keys.vault, false),
        AccountMeta::new(keys.deposit_note_mint, false),
        AccountMeta::new_readonly(keys.depositor, true),
        AccountMeta::new(keys.deposit_account, false),
        AccountMeta::new(keys.withdraw_account, false),
    ]
}

pub fn withdraw(program_id: &Pubkey, keys: &WithdrawKeys, bump: u8, amount: Amount) -> Instruction {
    let mut accounts = withdraw_metas(keys);
    // the lending program takes its own id as an account here
    accounts.push(AccountMeta::new_readonly(*program_id, false));
    accounts.push(AccountMeta::new_readonly(token::ID, false));
    let args = data(names::WITHDRAW, &[&[bump], &amount.to_wire()]);
    instruction(program_id, accounts, args)
}

pub fn withdraw_tokens(program_id: &Pubkey, keys: &WithdrawKeys, amount: Amount) -> Instruction {
    let mut accounts = withdraw_metas(keys);
    accounts.push(AccountMeta::new_readonly(token::ID, false));
    let args = data(names::WITHDRAW_TOKENS, &[&amount.to_wire()]);
    instruction(program_id, accounts, args)
}

pub fn init_collateral_account(
    program_id: &Pubkey,
    keys: &InitCollateralAccountKeys,
    bump: u8,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new(keys.obligation, false),
        AccountMeta::new_readonly(keys.reserve, false),
        AccountMeta::new_readonly(keys.deposit_note_mint, false),
        AccountMeta::new(keys.owner, true),
        AccountMeta::new(keys.collateral_account, false),
        AccountMeta::new_readonly(token::ID, false),
        AccountMeta::new_readonly(system_program::ID, false),
        AccountMeta::new_readonly(sysvar::rent::ID, false),
    ];
    instruction(program_id, accounts, data(names::INIT_COLLATERAL_ACCOUNT, &[&[bump]]))
}

pub fn close_collateral_account(
    program_id: &Pubkey,
    keys: &CloseCollateralAccountKeys,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new(keys.obligation, false),
        AccountMeta::new(keys.owner, true),
        AccountMeta::new(keys.collateral_account, false),
        AccountMeta::new(keys.deposit_account, false),
        AccountMeta::new_readonly(token::ID, false),
    ];
    instruction(program_id, accounts, data(names::CLOSE_COLLATERAL_ACCOUNT, &[]))
}

fn collateral_transfer(
    name: &str,
    program_id: &Pubkey,
    keys: &CollateralTransferKeys,
    collateral_bump: u8,
    deposit_bump: u8,
    amount: Amount,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new_readonly(keys.reserve, false),
        AccountMeta::new(keys.obligation, false),
        AccountMeta::new_readonly(keys.owner, true),
        AccountMeta::new(keys.deposit_account, false),
        AccountMeta::new(keys.collateral_account, false),
        AccountMeta::new_readonly(token::ID, false),
    ];
    let args = data(name, &[&[collateral_bump, deposit_bump], &amount.to_wire()]);
    instruction(program_id, accounts, args)
}

pub fn deposit_collateral(
    program_id: &Pubkey,
    keys: &CollateralTransferKeys,
    collateral_bump: u8,
    deposit_bump: u8,
    amount: Amount,
) -> Instruction {
    collateral_transfer(
        names::DEPOSIT_COLLATERAL,
        program_id,
        keys,
        collateral_bump,
        deposit_bump,
        amount,
    )
}

pub fn withdraw_collateral(
    program_id: &Pubkey,
    keys: &CollateralTransferKeys,
    collateral_bump: u8,
    deposit_bump: u8,
    amount: Amount,
) -> Instruction {
    collateral_transfer(
        names::WITHDRAW_COLLATERAL,
        program_id,
        keys,
        collateral_bump,
        deposit_bump,
        amount,
    )
}

pub fn init_loan_account(program_id: &Pubkey, keys: &InitLoanAccountKeys, bump: u8) -> Instruction {
    let accounts = vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new(keys.obligation, false),
        AccountMeta::new_readonly(keys.reserve, false),
        AccountMeta::new_readonly(keys.loan_note_mint, false),
        AccountMeta::new(keys.owner, true),
        AccountMeta::new(keys.loan_account, false),
        AccountMeta::new_readonly(token::ID, false),
        AccountMeta::new_readonly(system_program::ID, false),
        AccountMeta::new_readonly(sysvar::rent::ID, false),
    ];
    instruction(program_id, accounts, data(names::INIT_LOAN_ACCOUNT, &[&[bump]]))
}

pub fn close_loan_account(program_id: &Pubkey, keys: &CloseLoanAccountKeys) -> Instruction {
    let accounts = vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new(keys.obligation, false),
        AccountMeta::new(keys.owner, true),
        AccountMeta::new(keys.loan_account, false),
        AccountMeta::new_readonly(token::ID, false),
    ];
    instruction(program_id, accounts, data(names::CLOSE_LOAN_ACCOUNT, &[]))
}

pub fn borrow(program_id: &Pubkey, keys: &BorrowKeys, bump: u8, amount: Amount) -> Instruction {
    let accounts = vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new(keys.obligation, false),
        AccountMeta::new(keys.reserve, false),
        AccountMeta::new(keys.vault, false),
        AccountMeta::new(keys.loan_note_mint, false),
        AccountMeta::new_readonly(keys.borrower, true),
        AccountMeta::new(keys.loan_account, false),
        AccountMeta::new(keys.receiver_account, false),
        AccountMeta::new_readonly(token::ID, false),
    ];
    let args = data(names::BORROW, &[&[bump], &amount.to_wire()]);
    instruction(program_id, accounts, args)
}

pub fn repay(program_id: &Pubkey, keys: &RepayKeys, amount: Amount) -> Instruction {
    let accounts = vec![
        AccountMeta::new_readonly(keys.market, false),
        AccountMeta::new_readonly(keys.market_authority, false),
        AccountMeta::new(keys.obligation, false),
        AccountMeta::new(keys.reserve, false),
        AccountMeta::new(keys.vault, false),
        AccountMeta::new(keys.loan_note_mint, false),
        AccountMeta::new(keys.loan_account, false),
        AccountMeta::new(keys.payer_account, false),
        AccountMeta::new_readonly(keys.payer, true),
        AccountMeta::new_readonly(token::ID, false),
    ];
    let args = data(names::REPAY, &[&amount.to_wire()]);
    instruction(program_id, accounts, args)
}

/// `msg` on the dummy program; logs the supplied key and nothing else.
pub fn dummy_msg(program_id: &Pubkey, dummy_acc: &Pubkey) -> Instruction {
    let accounts = vec![AccountMeta::new_readonly(*dummy_acc, false)];
    instruction(program_id, accounts, data(names::DUMMY_MSG, &[]))
}
