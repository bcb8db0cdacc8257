// SPDX-License-Identifier: MIT
use anchor_lang::solana_program::hash::hash;

/// Anchor instruction discriminator: first 8 bytes of sha256("<namespace>:<name>").
pub fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{namespace}:{name}");
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    out
}

/// Discriminator of a global (non-state) instruction.
pub fn global(name: &str) -> [u8; 8] {
    sighash("global", name)
}

/// Instruction names exposed by the lending program and the dummy program.
/// SCHEMA FROZEN. Names are hashed into discriminators; a rename breaks every call.
pub mod names {
    pub const REFRESH_RESERVE: &str = "refresh_reserve";
    pub const REFRESH_PSYFI_RESERVE: &str = "refresh_psyfi_reserve";
    pub const ACCRUE_INTEREST: &str = "accrue_interest";
    pub const INIT_OBLIGATION: &str = "init_obligation";
    pub const CLOSE_OBLIGATION: &str = "close_obligation";
    pub const INIT_DEPOSIT_ACCOUNT: &str = "init_deposit_account";
    pub const CLOSE_DEPOSIT_ACCOUNT: &str = "close_deposit_account";
    pub const DEPOSIT: &str = "deposit";
    pub const DEPOSIT_TOKENS: &str = "deposit_tokens";
    pub const WITHDRAW: &str = "withdraw";
    pub const WITHDRAW_TOKENS: &str = "withdraw_tokens";
    pub const INIT_COLLATERAL_ACCOUNT: &str = "init_collateral_account";
    pub const CLOSE_COLLATERAL_ACCOUNT: &str = "close_collateral_account";
    pub const DEPOSIT_COLLATERAL: &str = "deposit_collateral";
    pub const WITHDRAW_COLLATERAL: &str = "withdraw_collateral";
    pub const INIT_LOAN_ACCOUNT: &str = "init_loan_account";
    pub const CLOSE_LOAN_ACCOUNT: &str = "close_loan_account";
    pub const BORROW: &str = "borrow";
    pub const REPAY: &str = "repay";
    pub const DUMMY_MSG: &str = "msg";

    pub const ALL: &[&str] = &[
        REFRESH_RESERVE,
        REFRESH_PSYFI_RESERVE,
        ACCRUE_INTEREST,
        INIT_OBLIGATION,
        CLOSE_OBLIGATION,
        INIT_DEPOSIT_ACCOUNT,
        CLOSE_DEPOSIT_ACCOUNT,
        DEPOSIT,
        DEPOSIT_TOKENS,
        WITHDRAW,
        WITHDRAW_TOKENS,
        INIT_COLLATERAL_ACCOUNT,
        CLOSE_COLLATERAL_ACCOUNT,
        DEPOSIT_COLLATERAL,
        WITHDRAW_COLLATERAL,
        INIT_LOAN_ACCOUNT,
        CLOSE_LOAN_ACCOUNT,
        BORROW,
        REPAY,
    ];
}
