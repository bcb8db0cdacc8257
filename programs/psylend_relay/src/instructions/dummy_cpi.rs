use anchor_lang::prelude::*;

use crate::builder;
use crate::dispatch;
use crate::error::RelayError;
use crate::network::DUMMY_PROGRAM_ID;

/// Wiring check against a program that only logs.
#[derive(Accounts)]
pub struct DummyCpi<'info> {
    /// CHECK: only logged by the callee
    pub dummy_acc: UncheckedAccount<'info>,
    /// CHECK: address constraint
    #[account(address = DUMMY_PROGRAM_ID @ RelayError::InvalidDummyProgram)]
    pub dummy_program: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<DummyCpi>) -> Result<()> {
    let a = &ctx.accounts;
    let ix = builder::dummy_msg(&DUMMY_PROGRAM_ID, a.dummy_acc.key);
    dispatch::invoke(
        &ix,
        &[a.dummy_acc.to_account_info(), a.dummy_program.to_account_info()],
        None,
    )
}
