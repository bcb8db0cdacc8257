#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

declare_id!("Ev6JrN5HqrKwXhoB9jucLdn51yzzDvWmBHkubXWavRio");

#[program]
pub mod cpi_dummy {
    use super::*;

    pub fn msg(ctx: Context<Msg>) -> Result<()> {
        msg!("dummy_acc: {}", ctx.accounts.dummy_acc.key());
        Ok(())
    }
}

#[derive(Accounts)]
pub struct Msg<'info> {
    /// CHECK: logged only
    pub dummy_acc: UncheckedAccount<'info>,
}
