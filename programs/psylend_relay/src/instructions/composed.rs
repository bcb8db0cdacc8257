use anchor_lang::prelude::*;

use crate::amount::Amount;
use crate::builder;
use crate::flow::TwoStep;
use crate::network::LENDING_PROGRAM_ID;
use crate::RelayOperation;

use super::accrue_interest::*;
use super::deposit::*;
use super::withdraw::*;

/// `accrue_interest` then `deposit` on the same reserve, as two CPIs in one instruction.
#[derive(Accounts)]
pub struct AccrueDeposit<'info> {
    pub accrue: AccrueInterest<'info>,
    pub deposit: Deposit<'info>,
}

/// `accrue_interest` then `withdraw` on the same reserve.
#[derive(Accounts)]
pub struct AccrueWithdraw<'info> {
    pub accrue: AccrueInterest<'info>,
    pub withdraw: Withdraw<'info>,
}

impl<'info> AccrueDeposit<'info> {
    fn account_infos(&self) -> Vec<AccountInfo<'info>> {
        let mut infos = self.accrue.account_infos();
        infos.extend(self.deposit.account_infos());
        infos
    }
}

impl<'info> AccrueWithdraw<'info> {
    fn account_infos(&self) -> Vec<AccountInfo<'info>> {
        let mut infos = self.accrue.account_infos();
        infos.extend(self.withdraw.account_infos());
        infos
    }
}

pub fn deposit_handler(ctx: Context<AccrueDeposit>, bump: u8, amount: Amount) -> Result<()> {
    let a = &ctx.accounts;
    a.accrue.verify_pairs_with(a.deposit.market.key, a.deposit.reserve.key)?;
    let authority = a.deposit.checks().authorize(Some(bump))?;

    let action = builder::deposit(&LENDING_PROGRAM_ID, &a.deposit.keys(), bump, amount);
    TwoStep::accrue_then(&LENDING_PROGRAM_ID, &a.accrue.keys(), action)
        .execute(&a.account_infos(), authority.as_ref())?;
    a.deposit.checks().relayed(RelayOperation::AccrueDeposit, amount, authority.as_ref());
    Ok(())
}

pub fn deposit_tokens_handler(ctx: Context<AccrueDeposit>, amount: Amount) -> Result<()> {
    let a = &ctx.accounts;
    a.accrue.verify_pairs_with(a.deposit.market.key, a.deposit.reserve.key)?;
    let authority = a.deposit.checks().authorize(None)?;

    let action = builder::deposit_tokens(&LENDING_PROGRAM_ID, &a.deposit.keys(), amount);
    TwoStep::accrue_then(&LENDING_PROGRAM_ID, &a.accrue.keys(), action)
        .execute(&a.account_infos(), authority.as_ref())?;
    a.deposit.checks().relayed(RelayOperation::AccrueDepositTokens, amount, authority.as_ref());
    Ok(())
}

pub fn withdraw_handler(ctx: Context<AccrueWithdraw>, bump: u8, amount: Amount) -> Result<()> {
    let a = &ctx.accounts;
    a.accrue.verify_pairs_with(a.withdraw.market.key, a.withdraw.reserve.key)?;
    let authority = a.withdraw.checks().authorize(Some(bump))?;

    let action = builder::withdraw(&LENDING_PROGRAM_ID, &a.withdraw.keys(), bump, amount);
    TwoStep::accrue_then(&LENDING_PROGRAM_ID, &a.accrue.keys(), action)
        .execute(&a.account_infos(), authority.as_ref())?;
    a.withdraw.checks().relayed(RelayOperation::AccrueWithdraw, amount, authority.as_ref());
    Ok(())
}

pub fn withdraw_tokens_handler(ctx: Context<AccrueWithdraw>, amount: Amount) -> Result<()> {
    let a = &ctx.accounts;
    a.accrue.verify_pairs_with(a.withdraw.market.key, a.withdraw.reserve.key)?;
    let authority = a.withdraw.checks().authorize(None)?;

    let action = builder::withdraw_tokens(&LENDING_PROGRAM_ID, &a.withdraw.keys(), amount);
    TwoStep::accrue_then(&LENDING_PROGRAM_ID, &a.accrue.keys(), action)
        .execute(&a.account_infos(), authority.as_ref())?;
    a.withdraw.checks().relayed(RelayOperation::AccrueWithdrawTokens, amount, authority.as_ref());
    Ok(())
}
