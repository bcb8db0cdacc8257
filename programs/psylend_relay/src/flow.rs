//! Precondition-then-action pairs.
//!
//! A [`TwoStep`] is built once from the instruction builders and then either handed to the
//! caller as two instructions for one transaction, or executed here as two CPIs in order.
//! Both paths carry the same instructions.
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;

use crate::authority::RelayAuthority;
use crate::builder::{self, AccrueInterestKeys};
use crate::dispatch;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TwoStep {
    pub precondition: Instruction,
    pub action: Instruction,
}

impl TwoStep {
    pub fn accrue_then(program_id: &Pubkey, accrue: &AccrueInterestKeys, action: Instruction) -> Self {
        Self {
            precondition: builder::accrue_interest(program_id, accrue),
            action,
        }
    }

    /// Manual composition: submit both, in this order, in one transaction.
    pub fn into_instructions(self) -> [Instruction; 2] {
        [self.precondition, self.action]
    }

    /// Composed path. The precondition never needs the owner's authority.
    pub fn execute(
        &self,
        account_infos: &[AccountInfo],
        authority: Option<&RelayAuthority>,
    ) -> Result<()> {
        dispatch::invoke(&self.precondition, account_infos, None)?;
        dispatch::invoke(&self.action, account_infos, authority)
    }
}
