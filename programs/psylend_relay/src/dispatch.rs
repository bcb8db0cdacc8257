use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::Instruction,
    program::{invoke as invoke_unsigned, invoke_signed},
};

use crate::authority::RelayAuthority;

/// Runs one CPI. With an authority the call is signed with its seeds. The callee's result is
/// returned as is: no retry and no remapping of its error.
pub fn invoke(
    ix: &Instruction,
    account_infos: &[AccountInfo],
    authority: Option<&RelayAuthority>,
) -> Result<()> {
    msg!("cpi:{} signed={}", ix.program_id, authority.is_some());
    match authority {
        Some(authority) => {
            let seeds = authority.signer_seeds();
            invoke_signed(ix, account_infos, &[&seeds[..]])?;
        }
        None => invoke_unsigned(ix, account_infos)?,
    }
    Ok(())
}
