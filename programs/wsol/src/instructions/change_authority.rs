use anchor_lang::prelude::*;

use crate::constants::STORAGE_SEED;
use crate::state::InitData;

#[derive(Accounts)]
pub struct ChangeAuthority<'info> {
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [STORAGE_SEED],
        bump = storage_account.bump,
    )]
    pub storage_account: Account<'info, InitData>,
}

pub fn handler(ctx: Context<ChangeAuthority>, new_authority: Pubkey) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let event = ctx
        .accounts
        .storage_account
        .change_authority(&signer, new_authority)?;

    msg!("Authority changed!");
    msg!("Previous authority: {}", event.old);
    msg!("New authority: {}", event.new);

    emit!(event);

    Ok(())
}
