use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::constants::{STORAGE_SEED, WSOL_MINT_SEED};
use crate::error::VaultError;
use crate::events::WithdrawEvent;
use crate::state::{InitData, VaultSnapshot};

#[derive(Accounts)]
pub struct WithdrawAuthority<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [STORAGE_SEED],
        bump = storage_account.bump,
        has_one = authority @ VaultError::Unauthorized,
    )]
    pub storage_account: Account<'info, InitData>,

    /// Read for the outstanding supply the vault must keep backed
    #[account(
        seeds = [WSOL_MINT_SEED],
        bump = storage_account.wsol_bump,
    )]
    pub wsol_mint: InterfaceAccount<'info, Mint>,
}

pub fn handler(ctx: Context<WithdrawAuthority>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    ctx.accounts.storage_account.ensure_authority(&authority)?;

    let vault = ctx.accounts.storage_account.to_account_info();
    let rent_reserve = Rent::get()?.minimum_balance(vault.data_len());
    let snapshot = VaultSnapshot::new(
        vault.lamports(),
        rent_reserve,
        ctx.accounts.wsol_mint.supply,
    );

    let (after, skimmed) = snapshot.skim()?;
    if skimmed == 0 {
        msg!(
            "Nothing to skim: all {} vault lamports are reserved",
            snapshot.lamports
        );
        return Ok(());
    }

    ctx.accounts.storage_account.sub_lamports(skimmed)?;
    ctx.accounts.authority.add_lamports(skimmed)?;

    msg!("Skimmed {} lamports to authority {}", skimmed, authority);
    msg!("Vault lamports: {}", after.lamports);
    msg!("Backing kept: {}", after.supply);

    emit!(WithdrawEvent {
        from: ctx.accounts.storage_account.key(),
        to: authority,
        amount: skimmed,
    });

    Ok(())
}
