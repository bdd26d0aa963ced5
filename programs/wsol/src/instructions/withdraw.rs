use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{burn, Burn, Mint, TokenAccount, TokenInterface},
};

use crate::constants::{STORAGE_SEED, WSOL_MINT_SEED};
use crate::events::WithdrawEvent;
use crate::state::{ensure_holder_balance, InitData, VaultSnapshot};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [STORAGE_SEED],
        bump = storage_account.bump,
    )]
    pub storage_account: Account<'info, InitData>,

    #[account(
        mut,
        seeds = [WSOL_MINT_SEED],
        bump = storage_account.wsol_bump,
    )]
    pub wsol_mint: InterfaceAccount<'info, Mint>,

    /// The redeemer's derivative account to burn from. Created empty for a
    /// signer that never held units, so the balance check reports the shortfall
    #[account(
        init_if_needed,
        payer = signer,
        associated_token::mint = wsol_mint,
        associated_token::authority = signer,
        associated_token::token_program = token_program,
    )]
    pub source: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Withdraw<'info> {
    pub fn snapshot(&self) -> Result<VaultSnapshot> {
        let vault = self.storage_account.to_account_info();
        let rent_reserve = Rent::get()?.minimum_balance(vault.data_len());
        Ok(VaultSnapshot::new(
            vault.lamports(),
            rent_reserve,
            self.wsol_mint.supply,
        ))
    }

    pub fn burn_wsol(&self, amount: u64) -> Result<()> {
        let accounts = Burn {
            mint: self.wsol_mint.to_account_info(),
            from: self.source.to_account_info(),
            authority: self.signer.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), accounts);

        burn(cpi_ctx, amount)
    }

    /// The storage PDA is program-owned, so lamports move without a CPI.
    pub fn release_lamports(&mut self, amount: u64) -> Result<()> {
        self.storage_account.sub_lamports(amount)?;
        self.signer.add_lamports(amount)?;
        Ok(())
    }
}

pub fn handler(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    ctx.accounts.storage_account.ensure_initialized()?;
    ensure_holder_balance(ctx.accounts.source.amount, amount)?;

    let after = ctx.accounts.snapshot()?.after_withdraw(amount)?;
    ctx.accounts.storage_account.record_withdraw(amount)?;

    ctx.accounts.burn_wsol(amount)?;
    ctx.accounts.release_lamports(amount)?;

    msg!("Withdraw successful!");
    msg!("Withdrawn: {} lamports", amount);
    msg!("Vault lamports: {}", after.lamports);
    msg!("WSOL supply: {}", after.supply);

    emit!(WithdrawEvent {
        from: ctx.accounts.storage_account.key(),
        to: ctx.accounts.signer.key(),
        amount,
    });

    Ok(())
}
