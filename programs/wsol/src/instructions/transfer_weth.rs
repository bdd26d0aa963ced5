use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        approve, transfer_checked, Approve, Mint, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::constants::{STORAGE_SEED, WSOL_MINT_SEED};
use crate::state::{ensure_holder_balance, InitData};

/// Shared by the plain and the delegated transfer.
#[derive(Accounts)]
pub struct TransferWeth<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    /// CHECK: any wallet may receive derivative units
    pub to: UncheckedAccount<'info>,

    #[account(
        seeds = [STORAGE_SEED],
        bump = storage_account.bump,
    )]
    pub storage_account: Account<'info, InitData>,

    #[account(
        seeds = [WSOL_MINT_SEED],
        bump = storage_account.wsol_bump,
    )]
    pub wsol_mint: InterfaceAccount<'info, Mint>,

    /// Created empty for a signer that never held units, so the balance
    /// check reports the shortfall
    #[account(
        init_if_needed,
        payer = signer,
        associated_token::mint = wsol_mint,
        associated_token::authority = signer,
        associated_token::token_program = token_program,
    )]
    pub source: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = signer,
        associated_token::mint = wsol_mint,
        associated_token::authority = to,
        associated_token::token_program = token_program,
    )]
    pub destination: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> TransferWeth<'info> {
    pub fn transfer_from_signer(&self, amount: u64) -> Result<()> {
        let accounts = TransferChecked {
            from: self.source.to_account_info(),
            mint: self.wsol_mint.to_account_info(),
            to: self.destination.to_account_info(),
            authority: self.signer.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), accounts);

        transfer_checked(cpi_ctx, amount, self.wsol_mint.decimals)
    }

    /// Grants the storage PDA an allowance of `amount` over `source`.
    pub fn approve_to_storage_account(&self, amount: u64) -> Result<()> {
        let accounts = Approve {
            to: self.source.to_account_info(),
            delegate: self.storage_account.to_account_info(),
            authority: self.signer.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), accounts);

        approve(cpi_ctx, amount)
    }

    /// Spends the allowance with the storage PDA signing as delegate.
    pub fn transfer_as_delegate(&self, amount: u64) -> Result<()> {
        let bump = [self.storage_account.bump];
        let seeds = &[STORAGE_SEED, &bump[..]];
        let signer_seeds = &[&seeds[..]];

        let accounts = TransferChecked {
            from: self.source.to_account_info(),
            mint: self.wsol_mint.to_account_info(),
            to: self.destination.to_account_info(),
            authority: self.storage_account.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            accounts,
            signer_seeds,
        );

        transfer_checked(cpi_ctx, amount, self.wsol_mint.decimals)
    }
}

pub fn handler(ctx: Context<TransferWeth>, amount: u64) -> Result<()> {
    ctx.accounts.storage_account.ensure_initialized()?;
    ensure_holder_balance(ctx.accounts.source.amount, amount)?;

    ctx.accounts.transfer_from_signer(amount)?;

    msg!(
        "Transferred {} WSOL units from {} to {}",
        amount,
        ctx.accounts.signer.key(),
        ctx.accounts.to.key()
    );

    Ok(())
}

pub fn approve_handler(ctx: Context<TransferWeth>, amount: u64) -> Result<()> {
    ctx.accounts.storage_account.ensure_initialized()?;
    ensure_holder_balance(ctx.accounts.source.amount, amount)?;

    // The token program caps the delegated transfer at the approved allowance.
    ctx.accounts.approve_to_storage_account(amount)?;
    ctx.accounts.transfer_as_delegate(amount)?;

    msg!(
        "Delegated transfer of {} WSOL units from {} to {}",
        amount,
        ctx.accounts.signer.key(),
        ctx.accounts.to.key()
    );

    Ok(())
}
