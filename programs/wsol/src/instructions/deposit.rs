use anchor_lang::{prelude::*, system_program};
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{mint_to, Mint, MintTo, TokenAccount, TokenInterface},
};

use crate::constants::{STORAGE_SEED, WSOL_MINT_SEED};
use crate::events::DepositEvent;
use crate::state::{ensure_payer_funds, InitData, VaultSnapshot};

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    /// The vault receiving the lamports
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
        mint::authority = storage_account,
    )]
    pub wsol_mint: InterfaceAccount<'info, Mint>,

    /// The depositor's derivative account, created on first deposit
    #[account(
        init_if_needed,
        payer = signer,
        associated_token::mint = wsol_mint,
        associated_token::authority = signer,
        associated_token::token_program = token_program,
    )]
    pub destination: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    pub fn snapshot(&self) -> Result<VaultSnapshot> {
        let vault = self.storage_account.to_account_info();
        let rent_reserve = Rent::get()?.minimum_balance(vault.data_len());
        Ok(VaultSnapshot::new(
            vault.lamports(),
            rent_reserve,
            self.wsol_mint.supply,
        ))
    }

    pub fn transfer_sol_from_signer(&self, amount: u64) -> Result<()> {
        let cpi_accounts = system_program::Transfer {
            from: self.signer.to_account_info(),
            to: self.storage_account.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.system_program.to_account_info(), cpi_accounts);

        system_program::transfer(cpi_ctx, amount)
    }

    pub fn mint_wsol(&self, amount: u64) -> Result<()> {
        let bump = [self.storage_account.bump];
        let seeds = &[STORAGE_SEED, &bump[..]];
        let signer_seeds = &[&seeds[..]];

        let accounts = MintTo {
            mint: self.wsol_mint.to_account_info(),
            to: self.destination.to_account_info(),
            authority: self.storage_account.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            accounts,
            signer_seeds,
        );

        mint_to(cpi_ctx, amount)
    }
}

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    ctx.accounts.storage_account.ensure_initialized()?;

    let payer = ctx.accounts.signer.to_account_info();
    let payer_rent = Rent::get()?.minimum_balance(payer.data_len());
    ensure_payer_funds(payer.lamports(), payer_rent, amount)?;

    let after = ctx.accounts.snapshot()?.after_deposit(amount)?;
    ctx.accounts.storage_account.record_deposit(amount)?;

    ctx.accounts.transfer_sol_from_signer(amount)?;
    ctx.accounts.mint_wsol(amount)?;

    msg!("Deposit successful!");
    msg!("Deposited: {} lamports", amount);
    msg!("Vault lamports: {}", after.lamports);
    msg!("WSOL supply: {}", after.supply);

    emit!(DepositEvent {
        from: ctx.accounts.signer.key(),
        to: ctx.accounts.storage_account.key(),
        amount,
    });

    Ok(())
}
