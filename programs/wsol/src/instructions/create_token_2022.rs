use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_2022::Token2022,
    token_interface::{mint_to, Mint, MintTo, TokenAccount},
};

use crate::constants::{TOKEN_2022_DECIMALS, TOKEN_2022_INITIAL_SUPPLY, TOKEN_2022_MINT_SEED};

/// Standalone Token-2022 mint owned by the caller. It has its own seed and
/// never touches the storage PDA, the WSOL mint or the vault bookkeeping.
#[derive(Accounts)]
pub struct CreateToken2022<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        init,
        payer = user,
        seeds = [TOKEN_2022_MINT_SEED],
        bump,
        mint::decimals = TOKEN_2022_DECIMALS,
        mint::authority = user,
        mint::freeze_authority = user,
        mint::token_program = token_program,
    )]
    pub mint_2022: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = mint_2022,
        associated_token::authority = user,
        associated_token::token_program = token_program,
    )]
    pub destination: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> CreateToken2022<'info> {
    pub fn mint_initial_supply(&self, amount: u64) -> Result<()> {
        let accounts = MintTo {
            mint: self.mint_2022.to_account_info(),
            to: self.destination.to_account_info(),
            authority: self.user.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), accounts);

        mint_to(cpi_ctx, amount)
    }
}

pub fn handler(ctx: Context<CreateToken2022>) -> Result<()> {
    ctx.accounts.mint_initial_supply(TOKEN_2022_INITIAL_SUPPLY)?;

    msg!("Token-2022 mint created: {}", ctx.accounts.mint_2022.key());
    msg!(
        "Minted {} units to {}",
        TOKEN_2022_INITIAL_SUPPLY,
        ctx.accounts.destination.key()
    );

    Ok(())
}
