use anchor_lang::prelude::*;
use anchor_spl::{
    metadata::{
        create_metadata_accounts_v3, mpl_token_metadata::types::DataV2,
        CreateMetadataAccountsV3, Metadata,
    },
    token_interface::{Mint, TokenInterface},
};

use crate::constants::{
    STORAGE_SEED, WSOL_DECIMALS, WSOL_MINT_SEED, WSOL_NAME, WSOL_SYMBOL, WSOL_URI,
};
use crate::error::VaultError;
use crate::pda::metadata_address;
use crate::state::InitData;

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Pays for every account created here and becomes the first authority
    #[account(mut)]
    pub signer: Signer<'info>,

    /// Registry, lamport vault and mint authority in one PDA.
    /// `init_if_needed` lets the handler report a second call as
    /// `AlreadyInitialized` instead of a bare system-program error.
    #[account(
        init_if_needed,
        payer = signer,
        space = InitData::LEN,
        seeds = [STORAGE_SEED],
        bump
    )]
    pub storage_account: Account<'info, InitData>,

    /// Derivative mint, owned entirely by the storage PDA
    #[account(
        init_if_needed,
        payer = signer,
        seeds = [WSOL_MINT_SEED],
        bump,
        mint::decimals = WSOL_DECIMALS,
        mint::authority = storage_account,
        mint::freeze_authority = storage_account,
        mint::token_program = token_program,
    )]
    pub wsol_mint: InterfaceAccount<'info, Mint>,

    /// CHECK: created by the token-metadata program; the address is compared
    /// against the derived metadata PDA in the handler
    #[account(mut)]
    pub wsol_metadata: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub token_metadata_program: Program<'info, Metadata>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> Initialize<'info> {
    pub fn create_wsol_metadata(&self) -> Result<()> {
        let bump = [self.storage_account.bump];
        let seeds = &[STORAGE_SEED, &bump[..]];
        let signer_seeds = &[&seeds[..]];

        let accounts = CreateMetadataAccountsV3 {
            metadata: self.wsol_metadata.to_account_info(),
            mint: self.wsol_mint.to_account_info(),
            mint_authority: self.storage_account.to_account_info(),
            payer: self.signer.to_account_info(),
            update_authority: self.storage_account.to_account_info(),
            system_program: self.system_program.to_account_info(),
            rent: self.rent.to_account_info(),
        };

        let cpi_ctx = CpiContext::new_with_signer(
            self.token_metadata_program.to_account_info(),
            accounts,
            signer_seeds,
        );

        let data = DataV2 {
            name: WSOL_NAME.to_string(),
            symbol: WSOL_SYMBOL.to_string(),
            uri: WSOL_URI.to_string(),
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        };

        // immutable, storage PDA signs as update authority, no collection
        create_metadata_accounts_v3(cpi_ctx, data, false, true, None)?;

        Ok(())
    }
}

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let (expected_metadata, _) = metadata_address(&ctx.accounts.wsol_mint.key());
    require_keys_eq!(
        ctx.accounts.wsol_metadata.key(),
        expected_metadata,
        VaultError::InvalidMetadataAddress
    );

    let storage_bump = ctx.bumps.storage_account;
    let mint_bump = ctx.bumps.wsol_mint;
    let authority = ctx.accounts.signer.key();

    let event = ctx
        .accounts
        .storage_account
        .initialize(storage_bump, mint_bump, authority)?;

    ctx.accounts.create_wsol_metadata()?;

    msg!("WSOL initialized!");
    msg!("Storage account: {}", ctx.accounts.storage_account.key());
    msg!("WSOL mint: {}", ctx.accounts.wsol_mint.key());
    msg!("WSOL metadata: {}", ctx.accounts.wsol_metadata.key());
    msg!("Authority: {}", authority);

    emit!(event);

    Ok(())
}
