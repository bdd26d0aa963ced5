//! Address derivations shared by the program and its clients.
//!
//! Every piece of program state lives at a PDA derived from a fixed seed, so
//! anything holding the program id can locate it without a lookup table.

use anchor_lang::prelude::*;
use anchor_lang::Id;
use anchor_spl::metadata::Metadata;

use crate::constants::{METADATA_SEED, STORAGE_SEED, TOKEN_2022_MINT_SEED, WSOL_MINT_SEED};

/// Storage account, which doubles as the lamport vault and mint authority.
pub fn storage_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STORAGE_SEED], program_id)
}

pub fn wsol_mint_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[WSOL_MINT_SEED], program_id)
}

pub fn token_2022_mint_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TOKEN_2022_MINT_SEED], program_id)
}

/// Metadata account the token-metadata program keeps for `mint`.
pub fn metadata_address(mint: &Pubkey) -> (Pubkey, u8) {
    let metadata_program = Metadata::id();
    Pubkey::find_program_address(
        &[METADATA_SEED, metadata_program.as_ref(), mint.as_ref()],
        &metadata_program,
    )
}
