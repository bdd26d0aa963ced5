use anchor_lang::prelude::*;

#[constant]
pub const STORAGE_SEED: &[u8] = b"storage_pda";

#[constant]
pub const WSOL_MINT_SEED: &[u8] = b"wsol_mint";

#[constant]
pub const TOKEN_2022_MINT_SEED: &[u8] = b"mint_token_2022";

/// Prefix used by the token-metadata program for its metadata PDAs.
pub const METADATA_SEED: &[u8] = b"metadata";

/// Same precision as lamports, so one derivative unit is one lamport.
#[constant]
pub const WSOL_DECIMALS: u8 = 9;

pub const WSOL_NAME: &str = "Wrapped SOL";
pub const WSOL_SYMBOL: &str = "WSOL";
pub const WSOL_URI: &str = "";

pub const TOKEN_2022_DECIMALS: u8 = 9;

/// 10,000,000 whole tokens at 9 decimals.
pub const TOKEN_2022_INITIAL_SUPPLY: u64 = 10_000_000 * 1_000_000_000;
