use anchor_lang::prelude::*;

#[error_code]
pub enum VaultError {
    #[msg("Storage account is already initialized")]
    AlreadyInitialized,
    #[msg("Only the current authority can perform this action")]
    Unauthorized,
    #[msg("Insufficient lamports to cover the requested amount")]
    InsufficientFunds,
    #[msg("Insufficient derivative token balance")]
    InsufficientBalance,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Metadata account does not match the derived metadata address")]
    InvalidMetadataAddress,
    #[msg("Required account has not been initialized")]
    AccountNotFound,
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Authority cannot be the default public key")]
    InvalidAuthority,
}
