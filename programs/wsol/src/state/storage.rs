use anchor_lang::prelude::*;

use crate::error::VaultError;
use crate::events::ChangeAuthorityEvent;

/// Singleton registry at the `storage_pda` address.
///
/// The account is also the lamport vault and the mint/freeze authority of the
/// derivative mint. Serialized layout after the 8-byte discriminator:
/// `amount: u64 | bump: u8 | wsol_bump: u8 | authority: Pubkey`.
#[account]
#[derive(Debug, Default)]
pub struct InitData {
    /// Lamports owed to derivative holders (deposits minus withdrawals)
    pub amount: u64,
    /// Bump seed for the storage PDA
    pub bump: u8,
    /// Bump seed for the derivative mint PDA
    pub wsol_bump: u8,
    /// Identity allowed to skim surplus and reassign itself
    pub authority: Pubkey,
}

impl InitData {
    pub const LEN: usize = 8 + // discriminator
        8 + // amount
        1 + // bump
        1 + // wsol_bump
        32; // authority

    /// Fills a freshly allocated account. An account that already carries an
    /// authority has been initialized before.
    pub fn initialize(
        &mut self,
        bump: u8,
        wsol_bump: u8,
        authority: Pubkey,
    ) -> std::result::Result<ChangeAuthorityEvent, VaultError> {
        if self.authority != Pubkey::default() {
            return Err(VaultError::AlreadyInitialized);
        }
        if authority == Pubkey::default() {
            return Err(VaultError::InvalidAuthority);
        }

        *self = InitData {
            amount: 0,
            bump,
            wsol_bump,
            authority,
        };

        Ok(ChangeAuthorityEvent {
            old: Pubkey::default(),
            new: authority,
        })
    }

    pub fn ensure_initialized(&self) -> std::result::Result<(), VaultError> {
        if self.authority == Pubkey::default() {
            return Err(VaultError::AccountNotFound);
        }
        Ok(())
    }

    pub fn ensure_authority(&self, caller: &Pubkey) -> std::result::Result<(), VaultError> {
        self.ensure_initialized()?;
        if self.authority != *caller {
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }

    pub fn change_authority(
        &mut self,
        caller: &Pubkey,
        new_authority: Pubkey,
    ) -> std::result::Result<ChangeAuthorityEvent, VaultError> {
        self.ensure_authority(caller)?;
        if new_authority == Pubkey::default() {
            return Err(VaultError::InvalidAuthority);
        }

        let old = self.authority;
        self.authority = new_authority;

        Ok(ChangeAuthorityEvent {
            old,
            new: new_authority,
        })
    }

    pub fn record_deposit(&mut self, amount: u64) -> std::result::Result<(), VaultError> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;
        Ok(())
    }

    pub fn record_withdraw(&mut self, amount: u64) -> std::result::Result<(), VaultError> {
        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientFunds)?;
        Ok(())
    }
}
