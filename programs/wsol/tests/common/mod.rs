//! In-memory ledger driving the program's bookkeeping the same way the
//! handlers do: snapshot, check, then apply.

#![allow(dead_code)]

use std::collections::HashMap;

use anchor_lang::prelude::Pubkey;
use wsol::error::VaultError;
use wsol::state::{ensure_holder_balance, ensure_payer_funds, InitData, VaultSnapshot};

pub const RENT_RESERVE: u64 = 1_238_880;
pub const SOL: u64 = 1_000_000_000;
/// Rent-exempt minimum of a data-less system wallet.
pub const WALLET_RENT: u64 = 890_880;

pub struct Ledger {
    pub storage: InitData,
    pub vault: VaultSnapshot,
    pub wallets: HashMap<Pubkey, u64>,
    pub wsol: HashMap<Pubkey, u64>,
    pub deposited: u128,
    pub withdrawn: u128,
}

impl Ledger {
    pub fn initialize(authority: Pubkey) -> Result<Self, VaultError> {
        let mut storage = InitData::default();
        storage.initialize(255, 254, authority)?;
        Ok(Self {
            storage,
            vault: VaultSnapshot::new(RENT_RESERVE, RENT_RESERVE, 0),
            wallets: HashMap::new(),
            wsol: HashMap::new(),
            deposited: 0,
            withdrawn: 0,
        })
    }

    pub fn fund(&mut self, who: Pubkey, lamports: u64) {
        *self.wallets.entry(who).or_default() += lamports;
    }

    pub fn wallet(&self, who: &Pubkey) -> u64 {
        self.wallets.get(who).copied().unwrap_or_default()
    }

    pub fn balance(&self, who: &Pubkey) -> u64 {
        self.wsol.get(who).copied().unwrap_or_default()
    }

    pub fn deposit(&mut self, who: Pubkey, amount: u64) -> Result<(), VaultError> {
        self.storage.ensure_initialized()?;
        ensure_payer_funds(self.wallet(&who), WALLET_RENT, amount)?;
        let next = self.vault.after_deposit(amount)?;
        let mut storage = self.storage.clone();
        storage.record_deposit(amount)?;

        self.vault = next;
        self.storage = storage;
        *self.wallets.entry(who).or_default() -= amount;
        *self.wsol.entry(who).or_default() += amount;
        self.deposited += amount as u128;
        Ok(())
    }

    pub fn withdraw(&mut self, who: Pubkey, amount: u64) -> Result<(), VaultError> {
        self.storage.ensure_initialized()?;
        ensure_holder_balance(self.balance(&who), amount)?;
        let next = self.vault.after_withdraw(amount)?;
        let mut storage = self.storage.clone();
        storage.record_withdraw(amount)?;

        self.vault = next;
        self.storage = storage;
        *self.wsol.entry(who).or_default() -= amount;
        *self.wallets.entry(who).or_default() += amount;
        self.withdrawn += amount as u128;
        Ok(())
    }

    pub fn transfer(&mut self, from: Pubkey, to: Pubkey, amount: u64) -> Result<(), VaultError> {
        self.storage.ensure_initialized()?;
        ensure_holder_balance(self.balance(&from), amount)?;

        *self.wsol.entry(from).or_default() -= amount;
        *self.wsol.entry(to).or_default() += amount;
        Ok(())
    }

    /// Lamports sent straight to the storage PDA, bypassing deposit.
    pub fn gift(&mut self, lamports: u64) {
        self.vault.lamports = self.vault.lamports.saturating_add(lamports);
    }

    pub fn skim(&mut self, caller: Pubkey) -> Result<u64, VaultError> {
        self.storage.ensure_authority(&caller)?;
        let (next, skimmed) = self.vault.skim()?;

        self.vault = next;
        *self.wallets.entry(caller).or_default() += skimmed;
        Ok(skimmed)
    }

    pub fn change_authority(&mut self, caller: Pubkey, new: Pubkey) -> Result<(), VaultError> {
        self.storage.change_authority(&caller, new).map(|_| ())
    }

    pub fn outstanding(&self) -> u128 {
        self.deposited - self.withdrawn
    }

    pub fn holder_total(&self) -> u64 {
        self.wsol.values().sum()
    }
}
