//! End-to-end flows over the vault bookkeeping.

mod common;

use anchor_lang::prelude::Pubkey;
use common::{Ledger, RENT_RESERVE, SOL, WALLET_RENT};
use wsol::error::VaultError;

fn funded(authority: Pubkey, holders: &[Pubkey]) -> Ledger {
    let mut ledger = Ledger::initialize(authority).unwrap();
    ledger.fund(authority, 5 * SOL);
    for holder in holders {
        ledger.fund(*holder, 5 * SOL);
    }
    ledger
}

#[test]
fn test_deposit_deposit_withdraw() {
    let authority = Pubkey::new_unique();
    let holder_b = Pubkey::new_unique();
    let mut ledger = funded(authority, &[holder_b]);

    ledger.deposit(authority, SOL).unwrap();
    ledger.deposit(holder_b, 2 * SOL).unwrap();
    ledger.withdraw(holder_b, SOL).unwrap();

    assert_eq!(ledger.balance(&holder_b), SOL);
    assert_eq!(ledger.balance(&authority), SOL);
    assert_eq!(ledger.vault.supply, 2 * SOL);
    assert_eq!(ledger.vault.lamports, RENT_RESERVE + 2 * SOL);
    assert_eq!(ledger.storage.amount, 2 * SOL);
}

#[test]
fn test_withdraw_with_zero_balance_fails_without_state_change() {
    let authority = Pubkey::new_unique();
    let holder_c = Pubkey::new_unique();
    let mut ledger = funded(authority, &[holder_c]);
    ledger.deposit(authority, SOL).unwrap();
    let vault_before = ledger.vault;
    let wallet_before = ledger.wallet(&holder_c);

    let err = ledger.withdraw(holder_c, 1).unwrap_err();

    assert!(matches!(err, VaultError::InsufficientBalance));
    assert_eq!(ledger.vault, vault_before);
    assert_eq!(ledger.wallet(&holder_c), wallet_before);
    assert_eq!(ledger.balance(&holder_c), 0);
}

#[test]
fn test_second_initialize_is_rejected() {
    let authority = Pubkey::new_unique();
    let mut ledger = funded(authority, &[]);
    ledger.deposit(authority, SOL).unwrap();

    let err = ledger
        .storage
        .initialize(1, 1, Pubkey::new_unique())
        .unwrap_err();

    assert!(matches!(err, VaultError::AlreadyInitialized));
    assert_eq!(ledger.storage.authority, authority);
    assert_eq!(ledger.storage.amount, SOL);
}

#[test]
fn test_round_trip_restores_balances() {
    let authority = Pubkey::new_unique();
    let holder = Pubkey::new_unique();
    let mut ledger = funded(authority, &[holder]);
    let vault_before = ledger.vault;
    let wallet_before = ledger.wallet(&holder);

    ledger.deposit(holder, 3 * SOL).unwrap();
    ledger.withdraw(holder, 3 * SOL).unwrap();

    assert_eq!(ledger.vault, vault_before);
    assert_eq!(ledger.wallet(&holder), wallet_before);
    assert_eq!(ledger.balance(&holder), 0);
}

#[test]
fn test_deposit_beyond_wallet_fails() {
    let authority = Pubkey::new_unique();
    let mut ledger = funded(authority, &[]);

    let err = ledger.deposit(authority, 6 * SOL).unwrap_err();

    assert!(matches!(err, VaultError::InsufficientFunds));
    assert_eq!(ledger.vault.supply, 0);
}

#[test]
fn test_deposit_leaving_wallet_below_rent_fails() {
    let authority = Pubkey::new_unique();
    let mut ledger = funded(authority, &[]);
    let wallet = ledger.wallet(&authority);

    let err = ledger.deposit(authority, wallet - 500_000).unwrap_err();
    assert!(matches!(err, VaultError::InsufficientFunds));
    assert_eq!(ledger.wallet(&authority), wallet);
    assert_eq!(ledger.vault.supply, 0);

    ledger.deposit(authority, wallet - WALLET_RENT).unwrap();
    assert_eq!(ledger.wallet(&authority), WALLET_RENT);
    assert_eq!(ledger.balance(&authority), wallet - WALLET_RENT);
}

#[test]
fn test_transfer_moves_units_without_touching_vault() {
    let authority = Pubkey::new_unique();
    let sender = Pubkey::new_unique();
    let receiver = Pubkey::new_unique();
    let mut ledger = funded(authority, &[sender]);
    ledger.deposit(sender, 3 * SOL).unwrap();
    let vault_before = ledger.vault;

    ledger.transfer(sender, receiver, SOL).unwrap();

    assert_eq!(ledger.balance(&sender), 2 * SOL);
    assert_eq!(ledger.balance(&receiver), SOL);
    assert_eq!(ledger.vault, vault_before);

    let err = ledger.transfer(receiver, sender, SOL + 1).unwrap_err();
    assert!(matches!(err, VaultError::InsufficientBalance));

    // The receiver can redeem what it was sent.
    ledger.withdraw(receiver, SOL).unwrap();
    assert_eq!(ledger.vault.supply, 2 * SOL);
}

#[test]
fn test_skim_by_non_authority_is_unauthorized() {
    let authority = Pubkey::new_unique();
    let intruder = Pubkey::new_unique();
    let mut ledger = funded(authority, &[intruder]);
    ledger.deposit(intruder, SOL).unwrap();
    ledger.gift(1_000);

    let err = ledger.skim(intruder).unwrap_err();

    assert!(matches!(err, VaultError::Unauthorized));
    assert_eq!(ledger.vault.lamports, RENT_RESERVE + SOL + 1_000);
}

#[test]
fn test_skim_leaves_reserve_and_backing() {
    let authority = Pubkey::new_unique();
    let holder = Pubkey::new_unique();
    let mut ledger = funded(authority, &[holder]);
    ledger.deposit(holder, 2 * SOL).unwrap();
    ledger.gift(12_345);
    let wallet_before = ledger.wallet(&authority);

    let skimmed = ledger.skim(authority).unwrap();

    assert_eq!(skimmed, 12_345);
    assert_eq!(ledger.wallet(&authority), wallet_before + 12_345);
    assert_eq!(ledger.vault.lamports, RENT_RESERVE + 2 * SOL);

    // Every holder can still redeem in full.
    ledger.withdraw(holder, 2 * SOL).unwrap();
    assert_eq!(ledger.vault.lamports, RENT_RESERVE);
}

#[test]
fn test_change_authority_hands_over_skim_rights() {
    let first = Pubkey::new_unique();
    let second = Pubkey::new_unique();
    let mut ledger = funded(first, &[second]);
    ledger.gift(500);

    let err = ledger.change_authority(second, second).unwrap_err();
    assert!(matches!(err, VaultError::Unauthorized));

    ledger.change_authority(first, second).unwrap();
    assert_eq!(ledger.storage.authority, second);

    assert!(matches!(
        ledger.skim(first).unwrap_err(),
        VaultError::Unauthorized
    ));
    assert!(matches!(
        ledger.change_authority(first, first).unwrap_err(),
        VaultError::Unauthorized
    ));
    assert_eq!(ledger.skim(second).unwrap(), 500);
}
