//! Lamport custody rules for the storage PDA.
//!
//! The vault balance splits into the rent-exempt reserve, the collateral
//! backing every outstanding derivative unit, and whatever surplus arrived
//! on top of that (direct transfers, rounding from fees). Handlers take a
//! fresh snapshot of all three on every instruction and apply one of the
//! transitions below before touching any account.

use crate::error::VaultError;

type VaultResult<T> = std::result::Result<T, VaultError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultSnapshot {
    /// Lamports currently held by the storage PDA
    pub lamports: u64,
    /// Minimum balance that keeps the storage PDA alive
    pub rent_reserve: u64,
    /// Outstanding derivative supply
    pub supply: u64,
}

impl VaultSnapshot {
    pub fn new(lamports: u64, rent_reserve: u64, supply: u64) -> Self {
        Self {
            lamports,
            rent_reserve,
            supply,
        }
    }

    /// Lamports that must stay in the vault: reserve plus full backing.
    pub fn backing_required(&self) -> VaultResult<u64> {
        self.rent_reserve
            .checked_add(self.supply)
            .ok_or(VaultError::Overflow)
    }

    /// Lamports above the rent reserve, i.e. the most a withdrawal can move.
    pub fn withdrawable(&self) -> u64 {
        self.lamports.saturating_sub(self.rent_reserve)
    }

    /// Lamports the authority may skim without touching backing collateral.
    pub fn surplus(&self) -> VaultResult<u64> {
        Ok(self.lamports.saturating_sub(self.backing_required()?))
    }

    pub fn check_backed(&self) -> VaultResult<()> {
        if self.lamports < self.backing_required()? {
            return Err(VaultError::InsufficientFunds);
        }
        Ok(())
    }

    pub fn after_deposit(self, amount: u64) -> VaultResult<Self> {
        if amount == 0 {
            return Err(VaultError::InvalidAmount);
        }

        Ok(Self {
            lamports: self
                .lamports
                .checked_add(amount)
                .ok_or(VaultError::Overflow)?,
            supply: self
                .supply
                .checked_add(amount)
                .ok_or(VaultError::Overflow)?,
            ..self
        })
    }

    pub fn after_withdraw(self, amount: u64) -> VaultResult<Self> {
        if amount == 0 {
            return Err(VaultError::InvalidAmount);
        }
        if amount > self.withdrawable() {
            return Err(VaultError::InsufficientFunds);
        }

        Ok(Self {
            lamports: self.lamports - amount,
            supply: self
                .supply
                .checked_sub(amount)
                .ok_or(VaultError::InsufficientBalance)?,
            ..self
        })
    }

    /// Removes the surplus and returns it along with the resulting snapshot.
    pub fn skim(self) -> VaultResult<(Self, u64)> {
        let surplus = self.surplus()?;
        let next = Self {
            lamports: self.lamports - surplus,
            ..self
        };
        Ok((next, surplus))
    }
}

/// A payer may either drain its whole balance or keep at least
/// `rent_minimum` lamports behind.
pub fn ensure_payer_funds(lamports: u64, rent_minimum: u64, amount: u64) -> VaultResult<()> {
    if amount == 0 {
        return Err(VaultError::InvalidAmount);
    }
    if amount == lamports {
        return Ok(());
    }
    if lamports.saturating_sub(rent_minimum) < amount {
        return Err(VaultError::InsufficientFunds);
    }
    Ok(())
}

/// A holder must own at least `amount` derivative units.
pub fn ensure_holder_balance(held: u64, amount: u64) -> VaultResult<()> {
    if amount == 0 {
        return Err(VaultError::InvalidAmount);
    }
    if held < amount {
        return Err(VaultError::InsufficientBalance);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RENT: u64 = 1_238_880;
    const SOL: u64 = 1_000_000_000;
    const WALLET_RENT: u64 = 890_880;

    fn empty_vault() -> VaultSnapshot {
        VaultSnapshot::new(RENT, RENT, 0)
    }

    #[test]
    fn deposit_moves_lamports_and_supply_by_exact_amount() {
        let before = empty_vault();
        let after = before.after_deposit(SOL).unwrap();

        assert_eq!(after.lamports, before.lamports + SOL);
        assert_eq!(after.supply, before.supply + SOL);
        assert_eq!(after.rent_reserve, RENT);
        after.check_backed().unwrap();
    }

    #[test]
    fn deposit_then_withdraw_restores_vault() {
        let before = empty_vault().after_deposit(3 * SOL).unwrap();
        let after = before
            .after_deposit(SOL)
            .unwrap()
            .after_withdraw(SOL)
            .unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn zero_amounts_are_rejected() {
        assert!(matches!(
            empty_vault().after_deposit(0).unwrap_err(),
            VaultError::InvalidAmount
        ));
        assert!(matches!(
            empty_vault().after_withdraw(0).unwrap_err(),
            VaultError::InvalidAmount
        ));
    }

    #[test]
    fn deposit_overflowing_supply_is_rejected() {
        let vault = VaultSnapshot::new(RENT, RENT, u64::MAX - 1);
        assert!(matches!(
            vault.after_deposit(2).unwrap_err(),
            VaultError::Overflow
        ));
    }

    #[test]
    fn withdraw_never_dips_into_rent_reserve() {
        let vault = empty_vault().after_deposit(SOL).unwrap();
        assert_eq!(vault.withdrawable(), SOL);

        assert!(matches!(
            vault.after_withdraw(SOL + 1).unwrap_err(),
            VaultError::InsufficientFunds
        ));

        let drained = vault.after_withdraw(SOL).unwrap();
        assert_eq!(drained.lamports, RENT);
        assert_eq!(drained.supply, 0);
    }

    #[test]
    fn withdraw_from_underfunded_vault_fails() {
        // Reserve only, but a stale supply figure claims backing exists.
        let vault = VaultSnapshot::new(RENT, RENT, SOL);
        assert!(matches!(
            vault.after_withdraw(1).unwrap_err(),
            VaultError::InsufficientFunds
        ));
    }

    #[test]
    fn skim_takes_only_the_surplus() {
        let vault = empty_vault().after_deposit(2 * SOL).unwrap();
        let gifted = VaultSnapshot {
            lamports: vault.lamports + 500,
            ..vault
        };

        let (after, skimmed) = gifted.skim().unwrap();

        assert_eq!(skimmed, 500);
        assert_eq!(after.lamports, RENT + 2 * SOL);
        assert_eq!(after.supply, 2 * SOL);
        after.check_backed().unwrap();
    }

    #[test]
    fn skim_without_surplus_moves_nothing() {
        let vault = empty_vault().after_deposit(SOL).unwrap();
        let (after, skimmed) = vault.skim().unwrap();
        assert_eq!(skimmed, 0);
        assert_eq!(after, vault);
    }

    #[test]
    fn skim_on_underbacked_vault_moves_nothing() {
        let vault = VaultSnapshot::new(RENT + 10, RENT, 20);
        assert_eq!(vault.surplus().unwrap(), 0);
        assert!(vault.check_backed().is_err());
    }

    #[test]
    fn payer_and_holder_checks() {
        ensure_payer_funds(SOL, WALLET_RENT, SOL).unwrap();
        assert!(matches!(
            ensure_payer_funds(SOL - 1, WALLET_RENT, SOL).unwrap_err(),
            VaultError::InsufficientFunds
        ));
        assert!(matches!(
            ensure_payer_funds(SOL, WALLET_RENT, 0).unwrap_err(),
            VaultError::InvalidAmount
        ));

        ensure_holder_balance(5, 5).unwrap();
        assert!(matches!(
            ensure_holder_balance(0, 1).unwrap_err(),
            VaultError::InsufficientBalance
        ));
        assert!(matches!(
            ensure_holder_balance(5, 0).unwrap_err(),
            VaultError::InvalidAmount
        ));
    }

    #[test]
    fn payer_cannot_be_left_below_rent() {
        let lamports = 5 * SOL;

        // Leaving exactly the minimum behind is fine.
        ensure_payer_funds(lamports, WALLET_RENT, lamports - WALLET_RENT).unwrap();

        // Anything between zero and the minimum would strand the payer.
        assert!(matches!(
            ensure_payer_funds(lamports, WALLET_RENT, lamports - WALLET_RENT + 1).unwrap_err(),
            VaultError::InsufficientFunds
        ));
        assert!(matches!(
            ensure_payer_funds(lamports, WALLET_RENT, lamports - 500_000).unwrap_err(),
            VaultError::InsufficientFunds
        ));
        assert!(matches!(
            ensure_payer_funds(lamports, WALLET_RENT, lamports - 1).unwrap_err(),
            VaultError::InsufficientFunds
        ));

        // A full drain closes the wallet instead.
        ensure_payer_funds(lamports, WALLET_RENT, lamports).unwrap();
        assert!(matches!(
            ensure_payer_funds(lamports, WALLET_RENT, lamports + 1).unwrap_err(),
            VaultError::InsufficientFunds
        ));
    }
}
