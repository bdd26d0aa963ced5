use anchor_lang::prelude::*;

#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct DepositEvent {
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
}

#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct WithdrawEvent {
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
}

#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct ChangeAuthorityEvent {
    pub old: Pubkey,
    pub new: Pubkey,
}
