//! Wrapped SOL.
//!
//! The storage PDA custodies native lamports and is the sole mint authority
//! of the WSOL mint. Every deposited lamport mints one derivative unit and
//! every burned unit releases one lamport, so outstanding supply is always
//! backed by the vault balance above its rent-exempt reserve. The authority
//! recorded in storage may skim anything beyond that backing and hand the
//! role to another key.

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;

use anchor_lang::prelude::*;

pub use constants::*;
pub use events::*;
pub use instructions::*;
pub use state::*;

declare_id!("wso1PkvZVRh2KSdrhBeFFd15E36ggcwuwp8qmdqDVjn");

#[program]
pub mod wsol {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        initialize::handler(ctx)
    }

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        deposit::handler(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        withdraw::handler(ctx, amount)
    }

    pub fn transfer_weth(ctx: Context<TransferWeth>, amount: u64) -> Result<()> {
        transfer_weth::handler(ctx, amount)
    }

    pub fn approve_transfer_weth(ctx: Context<TransferWeth>, amount: u64) -> Result<()> {
        transfer_weth::approve_handler(ctx, amount)
    }

    pub fn withdraw_only_authority(ctx: Context<WithdrawAuthority>) -> Result<()> {
        withdraw_only_authority::handler(ctx)
    }

    pub fn change_authority(ctx: Context<ChangeAuthority>, new_authority: Pubkey) -> Result<()> {
        change_authority::handler(ctx, new_authority)
    }

    pub fn create_token_2022(ctx: Context<CreateToken2022>) -> Result<()> {
        create_token_2022::handler(ctx)
    }
}
