use anchor_lang::error::ERROR_CODE_OFFSET;
use anchor_lang::AccountDeserialize;
use anchor_lang::Id;
use anchor_lang::InstructionData;
use anchor_lang::ToAccountMetas;
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::metadata::Metadata;
use solana_program_test::*;
use solana_sdk::{
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};
use wsol::error::VaultError;
use wsol::pda::{metadata_address, storage_address, wsol_mint_address};
use wsol::state::InitData;

// Re-export for convenience
pub use solana_program_test::ProgramTestContext;

// Custom error type for fuzzing
pub type FuzzResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Test environment with the wsol and token-metadata programs loaded
pub struct FuzzTestEnv {
    pub program_id: Pubkey,
    pub context: ProgramTestContext,
}

/// Addresses created by `initialize`, plus the key that signed it
#[derive(Debug)]
pub struct VaultAccounts {
    pub storage_account: Pubkey,
    pub wsol_mint: Pubkey,
    pub wsol_metadata: Pubkey,
    pub authority: Keypair,
}

/// Full setup: initialized vault plus funded holders
pub struct CompleteSetup {
    pub vault: VaultAccounts,
    pub holders: Vec<Keypair>,
}

// ============================================================================
// Core Setup Functions
// ============================================================================

/// Loads `wsol.so` and `mpl_token_metadata.so` from `BPF_OUT_DIR` / `tests/fixtures`
pub async fn setup_program_test() -> FuzzTestEnv {
    let program_id = wsol::id();
    let mut program_test = ProgramTest::new("wsol", program_id, None);
    program_test.add_program("mpl_token_metadata", Metadata::id(), None);

    let context = program_test.start_with_context().await;

    FuzzTestEnv {
        program_id,
        context,
    }
}

/// Signs and submits `instructions` with `signer` as the instruction
/// authority. The test payer covers fees so wallet balances move only by
/// what the program transfers. A fresh blockhash keeps repeated identical
/// instructions from being deduplicated.
pub async fn send(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signer: &Keypair,
) -> std::result::Result<(), BanksClientError> {
    let blockhash = context
        .get_new_latest_blockhash()
        .await
        .map_err(BanksClientError::from)?;

    let tx = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        &[&context.payer, signer],
        blockhash,
    );

    context.banks_client.process_transaction(tx).await
}

/// Moves lamports from the test payer to `to`
pub async fn fund_account(
    context: &mut ProgramTestContext,
    to: &Pubkey,
    lamports: u64,
) -> FuzzResult<()> {
    let ix = solana_sdk::system_instruction::transfer(&context.payer.pubkey(), to, lamports);
    let blockhash = context.get_new_latest_blockhash().await?;

    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&context.payer.pubkey()),
        &[&context.payer],
        blockhash,
    );

    context.banks_client.process_transaction(tx).await?;
    Ok(())
}

/// Creates a keypair holding `lamports` plus enough rent for its token account
pub async fn setup_holder(context: &mut ProgramTestContext, lamports: u64) -> FuzzResult<Keypair> {
    let holder = Keypair::new();
    let rent = context.banks_client.get_rent().await?;
    // associated token account rent, plus headroom for the metadata account
    let overhead = rent.minimum_balance(165) + LAMPORTS_PER_SOL / 10;

    fund_account(context, &holder.pubkey(), lamports + overhead).await?;
    Ok(holder)
}

/// Calls `initialize` with a fresh authority
pub async fn setup_vault(
    context: &mut ProgramTestContext,
    program_id: &Pubkey,
) -> FuzzResult<VaultAccounts> {
    let authority = setup_holder(context, LAMPORTS_PER_SOL).await?;

    let (storage_account, _) = storage_address(program_id);
    let (wsol_mint, _) = wsol_mint_address(program_id);
    let (wsol_metadata, _) = metadata_address(&wsol_mint);

    let ix = initialize_ix(program_id, &authority.pubkey(), &wsol_metadata);
    send(context, &[ix], &authority).await?;

    Ok(VaultAccounts {
        storage_account,
        wsol_mint,
        wsol_metadata,
        authority,
    })
}

/// Sets up everything: programs, initialized vault and `holders` funded wallets
pub async fn setup_complete_environment(
    holders: usize,
    lamports_per_holder: u64,
) -> FuzzResult<(FuzzTestEnv, CompleteSetup)> {
    let mut env = setup_program_test().await;

    let vault = setup_vault(&mut env.context, &env.program_id).await?;

    let mut funded = Vec::with_capacity(holders);
    for _ in 0..holders {
        funded.push(setup_holder(&mut env.context, lamports_per_holder).await?);
    }

    Ok((
        env,
        CompleteSetup {
            vault,
            holders: funded,
        },
    ))
}

// ============================================================================
// Instruction Builders
// ============================================================================

pub fn initialize_ix(
    program_id: &Pubkey,
    signer: &Pubkey,
    wsol_metadata: &Pubkey,
) -> Instruction {
    let accounts = wsol::accounts::Initialize {
        signer: *signer,
        storage_account: storage_address(program_id).0,
        wsol_mint: wsol_mint_address(program_id).0,
        wsol_metadata: *wsol_metadata,
        token_program: spl_token::id(),
        token_metadata_program: Metadata::id(),
        system_program: solana_sdk::system_program::ID,
        rent: solana_sdk::sysvar::rent::ID,
    };

    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: wsol::instruction::Initialize {}.data(),
    }
}

pub fn deposit_ix(program_id: &Pubkey, signer: &Pubkey, amount: u64) -> Instruction {
    let wsol_mint = wsol_mint_address(program_id).0;
    let accounts = wsol::accounts::Deposit {
        signer: *signer,
        storage_account: storage_address(program_id).0,
        wsol_mint,
        destination: get_associated_token_address(signer, &wsol_mint),
        token_program: spl_token::id(),
        associated_token_program: anchor_spl::associated_token::ID,
        system_program: solana_sdk::system_program::ID,
    };

    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: wsol::instruction::Deposit { amount }.data(),
    }
}

pub fn withdraw_ix(program_id: &Pubkey, signer: &Pubkey, amount: u64) -> Instruction {
    let wsol_mint = wsol_mint_address(program_id).0;
    let accounts = wsol::accounts::Withdraw {
        signer: *signer,
        storage_account: storage_address(program_id).0,
        wsol_mint,
        source: get_associated_token_address(signer, &wsol_mint),
        token_program: spl_token::id(),
        associated_token_program: anchor_spl::associated_token::ID,
        system_program: solana_sdk::system_program::ID,
    };

    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: wsol::instruction::Withdraw { amount }.data(),
    }
}

fn transfer_accounts(
    program_id: &Pubkey,
    signer: &Pubkey,
    to: &Pubkey,
) -> wsol::accounts::TransferWeth {
    let wsol_mint = wsol_mint_address(program_id).0;
    wsol::accounts::TransferWeth {
        signer: *signer,
        to: *to,
        storage_account: storage_address(program_id).0,
        wsol_mint,
        source: get_associated_token_address(signer, &wsol_mint),
        destination: get_associated_token_address(to, &wsol_mint),
        token_program: spl_token::id(),
        associated_token_program: anchor_spl::associated_token::ID,
        system_program: solana_sdk::system_program::ID,
    }
}

pub fn transfer_ix(program_id: &Pubkey, signer: &Pubkey, to: &Pubkey, amount: u64) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: transfer_accounts(program_id, signer, to).to_account_metas(None),
        data: wsol::instruction::TransferWeth { amount }.data(),
    }
}

pub fn approve_transfer_ix(
    program_id: &Pubkey,
    signer: &Pubkey,
    to: &Pubkey,
    amount: u64,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: transfer_accounts(program_id, signer, to).to_account_metas(None),
        data: wsol::instruction::ApproveTransferWeth { amount }.data(),
    }
}

pub fn withdraw_only_authority_ix(program_id: &Pubkey, authority: &Pubkey) -> Instruction {
    let accounts = wsol::accounts::WithdrawAuthority {
        authority: *authority,
        storage_account: storage_address(program_id).0,
        wsol_mint: wsol_mint_address(program_id).0,
    };

    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: wsol::instruction::WithdrawOnlyAuthority {}.data(),
    }
}

pub fn change_authority_ix(
    program_id: &Pubkey,
    signer: &Pubkey,
    new_authority: Pubkey,
) -> Instruction {
    let accounts = wsol::accounts::ChangeAuthority {
        signer: *signer,
        storage_account: storage_address(program_id).0,
    };

    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: wsol::instruction::ChangeAuthority { new_authority }.data(),
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

/// Program error code carried by a failed transaction, if any
pub fn custom_error_code(err: &BanksClientError) -> Option<u32> {
    match err {
        BanksClientError::TransactionError(TransactionError::InstructionError(
            _,
            InstructionError::Custom(code),
        ))
        | BanksClientError::SimulationError {
            err: TransactionError::InstructionError(_, InstructionError::Custom(code)),
            ..
        } => Some(*code),
        _ => None,
    }
}

pub fn is_vault_error(err: &BanksClientError, expected: VaultError) -> bool {
    custom_error_code(err) == Some(ERROR_CODE_OFFSET + expected as u32)
}

// ============================================================================
// Account State Verification Helpers
// ============================================================================

/// Fetch and return storage state
pub async fn get_storage_state(
    context: &mut ProgramTestContext,
    storage_account: &Pubkey,
) -> FuzzResult<InitData> {
    let account = context
        .banks_client
        .get_account(*storage_account)
        .await?
        .ok_or("Storage account not found")?;

    let state = InitData::try_deserialize(&mut account.data.as_ref())?;
    Ok(state)
}

pub async fn get_lamports(context: &mut ProgramTestContext, account: &Pubkey) -> FuzzResult<u64> {
    Ok(context.banks_client.get_balance(*account).await?)
}

/// Derivative balance of `owner`'s associated token account (0 if absent)
pub async fn get_wsol_balance(
    context: &mut ProgramTestContext,
    wsol_mint: &Pubkey,
    owner: &Pubkey,
) -> FuzzResult<u64> {
    let ata = get_associated_token_address(owner, wsol_mint);
    let Some(account) = context.banks_client.get_account(ata).await? else {
        return Ok(0);
    };

    // Token account structure: amount is at offset 64 (u64)
    if account.data.len() < 72 {
        return Err("Invalid token account data".into());
    }

    let amount = u64::from_le_bytes(
        account.data[64..72]
            .try_into()
            .map_err(|_| "Failed to parse amount")?,
    );

    Ok(amount)
}

/// Get mint supply
pub async fn get_mint_supply(context: &mut ProgramTestContext, mint: &Pubkey) -> FuzzResult<u64> {
    let account = context
        .banks_client
        .get_account(*mint)
        .await?
        .ok_or("Mint account not found")?;

    // Mint account structure: supply is at offset 36 (u64)
    if account.data.len() < 44 {
        return Err("Invalid mint account data".into());
    }

    let supply = u64::from_le_bytes(
        account.data[36..44]
            .try_into()
            .map_err(|_| "Failed to parse supply")?,
    );

    Ok(supply)
}

/// Vault lamports, rent reserve and outstanding supply as seen on chain
pub async fn read_vault(
    context: &mut ProgramTestContext,
    vault: &VaultAccounts,
) -> FuzzResult<wsol::state::VaultSnapshot> {
    let rent = context.banks_client.get_rent().await?;
    let lamports = get_lamports(context, &vault.storage_account).await?;
    let supply = get_mint_supply(context, &vault.wsol_mint).await?;

    Ok(wsol::state::VaultSnapshot::new(
        lamports,
        rent.minimum_balance(InitData::LEN),
        supply,
    ))
}

/// Panics unless reserve and supply are fully backed and the recorded
/// amount matches the mint.
pub async fn assert_backing_invariant(
    context: &mut ProgramTestContext,
    vault: &VaultAccounts,
) -> FuzzResult<()> {
    let snapshot = read_vault(context, vault).await?;
    let storage = get_storage_state(context, &vault.storage_account).await?;

    assert!(
        snapshot.check_backed().is_ok(),
        "CRITICAL: vault under-backed: lamports={} reserve={} supply={}",
        snapshot.lamports,
        snapshot.rent_reserve,
        snapshot.supply
    );
    assert_eq!(
        storage.amount, snapshot.supply,
        "Recorded amount diverged from mint supply"
    );

    Ok(())
}
