#![no_main]

use arbitrary::Arbitrary;
use fuzz_helpers::*;
use libfuzzer_sys::fuzz_target;
use solana_sdk::signature::Signer;
use wsol::error::VaultError;

const HOLDERS: usize = 3;

/// One step against the deployed program
#[derive(Debug, Clone, Arbitrary)]
enum VaultOp {
    Deposit { holder: u8, amount: u64 },
    Withdraw { holder: u8, amount: u64 },
    Transfer { from: u8, to: u8, amount: u64 },
    ApproveTransfer { from: u8, to: u8, amount: u64 },
    /// Lamports sent straight to the storage PDA, outside deposit
    Gift { lamports: u32 },
    /// Skim attempted by a holder (never the authority) or by the authority
    Skim { by_authority: bool, holder: u8 },
}

#[derive(Debug, Clone, Arbitrary)]
struct VaultOpsInput {
    ops: Vec<VaultOp>,
}

fn holder_index(raw: u8) -> usize {
    raw as usize % HOLDERS
}

/// Keeps amounts within what the funded wallets can cover, with zero and
/// over-balance values still reachable.
fn clamp_amount(raw: u64) -> u64 {
    raw % (3 * LAMPORTS_PER_SOL)
}

async fn fuzz_vault_ops_once(input: VaultOpsInput) -> FuzzResult<()> {
    let (mut env, setup) = match setup_complete_environment(HOLDERS, 5 * LAMPORTS_PER_SOL).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Setup failed: {}", e);
            return Ok(()); // Skip this iteration if setup fails
        }
    };
    let program_id = env.program_id;
    let vault = &setup.vault;

    for op in input.ops.into_iter().take(24) {
        let before = read_vault(&mut env.context, vault).await?;

        match op.clone() {
            VaultOp::Deposit { holder, amount } => {
                let holder = &setup.holders[holder_index(holder)];
                let amount = clamp_amount(amount);
                let ix = deposit_ix(&program_id, &holder.pubkey(), amount);

                match send(&mut env.context, &[ix], holder).await {
                    Ok(()) => {
                        let after = read_vault(&mut env.context, vault).await?;
                        assert_eq!(after.lamports, before.lamports + amount, "{:?}", op);
                        assert_eq!(after.supply, before.supply + amount, "{:?}", op);
                    }
                    Err(e) => {
                        assert!(
                            is_vault_error(&e, VaultError::InvalidAmount)
                                || is_vault_error(&e, VaultError::InsufficientFunds),
                            "Unexpected deposit error: {:?} for {:?}",
                            e,
                            op
                        );
                    }
                }
            }
            VaultOp::Withdraw { holder, amount } => {
                let holder = &setup.holders[holder_index(holder)];
                let amount = clamp_amount(amount);
                let ix = withdraw_ix(&program_id, &holder.pubkey(), amount);

                match send(&mut env.context, &[ix], holder).await {
                    Ok(()) => {
                        let after = read_vault(&mut env.context, vault).await?;
                        assert_eq!(before.lamports - after.lamports, amount, "{:?}", op);
                        assert_eq!(before.supply - after.supply, amount, "{:?}", op);
                    }
                    Err(e) => {
                        assert!(
                            is_vault_error(&e, VaultError::InvalidAmount)
                                || is_vault_error(&e, VaultError::InsufficientBalance),
                            "Unexpected withdraw error: {:?} for {:?}",
                            e,
                            op
                        );
                    }
                }
            }
            VaultOp::Transfer { from, to, amount } => {
                let sender = &setup.holders[holder_index(from)];
                let receiver = setup.holders[holder_index(to)].pubkey();
                let amount = clamp_amount(amount);
                let ix = transfer_ix(&program_id, &sender.pubkey(), &receiver, amount);

                let _ = send(&mut env.context, &[ix], sender).await;
                let after = read_vault(&mut env.context, vault).await?;
                assert_eq!(after, before, "Transfer touched the vault: {:?}", op);
            }
            VaultOp::ApproveTransfer { from, to, amount } => {
                let sender = &setup.holders[holder_index(from)];
                let receiver = setup.holders[holder_index(to)].pubkey();
                let ix = approve_transfer_ix(
                    &program_id,
                    &sender.pubkey(),
                    &receiver,
                    clamp_amount(amount),
                );

                let _ = send(&mut env.context, &[ix], sender).await;
                let after = read_vault(&mut env.context, vault).await?;
                assert_eq!(after, before, "Delegated transfer touched the vault: {:?}", op);
            }
            VaultOp::Gift { lamports } => {
                let lamports = lamports as u64 + 1;
                fund_account(&mut env.context, &vault.storage_account, lamports).await?;
            }
            VaultOp::Skim {
                by_authority,
                holder,
            } => {
                let caller = if by_authority {
                    &vault.authority
                } else {
                    &setup.holders[holder_index(holder)]
                };
                let ix = withdraw_only_authority_ix(&program_id, &caller.pubkey());
                let result = send(&mut env.context, &[ix], caller).await;
                let after = read_vault(&mut env.context, vault).await?;

                if by_authority {
                    assert!(result.is_ok(), "Authority skim failed: {:?}", result);
                    assert_eq!(
                        after.lamports,
                        after.rent_reserve + after.supply,
                        "Skim left surplus or took backing"
                    );
                    assert_eq!(after.supply, before.supply);
                } else {
                    let err = result.expect_err("Non-authority skim succeeded");
                    assert!(
                        is_vault_error(&err, VaultError::Unauthorized),
                        "Expected Unauthorized, got {:?}",
                        err
                    );
                    assert_eq!(after, before);
                }
            }
        }

        assert_backing_invariant(&mut env.context, vault).await?;
    }

    // Outstanding supply is exactly what the holders own.
    let mut held = 0u64;
    for holder in &setup.holders {
        held += get_wsol_balance(&mut env.context, &vault.wsol_mint, &holder.pubkey()).await?;
    }
    let supply = get_mint_supply(&mut env.context, &vault.wsol_mint).await?;
    assert_eq!(held, supply, "Holder balances do not sum to supply");

    Ok(())
}

fuzz_target!(|input: VaultOpsInput| {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        if let Err(e) = fuzz_vault_ops_once(input).await {
            eprintln!("Fuzz iteration failed: {}", e);
        }
    });
});
