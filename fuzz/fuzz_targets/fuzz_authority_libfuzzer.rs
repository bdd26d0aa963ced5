#![no_main]

use arbitrary::Arbitrary;
use fuzz_helpers::*;
use libfuzzer_sys::fuzz_target;
use solana_sdk::signature::{Keypair, Signer};
use wsol::error::VaultError;

const CANDIDATES: usize = 3;

/// Privileged calls made by one of the candidate keys (index 0 is the
/// initial authority)
#[derive(Debug, Clone, Arbitrary)]
enum AuthorityOp {
    ChangeAuthority { caller: u8, new_authority: u8 },
    Skim { caller: u8 },
}

#[derive(Debug, Clone, Arbitrary)]
struct AuthorityInput {
    ops: Vec<AuthorityOp>,
    gift: u32,
}

async fn fuzz_authority_once(input: AuthorityInput) -> FuzzResult<()> {
    let (mut env, setup) = match setup_complete_environment(CANDIDATES - 1, LAMPORTS_PER_SOL).await
    {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Setup failed: {}", e);
            return Ok(());
        }
    };
    let program_id = env.program_id;
    let vault = &setup.vault;

    let candidates: Vec<&Keypair> = std::iter::once(&vault.authority)
        .chain(setup.holders.iter())
        .collect();
    let pick = |raw: u8| candidates[raw as usize % CANDIDATES];

    // Model of the single authority slot
    let mut expected_authority = vault.authority.pubkey();

    if input.gift > 0 {
        fund_account(&mut env.context, &vault.storage_account, input.gift as u64).await?;
    }

    for op in input.ops.into_iter().take(16) {
        match op.clone() {
            AuthorityOp::ChangeAuthority {
                caller,
                new_authority,
            } => {
                let caller = pick(caller);
                let new_authority = pick(new_authority).pubkey();
                let ix = change_authority_ix(&program_id, &caller.pubkey(), new_authority);
                let result = send(&mut env.context, &[ix], caller).await;

                if caller.pubkey() == expected_authority {
                    assert!(result.is_ok(), "Authority rejected: {:?} {:?}", op, result);
                    expected_authority = new_authority;
                } else {
                    let err = result.expect_err("Non-authority changed the authority");
                    assert!(
                        is_vault_error(&err, VaultError::Unauthorized),
                        "Expected Unauthorized, got {:?}",
                        err
                    );
                }
            }
            AuthorityOp::Skim { caller } => {
                let caller = pick(caller);
                let ix = withdraw_only_authority_ix(&program_id, &caller.pubkey());
                let result = send(&mut env.context, &[ix], caller).await;

                if caller.pubkey() == expected_authority {
                    assert!(result.is_ok(), "Authority skim rejected: {:?}", result);
                } else {
                    let err = result.expect_err("Non-authority skimmed the vault");
                    assert!(
                        is_vault_error(&err, VaultError::Unauthorized),
                        "Expected Unauthorized, got {:?}",
                        err
                    );
                }
            }
        }

        let storage = get_storage_state(&mut env.context, &vault.storage_account).await?;
        assert_eq!(storage.authority, expected_authority, "Authority slot diverged");
        assert_backing_invariant(&mut env.context, vault).await?;
    }

    Ok(())
}

fuzz_target!(|input: AuthorityInput| {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        if let Err(e) = fuzz_authority_once(input).await {
            eprintln!("Fuzz iteration failed: {}", e);
        }
    });
});
