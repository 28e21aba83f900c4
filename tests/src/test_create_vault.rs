use anchor_spl::token::TokenAccount;
use anchor_lang::AccountDeserialize;
use lulo_dex::errors::DexError;
use lulo_dex::pda;

use crate::test_utils::*;

#[test]
#[ignore = "needs a local validator, run through `anchor test`"]
fn test_create_vault() {
    let (program, payer) = setup_client();
    ensure_initialized(&program, payer);

    // Any funded signer may create a vault
    let creator = funded_keypair(&program, payer);
    let mint = create_mint(&program, payer, 6);
    create_vault(&program, &creator, mint).unwrap();

    let (vault, _) = pda::vault_address(&mint);
    let data = program.rpc().get_account_data(&vault).unwrap();
    let vault_account = TokenAccount::try_deserialize(&mut &data[..]).unwrap();
    assert_eq!(vault_account.mint, mint);
    assert_eq!(vault_account.owner, vault);
    assert_eq!(vault_account.amount, 0);

    println!("Create vault test passed!");
}

#[test]
#[ignore = "needs a local validator, run through `anchor test`"]
fn test_create_vault_twice_should_fail() {
    let (program, payer) = setup_client();
    ensure_initialized(&program, payer);

    let mint = create_mint(&program, payer, 9);
    create_vault(&program, payer, mint).unwrap();

    assert_dex_error(
        create_vault(&program, payer, mint),
        DexError::VaultAlreadyExists,
    );
}
