use anchor_client::solana_sdk::{signature::Keypair, signer::Signer};
use lulo_dex::errors::DexError;
use lulo_dex::fees::split_ask;
use lulo_dex::pda;

use crate::test_utils::*;

#[test]
#[ignore = "needs a local validator, run through `anchor test`"]
fn test_collect_fees() {
    let (program, payer) = setup_client();
    let listed = open_listing(&program, payer, ASK);
    let state = ensure_initialized(&program, payer);

    buy(
        &program,
        &listed.buyer,
        listed.seller.pubkey(),
        listed.nft_mint,
        listed.buyer_wsol,
        native_mint(),
    )
    .unwrap();

    let split = split_ask(listed.ask, state.fee, state.fee_scalar).unwrap();
    let treasury = Keypair::new();
    let admin_wsol = create_ata(&program, payer, treasury.pubkey(), native_mint());

    collect_fees(&program, payer, native_mint(), admin_wsol, split.fee).unwrap();
    assert_eq!(token_balance(&program, admin_wsol), split.fee);

    println!("Collect fees test passed!");
}

#[test]
#[ignore = "needs a local validator, run through `anchor test`"]
fn test_collect_fees_requires_admin() {
    let (program, payer) = setup_client();
    ensure_initialized(&program, payer);
    let (fee_vault, _) = pda::vault_address(&native_mint());
    ensure_vault(&program, payer, native_mint());

    let intruder = funded_keypair(&program, payer);
    let intruder_wsol = create_ata(&program, payer, intruder.pubkey(), native_mint());

    assert_dex_error(
        collect_fees(&program, &intruder, native_mint(), intruder_wsol, 1),
        DexError::Unauthorized,
    );
    assert!(account_exists(&program, fee_vault));
}

#[test]
#[ignore = "needs a local validator, run through `anchor test`"]
fn test_collect_fees_cannot_take_listed_nft() {
    let (program, payer) = setup_client();
    let listed = open_listing(&program, payer, ASK);
    let admin_nft = create_ata(&program, payer, payer.pubkey(), listed.nft_mint);

    assert_dex_error(
        collect_fees(&program, payer, listed.nft_mint, admin_nft, 1),
        DexError::CustodyLocked,
    );

    let (nft_vault, _) = pda::vault_address(&listed.nft_mint);
    assert_eq!(token_balance(&program, nft_vault), 1);
}

#[test]
#[ignore = "needs a local validator, run through `anchor test`"]
fn test_collect_fees_cannot_take_listed_nft_after_supply_grows() {
    let (program, payer) = setup_client();
    let listed = open_listing(&program, payer, ASK);

    // The mint authority mints a second unit, so the mint no longer looks
    // like an NFT while the first unit is still escrowed.
    let admin_nft = create_ata(&program, payer, payer.pubkey(), listed.nft_mint);
    mint_tokens(&program, payer, listed.nft_mint, admin_nft, 1);

    assert_dex_error(
        collect_fees(&program, payer, listed.nft_mint, admin_nft, 1),
        DexError::CustodyLocked,
    );

    let (nft_vault, _) = pda::vault_address(&listed.nft_mint);
    assert_eq!(token_balance(&program, nft_vault), 1);
    assert_eq!(token_balance(&program, admin_nft), 1);
}
