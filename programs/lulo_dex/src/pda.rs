//! Program-derived addresses.
//!
//! Nothing in the program stores a pointer to a custody account. Every
//! instruction recomputes the address from its seeds and compares it with
//! the account it was handed.

use anchor_lang::prelude::*;

use crate::errors::DexError;
use crate::state::{GlobalState, Listing};

/// Token accounts holding one mint: protocol fees, or a listed NFT.
pub const VAULT_SEED: &[u8] = b"vault";
/// Per seller and payment mint, collects sale proceeds.
pub const ESCROW_SEED: &[u8] = b"escrow";

pub fn state_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GlobalState::SEED_PREFIX], &crate::ID)
}

pub fn vault_address(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, mint.as_ref()], &crate::ID)
}

pub fn listing_address(mint: &Pubkey, seller: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[Listing::SEED_PREFIX, mint.as_ref(), seller.as_ref()],
        &crate::ID,
    )
}

/// Rebuilds a listing address from the bump stored on the listing.
pub fn listing_address_with_bump(mint: &Pubkey, seller: &Pubkey, bump: u8) -> Result<Pubkey> {
    Pubkey::create_program_address(
        &[Listing::SEED_PREFIX, mint.as_ref(), seller.as_ref(), &[bump]],
        &crate::ID,
    )
    .map_err(|_| error!(DexError::ListingNotFound))
}

pub fn escrow_address(seller: &Pubkey, ask_mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[ESCROW_SEED, seller.as_ref(), ask_mint.as_ref()],
        &crate::ID,
    )
}

/// Checks `actual` against a derivation and hands back its bump.
pub fn verify_address(actual: &Pubkey, derived: (Pubkey, u8)) -> Result<u8> {
    let (expected, bump) = derived;
    require_keys_eq!(*actual, expected, DexError::AddressMismatch);
    Ok(bump)
}
