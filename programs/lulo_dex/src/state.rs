use anchor_lang::prelude::*;

use crate::errors::DexError;

/// Marketplace configuration, one per program.
#[account]
#[derive(InitSpace, Default)]
pub struct GlobalState {
    pub admin: Pubkey,
    /// Fee numerator, applied as `fee / fee_scalar` of every ask.
    pub fee: u64,
    pub fee_scalar: u64,
    pub bump: u8,
}

impl GlobalState {
    pub const SEED_PREFIX: &'static [u8] = b"state";

    /// A zero scalar is never accepted by `initialize`, so it marks fresh data.
    pub fn is_initialized(&self) -> bool {
        self.fee_scalar != 0
    }

    pub fn validate_fee(fee: u64, fee_scalar: u64) -> Result<()> {
        require!(fee_scalar > 0, DexError::InvalidFee);
        require!(fee < fee_scalar, DexError::InvalidFee);
        Ok(())
    }
}

#[account]
#[derive(InitSpace, Default)]
pub struct Listing {
    pub seller: Pubkey,
    /// The NFT for sale.
    pub mint: Pubkey,
    /// The SPL token the seller is paid in.
    pub ask_mint: Pubkey,
    /// Nonce account supplied by the lister, informational only.
    pub contract: Pubkey,
    pub ask: u64,
    pub bump: u8,
}

impl Listing {
    pub const SEED_PREFIX: &'static [u8] = b"listing";

    pub fn is_open(&self) -> bool {
        self.seller != Pubkey::default()
    }
}
