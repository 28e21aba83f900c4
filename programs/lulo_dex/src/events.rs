use anchor_lang::prelude::*;

#[event]
pub struct MarketInitialized {
    pub admin: Pubkey,
    pub fee: u64,
    pub fee_scalar: u64,
}

#[event]
pub struct VaultCreated {
    pub vault: Pubkey,
    pub mint: Pubkey,
    pub payer: Pubkey,
}

// Emitted when an NFT moves into its vault
#[event]
pub struct ListingCreated {
    pub listing: Pubkey,
    pub seller: Pubkey,
    pub mint: Pubkey,
    pub ask_mint: Pubkey,
    pub ask: u64,
}

#[event]
pub struct ListingPurchased {
    pub listing: Pubkey,
    pub buyer: Pubkey,
    pub seller: Pubkey,
    pub mint: Pubkey,
    pub ask: u64,
    pub fee: u64,
    pub seller_proceeds: u64,
}

#[event]
pub struct ProceedsWithdrawn {
    pub escrow: Pubkey,
    pub seller: Pubkey,
    pub amount: u64,
}

#[event]
pub struct FeesCollected {
    pub vault: Pubkey,
    pub admin: Pubkey,
    pub amount: u64,
}
