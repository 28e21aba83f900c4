use anchor_lang::prelude::*;

#[error_code]
pub enum DexError {
    #[msg("Marketplace state is already initialized")]
    AlreadyInitialized,

    #[msg("Fee must be smaller than a non-zero fee scalar")]
    InvalidFee,

    #[msg("A vault already exists for this mint")]
    VaultAlreadyExists,

    #[msg("Seller already has an open listing for this mint")]
    ListingExists,

    #[msg("Listing not found")]
    ListingNotFound,

    #[msg("Ask must be greater than zero")]
    InvalidAsk,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("NFT vault must hold exactly 1 token of the listed mint")]
    StaleVaultState,

    #[msg("Account does not match its derived address")]
    AddressMismatch,

    #[msg("Mint decimals must be 0 and supply must be 1")]
    InvalidNft,

    #[msg("Token account mint does not match")]
    MintMismatch,

    #[msg("Self buy is not allowed")]
    SelfBuyNotAllowed,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Vault custodies an NFT")]
    CustodyLocked,

    #[msg("Signer is not the marketplace admin")]
    Unauthorized,

    #[msg("Numerical overflow")]
    NumericalOverflow,
}
