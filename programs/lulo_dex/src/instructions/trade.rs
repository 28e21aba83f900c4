use anchor_lang::prelude::*;
use anchor_lang::AccountsClose;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::custody::{self, Custody, OpenCustody};
use crate::errors::DexError;
use crate::events::{ListingCreated, ListingPurchased, ProceedsWithdrawn};
use crate::fees;
use crate::pda::{self, ESCROW_SEED, VAULT_SEED};
use crate::state::{GlobalState, Listing};

/// Listed tokens are NFTs, one unit each.
pub const NFT_AMOUNT: u64 = 1;

// -------------------------------
// Accounts
// -------------------------------

#[derive(Accounts)]
pub struct List<'info> {
    /// The NFT owner listing the NFT for sale.
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        seeds = [GlobalState::SEED_PREFIX],
        bump = state.bump
    )]
    pub state: Box<Account<'info, GlobalState>>,

    /// Listing PDA: seeds = ["listing", nft_mint, signer]
    /// - Stores sale info (seller, mint, ask_mint, contract, ask, bump)
    /// - `init_if_needed` so an open listing is reported as `ListingExists`
    #[account(
        init_if_needed,
        payer = signer,
        space = 8 + Listing::INIT_SPACE,
        seeds = [Listing::SEED_PREFIX, nft_mint.key().as_ref(), signer.key().as_ref()],
        bump
    )]
    pub listing: Box<Account<'info, Listing>>,

    /// Token account holding the NFT, owned by the seller.
    #[account(
        mut,
        constraint = seller_nft.mint == nft_mint.key() @ DexError::MintMismatch,
        constraint = seller_nft.owner == signer.key() @ DexError::Unauthorized
    )]
    pub seller_nft: Box<Account<'info, TokenAccount>>,

    /// NFT vault PDA: seeds = ["vault", nft_mint]
    /// CHECK: re-derived and opened in the handler
    #[account(mut)]
    pub nft_vault: UncheckedAccount<'info>,

    pub nft_mint: Box<Account<'info, Mint>>,

    /// Seller escrow PDA: seeds = ["escrow", signer, ask_mint]
    /// CHECK: re-derived and opened in the handler
    #[account(mut)]
    pub seller_escrow: UncheckedAccount<'info>,

    /// CHECK: Only informational, recorded on the listing.
    pub contract: UncheckedAccount<'info>,

    pub ask_mint: Box<Account<'info, Mint>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct Buy<'info> {
    /// Buyer paying the ask and receiving the NFT.
    #[account(mut)]
    pub signer: Signer<'info>,

    /// Seller receiving rent refunds from the closed listing and vault.
    /// CHECK: the listing is derived from this key
    #[account(mut)]
    pub seller: UncheckedAccount<'info>,

    #[account(
        seeds = [GlobalState::SEED_PREFIX],
        bump = state.bump
    )]
    pub state: Box<Account<'info, GlobalState>>,

    /// Buyer's token account for the ask mint.
    #[account(mut)]
    pub source: Box<Account<'info, TokenAccount>>,

    /// CHECK: re-derived from (nft_mint, seller) and deserialized in the
    /// handler, so a consumed listing fails with `ListingNotFound`.
    #[account(mut)]
    pub listing: UncheckedAccount<'info>,

    /// Destination of the seller's proceeds.
    #[account(mut)]
    pub seller_escrow: Box<Account<'info, TokenAccount>>,

    /// Vault of the ask mint, collects the protocol fee.
    #[account(mut)]
    pub fee_vault: Box<Account<'info, TokenAccount>>,

    /// Buyer's ATA receiving the NFT.
    #[account(
        init_if_needed,
        payer = signer,
        associated_token::mint = nft_mint,
        associated_token::authority = signer
    )]
    pub destination: Box<Account<'info, TokenAccount>>,

    /// CHECK: re-derived and loaded in the handler
    #[account(mut)]
    pub nft_vault: UncheckedAccount<'info>,

    pub nft_mint: Box<Account<'info, Mint>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct WithdrawProceeds<'info> {
    pub seller: Signer<'info>,

    /// Seller escrow PDA: seeds = ["escrow", seller, seller_escrow.mint]
    #[account(mut)]
    pub seller_escrow: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = destination.mint == seller_escrow.mint @ DexError::MintMismatch
    )]
    pub destination: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

// -------------------------------
// Instructions
// -------------------------------

pub fn list(ctx: Context<List>, ask: u64) -> Result<()> {
    let seller_key = ctx.accounts.signer.key();
    let nft_mint_key = ctx.accounts.nft_mint.key();
    let ask_mint_key = ctx.accounts.ask_mint.key();

    // --- Validations ---
    require!(ask > 0, DexError::InvalidAsk);
    require!(!ctx.accounts.listing.is_open(), DexError::ListingExists);
    require!(
        ctx.accounts.nft_mint.decimals == 0 && ctx.accounts.nft_mint.supply == NFT_AMOUNT,
        DexError::InvalidNft
    );
    require!(
        ctx.accounts.seller_nft.amount == NFT_AMOUNT,
        DexError::InsufficientBalance
    );
    let nft_vault_bump = pda::verify_address(
        &ctx.accounts.nft_vault.key(),
        pda::vault_address(&nft_mint_key),
    )?;
    let escrow_bump = pda::verify_address(
        &ctx.accounts.seller_escrow.key(),
        pda::escrow_address(&seller_key, &ask_mint_key),
    )?;

    // --- Open custody accounts that do not exist yet ---
    match custody::load(&ctx.accounts.nft_vault)? {
        Some(vault) => {
            require_keys_eq!(vault.mint, nft_mint_key, DexError::StaleVaultState);
            require!(vault.amount == 0, DexError::StaleVaultState);
        }
        None => {
            let bump_seed = [nft_vault_bump];
            custody::open(OpenCustody {
                payer: ctx.accounts.signer.to_account_info(),
                account: ctx.accounts.nft_vault.to_account_info(),
                mint: ctx.accounts.nft_mint.to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
                token_program: ctx.accounts.token_program.to_account_info(),
                signer_seeds: &[VAULT_SEED, nft_mint_key.as_ref(), &bump_seed],
            })?;
        }
    }
    if !custody::is_open(&ctx.accounts.seller_escrow) {
        let bump_seed = [escrow_bump];
        custody::open(OpenCustody {
            payer: ctx.accounts.signer.to_account_info(),
            account: ctx.accounts.seller_escrow.to_account_info(),
            mint: ctx.accounts.ask_mint.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
            signer_seeds: &[ESCROW_SEED, seller_key.as_ref(), ask_mint_key.as_ref(), &bump_seed],
        })?;
    }

    // --- Store listing state ---
    let listing = &mut ctx.accounts.listing;
    listing.seller = seller_key;
    listing.mint = nft_mint_key;
    listing.ask_mint = ask_mint_key;
    listing.contract = ctx.accounts.contract.key();
    listing.ask = ask;
    listing.bump = ctx.bumps.listing;

    // --- Move NFT from seller into the vault ---
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.seller_nft.to_account_info(),
                to: ctx.accounts.nft_vault.to_account_info(),
                authority: ctx.accounts.signer.to_account_info(),
            },
        ),
        NFT_AMOUNT,
    )?;

    msg!(
        "Listed: listing={}, seller={}, mint={}, ask={} of {}",
        ctx.accounts.listing.key(),
        seller_key,
        nft_mint_key,
        ask,
        ask_mint_key
    );
    emit!(ListingCreated {
        listing: ctx.accounts.listing.key(),
        seller: seller_key,
        mint: nft_mint_key,
        ask_mint: ask_mint_key,
        ask,
    });

    Ok(())
}

pub fn buy(ctx: Context<Buy>) -> Result<()> {
    let accounts = &ctx.accounts;
    let seller_key = accounts.seller.key();
    let nft_mint_key = accounts.nft_mint.key();

    // --- The listing must still exist at its canonical address ---
    let listing = custody::load_record::<Listing>(&accounts.listing)
        .map_err(|_| DexError::ListingNotFound)?;
    require!(listing.is_open(), DexError::ListingNotFound);
    let listing_key = pda::listing_address_with_bump(&nft_mint_key, &seller_key, listing.bump)?;
    require_keys_eq!(
        accounts.listing.key(),
        listing_key,
        DexError::ListingNotFound
    );
    require_keys_eq!(listing.seller, seller_key, DexError::ListingNotFound);

    // --- Custody accounts are recomputed, never trusted ---
    let nft_vault_bump = pda::verify_address(
        &accounts.nft_vault.key(),
        pda::vault_address(&listing.mint),
    )?;
    pda::verify_address(
        &accounts.seller_escrow.key(),
        pda::escrow_address(&listing.seller, &listing.ask_mint),
    )?;
    pda::verify_address(
        &accounts.fee_vault.key(),
        pda::vault_address(&listing.ask_mint),
    )?;

    // --- Validations ---
    let escrowed = custody::load(&accounts.nft_vault)?
        .filter(|vault| vault.mint == listing.mint)
        .map(|vault| vault.amount)
        .unwrap_or_default();
    require!(escrowed == NFT_AMOUNT, DexError::StaleVaultState);
    require!(
        accounts.signer.key() != listing.seller,
        DexError::SelfBuyNotAllowed
    );
    require_keys_eq!(
        accounts.source.mint,
        listing.ask_mint,
        DexError::MintMismatch
    );
    require!(
        accounts.source.amount >= listing.ask,
        DexError::InsufficientBalance
    );

    let split = fees::split_ask(listing.ask, accounts.state.fee, accounts.state.fee_scalar)?;

    // --- Pay the seller's escrow ---
    token::transfer(
        CpiContext::new(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.source.to_account_info(),
                to: accounts.seller_escrow.to_account_info(),
                authority: accounts.signer.to_account_info(),
            },
        ),
        split.seller_proceeds,
    )?;

    // --- Pay the protocol fee into the ask mint's vault ---
    if split.fee > 0 {
        token::transfer(
            CpiContext::new(
                accounts.token_program.to_account_info(),
                Transfer {
                    from: accounts.source.to_account_info(),
                    to: accounts.fee_vault.to_account_info(),
                    authority: accounts.signer.to_account_info(),
                },
            ),
            split.fee,
        )?;
    }

    // --- Release the NFT and close its vault (rent to seller) ---
    let bump_seed = [nft_vault_bump];
    let nft_vault = Custody {
        account: accounts.nft_vault.to_account_info(),
        token_program: accounts.token_program.to_account_info(),
        signer_seeds: &[VAULT_SEED, nft_mint_key.as_ref(), &bump_seed],
    };
    nft_vault.release(accounts.destination.to_account_info(), NFT_AMOUNT)?;
    nft_vault.close(accounts.seller.to_account_info())?;

    // --- Close the listing (rent to seller) ---
    listing.close(accounts.seller.to_account_info())?;

    msg!(
        "Bought: listing={}, buyer={}, ask={}, fee={}, proceeds={}",
        listing_key,
        accounts.signer.key(),
        listing.ask,
        split.fee,
        split.seller_proceeds
    );
    emit!(ListingPurchased {
        listing: listing_key,
        buyer: accounts.signer.key(),
        seller: seller_key,
        mint: nft_mint_key,
        ask: listing.ask,
        fee: split.fee,
        seller_proceeds: split.seller_proceeds,
    });

    Ok(())
}

pub fn withdraw_proceeds(ctx: Context<WithdrawProceeds>) -> Result<()> {
    let accounts = &ctx.accounts;
    let seller_key = accounts.seller.key();
    let ask_mint_key = accounts.seller_escrow.mint;

    // --- Validations ---
    let bump = pda::verify_address(
        &accounts.seller_escrow.key(),
        pda::escrow_address(&seller_key, &ask_mint_key),
    )?;
    let amount = accounts.seller_escrow.amount;
    require!(amount > 0, DexError::InsufficientBalance);

    // --- Drain the escrow; it stays open for later sales ---
    let bump_seed = [bump];
    Custody {
        account: accounts.seller_escrow.to_account_info(),
        token_program: accounts.token_program.to_account_info(),
        signer_seeds: &[ESCROW_SEED, seller_key.as_ref(), ask_mint_key.as_ref(), &bump_seed],
    }
    .release(accounts.destination.to_account_info(), amount)?;

    msg!(
        "Proceeds withdrawn: escrow={}, seller={}, amount={}",
        accounts.seller_escrow.key(),
        seller_key,
        amount
    );
    emit!(ProceedsWithdrawn {
        escrow: accounts.seller_escrow.key(),
        seller: seller_key,
        amount,
    });

    Ok(())
}
