use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::custody::{self, Custody, OpenCustody};
use crate::errors::DexError;
use crate::events::{FeesCollected, MarketInitialized, VaultCreated};
use crate::pda::{self, VAULT_SEED};
use crate::state::GlobalState;

// -------------------------------
// Accounts
// -------------------------------

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Pays for the state account and becomes the marketplace admin.
    #[account(mut)]
    pub signer: Signer<'info>,

    /// State PDA: seeds = ["state"]
    /// `init_if_needed` so a second call reaches the handler and fails with
    /// `AlreadyInitialized`.
    #[account(
        init_if_needed,
        payer = signer,
        space = 8 + GlobalState::INIT_SPACE,
        seeds = [GlobalState::SEED_PREFIX],
        bump
    )]
    pub state: Box<Account<'info, GlobalState>>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CreateVault<'info> {
    /// Any signer may pay for a vault.
    #[account(mut)]
    pub signer: Signer<'info>,

    /// Vault PDA: seeds = ["vault", mint]
    /// CHECK: re-derived and opened in the handler
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        seeds = [GlobalState::SEED_PREFIX],
        bump = state.bump
    )]
    pub state: Box<Account<'info, GlobalState>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct CollectFees<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [GlobalState::SEED_PREFIX],
        bump = state.bump,
        has_one = admin @ DexError::Unauthorized
    )]
    pub state: Box<Account<'info, GlobalState>>,

    /// Fee vault of `mint`, checked against its derived address.
    #[account(
        mut,
        constraint = vault.mint == mint.key() @ DexError::MintMismatch
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        constraint = destination.mint == mint.key() @ DexError::MintMismatch
    )]
    pub destination: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

// -------------------------------
// Instructions
// -------------------------------

pub fn initialize(ctx: Context<Initialize>, fee: u64, fee_scalar: u64) -> Result<()> {
    // --- Validations ---
    require!(
        !ctx.accounts.state.is_initialized(),
        DexError::AlreadyInitialized
    );
    GlobalState::validate_fee(fee, fee_scalar)?;

    // --- Store marketplace configuration ---
    let state = &mut ctx.accounts.state;
    state.admin = ctx.accounts.signer.key();
    state.fee = fee;
    state.fee_scalar = fee_scalar;
    state.bump = ctx.bumps.state;

    msg!(
        "Marketplace initialized: admin={}, fee={}/{}",
        state.admin,
        fee,
        fee_scalar
    );
    emit!(MarketInitialized {
        admin: state.admin,
        fee,
        fee_scalar,
    });

    Ok(())
}

pub fn create_vault(ctx: Context<CreateVault>) -> Result<()> {
    let accounts = &ctx.accounts;
    let mint_key = accounts.mint.key();

    // --- Validations ---
    let bump = pda::verify_address(&accounts.vault.key(), pda::vault_address(&mint_key))?;
    require!(
        !custody::is_open(&accounts.vault),
        DexError::VaultAlreadyExists
    );

    // --- Open the vault with itself as authority ---
    let bump_seed = [bump];
    let signer_seeds: &[&[u8]] = &[VAULT_SEED, mint_key.as_ref(), &bump_seed];
    custody::open(OpenCustody {
        payer: accounts.signer.to_account_info(),
        account: accounts.vault.to_account_info(),
        mint: accounts.mint.to_account_info(),
        system_program: accounts.system_program.to_account_info(),
        token_program: accounts.token_program.to_account_info(),
        signer_seeds,
    })?;

    msg!("Vault created: vault={}, mint={}", accounts.vault.key(), mint_key);
    emit!(VaultCreated {
        vault: accounts.vault.key(),
        mint: mint_key,
        payer: accounts.signer.key(),
    });

    Ok(())
}

pub fn collect_fees(ctx: Context<CollectFees>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let mint_key = accounts.mint.key();

    // --- Validations ---
    require!(amount > 0, DexError::InvalidAmount);
    let bump = pda::verify_address(&accounts.vault.key(), pda::vault_address(&mint_key))?;
    // Any mint `list` accepts may have its NFT escrowed at this address,
    // even after its supply has grown.
    require!(accounts.mint.decimals != 0, DexError::CustodyLocked);
    require!(
        accounts.vault.amount >= amount,
        DexError::InsufficientBalance
    );

    // --- Move fees out of the vault ---
    let bump_seed = [bump];
    let signer_seeds: &[&[u8]] = &[VAULT_SEED, mint_key.as_ref(), &bump_seed];
    Custody {
        account: accounts.vault.to_account_info(),
        token_program: accounts.token_program.to_account_info(),
        signer_seeds,
    }
    .release(accounts.destination.to_account_info(), amount)?;

    msg!(
        "Fees collected: vault={}, amount={}, destination={}",
        accounts.vault.key(),
        amount,
        accounts.destination.key()
    );
    emit!(FeesCollected {
        vault: accounts.vault.key(),
        admin: accounts.admin.key(),
        amount,
    });

    Ok(())
}
