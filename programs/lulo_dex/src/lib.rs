use anchor_lang::prelude::*;

pub mod custody;
pub mod errors;
pub mod events;
pub mod fees;
pub mod instructions;
pub mod pda;
pub mod state;

pub use instructions::*;

declare_id!("3JSsMyjnTCAofXRZjcZsk8fxT8R4uufWRGFkCdtYmFDb");

#[program]
pub mod lulo_dex {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, fee: u64, fee_scalar: u64) -> Result<()> {
        instructions::admin::initialize(ctx, fee, fee_scalar)
    }

    pub fn create_vault(ctx: Context<CreateVault>) -> Result<()> {
        instructions::admin::create_vault(ctx)
    }

    pub fn collect_fees(ctx: Context<CollectFees>, amount: u64) -> Result<()> {
        instructions::admin::collect_fees(ctx, amount)
    }

    pub fn list(ctx: Context<List>, ask: u64) -> Result<()> {
        instructions::trade::list(ctx, ask)
    }

    pub fn buy(ctx: Context<Buy>) -> Result<()> {
        instructions::trade::buy(ctx)
    }

    pub fn withdraw_proceeds(ctx: Context<WithdrawProceeds>) -> Result<()> {
        instructions::trade::withdraw_proceeds(ctx)
    }
}
