use anchor_lang::prelude::*;

use crate::errors::DexError;
use crate::state::GlobalState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub fee: u64,
    pub seller_proceeds: u64,
}

/// Splits an ask into the protocol fee, `floor(ask * fee / fee_scalar)`,
/// and what is left for the seller.
pub fn split_ask(ask: u64, fee: u64, fee_scalar: u64) -> Result<FeeSplit> {
    GlobalState::validate_fee(fee, fee_scalar)?;

    let fee_amount = (ask as u128)
        .checked_mul(fee as u128)
        .ok_or(DexError::NumericalOverflow)?
        .checked_div(fee_scalar as u128)
        .ok_or(DexError::NumericalOverflow)?;
    let fee_amount = u64::try_from(fee_amount).map_err(|_| DexError::NumericalOverflow)?;

    let seller_proceeds = ask
        .checked_sub(fee_amount)
        .ok_or(DexError::NumericalOverflow)?;

    Ok(FeeSplit {
        fee: fee_amount,
        seller_proceeds,
    })
}
