//! Program-controlled token accounts.
//!
//! Vaults and escrows are SPL token accounts living at a program-derived
//! address and acting as their own authority, so only this program can move
//! tokens out of them. They are opened and closed explicitly by the
//! instructions instead of through `init` constraints, which lets callers
//! tell a fresh account from an existing one.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount};
use anchor_spl::token::{self, CloseAccount, InitializeAccount3, TokenAccount, Transfer};

pub struct OpenCustody<'a, 'info> {
    pub payer: AccountInfo<'info>,
    pub account: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub signer_seeds: &'a [&'a [u8]],
}

/// Whether a token account has already been opened at this address.
pub fn is_open(account: &AccountInfo) -> bool {
    account.owner == &token::ID && !account.data_is_empty()
}

pub fn load(account: &AccountInfo) -> Result<Option<TokenAccount>> {
    if !is_open(account) {
        return Ok(None);
    }
    let data = account.try_borrow_data()?;
    Ok(Some(TokenAccount::try_deserialize(&mut &data[..])?))
}

/// Allocates a token account at a PDA with the PDA as its own authority.
pub fn open(params: OpenCustody) -> Result<()> {
    let OpenCustody {
        payer,
        account,
        mint,
        system_program,
        token_program,
        signer_seeds,
    } = params;

    let space = TokenAccount::LEN;
    let required_lamports = Rent::get()?.minimum_balance(space);
    let signer: &[&[&[u8]]] = &[signer_seeds];

    // Someone may have pre-funded the address; top it up instead of
    // failing `create_account`.
    let current_lamports = account.lamports();
    if current_lamports == 0 {
        system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer,
                    to: account.clone(),
                },
                signer,
            ),
            required_lamports,
            space as u64,
            &token::ID,
        )?;
    } else {
        let top_up = required_lamports.saturating_sub(current_lamports);
        if top_up > 0 {
            system_program::transfer(
                CpiContext::new(
                    system_program.clone(),
                    system_program::Transfer {
                        from: payer,
                        to: account.clone(),
                    },
                ),
                top_up,
            )?;
        }
        system_program::allocate(
            CpiContext::new_with_signer(
                system_program.clone(),
                Allocate {
                    account_to_allocate: account.clone(),
                },
                signer,
            ),
            space as u64,
        )?;
        system_program::assign(
            CpiContext::new_with_signer(
                system_program,
                Assign {
                    account_to_assign: account.clone(),
                },
                signer,
            ),
            &token::ID,
        )?;
    }

    token::initialize_account3(CpiContext::new(
        token_program,
        InitializeAccount3 {
            account: account.clone(),
            mint,
            authority: account,
        },
    ))
}

/// An opened custody account together with the seeds that sign for it.
pub struct Custody<'a, 'info> {
    pub account: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub signer_seeds: &'a [&'a [u8]],
}

impl<'a, 'info> Custody<'a, 'info> {
    pub fn release(&self, to: AccountInfo<'info>, amount: u64) -> Result<()> {
        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.account.clone(),
                    to,
                    authority: self.account.clone(),
                },
                &[self.signer_seeds],
            ),
            amount,
        )
    }

    /// Closes the token account, which must already be empty.
    pub fn close(self, destination: AccountInfo<'info>) -> Result<()> {
        token::close_account(CpiContext::new_with_signer(
            self.token_program.clone(),
            CloseAccount {
                account: self.account.clone(),
                destination,
                authority: self.account.clone(),
            },
            &[self.signer_seeds],
        ))
    }
}

/// Typed view of a record owned by this program, for accounts the handler
/// validates itself. Close it through `AccountsClose`.
pub fn load_record<'info, T>(record: &AccountInfo<'info>) -> Result<Account<'info, T>>
where
    T: AccountSerialize + AccountDeserialize + Owner + Clone,
{
    // Instruction accounts outlive the handler, which is the borrow
    // `Account` needs.
    let record: &'info AccountInfo<'info> = Box::leak(Box::new(record.clone()));
    Account::try_from(record)
}
