use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{error::ErrorCode, matching, state::Pool};

pub fn handler(ctx: Context<Borrow>, principal: u64) -> Result<()> {
    require!(principal > 0, ErrorCode::ZeroAmount);
    require!(
        principal <= ctx.accounts.custody.amount,
        ErrorCode::InsufficientBalance
    );

    let instructions_sysvar = ctx.accounts.instructions_sysvar.to_account_info();
    let (current, ops) = matching::load_unit_of_work(&instructions_sysvar)?;

    // The pool must not already be lent out at this point in the
    // transaction, and a later repay must be able to discharge this loan.
    // Nothing moves unless both scans agree.
    let pool_key = ctx.accounts.pool.key();
    require!(
        matching::open_claim_before(&ops, current, &pool_key).is_none(),
        ErrorCode::LoanAlreadyOutstanding
    );
    matching::find_matching_repay(
        &ops,
        current,
        &pool_key,
        &ctx.accounts.custody.key(),
        principal,
    )?;

    let mint_key = ctx.accounts.pool.underlying_mint;
    let signer_seed_group: &[&[u8]] = &[b"pool", mint_key.as_ref(), &[ctx.accounts.pool.bump]];
    let signer_seeds = &[signer_seed_group];
    token::transfer(
        ctx.accounts.payout_ctx().with_signer(signer_seeds),
        principal,
    )?;

    Ok(())
}

#[derive(Accounts)]
pub struct Borrow<'info> {
    pub borrower: Signer<'info>,
    #[account(
        seeds = [b"pool", pool.underlying_mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
    #[account(mut, address = pool.custody @ ErrorCode::AccountMismatch)]
    pub custody: Account<'info, TokenAccount>,
    /// CHECK: checked in the token program.
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,
    /// CHECK: pinned to the instructions sysvar id.
    #[account(address = sysvar::instructions::ID @ ErrorCode::AccountMismatch)]
    pub instructions_sysvar: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
}

impl<'info> Borrow<'info> {
    fn payout_ctx(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.custody.to_account_info(),
            to: self.destination.to_account_info(),
            authority: self.pool.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}
