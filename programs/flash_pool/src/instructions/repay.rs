use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    error::ErrorCode,
    helpers::{referral_fee, required_repayment},
    matching,
    state::Pool,
};

pub fn handler<'info>(ctx: Context<'_, '_, 'info, 'info, Repay<'info>>, amount: u64) -> Result<()> {
    let instructions_sysvar = ctx.accounts.instructions_sysvar.to_account_info();
    let (current, ops) = matching::load_unit_of_work(&instructions_sysvar)?;

    // An optional referral token account rides in as the first remaining
    // account; anything that does not parse as one is ignored.
    let referral = ctx
        .remaining_accounts
        .first()
        .filter(|info| Account::<TokenAccount>::try_from(*info).is_ok());

    let pool_key = ctx.accounts.pool.key();
    match matching::open_claim_before(&ops, current, &pool_key) {
        Some((_, principal)) => {
            let required = required_repayment(principal, referral.is_some())?;
            require!(amount >= required, ErrorCode::InsufficientRepayment);

            // Move exactly the required amount, computed from the matched
            // borrow's principal; the declared amount is only a sufficiency
            // floor. The referral slice comes out first, the rest lands in
            // custody.
            let fee_to_referral = if referral.is_some() {
                referral_fee(principal)?
            } else {
                0
            };
            let to_custody = required
                .checked_sub(fee_to_referral)
                .ok_or_else(|| error!(ErrorCode::Overflow))?;
            token::transfer(ctx.accounts.repay_ctx(), to_custody)?;
            if let Some(referral_info) = referral {
                token::transfer(ctx.accounts.referral_ctx(referral_info), fee_to_referral)?;
            }
        }
        None => {
            // No open claim precedes this repay: it degenerates to a plain
            // transfer of the declared amount into custody, no fee split.
            token::transfer(ctx.accounts.repay_ctx(), amount)?;
        }
    }

    Ok(())
}

#[derive(Accounts)]
pub struct Repay<'info> {
    pub repayer: Signer<'info>,
    #[account(
        seeds = [b"pool", pool.underlying_mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
    #[account(
        mut,
        constraint = source.mint == pool.underlying_mint @ ErrorCode::AccountMismatch,
    )]
    pub source: Account<'info, TokenAccount>,
    #[account(mut, address = pool.custody @ ErrorCode::AccountMismatch)]
    pub custody: Account<'info, TokenAccount>,
    /// CHECK: pinned to the instructions sysvar id.
    #[account(address = sysvar::instructions::ID @ ErrorCode::AccountMismatch)]
    pub instructions_sysvar: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
}

impl<'info> Repay<'info> {
    fn repay_ctx(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.source.to_account_info(),
            to: self.custody.to_account_info(),
            authority: self.repayer.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }

    fn referral_ctx(
        &self,
        referral: &AccountInfo<'info>,
    ) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.source.to_account_info(),
            to: referral.to_account_info(),
            authority: self.repayer.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}
