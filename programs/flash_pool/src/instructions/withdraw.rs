use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};

use crate::{error::ErrorCode, helpers::underlying_for_withdraw, state::Pool};

pub fn handler(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
    require!(shares > 0, ErrorCode::ZeroAmount);
    require!(
        shares <= ctx.accounts.share_source.amount,
        ErrorCode::InsufficientShares
    );

    let custody_before = ctx.accounts.custody.amount;
    let supply_before = ctx.accounts.share_mint.supply;
    let returned = underlying_for_withdraw(shares, supply_before, custody_before)?;

    token::burn(ctx.accounts.burn_ctx(), shares)?;

    let mint_key = ctx.accounts.pool.underlying_mint;
    let signer_seed_group: &[&[u8]] = &[b"pool", mint_key.as_ref(), &[ctx.accounts.pool.bump]];
    let signer_seeds = &[signer_seed_group];
    token::transfer(
        ctx.accounts.payout_ctx().with_signer(signer_seeds),
        returned,
    )?;

    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    pub withdrawer: Signer<'info>,
    #[account(
        seeds = [b"pool", pool.underlying_mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
    #[account(
        mut,
        constraint = share_source.mint == pool.share_mint @ ErrorCode::AccountMismatch,
    )]
    pub share_source: Account<'info, TokenAccount>,
    #[account(mut, address = pool.share_mint @ ErrorCode::AccountMismatch)]
    pub share_mint: Account<'info, Mint>,
    #[account(mut, address = pool.custody @ ErrorCode::AccountMismatch)]
    pub custody: Account<'info, TokenAccount>,
    /// CHECK: checked in the token program.
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
}

impl<'info> Withdraw<'info> {
    fn burn_ctx(&self) -> CpiContext<'_, '_, '_, 'info, Burn<'info>> {
        let cpi_accounts = Burn {
            mint: self.share_mint.to_account_info(),
            from: self.share_source.to_account_info(),
            authority: self.withdrawer.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }

    fn payout_ctx(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.custody.to_account_info(),
            to: self.destination.to_account_info(),
            authority: self.pool.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}
