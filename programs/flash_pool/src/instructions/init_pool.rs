use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::state::Pool;

pub fn handler(ctx: Context<InitPool>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.underlying_mint = ctx.accounts.underlying_mint.key();
    pool.share_mint = ctx.accounts.share_mint.key();
    pool.custody = ctx.accounts.custody.key();
    pool.bump = ctx.bumps.pool;
    Ok(())
}

#[derive(Accounts)]
pub struct InitPool<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    /// The mint of the asset this pool lends out.
    pub underlying_mint: Account<'info, Mint>,
    #[account(
        init,
        payer = payer,
        seeds = [b"pool", underlying_mint.key().as_ref()],
        bump,
        space = 8 + Pool::INIT_SPACE,
    )]
    pub pool: Account<'info, Pool>,
    /// Claim token on the pool. The pool PDA is the only mint authority and
    /// no freeze authority is set.
    #[account(
        init,
        payer = payer,
        seeds = [b"share-mint", pool.key().as_ref()],
        bump,
        mint::decimals = underlying_mint.decimals,
        mint::authority = pool,
    )]
    pub share_mint: Account<'info, Mint>,
    #[account(
        init,
        payer = payer,
        seeds = [b"custody", pool.key().as_ref()],
        bump,
        token::mint = underlying_mint,
        token::authority = pool,
    )]
    pub custody: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
