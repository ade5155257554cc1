use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::{error::ErrorCode, helpers::shares_for_deposit, state::Pool};

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::ZeroAmount);

    // Exchange rate is fixed by the balances before this deposit moves
    // anything. A dust deposit may mint zero shares; the floor keeps the
    // rate from ever favoring the depositor.
    let custody_before = ctx.accounts.custody.amount;
    let supply_before = ctx.accounts.share_mint.supply;
    let minted = shares_for_deposit(amount, supply_before, custody_before)?;

    token::transfer(ctx.accounts.transfer_ctx(), amount)?;

    let mint_key = ctx.accounts.pool.underlying_mint;
    let signer_seed_group: &[&[u8]] = &[b"pool", mint_key.as_ref(), &[ctx.accounts.pool.bump]];
    let signer_seeds = &[signer_seed_group];
    token::mint_to(
        ctx.accounts.mint_shares_ctx().with_signer(signer_seeds),
        minted,
    )?;

    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    pub depositor: Signer<'info>,
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
    #[account(mut, address = pool.share_mint @ ErrorCode::AccountMismatch)]
    pub share_mint: Account<'info, Mint>,
    /// CHECK: checked in the token program.
    #[account(mut)]
    pub shares_destination: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
}

impl<'info> Deposit<'info> {
    fn transfer_ctx(&self) -> CpiContext<'_, '_, '_, 'info, Transfer<'info>> {
        let cpi_accounts = Transfer {
            from: self.source.to_account_info(),
            to: self.custody.to_account_info(),
            authority: self.depositor.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }

    fn mint_shares_ctx(&self) -> CpiContext<'_, '_, '_, 'info, MintTo<'info>> {
        let cpi_accounts = MintTo {
            mint: self.share_mint.to_account_info(),
            to: self.shares_destination.to_account_info(),
            authority: self.pool.to_account_info(),
        };
        CpiContext::new(self.token_program.to_account_info(), cpi_accounts)
    }
}
