use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct Pool {
    pub underlying_mint: Pubkey,
    pub share_mint: Pubkey,
    pub custody: Pubkey,
    pub bump: u8,
}
