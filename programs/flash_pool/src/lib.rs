use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod helpers;
pub mod instructions;
pub mod matching;
pub mod state;

pub use constants::*;
pub use error::*;
pub use helpers::*;
pub use instructions::*;
pub use matching::*;
pub use state::*;

declare_id!("3TXKrVtNF7i8C8c5aGEvQt6LmfuvUVE1WV8FNLogVwrt");

#[program]
pub mod flash_pool {
    use super::*;

    pub fn init_pool(ctx: Context<InitPool>) -> Result<()> {
        instructions::init_pool::handler(ctx)
    }

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, shares)
    }

    pub fn borrow(ctx: Context<Borrow>, principal: u64) -> Result<()> {
        instructions::borrow::handler(ctx, principal)
    }

    pub fn repay<'info>(ctx: Context<'_, '_, 'info, 'info, Repay<'info>>, amount: u64) -> Result<()> {
        instructions::repay::handler(ctx, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_overflow(result: Result<u64>) {
        match result.unwrap_err() {
            anchor_lang::error::Error::AnchorError(e) => {
                assert_eq!(e.error_code_number, u32::from(error::ErrorCode::Overflow));
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_bootstrap_deposit_is_one_to_one() {
        assert_eq!(shares_for_deposit(250_000, 0, 0).unwrap(), 250_000);
        assert_eq!(shares_for_deposit(1, 0, 0).unwrap(), 1);
    }

    #[test]
    fn test_pro_rata_rounding_floors() {
        // 2:1 underlying-to-share rate.
        assert_eq!(shares_for_deposit(100, 500, 1_000).unwrap(), 50);
        assert_eq!(shares_for_deposit(1, 500, 1_000).unwrap(), 0);
        assert_eq!(underlying_for_withdraw(50, 500, 1_000).unwrap(), 100);
        assert_eq!(underlying_for_withdraw(3, 7, 100).unwrap(), 42);
    }

    #[test]
    fn test_deposit_withdraw_never_profits() {
        let custody = 1_000_003u64;
        let supply = 777_777u64;
        for amount in [1u64, 2, 3, 999, 5_000, 123_457, 1_000_002] {
            let minted = shares_for_deposit(amount, supply, custody).unwrap();
            let returned =
                underlying_for_withdraw(minted, supply + minted, custody + amount).unwrap();
            assert!(returned <= amount, "amount {amount} returned {returned}");
        }
    }

    #[test]
    fn test_loan_fee_values() {
        assert_eq!(pool_fee(400_000).unwrap(), 360);
        assert_eq!(referral_fee(400_000).unwrap(), 20);
        assert_eq!(required_repayment(400_000, false).unwrap(), 400_360);
        assert_eq!(required_repayment(400_000, true).unwrap(), 400_380);
        assert_eq!(required_repayment(100_000, false).unwrap(), 100_090);
    }

    #[test]
    fn test_fee_floors_on_small_principals() {
        // Below one fee unit the loan is free; the floor never rounds up.
        assert_eq!(pool_fee(1_000).unwrap(), 0);
        assert_eq!(required_repayment(1_000, true).unwrap(), 1_000);
        assert_eq!(pool_fee(1_112).unwrap(), 1);
    }

    #[test]
    fn test_conversion_overflow_is_reported() {
        // Drained pool with outstanding shares: no divisor, no panic.
        expect_overflow(shares_for_deposit(10, 5, 0));
        expect_overflow(shares_for_deposit(u64::MAX, u64::MAX, 1));
        expect_overflow(required_repayment(u64::MAX, false));
    }
}
