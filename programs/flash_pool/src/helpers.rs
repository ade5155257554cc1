use anchor_lang::prelude::*;

use crate::{
    constants::{FEE_DENOMINATOR, LOAN_FEE_RATE, REFERRAL_FEE_RATE},
    error::ErrorCode,
};

/// Shares minted for a deposit, given the supply and custody balance before
/// the deposit moves anything. The first depositor sets a 1:1 rate.
pub fn shares_for_deposit(amount: u64, share_supply: u64, custody_balance: u64) -> Result<u64> {
    if share_supply == 0 {
        return Ok(amount);
    }
    let minted = ((amount as u128)
        .checked_mul(share_supply as u128)
        .ok_or_else(|| error!(ErrorCode::Overflow))?)
    .checked_div(custody_balance as u128)
    .ok_or_else(|| error!(ErrorCode::Overflow))?;
    u64::try_from(minted).map_err(|_| error!(ErrorCode::Overflow))
}

/// Underlying returned when burning `shares`. Floors in the pool's favor, so
/// rounding remainders accrue to the pool and are never extractable.
pub fn underlying_for_withdraw(shares: u64, share_supply: u64, custody_balance: u64) -> Result<u64> {
    let returned = ((shares as u128)
        .checked_mul(custody_balance as u128)
        .ok_or_else(|| error!(ErrorCode::Overflow))?)
    .checked_div(share_supply as u128)
    .ok_or_else(|| error!(ErrorCode::Overflow))?;
    u64::try_from(returned).map_err(|_| error!(ErrorCode::Overflow))
}

pub fn pool_fee(principal: u64) -> Result<u64> {
    mul_rate(principal, LOAN_FEE_RATE)
}

pub fn referral_fee(principal: u64) -> Result<u64> {
    mul_rate(principal, REFERRAL_FEE_RATE)
}

/// Total a repayment must declare to discharge a borrow of `principal`.
pub fn required_repayment(principal: u64, with_referral: bool) -> Result<u64> {
    let mut required = principal
        .checked_add(pool_fee(principal)?)
        .ok_or_else(|| error!(ErrorCode::Overflow))?;
    if with_referral {
        required = required
            .checked_add(referral_fee(principal)?)
            .ok_or_else(|| error!(ErrorCode::Overflow))?;
    }
    Ok(required)
}

fn mul_rate(value: u64, rate: u64) -> Result<u64> {
    ((value as u128)
        .checked_mul(rate as u128)
        .ok_or_else(|| error!(ErrorCode::Overflow))?)
    .checked_div(FEE_DENOMINATOR as u128)
    .ok_or_else(|| error!(ErrorCode::Overflow))
    .map(|v| v as u64)
}
