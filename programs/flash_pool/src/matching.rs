use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};
use anchor_lang::Discriminator;

use crate::{error::ErrorCode, helpers::required_repayment};

// Account positions inside the compiled Borrow/Repay instructions. These
// must track the field order of the Accounts structs in instructions/.
const BORROW_POOL_INDEX: usize = 1;
const REPAY_POOL_INDEX: usize = 1;
const REPAY_CUSTODY_INDEX: usize = 3;
const REPAY_ACCOUNTS_LEN: usize = 6;

/// One entry of the transaction's ordered instruction list, reduced to what
/// the borrow/repay scans need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerOp {
    Borrow {
        pool: Pubkey,
        principal: u64,
    },
    Repay {
        pool: Pubkey,
        custody: Pubkey,
        amount: u64,
        with_referral: bool,
    },
    Other,
}

/// Reads the whole transaction from the instructions sysvar and classifies
/// every entry. Also rejects CPI invocation: the instruction at the current
/// top-level index must belong to this program, otherwise an outer program
/// could make the scans run against someone else's position.
pub fn load_unit_of_work(instructions_sysvar: &AccountInfo) -> Result<(usize, Vec<LedgerOp>)> {
    let current = load_current_index_checked(instructions_sysvar)? as usize;
    let current_ixn = load_instruction_at_checked(current, instructions_sysvar)?;
    require_keys_eq!(current_ixn.program_id, crate::ID, ErrorCode::ProgramMismatch);

    let mut ops = Vec::new();
    while let Ok(ixn) = load_instruction_at_checked(ops.len(), instructions_sysvar) {
        ops.push(classify(&ixn));
    }
    Ok((current, ops))
}

/// Maps an instruction to a [`LedgerOp`]. Anything that is not a well-formed
/// Borrow or Repay of this program is `Other`, so a bare token transfer can
/// never be mistaken for a repayment no matter where it sends funds.
pub fn classify(ixn: &Instruction) -> LedgerOp {
    if ixn.program_id != crate::ID {
        return LedgerOp::Other;
    }
    let Some(tag) = ixn.data.get(..8) else {
        return LedgerOp::Other;
    };
    if tag == &crate::instruction::Borrow::DISCRIMINATOR[..] {
        if let (Some(principal), Some(pool)) = (
            read_u64_arg(&ixn.data),
            ixn.accounts.get(BORROW_POOL_INDEX),
        ) {
            return LedgerOp::Borrow {
                pool: pool.pubkey,
                principal,
            };
        }
    } else if tag == &crate::instruction::Repay::DISCRIMINATOR[..] {
        if let (Some(amount), Some(pool), Some(custody)) = (
            read_u64_arg(&ixn.data),
            ixn.accounts.get(REPAY_POOL_INDEX),
            ixn.accounts.get(REPAY_CUSTODY_INDEX),
        ) {
            return LedgerOp::Repay {
                pool: pool.pubkey,
                custody: custody.pubkey,
                amount,
                with_referral: ixn.accounts.len() > REPAY_ACCOUNTS_LEN,
            };
        }
    }
    LedgerOp::Other
}

/// Backward scan: the nearest preceding borrow for `pool` that no repay for
/// `pool` has discharged yet. At most one such claim can exist at any
/// position, because a second borrow fails while the first is open and every
/// intervening repay discharges eagerly.
pub fn open_claim_before(ops: &[LedgerOp], position: usize, pool: &Pubkey) -> Option<(usize, u64)> {
    for (pos, op) in ops.iter().enumerate().take(position).rev() {
        match op {
            LedgerOp::Borrow { pool: p, principal } if p == pool => return Some((pos, *principal)),
            LedgerOp::Repay { pool: p, .. } if p == pool => return None,
            _ => {}
        }
    }
    None
}

/// Forward scan from a borrow at `position`: the nearest subsequent repay for
/// the same pool whose declared amount covers principal plus fees. A repay
/// declaring too little is passed over; one routed at the wrong custody
/// account is a hard error.
pub fn find_matching_repay(
    ops: &[LedgerOp],
    position: usize,
    pool: &Pubkey,
    custody: &Pubkey,
    principal: u64,
) -> Result<usize> {
    for (pos, op) in ops.iter().enumerate().skip(position + 1) {
        if let LedgerOp::Repay {
            pool: repay_pool,
            custody: repay_custody,
            amount,
            with_referral,
        } = op
        {
            if repay_pool != pool {
                continue;
            }
            require_keys_eq!(*repay_custody, *custody, ErrorCode::AccountMismatch);
            if *amount >= required_repayment(principal, *with_referral)? {
                return Ok(pos);
            }
        }
    }
    Err(error!(ErrorCode::NoMatchingRepay))
}

fn read_u64_arg(data: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = data.get(8..16)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}
