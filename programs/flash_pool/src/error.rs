use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Pool already initialized")]
    AlreadyInitialized,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Math overflow")]
    Overflow,
    #[msg("Insufficient shares")]
    InsufficientShares,
    #[msg("Insufficient pool balance")]
    InsufficientBalance,
    #[msg("Account mismatch")]
    AccountMismatch,
    #[msg("No matching repayment instruction")]
    NoMatchingRepay,
    #[msg("A loan is already outstanding for this pool")]
    LoanAlreadyOutstanding,
    #[msg("Repayment amount is insufficient")]
    InsufficientRepayment,
    #[msg("Instruction must be invoked directly")]
    ProgramMismatch,
}
