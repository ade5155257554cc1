pub const LOAN_FEE_RATE: u64 = 900; // 0.09% of the borrowed principal.
pub const REFERRAL_FEE_RATE: u64 = 50; // 0.005%, only when a referral account is supplied.
pub const FEE_DENOMINATOR: u64 = 1_000_000;
