pub mod borrow;
pub mod deposit;
pub mod init_pool;
pub mod repay;
pub mod withdraw;

pub use borrow::*;
pub use deposit::*;
pub use init_pool::*;
pub use repay::*;
pub use withdraw::*;
