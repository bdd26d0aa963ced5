pub mod change_authority;
pub mod create_token_2022;
pub mod deposit;
pub mod initialize;
pub mod transfer_weth;
pub mod withdraw;
pub mod withdraw_only_authority;

pub use change_authority::*;
pub use create_token_2022::*;
pub use deposit::*;
pub use initialize::*;
pub use transfer_weth::*;
pub use withdraw::*;
pub use withdraw_only_authority::*;
