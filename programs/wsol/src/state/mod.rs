pub mod storage;
pub mod vault;

pub use storage::*;
pub use vault::*;
