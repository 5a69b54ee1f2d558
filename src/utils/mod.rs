// Utils compartidos

pub mod constants;
pub mod dates;
pub mod storage;

pub use constants::*;
pub use dates::*;
pub use storage::*;
