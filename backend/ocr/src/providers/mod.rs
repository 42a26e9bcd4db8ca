pub mod ark;
pub mod mock;
