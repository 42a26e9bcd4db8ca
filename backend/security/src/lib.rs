pub mod admin_key;
pub mod token_store;

pub use admin_key::AdminKey;
pub use token_store::{TokenStore, TokenStoreFile};
