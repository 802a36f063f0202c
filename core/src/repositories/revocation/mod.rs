//! Token revocation store.

mod mock;
mod r#trait;

pub use mock::{MockRevocationStore, UnavailableStore};
pub use r#trait::RevocationStore;
