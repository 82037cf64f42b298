mod api;
pub use api::*;

mod mint;
pub use mint::*;

mod signer;
pub use signer::*;
