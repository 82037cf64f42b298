mod app_state;
pub use app_state::*;

mod error;
pub use error::*;

mod mint;
pub use mint::*;

mod instruction_sequence;
pub use instruction_sequence::*;
