// [libs/core/cursor/src/lib.rs]
pub mod errors;
pub mod increment;
pub mod state;

pub use errors::CursorError;
pub use increment::next;
pub use state::{CursorState, SeedSource};
