//! Dual-authority state axes.
//!
//! Each axis stores its value behind an [`Authority`] tag. Transitions here
//! are pure: they commit state and report what happened, while the engine
//! assembles and dispatches the resulting notifications.

mod authority;
mod filter;
mod page;
mod selection;
mod sort;

pub use authority::*;
pub use filter::*;
pub use page::*;
pub use selection::*;
pub use sort::*;
