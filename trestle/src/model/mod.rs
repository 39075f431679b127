//! Dynamic record model

mod key;
mod record;
mod value;

pub use key::*;
pub use record::*;
pub use value::*;
