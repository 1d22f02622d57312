//! The closed set of record variants

mod activity;
mod measurements;
mod nutrition;

pub use activity::*;
pub use measurements::*;
pub use nutrition::*;
