mod identity;
mod query;

pub use identity::*;
pub use query::*;
