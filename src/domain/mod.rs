mod difference;
mod entry;
mod money;

pub use difference::*;
pub use entry::*;
pub use money::*;
