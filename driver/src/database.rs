mod memory;
mod sqlite;

pub use self::{memory::*, sqlite::*};
