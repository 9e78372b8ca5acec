mod book;
mod catalog;
mod user;

pub use self::{book::*, catalog::*, user::*};
