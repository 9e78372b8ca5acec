mod author;
mod book;
mod common;
mod inventory;
mod publisher;
mod review;
mod user;

pub use self::{author::*, book::*, common::*, inventory::*, publisher::*, review::*, user::*};
