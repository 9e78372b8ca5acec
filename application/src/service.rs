mod account;
mod browse;
mod reading_list;
mod review;
mod search;

pub use self::{account::*, browse::*, reading_list::*, review::*, search::*};
