mod csv;
mod json;
mod populate;

pub use self::{csv::*, json::*, populate::*};
