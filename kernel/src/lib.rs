pub use crate::error::*;

mod browse;
mod database;
mod entity;
mod error;
mod repository;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod browse {
        pub use crate::browse::*;
    }
    pub mod database {
        pub use crate::database::*;
    }
    pub mod repository {
        pub use crate::repository::*;
    }
}
