pub mod schema;
pub mod domain;
pub mod policy;
pub mod prelude;
pub mod queries;
pub mod mock;
