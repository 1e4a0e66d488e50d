//! GraphQL transport for the bookings module.

pub mod caller;
pub mod error;
pub mod inputs;
pub mod objects;
pub mod routes;
pub mod schema;

pub use schema::{build_schema, BookingsSchema, MutationRoot, QueryRoot};
