#![deny(unused_crate_dependencies)]
#![deny(clippy::arithmetic_side_effects)]
#![deny(clippy::cast_possible_truncation)]

pub mod graphql_api;
pub mod ports;
pub mod query;
pub mod schema;
pub mod service;
pub mod store;

#[cfg(test)]
kennel_trace::enable_tracing!();
