//! Saleor GraphQL API

pub mod client;
mod errors;
mod mutations;

pub use client::{SaleorClient, SaleorConfig};
pub use errors::GatewayError;
