//! Voucher creation against the Saleor GraphQL API.

pub mod config;
pub mod domain;
pub mod logging;
pub mod saleor;
