//! Vouchers

pub mod data;
mod gateway;
pub mod service;

pub use data::AggregateResult;
pub use gateway::*;
pub use service::{FormValidator, VoucherCreateHandler, create_handler};
