//! Vouchers
//!
//! Voucher form model and the pure mapping between a voucher create form and
//! the remote voucher mutations: request payloads on the way out, flattened
//! field errors on the way back.

pub mod datetime;
pub mod form;
pub mod mutations;
pub mod payloads;
pub mod prelude;
