//! Validators - pure, total input checks.
//!
//! No session or transport context is needed; every function here can be
//! called on arbitrary user text.

mod date;
mod phone;

pub use date::{parse_date, validate_date, DATE_FORMAT};
pub use phone::{normalize_phone, validate_phone, COUNTRY_CODE, SUBSCRIBER_DIGITS, VALID_OPERATORS};
