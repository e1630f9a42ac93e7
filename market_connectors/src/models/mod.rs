//! Vendor-agnostic data types crossing the connector boundary.

pub mod bar;
pub mod request;
