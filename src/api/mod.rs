//! Homework review API access
//!
//! - [`client`] performs the authenticated HTTP request
//! - [`response`] validates the decoded body and extracts its entries

pub mod client;
pub mod response;

pub use client::PracticumClient;
pub use response::{check_response, current_date};
