//! Presentation of quotes to hosts.

pub mod dto;

pub use dto::Quote;
