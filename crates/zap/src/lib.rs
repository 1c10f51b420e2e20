pub mod api;
pub mod boundary;
pub mod domain;
pub mod infra;
pub mod observe;
mod zapper;

#[cfg(test)]
mod tests;

pub use {
    domain::{Error, Quote},
    infra::config::{Config, file::load as load_config},
    zapper::Zapper,
};
