pub mod config;
pub mod estimator;
pub mod reserves;
pub mod rpc;

pub use {estimator::ZapContract, reserves::PairReader, rpc::Web3Call};
