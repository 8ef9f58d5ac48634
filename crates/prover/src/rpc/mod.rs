//! JSON-RPC client seam: the [`ChainClient`] trait and its HTTP implementation.

mod client;
mod error;
mod traits;

pub use client::HttpChainClient;
pub use error::{RpcError, RpcResult};
pub use traits::ChainClient;
