//! Node access: JSON-RPC transport and the chain client built on it

pub mod chain;
pub mod rpc;

pub use chain::{ChainClient, ChainReader, OutgoingTransfer, TransferKind};
pub use rpc::RpcProvider;
