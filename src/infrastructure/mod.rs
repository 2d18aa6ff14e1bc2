//! Infrastructure layer - indexer, backend and wallet clients

pub mod api_clients;
pub mod wallet;

pub use api_clients::{AssetSource, DasClient, SwapApiClient, SwapBackend};
pub use wallet::{KeypairWallet, WalletProvider};
