//! Local keypair wallet that signs and sends backend-built transactions

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature, Signer},
    transaction::VersionedTransaction,
};
use tracing::{debug, info};

use crate::shared::errors::AppError;

#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Identity of the connected wallet, `None` when disconnected
    fn public_key(&self) -> Option<Pubkey>;

    /// Sign a base64 transaction, send it and wait for confirmation
    async fn sign_and_send(&self, transaction_base64: &str) -> Result<Signature, AppError>;
}

/// Decode a base64, bincode-serialized versioned transaction
pub fn decode_transaction(transaction_base64: &str) -> Result<VersionedTransaction, AppError> {
    let bytes = STANDARD
        .decode(transaction_base64.trim())
        .map_err(|e| AppError::SwapRejected(format!("Failed to decode base64 transaction: {}", e)))?;
    bincode::deserialize(&bytes)
        .map_err(|e| AppError::SwapRejected(format!("Failed to deserialize transaction: {}", e)))
}

/// Re-sign `transaction`'s message with `keypair`
pub fn sign_transaction(
    transaction: VersionedTransaction,
    keypair: &Keypair,
) -> Result<VersionedTransaction, AppError> {
    VersionedTransaction::try_new(transaction.message, &[keypair])
        .map_err(|e| AppError::SwapRejected(format!("Failed to sign transaction: {}", e)))
}

pub struct KeypairWallet {
    rpc_client: RpcClient,
    keypair: Option<Keypair>,
}

impl KeypairWallet {
    pub fn new(rpc_url: String) -> Self {
        Self {
            rpc_client: RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed()),
            keypair: None,
        }
    }

    pub fn connect(&mut self, keypair_path: &str) -> Result<Pubkey, AppError> {
        let keypair = read_keypair_file(keypair_path)
            .map_err(|e| AppError::ConfigError(format!("Failed to load keypair {}: {}", keypair_path, e)))?;
        Ok(self.connect_keypair(keypair))
    }

    pub fn connect_keypair(&mut self, keypair: Keypair) -> Pubkey {
        let pubkey = keypair.pubkey();
        info!("🔑 Connected wallet {}", pubkey);
        self.keypair = Some(keypair);
        pubkey
    }

    pub fn disconnect(&mut self) {
        if let Some(keypair) = self.keypair.take() {
            info!("Disconnected wallet {}", keypair.pubkey());
        }
    }
}

#[async_trait]
impl WalletProvider for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.keypair.as_ref().map(|k| k.pubkey())
    }

    async fn sign_and_send(&self, transaction_base64: &str) -> Result<Signature, AppError> {
        let keypair = self.keypair.as_ref().ok_or(AppError::WalletNotConnected)?;
        let transaction = sign_transaction(decode_transaction(transaction_base64)?, keypair)?;
        if let Some(signature) = transaction.signatures.first() {
            debug!("Sending transaction {}", signature);
        }

        let signature = self
            .rpc_client
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(|e| AppError::SwapRejected(format!("Transaction failed: {}", e)))?;

        info!("✅ Transaction confirmed: {}", signature);
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{
        hash::Hash,
        message::{v0, VersionedMessage},
        system_instruction,
    };

    fn unsigned_transfer(payer: &Pubkey) -> String {
        let instruction = system_instruction::transfer(payer, &Pubkey::new_unique(), 1_000);
        let message = v0::Message::try_compile(payer, &[instruction], &[], Hash::default()).unwrap();
        let transaction = VersionedTransaction {
            signatures: vec![Signature::default()],
            message: VersionedMessage::V0(message),
        };
        STANDARD.encode(bincode::serialize(&transaction).unwrap())
    }

    #[test]
    fn test_decode_and_sign() {
        let keypair = Keypair::new();
        let payload = unsigned_transfer(&keypair.pubkey());

        let transaction = decode_transaction(&payload).unwrap();
        assert_eq!(transaction.signatures[0], Signature::default());

        let signed = sign_transaction(transaction, &keypair).unwrap();
        assert_ne!(signed.signatures[0], Signature::default());
        assert!(signed.verify_with_results().iter().all(|ok| *ok));
    }

    #[test]
    fn test_sign_with_wrong_key_is_rejected() {
        let payer = Keypair::new();
        let transaction = decode_transaction(&unsigned_transfer(&payer.pubkey())).unwrap();
        assert!(matches!(
            sign_transaction(transaction, &Keypair::new()),
            Err(AppError::SwapRejected(_))
        ));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode_transaction("not base64!"), Err(AppError::SwapRejected(_))));
        assert!(matches!(decode_transaction("AQID"), Err(AppError::SwapRejected(_))));
    }

    #[test]
    fn test_connect_disconnect() {
        let mut wallet = KeypairWallet::new("http://localhost:8899".to_string());
        assert_eq!(wallet.public_key(), None);

        let keypair = Keypair::new();
        let expected = keypair.pubkey();
        assert_eq!(wallet.connect_keypair(keypair), expected);
        assert_eq!(wallet.public_key(), Some(expected));

        wallet.disconnect();
        assert_eq!(wallet.public_key(), None);
    }

    #[test]
    fn test_connect_from_keypair_file() {
        use solana_sdk::signature::write_keypair_file;

        let keypair = Keypair::new();
        let path = std::env::temp_dir().join(format!("multiswap-{}.json", keypair.pubkey()));
        write_keypair_file(&keypair, &path).unwrap();

        let mut wallet = KeypairWallet::new("http://localhost:8899".to_string());
        let connected = wallet.connect(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(connected, keypair.pubkey());
        assert_eq!(wallet.public_key(), Some(keypair.pubkey()));
        assert!(matches!(
            wallet.connect("/nonexistent/id.json"),
            Err(AppError::ConfigError(_))
        ));
    }
}
