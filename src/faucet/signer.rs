//! The wallet-signing capability, supplied by whoever presents the faucet.

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    #[error("User declined to sign")]
    Declined,
    #[error("Signing failed: {reason}")]
    Failed { reason: String },
}

#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Signs the raw message bytes and returns the raw signature bytes.
    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;
}

/// Signatures travel base58-encoded.
pub fn encode_signature(signature: &[u8]) -> String {
    bs58::encode(signature).into_string()
}

/// Shows the challenge on `output` and reads a base58 signature, produced
/// out of band by the user's wallet, from `input`. An empty line declines.
pub struct PromptSigner<R, W> {
    io: Mutex<(R, W)>,
}

impl<R, W> PromptSigner<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new((input, output)),
        }
    }
}

#[async_trait]
impl<R, W> WalletSigner for PromptSigner<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        let mut io = self.io.lock().await;
        let (input, output) = &mut *io;
        let failed = |e: std::io::Error| SignerError::Failed {
            reason: e.to_string(),
        };

        let prompt = format!(
            "Sign this message with your wallet:\n\n{}\n\nPaste the base58 signature (empty to cancel): ",
            String::from_utf8_lossy(message)
        );
        output.write_all(prompt.as_bytes()).await.map_err(failed)?;
        output.flush().await.map_err(failed)?;

        let mut line = String::new();
        input.read_line(&mut line).await.map_err(failed)?;
        let pasted = line.trim();
        if pasted.is_empty() {
            return Err(SignerError::Declined);
        }
        bs58::decode(pasted)
            .into_vec()
            .map_err(|e| SignerError::Failed {
                reason: format!("Not a base58 signature: {}", e),
            })
    }
}
