//! $POOP faucet client.
//!
//! The faucet hands out tokens once per cooldown window. Eligibility is
//! decided by the service; this side keeps a local [`ClaimCoordinator`] so the
//! claim action can be gated and the countdown shown without polling.
//!
//! ```text
//! FaucetSession ──▶ FaucetApi (HTTP)        status / challenge / claim / stats
//!       │       ──▶ WalletSigner            signs the one-time challenge
//!       └──────▶ ClaimCoordinator ◀── Countdown (1s ticks)
//! ```

pub mod api;
pub mod client;
pub mod clock;
pub mod coordinator;
pub mod countdown;
pub mod notice;
pub mod session;
pub mod signer;

pub use api::{
    ApiError, Challenge, ClaimOutcome, ClaimRequest, ClaimResponse, FaucetApi, Rejection,
    StatsResponse, StatusResponse,
};
pub use client::HttpFaucetApi;
pub use clock::{Clock, SystemClock};
pub use coordinator::{ClaimCoordinator, ClaimRejected, ClaimResolution, ClaimState, ClaimTicket};
pub use countdown::{format_countdown, Countdown};
pub use notice::{Notice, NoticeLevel};
pub use session::{ClaimReport, FaucetSession, FaucetSnapshot, FaucetStats};
pub use signer::{encode_signature, PromptSigner, SignerError, WalletSigner};

/// `ABCD...WXYZ` form of a wallet address. Short addresses are returned as is.
pub fn short_address(wallet: &str) -> String {
    let chars: Vec<char> = wallet.chars().collect();
    if chars.len() <= 8 {
        return wallet.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
