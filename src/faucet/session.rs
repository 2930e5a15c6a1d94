//! Drives a [`ClaimCoordinator`] against the faucet service.
//!
//! The session owns everything with a lifetime: the connected wallet, the
//! countdown task and the stats poller. Every network failure is caught here
//! and turned into a state transition plus a [`Notice`]; nothing escapes as
//! an error.

use super::api::{ApiError, ClaimOutcome, ClaimRequest, FaucetApi, Rejection};
use super::clock::Clock;
use super::coordinator::{ClaimCoordinator, ClaimRejected, ClaimResolution};
use super::countdown::{format_countdown, Countdown, TaskGuard};
use super::notice::Notice;
use super::signer::{encode_signature, WalletSigner};
use crate::config::FaucetConfig;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, instrument, warn};

pub const CONNECTED_MESSAGE: &str = "Wallet connected!";
pub const STATUS_UNAVAILABLE_MESSAGE: &str = "Could not check faucet status";
pub const CONNECT_FIRST_MESSAGE: &str = "Please connect your wallet first";
pub const CHALLENGE_FAILED_MESSAGE: &str = "Failed to get challenge";
pub const SIGN_REQUIRED_MESSAGE: &str = "Please sign the message to claim";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const CLAIM_FAILED_MESSAGE: &str = "Claim failed";
pub const OVERFLOW_MESSAGE: &str = "You need at least 1 $POOP in your wallet to use the faucet! Buy some $POOP first, then come back for free refills.";
pub const WALLET_TOO_NEW_MESSAGE: &str =
    "Your wallet needs some transaction history on Solana before claiming";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct FaucetStats {
    pub total_claims: u64,
    pub unique_wallets: u64,
    pub balance: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FaucetSnapshot {
    pub wallet: Option<String>,
    pub can_claim: bool,
    pub claiming: bool,
    pub remaining_seconds: u64,
    pub mock_mode: bool,
    pub stats: FaucetStats,
}

/// What became of a call to [`FaucetSession::claim`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimReport {
    NoWallet,
    /// Refused locally; no request was made.
    Skipped(ClaimRejected),
    Granted { tx_signature: Option<String> },
    CoolingDown { remaining_seconds: u64 },
    Overflow(Rejection),
    Failed { message: String },
    /// The session was reset while the claim was in flight; its result was dropped.
    Abandoned,
}

struct Settled {
    resolution: ClaimResolution,
    report: ClaimReport,
    notices: Vec<Notice>,
}

impl Settled {
    fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            resolution: ClaimResolution::Retry,
            notices: vec![Notice::error(message.clone())],
            report: ClaimReport::Failed { message },
        }
    }
}

pub struct FaucetSession {
    api: Arc<dyn FaucetApi>,
    coordinator: Arc<Mutex<ClaimCoordinator>>,
    notices: mpsc::UnboundedSender<Notice>,
    wallet: Mutex<Option<String>>,
    mock_mode: AtomicBool,
    stats: Arc<Mutex<FaucetStats>>,
    countdown: Mutex<Option<Countdown>>,
    poller: Mutex<Option<TaskGuard>>,
    tick_interval: Duration,
    stats_interval: Duration,
}

impl FaucetSession {
    pub fn new(
        api: Arc<dyn FaucetApi>,
        clock: Arc<dyn Clock>,
        config: &FaucetConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (notices, receiver) = mpsc::unbounded_channel();
        let session = Self {
            api,
            coordinator: Arc::new(Mutex::new(ClaimCoordinator::new(clock))),
            notices,
            wallet: Mutex::new(None),
            mock_mode: AtomicBool::new(false),
            stats: Arc::new(Mutex::new(FaucetStats::default())),
            countdown: Mutex::new(None),
            poller: Mutex::new(None),
            tick_interval: config.tick_interval(),
            stats_interval: config.stats_interval(),
        };
        (session, receiver)
    }

    #[instrument(skip(self, wallet))]
    pub async fn connect(&self, wallet: impl Into<String> + Send) {
        let wallet = wallet.into();
        let previous = self.wallet.lock().await.replace(wallet.clone());
        if previous.is_some_and(|previous| previous != wallet) {
            self.coordinator.lock().await.reset();
        }
        info!(wallet = %wallet, "Wallet connected");
        self.refresh_status().await;
        self.notify(Notice::success(CONNECTED_MESSAGE));
    }

    pub async fn disconnect(&self) {
        self.wallet.lock().await.take();
        self.coordinator.lock().await.reset();
        self.countdown.lock().await.take();
        info!("Wallet disconnected");
    }

    pub async fn wallet(&self) -> Option<String> {
        self.wallet.lock().await.clone()
    }

    /// Queries status for the connected wallet, or anonymously. A failure is
    /// a warning only; with a wallet connected the claim is optimistically allowed.
    pub async fn refresh_status(&self) {
        let wallet = self.wallet().await;
        let epoch = self.coordinator.lock().await.epoch();

        let result = self.api.status(wallet.as_deref()).await;

        let mut coordinator = self.coordinator.lock().await;
        if coordinator.epoch() != epoch {
            debug!("Dropping status requested before a reset");
            return;
        }
        match result {
            Ok(status) => {
                self.mock_mode.store(status.mock_mode, Ordering::Relaxed);
                self.stats.lock().await.balance = status.faucet_balance;
                coordinator.apply_status(&status, wallet.is_some());
            }
            Err(e) => {
                warn!(error = %e, "Status check failed");
                if wallet.is_some() {
                    coordinator.status_unavailable();
                    self.notify(Notice::warning(STATUS_UNAVAILABLE_MESSAGE));
                }
            }
        }
        drop(coordinator);
        self.sync_countdown().await;
    }

    /// Runs one claim: challenge, signature, submission. A second call while
    /// the first is in flight is refused without touching the network.
    pub async fn claim(&self, signer: &dyn WalletSigner) -> ClaimReport {
        let Some(wallet) = self.wallet().await else {
            self.notify(Notice::error(CONNECT_FIRST_MESSAGE));
            return ClaimReport::NoWallet;
        };

        let ticket = match self.coordinator.lock().await.begin_claim() {
            Ok(ticket) => ticket,
            Err(rejected) => {
                debug!(reason = %rejected, "Claim refused locally");
                return ClaimReport::Skipped(rejected);
            }
        };

        let settled = self.submit_claim(&wallet, signer).await;

        if !self.coordinator.lock().await.resolve(ticket, settled.resolution) {
            return ClaimReport::Abandoned;
        }
        self.sync_countdown().await;
        for notice in settled.notices {
            self.notify(notice);
        }
        if matches!(settled.report, ClaimReport::Granted { .. }) {
            self.load_stats().await;
        }
        settled.report
    }

    #[instrument(skip(self, signer))]
    async fn submit_claim(&self, wallet: &str, signer: &dyn WalletSigner) -> Settled {
        let challenge = match self.api.challenge(wallet).await {
            Ok(challenge) => challenge,
            Err(ApiError::Status { detail, .. }) => {
                return Settled::failed(detail.unwrap_or_else(|| CHALLENGE_FAILED_MESSAGE.to_string()))
            }
            Err(e) => {
                warn!(error = %e, "Challenge request failed");
                return Settled::failed(NETWORK_ERROR_MESSAGE);
            }
        };

        let signature = match signer.sign_message(challenge.message.as_bytes()).await {
            Ok(bytes) => encode_signature(&bytes),
            Err(e) => {
                info!(error = %e, "Challenge not signed");
                return Settled::failed(SIGN_REQUIRED_MESSAGE);
            }
        };

        let request = ClaimRequest {
            wallet: wallet.to_string(),
            signature,
            message: challenge.message,
            nonce: challenge.nonce,
            captcha_token: None,
        };
        let response = match self.api.claim(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Claim request failed");
                return Settled::failed(e.detail().unwrap_or(NETWORK_ERROR_MESSAGE).to_string());
            }
        };

        match ClaimOutcome::from(response) {
            ClaimOutcome::Granted {
                tx_signature,
                next_claim_at,
            } => {
                let message = match &tx_signature {
                    Some(sig) => format!("Flushed! Tokens are on their way. Tx: {}", sig),
                    None => "Flushed! Tokens are on their way.".to_string(),
                };
                Settled {
                    resolution: ClaimResolution::Granted { next_claim_at },
                    report: ClaimReport::Granted { tx_signature },
                    notices: vec![Notice::success(message)],
                }
            }
            ClaimOutcome::Rejected(
                rejection @ (Rejection::NoTokenAccount | Rejection::WalletTooNew),
            ) => {
                let mut notices = vec![Notice::warning(OVERFLOW_MESSAGE)];
                if rejection == Rejection::WalletTooNew {
                    notices.push(Notice::error(WALLET_TOO_NEW_MESSAGE));
                }
                Settled {
                    resolution: ClaimResolution::Retry,
                    report: ClaimReport::Overflow(rejection),
                    notices,
                }
            }
            ClaimOutcome::Rejected(Rejection::Cooldown { remaining_seconds }) => Settled {
                resolution: ClaimResolution::Cooldown { remaining_seconds },
                report: ClaimReport::CoolingDown { remaining_seconds },
                notices: vec![Notice::warning(format!(
                    "Please wait {}",
                    format_countdown(remaining_seconds)
                ))],
            },
            ClaimOutcome::Rejected(Rejection::Other { error, detail }) => {
                Settled::failed(error.or(detail).unwrap_or_else(|| CLAIM_FAILED_MESSAGE.to_string()))
            }
        }
    }

    /// Fetches the aggregate counters once. Failures are ignored.
    pub async fn load_stats(&self) {
        refresh_stats(self.api.as_ref(), &self.stats).await;
    }

    /// Polls the stats endpoint now and then every stats interval, until the
    /// session is dropped or [`stop_stats_poll`](Self::stop_stats_poll).
    pub async fn start_stats_poll(&self) {
        let api = self.api.clone();
        let stats = self.stats.clone();
        let period = self.stats_interval;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                refresh_stats(api.as_ref(), &stats).await;
            }
        });
        *self.poller.lock().await = Some(TaskGuard::new(handle));
    }

    pub async fn stop_stats_poll(&self) {
        self.poller.lock().await.take();
    }

    pub async fn snapshot(&self) -> FaucetSnapshot {
        let wallet = self.wallet().await;
        let (can_claim, claiming, remaining_seconds) = {
            let coordinator = self.coordinator.lock().await;
            (
                coordinator.can_claim(),
                coordinator.is_claiming(),
                coordinator.remaining_seconds(),
            )
        };
        FaucetSnapshot {
            can_claim: can_claim && wallet.is_some(),
            wallet,
            claiming,
            remaining_seconds,
            mock_mode: self.mock_mode.load(Ordering::Relaxed),
            stats: *self.stats.lock().await,
        }
    }

    /// Keeps exactly one countdown running while the coordinator cools down.
    async fn sync_countdown(&self) {
        let deadline = self.coordinator.lock().await.deadline();
        let mut slot = self.countdown.lock().await;
        match deadline {
            Some(deadline) => {
                let running = slot
                    .as_ref()
                    .filter(|countdown| countdown.is_running())
                    .map(|countdown| countdown.deadline());
                if running != Some(deadline) {
                    *slot = Some(Countdown::spawn(
                        self.coordinator.clone(),
                        self.notices.clone(),
                        deadline,
                        self.tick_interval,
                    ));
                }
            }
            None => {
                slot.take();
            }
        }
    }

    fn notify(&self, notice: Notice) {
        debug!(level = ?notice.level, message = %notice.message, "Notice");
        // A closed receiver just means nobody is listening any more.
        let _ = self.notices.send(notice);
    }
}

async fn refresh_stats(api: &dyn FaucetApi, stats: &Mutex<FaucetStats>) {
    match api.stats().await {
        Ok(fresh) => {
            let mut stats = stats.lock().await;
            stats.total_claims = fresh.total_claims;
            stats.unique_wallets = fresh.unique_wallets;
        }
        Err(e) => debug!(error = %e, "Stats refresh failed"),
    }
}
