//! Wallet session and the flow that establishes it.

use crate::{
    ConnectError, InjectedSigner, ProviderError, ProviderErrorCode, ProviderEvent, ProviderHandle,
    WalletEnvironment, WalletKind, WalletProvider, detect_wallet,
    provider::{current_chain_id, request_as},
};
use alloy_primitives::Address;
use pharos_config::MintConfig;
use serde_json::json;
use std::{sync::Arc, time::Duration};

/// How long `eth_requestAccounts` may stay unanswered before the attempt fails.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A connected wallet.
#[derive(Clone, Debug)]
pub struct Session {
    wallet: WalletKind,
    signer: InjectedSigner,
    on_target_chain: bool,
}

impl Session {
    pub fn wallet(&self) -> WalletKind {
        self.wallet
    }

    pub fn signer(&self) -> &InjectedSigner {
        &self.signer
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.signer.chain_id()
    }

    pub fn provider(&self) -> &dyn WalletProvider {
        self.signer.provider()
    }

    /// Whether the wallet's active chain is the configured one.
    pub fn on_target_chain(&self) -> bool {
        self.on_target_chain
    }
}

/// Current information about the wallet connection.
#[derive(Clone, Debug, Default)]
pub enum SessionState {
    Connected(Session),
    #[default]
    Disconnected,
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Connected(session) => Some(session),
            Self::Disconnected => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}

/// Result of [`ConnectionManager::silent_reconnect`].
#[derive(Clone, Debug)]
pub enum Reconnect {
    /// The wallet had already authorized this site.
    Connected(Session),
    /// A wallet is present but has not authorized this site.
    NotAuthorized(WalletKind),
    /// Nothing injected.
    NoWallet,
    /// Silent reconnection is turned off.
    Skipped,
}

/// What a provider event did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionChange {
    Disconnected,
    AccountChanged(Address),
    ChainChanged { chain_id: u64, on_target_chain: bool },
    /// No session to update.
    Ignored,
}

/// Owns the session and performs connect/disconnect against an injected wallet.
#[derive(Debug)]
pub struct ConnectionManager {
    config: Arc<MintConfig>,
    state: SessionState,
    request_timeout: Duration,
    auto_reconnect: bool,
}

impl ConnectionManager {
    pub fn new(config: Arc<MintConfig>) -> Self {
        Self {
            config,
            state: SessionState::Disconnected,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            auto_reconnect: true,
        }
    }

    /// Overrides [`DEFAULT_REQUEST_TIMEOUT`].
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Whether [`Self::silent_reconnect`] may reuse an earlier authorization.
    pub fn with_auto_reconnect(mut self, enabled: bool) -> Self {
        self.auto_reconnect = enabled;
        self
    }

    pub fn config(&self) -> &MintConfig {
        &self.config
    }

    /// Replaces the config. A live session is kept; its chain is re-evaluated on next connect.
    pub fn set_config(&mut self, config: Arc<MintConfig>) {
        self.config = config;
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Reconnects without prompting if the detected wallet already shares an account.
    pub async fn silent_reconnect(
        &mut self,
        env: &WalletEnvironment<ProviderHandle>,
    ) -> Result<Reconnect, ConnectError> {
        if !self.auto_reconnect {
            return Ok(Reconnect::Skipped);
        }
        let Some((wallet, provider)) = detect_wallet(env).into_parts() else {
            return Ok(Reconnect::NoWallet);
        };

        let accounts: Vec<Address> = request_as(&*provider, "eth_accounts", json!([])).await?;
        if accounts.is_empty() {
            debug!(target: "wallets", %wallet, "wallet not connected");
            return Ok(Reconnect::NotAuthorized(wallet));
        }

        info!(target: "wallets", %wallet, "auto-connecting");
        self.connect_with(wallet, provider).await.map(Reconnect::Connected)
    }

    /// Detects a wallet and asks it for account access.
    pub async fn connect(
        &mut self,
        env: &WalletEnvironment<ProviderHandle>,
    ) -> Result<Session, ConnectError> {
        let Some((wallet, provider)) = detect_wallet(env).into_parts() else {
            self.disconnect();
            return Err(ConnectError::NoWallet);
        };
        self.connect_with(wallet, provider).await
    }

    /// Asks `provider` for account access and builds a session on the configured chain.
    ///
    /// Any failure leaves the manager disconnected.
    pub async fn connect_with(
        &mut self,
        wallet: WalletKind,
        provider: ProviderHandle,
    ) -> Result<Session, ConnectError> {
        match self.establish(wallet, provider).await {
            Ok(session) => {
                info!(
                    target: "wallets",
                    %wallet,
                    address = %session.address(),
                    chain_id = session.chain_id(),
                    "connected"
                );
                self.state = SessionState::Connected(session.clone());
                Ok(session)
            }
            Err(err) => {
                warn!(target: "wallets", %wallet, %err, "wallet connection failed");
                self.disconnect();
                Err(err)
            }
        }
    }

    async fn establish(
        &self,
        wallet: WalletKind,
        provider: ProviderHandle,
    ) -> Result<Session, ConnectError> {
        debug!(target: "wallets", %wallet, "requesting accounts");
        let accounts: Vec<Address> = tokio::time::timeout(
            self.request_timeout,
            request_as(&*provider, "eth_requestAccounts", json!([])),
        )
        .await
        .map_err(|_| ConnectError::Timeout(self.request_timeout))??;
        let address = *accounts.first().ok_or(ConnectError::NoAccounts)?;

        let mut chain_id = current_chain_id(&*provider).await?;
        if chain_id != self.config.chain_id {
            let expected = self.config.chain_id;
            warn!(target: "wallets", chain_id, expected, "wrong network, switching");
            match self.switch_network(&*provider).await {
                // the wallet may or may not have followed, ask again
                Ok(()) => chain_id = current_chain_id(&*provider).await?,
                Err(err) => warn!(target: "wallets", %err, "network switch failed"),
            }
        }

        Ok(Session {
            wallet,
            signer: InjectedSigner::new(provider, address, chain_id),
            on_target_chain: chain_id == self.config.chain_id,
        })
    }

    /// Makes the configured chain the wallet's active chain, registering it first if needed.
    async fn switch_network(&self, provider: &dyn WalletProvider) -> Result<(), ProviderError> {
        let switch = provider
            .request("wallet_switchEthereumChain", json!([self.config.switch_chain_params()]))
            .await;
        match switch {
            Ok(_) => Ok(()),
            Err(err) if err.code == ProviderErrorCode::UnrecognizedChain => {
                let chain = &self.config.chain_name;
                info!(target: "wallets", %chain, "adding network to wallet");
                provider
                    .request("wallet_addEthereumChain", json!([self.config.add_chain_params()]))
                    .await
                    .map(drop)
            }
            Err(err) => Err(err),
        }
    }

    /// Drops the session.
    pub fn disconnect(&mut self) {
        if self.state.is_connected() {
            info!(target: "wallets", "disconnecting wallet");
        }
        self.state = SessionState::Disconnected;
    }

    /// Applies an `accountsChanged` / `chainChanged` event.
    pub fn handle_event(&mut self, event: ProviderEvent) -> SessionChange {
        let SessionState::Connected(session) = &mut self.state else {
            return SessionChange::Ignored;
        };
        match event {
            ProviderEvent::AccountsChanged(accounts) => match accounts.first() {
                None => {
                    self.disconnect();
                    SessionChange::Disconnected
                }
                Some(&address) => {
                    debug!(target: "wallets", %address, "account changed");
                    session.signer.set_address(address);
                    SessionChange::AccountChanged(address)
                }
            },
            ProviderEvent::ChainChanged(chain_id) => {
                debug!(target: "wallets", chain_id, "chain changed");
                session.signer.set_chain_id(chain_id);
                session.on_target_chain = chain_id == self.config.chain_id;
                SessionChange::ChainChanged {
                    chain_id,
                    on_target_chain: session.on_target_chain,
                }
            }
        }
    }
}
