//! The mint page: configuration, wallet session, contract handle and what the page displays.

use crate::{InjectedContract, MintController, MintError, MintReceipt, Status, StatusSink};
use alloy_primitives::Address;
use pharos_config::{ConfigLoader, MintConfig};
use pharos_wallets::{
    ConnectError, ConnectionManager, DEFAULT_REQUEST_TIMEOUT, ProviderEvent, ProviderHandle,
    Reconnect, Session, SessionChange, WalletEnvironment,
};
use std::{sync::Arc, time::Duration};
use tokio::sync::broadcast::{self, error::RecvError};

/// Page-level options.
#[derive(Clone, Debug)]
pub struct AppOptions {
    /// Address of the page, shown in the mobile wallet instructions.
    pub page_url: String,
    /// Reuse an earlier wallet authorization on start.
    pub auto_reconnect: bool,
    pub request_timeout: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            page_url: String::new(),
            auto_reconnect: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Everything the page renders outside the status modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    pub connect_enabled: bool,
    pub connect_label: &'static str,
    pub mint_enabled: bool,
    pub mint_label: &'static str,
    /// `<wallet>: 0x1234...abcd`, set while connected.
    pub wallet_label: Option<String>,
    pub network_label: String,
    /// Green badge when connected to the configured chain.
    pub network_ok: bool,
    pub quantity: u8,
    pub cost: String,
    pub remaining: String,
}

/// The mint page.
#[derive(Debug)]
pub struct MintApp<S> {
    config: Arc<MintConfig>,
    options: AppOptions,
    manager: ConnectionManager,
    contract: Option<InjectedContract>,
    controller: MintController,
    events: Option<broadcast::Receiver<ProviderEvent>>,
    connecting: bool,
    /// Badge text while disconnected.
    network_note: String,
    sink: S,
}

impl<S: StatusSink> MintApp<S> {
    pub fn new(config: MintConfig, options: AppOptions, sink: S) -> Self {
        let config = Arc::new(config);
        let manager = ConnectionManager::new(config.clone())
            .with_request_timeout(options.request_timeout)
            .with_auto_reconnect(options.auto_reconnect);
        Self {
            controller: MintController::new(config.currency.clone()),
            config,
            options,
            manager,
            contract: None,
            events: None,
            connecting: false,
            network_note: "Disconnected".to_string(),
            sink,
        }
    }

    pub fn config(&self) -> &MintConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.manager.session()
    }

    pub fn contract(&self) -> Option<&InjectedContract> {
        self.contract.as_ref()
    }

    pub fn controller(&self) -> &MintController {
        &self.controller
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Loads the configuration, falling back to the built-in one, and re-reads the contract.
    pub async fn load_config(&mut self, loader: &ConfigLoader) {
        let config = loader.load().await;
        self.apply_config(config);
        self.refresh().await;
    }

    /// Replaces the whole configuration. Price and supply of the previous contract are dropped.
    pub fn apply_config(&mut self, config: MintConfig) {
        if config.contract().is_none() {
            let address = &config.contract_address;
            warn!(target: "mint", %address, "contract address not configured");
        }
        self.config = Arc::new(config);
        self.manager.set_config(self.config.clone());
        self.controller.set_currency(self.config.currency.clone());
        self.controller.clear_contract_reads();
        self.bind_contract();
    }

    /// Page load: reconnects an already authorized wallet and reads the supply.
    pub async fn start(&mut self, env: &WalletEnvironment<ProviderHandle>) {
        match self.manager.silent_reconnect(env).await {
            Ok(Reconnect::Connected(_)) => self.on_connected().await,
            Ok(Reconnect::NotAuthorized(_)) | Ok(Reconnect::Skipped) => {
                self.network_note = "Wallet not connected".to_string();
            }
            Ok(Reconnect::NoWallet) => {
                self.network_note = "Open in a wallet's DApp browser".to_string();
            }
            Err(err) => {
                warn!(target: "mint", %err, "auto-connect failed");
                self.network_note = "Connection error".to_string();
            }
        }
    }

    /// Connect button.
    pub async fn connect(
        &mut self,
        env: &WalletEnvironment<ProviderHandle>,
    ) -> Result<(), ConnectError> {
        self.connecting = true;
        let result = self.manager.connect(env).await;
        self.connecting = false;
        match result {
            Ok(_) => {
                self.on_connected().await;
                Ok(())
            }
            Err(err) => {
                self.sink.show(&Status::error(err.user_message()));
                self.disconnect();
                Err(err)
            }
        }
    }

    async fn on_connected(&mut self) {
        self.events = self.manager.session().and_then(|session| session.provider().subscribe());
        self.bind_contract();
        self.refresh().await;
    }

    /// Disconnect button. Always ends disconnected.
    pub fn disconnect(&mut self) {
        self.manager.disconnect();
        self.contract = None;
        self.events = None;
        self.network_note = "Disconnected".to_string();
    }

    /// Re-reads price and supply from the contract.
    pub async fn refresh(&mut self) {
        if let Some(contract) = &self.contract {
            self.controller.refresh_price(contract).await;
            self.controller.refresh_stats(contract).await;
        }
    }

    fn bind_contract(&mut self) {
        self.contract = match (self.manager.session(), self.config.contract()) {
            (Some(session), Some(address)) => {
                Some(InjectedContract::new(address, session.signer().clone()))
            }
            _ => None,
        };
    }

    pub fn set_quantity_input(&mut self, input: &str) {
        self.controller.set_quantity_input(input);
    }

    /// `-` / `+` buttons.
    pub fn change_quantity(&mut self, delta: i64) {
        self.controller.change_quantity(delta);
    }

    /// Mint button.
    pub async fn mint(&mut self) -> Result<MintReceipt, MintError> {
        let contract = match (self.manager.session(), &self.contract) {
            (Some(_), Some(contract)) => contract,
            (session, _) => {
                let err = if session.is_none() {
                    MintError::NotConnected
                } else {
                    MintError::ContractNotConfigured
                };
                self.sink.show(&Status::error(err.user_message()));
                return Err(err);
            }
        };
        self.controller.mint(contract, &mut self.sink).await
    }

    /// "How to connect on mobile" link.
    pub fn show_wallet_instructions(&mut self) {
        self.sink.show(&Status::mobile_wallet_instructions(&self.options.page_url));
    }

    /// Waits for the next event of the connected wallet. `None` once there is nothing to listen
    /// to.
    pub async fn next_event(&mut self) -> Option<ProviderEvent> {
        let events = self.events.as_mut()?;
        loop {
            match events.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(target: "mint", skipped, "missed wallet events");
                }
                Err(RecvError::Closed) => {
                    self.events = None;
                    return None;
                }
            }
        }
    }

    /// Applies a wallet event to the session and the contract handle.
    pub async fn on_provider_event(&mut self, event: ProviderEvent) -> SessionChange {
        let change = self.manager.handle_event(event);
        match &change {
            SessionChange::Disconnected => self.disconnect(),
            SessionChange::AccountChanged(_) => self.bind_contract(),
            SessionChange::ChainChanged { on_target_chain, .. } => {
                self.bind_contract();
                if *on_target_chain {
                    self.refresh().await;
                }
            }
            SessionChange::Ignored => {}
        }
        change
    }

    /// What the page shows right now.
    pub fn page(&self) -> PageState {
        let session = self.manager.session();
        let (mint_enabled, mint_label) = match (session, &self.contract) {
            (None, _) => (false, "Connect wallet"),
            (Some(_), None) => (false, "Contract not configured"),
            (Some(_), Some(_)) if self.controller.is_minting() => (false, "Minting..."),
            (Some(_), Some(_)) => (true, "Mint NFT"),
        };
        let (network_label, network_ok) = match session {
            Some(session) if session.on_target_chain() => (self.config.chain_name.clone(), true),
            Some(_) => ("Wrong network".to_string(), false),
            None => (self.network_note.clone(), false),
        };
        PageState {
            connect_enabled: !self.connecting && session.is_none(),
            connect_label: if self.connecting { "Connecting..." } else { "Connect Wallet" },
            mint_enabled,
            mint_label,
            wallet_label: session.map(|session| {
                format!("{}: {}", session.wallet(), short_address(session.address()))
            }),
            network_label,
            network_ok,
            quantity: self.controller.quantity().get(),
            cost: self.controller.display_cost(),
            remaining: self.controller.remaining().to_string(),
        }
    }
}

/// `0x1234...abcd`
pub fn short_address(address: Address) -> String {
    let checksum = address.to_checksum(None);
    format!("{}...{}", &checksum[..6], &checksum[checksum.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        StatusKind,
        contract::tests::{CONTRACT, chain, price},
        status::RecordedStatus,
    };
    use alloy_primitives::{U256, address};
    use pharos_wallets::{MockProvider, ProviderError, ProviderFlags};

    fn configured() -> MintConfig {
        MintConfig::fallback().with_contract_address(CONTRACT.to_string())
    }

    fn app(config: MintConfig) -> MintApp<RecordedStatus> {
        let options =
            AppOptions { page_url: "https://mint.example.org".to_string(), ..Default::default() };
        MintApp::new(config, options, RecordedStatus::default())
    }

    fn okx(provider: &Arc<MockProvider>) -> WalletEnvironment<ProviderHandle> {
        WalletEnvironment {
            okxwallet: Some(provider.clone() as ProviderHandle),
            ..WalletEnvironment::empty()
        }
    }

    #[test]
    fn short_addresses() {
        assert_eq!(
            short_address(address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")),
            "0xf39F...2266"
        );
    }

    #[tokio::test]
    async fn unreachable_config_keeps_mint_disabled() {
        let mut app = app(configured());
        let loader = ConfigLoader::new("http://127.0.0.1:1").unwrap();
        app.load_config(&loader).await;
        assert!(app.config().contract().is_none());

        let provider = chain(10_000, 0);
        app.connect(&okx(&provider)).await.unwrap();
        let page = app.page();
        assert!(!page.mint_enabled);
        assert_eq!(page.mint_label, "Contract not configured");
        assert!(matches!(app.mint().await, Err(MintError::ContractNotConfigured)));
        assert_eq!(provider.call_count("eth_sendTransaction"), 0);
    }

    #[tokio::test]
    async fn reload_drops_previous_contract_reads() {
        let mut app = app(configured());
        let provider = chain(10_000, 5);
        app.connect(&okx(&provider)).await.unwrap();
        assert_eq!(app.page().remaining, "9995");

        let loader = ConfigLoader::new("http://127.0.0.1:1").unwrap();
        app.load_config(&loader).await;
        let page = app.page();
        assert!(app.contract().is_none());
        assert_eq!(page.mint_label, "Contract not configured");
        assert_eq!(page.remaining, "—");
        assert_eq!(app.controller().unit_price(), crate::DEFAULT_UNIT_PRICE);

        app.apply_config(configured());
        app.refresh().await;
        assert_eq!(app.page().remaining, "9995");
        assert_eq!(app.controller().unit_price(), price());
    }

    #[tokio::test]
    async fn missing_wallet_shows_guidance() {
        let mut app = app(configured());
        let err = app.connect(&WalletEnvironment::empty()).await.unwrap_err();
        assert!(matches!(err, ConnectError::NoWallet));

        let status = app.sink().last().unwrap();
        assert_eq!(status.kind(), StatusKind::Error);
        assert!(status.message().starts_with("Wallet not found"));
        let page = app.page();
        assert!(page.connect_enabled);
        assert_eq!(page.connect_label, "Connect Wallet");
        assert!(!page.mint_enabled);
    }

    #[tokio::test]
    async fn connect_then_mint_then_disconnect() {
        let mut app = app(configured());
        let provider = chain(10_000, 5);
        app.connect(&okx(&provider)).await.unwrap();

        let page = app.page();
        assert_eq!(page.wallet_label.as_deref(), Some("OKX Wallet: 0xf39F...2266"));
        assert_eq!(page.network_label, "PHAROS Testnet");
        assert!(page.network_ok);
        assert!(page.mint_enabled);
        assert!(!page.connect_enabled);
        assert_eq!(page.remaining, "9995");

        app.set_quantity_input("11");
        assert_eq!(app.page().quantity, 10);
        app.mint().await.unwrap();
        let tx = &provider.calls_to("eth_sendTransaction")[0][0];
        assert_eq!(tx["value"], serde_json::json!(price() * U256::from(10)));

        app.disconnect();
        assert!(app.session().is_none());
        assert!(app.contract().is_none());
        let page = app.page();
        assert!(page.connect_enabled);
        assert!(!page.mint_enabled);
        assert_eq!(page.wallet_label, None);
        assert_eq!(page.mint_label, "Connect wallet");
    }

    #[tokio::test]
    async fn mint_requires_a_wallet() {
        let mut app = app(configured());
        assert!(matches!(app.mint().await, Err(MintError::NotConnected)));
        assert_eq!(app.sink().last().unwrap().message(), "Connect your wallet");
    }

    #[tokio::test]
    async fn silent_start() {
        let provider = chain(10_000, 0);
        let mut app = app(configured());
        app.start(&okx(&provider)).await;
        assert!(app.session().is_some());
        assert_eq!(provider.call_count("eth_requestAccounts"), 1);

        let provider = Arc::new(MockProvider::new());
        provider.respond("eth_accounts", Ok(serde_json::json!([])));
        let mut app = self::app(configured());
        app.start(&okx(&provider)).await;
        assert!(app.session().is_none());
        assert_eq!(app.page().network_label, "Wallet not connected");

        let mut app = self::app(configured());
        app.start(&WalletEnvironment::empty()).await;
        assert_eq!(app.page().network_label, "Open in a wallet's DApp browser");
    }

    #[tokio::test]
    async fn wallet_events_update_the_page() {
        let provider = chain(10_000, 0);
        let mut app = app(configured());
        app.connect(&okx(&provider)).await.unwrap();

        let bob = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
        provider.emit(ProviderEvent::AccountsChanged(vec![bob]));
        let event = app.next_event().await.unwrap();
        assert_eq!(app.on_provider_event(event).await, SessionChange::AccountChanged(bob));
        assert_eq!(app.contract().unwrap().signer().address(), bob);

        provider.emit(ProviderEvent::ChainChanged(1));
        let event = app.next_event().await.unwrap();
        app.on_provider_event(event).await;
        assert_eq!(app.page().network_label, "Wrong network");

        provider.emit(ProviderEvent::AccountsChanged(vec![]));
        let event = app.next_event().await.unwrap();
        assert_eq!(app.on_provider_event(event).await, SessionChange::Disconnected);
        assert!(app.session().is_none());
        assert!(app.next_event().await.is_none());
    }

    #[tokio::test]
    async fn rejected_connection_is_reported() {
        let provider = chain(10_000, 0);
        provider.fail("eth_requestAccounts", ProviderError::user_rejected());
        let mut app = app(configured());
        app.connect(&okx(&provider)).await.unwrap_err();
        assert_eq!(app.sink().last().unwrap().message(), "Connection rejected by user");
        assert!(app.page().connect_enabled);

        app.show_wallet_instructions();
        assert_eq!(app.sink().last().unwrap().kind(), StatusKind::Info);
    }
}
