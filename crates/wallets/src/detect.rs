//! Picks the injected wallet to talk to.
//!
//! Wallets expose themselves as globals on the page. Several of them may be present at once and
//! most also claim `window.ethereum`, so the choice follows a fixed priority: dedicated objects
//! first, then the self-reported flags of the generic object.

use std::fmt;

/// The wallet families this site knows how to label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WalletKind {
    Okx,
    Bitget,
    Trust,
    MetaMask,
    /// An unlabeled `window.ethereum`.
    Generic,
}

impl WalletKind {
    /// Human readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Okx => "OKX Wallet",
            Self::Bitget => "Bitget Wallet",
            Self::Trust => "Trust Wallet",
            Self::MetaMask => "MetaMask",
            Self::Generic => "Web3 Wallet",
        }
    }

    /// Font Awesome icon class shown next to the name.
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Trust => "fas fa-shield-alt",
            Self::MetaMask => "fab fa-ethereum",
            Self::Okx | Self::Bitget | Self::Generic => "fas fa-wallet",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Self-reported identity flags of `window.ethereum`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProviderFlags {
    /// `isOkxWallet`
    pub is_okx_wallet: bool,
    /// `isBitKeep`
    pub is_bit_keep: bool,
    /// `isTrust`
    pub is_trust: bool,
    /// `isMetaMask`
    pub is_meta_mask: bool,
}

/// The generic injected object together with its flags.
#[derive(Clone, Debug)]
pub struct InjectedEthereum<P> {
    pub provider: P,
    pub flags: ProviderFlags,
}

/// Snapshot of the injected globals of a page.
///
/// Only objects that expose a `request` function belong here.
#[derive(Clone, Debug)]
pub struct WalletEnvironment<P> {
    /// `window.okxwallet`
    pub okxwallet: Option<P>,
    /// `window.bitkeep`
    pub bitkeep: Option<P>,
    /// `window.trustwallet`
    pub trustwallet: Option<P>,
    /// `window.ethereum`
    pub ethereum: Option<InjectedEthereum<P>>,
}

impl<P> Default for WalletEnvironment<P> {
    fn default() -> Self {
        Self { okxwallet: None, bitkeep: None, trustwallet: None, ethereum: None }
    }
}

impl<P> WalletEnvironment<P> {
    /// A page with nothing injected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A page with only `window.ethereum`.
    pub fn ethereum(provider: P, flags: ProviderFlags) -> Self {
        Self { ethereum: Some(InjectedEthereum { provider, flags }), ..Self::default() }
    }
}

/// The outcome of [`detect_wallet`].
#[derive(Clone, Debug)]
pub enum DetectedWallet<P> {
    Okx(P),
    Bitget(P),
    Trust(P),
    MetaMask(P),
    GenericInjected(P),
    None,
}

impl<P> DetectedWallet<P> {
    /// The wallet family, `None` if nothing was detected.
    pub fn kind(&self) -> Option<WalletKind> {
        match self {
            Self::Okx(_) => Some(WalletKind::Okx),
            Self::Bitget(_) => Some(WalletKind::Bitget),
            Self::Trust(_) => Some(WalletKind::Trust),
            Self::MetaMask(_) => Some(WalletKind::MetaMask),
            Self::GenericInjected(_) => Some(WalletKind::Generic),
            Self::None => None,
        }
    }

    /// Whether a wallet was found.
    pub fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Splits into family and provider.
    pub fn into_parts(self) -> Option<(WalletKind, P)> {
        let kind = self.kind()?;
        match self {
            Self::Okx(p)
            | Self::Bitget(p)
            | Self::Trust(p)
            | Self::MetaMask(p)
            | Self::GenericInjected(p) => Some((kind, p)),
            Self::None => None,
        }
    }
}

/// Returns the wallet to use on this page.
///
/// Priority: `okxwallet`, `bitkeep`, `trustwallet`, then `ethereum` labeled by its
/// `isOkxWallet`, `isBitKeep`, `isTrust`, `isMetaMask` flags, else unlabeled.
pub fn detect_wallet<P: Clone>(env: &WalletEnvironment<P>) -> DetectedWallet<P> {
    if let Some(provider) = &env.okxwallet {
        debug!(target: "wallets", "OKX Wallet (dedicated okxwallet) detected");
        return DetectedWallet::Okx(provider.clone());
    }
    if let Some(provider) = &env.bitkeep {
        debug!(target: "wallets", "Bitget Wallet (bitkeep) detected");
        return DetectedWallet::Bitget(provider.clone());
    }
    if let Some(provider) = &env.trustwallet {
        debug!(target: "wallets", "Trust Wallet (dedicated trustwallet) detected");
        return DetectedWallet::Trust(provider.clone());
    }

    let Some(InjectedEthereum { provider, flags }) = &env.ethereum else {
        debug!(target: "wallets", "no wallet detected");
        return DetectedWallet::None;
    };
    debug!(target: "wallets", ?flags, "ethereum provider detected");

    let provider = provider.clone();
    if flags.is_okx_wallet {
        DetectedWallet::Okx(provider)
    } else if flags.is_bit_keep {
        DetectedWallet::Bitget(provider)
    } else if flags.is_trust {
        DetectedWallet::Trust(provider)
    } else if flags.is_meta_mask {
        DetectedWallet::MetaMask(provider)
    } else {
        DetectedWallet::GenericInjected(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(env: &WalletEnvironment<&'static str>) -> Option<WalletKind> {
        detect_wallet(env).kind()
    }

    #[test]
    fn empty_page_has_no_wallet() {
        let env = WalletEnvironment::<&str>::empty();
        assert!(!detect_wallet(&env).is_some());
        assert!(detect_wallet(&env).into_parts().is_none());
    }

    #[test]
    fn dedicated_objects_win_in_order() {
        let mut env = WalletEnvironment::ethereum(
            "ethereum",
            ProviderFlags { is_meta_mask: true, ..Default::default() },
        );
        env.trustwallet = Some("trust");
        assert_eq!(kind(&env), Some(WalletKind::Trust));

        env.bitkeep = Some("bitkeep");
        assert_eq!(kind(&env), Some(WalletKind::Bitget));

        env.okxwallet = Some("okx");
        let (wallet, provider) = detect_wallet(&env).into_parts().unwrap();
        assert_eq!(wallet, WalletKind::Okx);
        assert_eq!(provider, "okx");
    }

    #[test]
    fn generic_object_is_labeled_by_flags() {
        let flags = ProviderFlags {
            is_okx_wallet: true,
            is_bit_keep: true,
            is_trust: true,
            is_meta_mask: true,
        };
        assert_eq!(kind(&WalletEnvironment::ethereum("eth", flags)), Some(WalletKind::Okx));

        let flags = ProviderFlags { is_okx_wallet: false, ..flags };
        assert_eq!(kind(&WalletEnvironment::ethereum("eth", flags)), Some(WalletKind::Bitget));

        let flags = ProviderFlags { is_bit_keep: false, ..flags };
        assert_eq!(kind(&WalletEnvironment::ethereum("eth", flags)), Some(WalletKind::Trust));

        let flags = ProviderFlags { is_trust: false, ..flags };
        assert_eq!(kind(&WalletEnvironment::ethereum("eth", flags)), Some(WalletKind::MetaMask));

        let env = WalletEnvironment::ethereum("eth", ProviderFlags::default());
        let detected = detect_wallet(&env);
        assert!(matches!(detected, DetectedWallet::GenericInjected("eth")));
        assert_eq!(detected.kind().map(|k| k.name()), Some("Web3 Wallet"));
    }
}
