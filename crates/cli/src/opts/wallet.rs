use alloy_primitives::{B256, hex::FromHex};
use alloy_signer_local::PrivateKeySigner;
use clap::Parser;
use eyre::Result;

/// Why no signer could be built from the configured key.
#[derive(Debug, thiserror::Error)]
pub enum PrivateKeyError {
    #[error("no private key given, set PRIVATE_KEY or pass --private-key")]
    Missing,
    #[error("private key is not 32 bytes of hex")]
    Malformed,
    #[error("invalid private key: {0}")]
    Invalid(String),
    #[error("`{0}` is not a private key, but an environment variable of that name exists")]
    ExistsAsEnvVar(String),
}

/// The operator account.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Wallet options")]
pub struct WalletOpts {
    /// Private key of the operator account, `0x` prefix optional.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true, value_name = "RAW_PRIVATE_KEY")]
    pub private_key: Option<String>,
}

impl WalletOpts {
    pub fn signer(&self) -> Result<PrivateKeySigner> {
        let private_key = self.private_key.as_deref().ok_or(PrivateKeyError::Missing)?;
        Ok(parse_private_key(private_key)?)
    }
}

/// Parses a hex private key. A variable name passed in place of its value is called out.
pub fn parse_private_key(input: &str) -> Result<PrivateKeySigner, PrivateKeyError> {
    let input = input.trim();
    B256::from_hex(input)
        .map_err(|_| PrivateKeyError::Malformed)
        .and_then(|key| {
            PrivateKeySigner::from_bytes(&key)
                .map_err(|err| PrivateKeyError::Invalid(err.to_string()))
        })
        .map_err(|err| {
            if !input.starts_with("0x") && std::env::var_os(input).is_some() {
                PrivateKeyError::ExistsAsEnvVar(input.to_string())
            } else {
                err
            }
        })
}
