use crate::{
    InjectedContract, MintError, MintQuantity, MintReceipt, RemainingSupply, Status, StatusSink,
};
use alloy_primitives::{U256, utils::format_units};
use pharos_config::NativeCurrency;

/// Unit price shown before `MINT_PRICE` has been read, 0.1 of the native token.
pub const DEFAULT_UNIT_PRICE: U256 = U256::from_limbs([100_000_000_000_000_000, 0, 0, 0]);

/// Quantity, cost and supply shown next to the mint button, and the mint flow itself.
#[derive(Clone, Debug)]
pub struct MintController {
    currency: NativeCurrency,
    quantity: MintQuantity,
    unit_price: Option<U256>,
    remaining: RemainingSupply,
    minting: bool,
}

impl MintController {
    pub fn new(currency: NativeCurrency) -> Self {
        Self {
            currency,
            quantity: MintQuantity::default(),
            unit_price: None,
            remaining: RemainingSupply::Unavailable,
            minting: false,
        }
    }

    pub fn set_currency(&mut self, currency: NativeCurrency) {
        self.currency = currency;
    }

    pub fn quantity(&self) -> MintQuantity {
        self.quantity
    }

    /// Applies the raw content of the quantity field.
    pub fn set_quantity_input(&mut self, input: &str) -> MintQuantity {
        self.quantity = MintQuantity::from_input(input);
        self.quantity
    }

    pub fn change_quantity(&mut self, delta: i64) -> MintQuantity {
        self.quantity = self.quantity.step(delta);
        self.quantity
    }

    /// Last price read from the contract, or [`DEFAULT_UNIT_PRICE`].
    pub fn unit_price(&self) -> U256 {
        self.unit_price.unwrap_or(DEFAULT_UNIT_PRICE)
    }

    pub fn total_cost(&self) -> U256 {
        self.quantity.total_cost(self.unit_price())
    }

    /// Total cost in whole tokens, e.g. `0.3 PHRS`.
    pub fn display_cost(&self) -> String {
        let amount = format_amount(self.total_cost(), self.currency.decimals);
        format!("{amount} {}", self.currency.symbol)
    }

    pub fn remaining(&self) -> RemainingSupply {
        self.remaining
    }

    pub fn is_minting(&self) -> bool {
        self.minting
    }

    /// Reads the supply counters. A failed read shows the placeholder instead of an error.
    pub async fn refresh_stats(&mut self, contract: &InjectedContract) -> RemainingSupply {
        self.remaining = match contract.supply_stats().await {
            Ok(stats) => stats.into(),
            Err(err) => {
                warn!(target: "mint", %err, "failed to read supply");
                RemainingSupply::Unavailable
            }
        };
        self.remaining
    }

    /// Forgets price and supply, e.g. once the contract address changed.
    pub fn clear_contract_reads(&mut self) {
        self.unit_price = None;
        self.remaining = RemainingSupply::Unavailable;
    }

    /// Reads the price without touching anything else.
    pub async fn refresh_price(&mut self, contract: &InjectedContract) {
        match contract.mint_price().await {
            Ok(price) => self.unit_price = Some(price),
            Err(err) => debug!(target: "mint", %err, "failed to read mint price"),
        }
    }

    /// Mints the selected quantity, reporting every step to `sink`.
    ///
    /// Nothing is retried. On success the supply counters are refreshed.
    pub async fn mint<S: StatusSink + ?Sized>(
        &mut self,
        contract: &InjectedContract,
        sink: &mut S,
    ) -> Result<MintReceipt, MintError> {
        self.minting = true;
        let result = self.run_mint(contract, sink).await;
        self.minting = false;

        match &result {
            Ok(receipt) => {
                let hash = receipt.transaction_hash;
                info!(target: "mint", %hash, quantity = %self.quantity, "minted");
                sink.show(&Status::success("Mint completed successfully!"));
                self.refresh_stats(contract).await;
            }
            Err(err) => {
                warn!(target: "mint", %err, "mint failed");
                sink.show(&Status::error(format!("Error: {}", err.user_message())));
            }
        }
        result
    }

    async fn run_mint<S: StatusSink + ?Sized>(
        &mut self,
        contract: &InjectedContract,
        sink: &mut S,
    ) -> Result<MintReceipt, MintError> {
        let quantity = self.quantity;
        sink.show(&Status::loading("Preparing transaction..."));
        let price = contract.mint_price().await?;
        self.unit_price = Some(price);
        let value = quantity.total_cost(price);
        contract.preflight_mint(quantity, value).await?;

        sink.show(&Status::loading("Confirm the transaction in your wallet..."));
        let hash = contract.submit_mint(quantity, value).await?;

        sink.show(&Status::loading("Processing transaction..."));
        contract.wait_for_confirmation(hash).await
    }
}

/// Formats `amount` with `decimals` and trims an empty fractional part.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    let Ok(formatted) = format_units(amount, decimals) else {
        return amount.to_string();
    };
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        formatted
    }
}
