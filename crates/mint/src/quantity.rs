use alloy_primitives::U256;
use std::fmt;

/// Number of tokens minted by one transaction, always within
/// [`MintQuantity::MIN`]..=[`MintQuantity::MAX`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MintQuantity(u8);

impl MintQuantity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Clamps `value` into range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Reads the quantity input field.
    ///
    /// The leading integer of the input is used, so `"3 NFTs"` is 3. Anything without a leading
    /// integer, and zero, count as 1.
    pub fn from_input(input: &str) -> Self {
        let input = input.trim_start();
        let (negative, rest) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Self::default();
        }
        let value = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
        match (negative, value) {
            (_, 0) => Self::default(),
            (true, value) => Self::clamped(-value),
            (false, value) => Self::clamped(value),
        }
    }

    /// The `-` / `+` buttons.
    pub fn step(self, delta: i64) -> Self {
        Self::clamped((self.0 as i64).saturating_add(delta))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// `unit_price * quantity`.
    pub fn total_cost(self, unit_price: U256) -> U256 {
        unit_price.saturating_mul(U256::from(self.0))
    }
}

impl Default for MintQuantity {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for MintQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<MintQuantity> for U256 {
    fn from(quantity: MintQuantity) -> Self {
        Self::from(quantity.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_range() {
        for value in [-100, -1, 0, 1, 5, 10, 11, i64::MAX, i64::MIN] {
            let q = MintQuantity::clamped(value).get();
            assert!((1..=10).contains(&q), "{value} -> {q}");
        }
        assert_eq!(MintQuantity::clamped(11).get(), 10);
        assert_eq!(MintQuantity::clamped(0).get(), 1);
        assert_eq!(MintQuantity::clamped(7).get(), 7);
    }

    #[test]
    fn parses_input_like_a_number_field() {
        assert_eq!(MintQuantity::from_input("4").get(), 4);
        assert_eq!(MintQuantity::from_input(" 3 NFTs").get(), 3);
        assert_eq!(MintQuantity::from_input("11").get(), 10);
        assert_eq!(MintQuantity::from_input("99999999999999999999999").get(), 10);
        assert_eq!(MintQuantity::from_input("-5").get(), 1);
        assert_eq!(MintQuantity::from_input("0").get(), 1);
        assert_eq!(MintQuantity::from_input("").get(), 1);
        assert_eq!(MintQuantity::from_input("abc").get(), 1);
        assert_eq!(MintQuantity::from_input("+2").get(), 2);
    }

    #[test]
    fn steps_stay_in_range() {
        let q = MintQuantity::default();
        assert_eq!(q.step(-1).get(), 1);
        assert_eq!(q.step(1).get(), 2);
        assert_eq!(MintQuantity::clamped(10).step(1).get(), 10);
    }

    #[test]
    fn cost_is_price_times_quantity() {
        let price = U256::from(100_000_000_000_000_000u64);
        for n in 1..=10 {
            let q = MintQuantity::clamped(n);
            assert_eq!(q.total_cost(price), price * U256::from(n));
        }
        assert_eq!(MintQuantity::clamped(11).total_cost(price), price * U256::from(10));
    }
}
