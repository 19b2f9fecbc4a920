//! BRL currency amounts as integer centavos.
//!
//! Entry amounts travel through the app as formatted currency strings,
//! so every sum goes through [Money::parse] first and back through the
//! `Display` impl for presentation. Keeping the internal representation in
//! whole centavos means repeated aggregation runs cannot drift the way
//! float accumulation would.

use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::Error;

/// A BRL amount in whole centavos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero centavos.
    pub const ZERO: Money = Money(0);

    /// Create an amount from a whole number of centavos.
    pub fn from_centavos(centavos: i64) -> Self {
        Self(centavos)
    }

    /// The amount in whole centavos.
    pub fn centavos(self) -> i64 {
        self.0
    }

    /// The amount in reais, for chart data and other numeric sinks.
    ///
    /// Only the presentation boundary should use this; arithmetic stays in
    /// centavos.
    pub fn as_reais(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a BRL currency string into centavos.
    ///
    /// Accepts the app's own display format ("R$1.234,56", "-R$40,00"),
    /// bare pt-BR numbers ("1234,56") and plain decimal point input
    /// ("40.00") as typed into the entry form. Amounts are rounded
    /// half-up to two decimal places.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the string does not contain a
    /// number.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let unsigned = unsigned
            .strip_prefix("R$")
            .map(str::trim_start)
            .unwrap_or(unsigned);

        // With a decimal comma present, dots are thousands separators.
        let normalized = if unsigned.contains(',') {
            unsigned.replace('.', "").replace(',', ".")
        } else {
            unsigned.to_owned()
        };

        let amount = Decimal::from_str(&normalized)
            .map_err(|_| Error::InvalidAmount(input.to_owned()))?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let centavos = (amount * Decimal::from(100))
            .to_i64()
            .ok_or_else(|| Error::InvalidAmount(input.to_owned()))?;

        let centavos = if negative { -centavos } else { centavos };

        Ok(Self(centavos))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let centavos = self.0.unsigned_abs();
        let reais = centavos / 100;
        let cents = centavos % 100;

        let digits = reais.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        let sign = if self.0 < 0 { "-" } else { "" };

        write!(f, "{sign}R${grouped},{cents:02}")
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}
