use crate::classes::base::JsonObject;
use crate::classes::source_card::{SourceCardRecord, SourcePrices};
use crate::utils::CardUtils;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Currencies tracked by the upstream price feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Usd,
    Eur,
    Tix,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Currency::Usd => "usd",
            Currency::Eur => "eur",
            Currency::Tix => "tix",
        };
        f.write_str(code)
    }
}

/// Currency every display price is expressed in
pub const REFERENCE_CURRENCY: Currency = Currency::Usd;

/// Currencies an anchor card must be priced in by default
pub const DEFAULT_TRACKED_CURRENCIES: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Tix];

/// Version of [`FALLBACK_MULTIPLIERS`]; bump whenever the constants change
pub const FALLBACK_TABLE_VERSION: u32 = 1;

/// Multipliers (USD per unit) used when a batch has no usable anchor card
pub const FALLBACK_MULTIPLIERS: [(Currency, f64); 3] = [
    (Currency::Usd, 1.0),
    (Currency::Eur, 1.08),
    (Currency::Tix, 0.35),
];

/// Individual price columns, in display-price resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Usd,
    Eur,
    UsdFoil,
    EurFoil,
    Tix,
}

impl PriceField {
    /// Primary, secondary, the two foil variants, tertiary
    pub const RESOLUTION_ORDER: [PriceField; 5] = [
        PriceField::Usd,
        PriceField::Eur,
        PriceField::UsdFoil,
        PriceField::EurFoil,
        PriceField::Tix,
    ];

    pub fn currency(&self) -> Currency {
        match self {
            PriceField::Usd | PriceField::UsdFoil => Currency::Usd,
            PriceField::Eur | PriceField::EurFoil => Currency::Eur,
            PriceField::Tix => Currency::Tix,
        }
    }

    pub fn raw<'a>(&self, prices: &'a SourcePrices) -> Option<&'a str> {
        match self {
            PriceField::Usd => prices.usd.as_deref(),
            PriceField::Eur => prices.eur.as_deref(),
            PriceField::UsdFoil => prices.usd_foil.as_deref(),
            PriceField::EurFoil => prices.eur_foil.as_deref(),
            PriceField::Tix => prices.tix.as_deref(),
        }
    }

    /// Non-foil column of a currency
    pub fn normal(currency: Currency) -> PriceField {
        match currency {
            Currency::Usd => PriceField::Usd,
            Currency::Eur => PriceField::Eur,
            Currency::Tix => PriceField::Tix,
        }
    }

    pub fn amount(&self, prices: &SourcePrices) -> f64 {
        CardUtils::parse_optional_amount(self.raw(prices))
    }
}

/// Where the multipliers of a [`PriceTable`] came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PriceTableSource {
    Anchor { card_id: String, card_name: String },
    Fallback { version: u32 },
}

/// Cross-currency conversion table for one batch.
///
/// Multipliers convert an amount in a currency into the reference currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    multipliers: HashMap<Currency, f64>,
    source: PriceTableSource,
}

impl PriceTable {
    /// Build the table from a batch using the default tracked currencies
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SourceCardRecord>,
    {
        Self::build(records, &DEFAULT_TRACKED_CURRENCIES)
    }

    /// Build the table from the highest-priced anchor card of a batch.
    ///
    /// An anchor is a record whose normal price is non-zero in every tracked
    /// currency (the reference currency is always tracked). Among anchors the
    /// one with the highest reference price wins, earlier records win ties.
    /// Without any anchor the constant fallback table is returned.
    pub fn build<'a, I>(records: I, tracked: &[Currency]) -> Self
    where
        I: IntoIterator<Item = &'a SourceCardRecord>,
    {
        let mut tracked: Vec<Currency> = tracked.to_vec();
        if !tracked.contains(&REFERENCE_CURRENCY) {
            tracked.insert(0, REFERENCE_CURRENCY);
        }

        let mut anchor: Option<(&SourceCardRecord, HashMap<Currency, f64>)> = None;
        let mut anchor_reference_price = 0.0;

        for record in records {
            let amounts: HashMap<Currency, f64> = tracked
                .iter()
                .map(|currency| (*currency, PriceField::normal(*currency).amount(&record.prices)))
                .collect();

            if amounts.values().any(|amount| *amount == 0.0) {
                continue;
            }

            let reference_price = amounts[&REFERENCE_CURRENCY];
            if anchor.is_none() || reference_price > anchor_reference_price {
                anchor_reference_price = reference_price;
                anchor = Some((record, amounts));
            }
        }

        let Some((anchor_record, amounts)) = anchor else {
            warn!(
                "No price anchor found in batch, using fallback price table v{}",
                FALLBACK_TABLE_VERSION
            );
            return Self::fallback();
        };

        let multipliers = amounts
            .iter()
            .map(|(currency, amount)| (*currency, anchor_reference_price / amount))
            .collect();

        debug!(
            "Price anchor '{}' ({}) at {} {}",
            anchor_record.name, anchor_record.id, anchor_reference_price, REFERENCE_CURRENCY
        );

        Self {
            multipliers,
            source: PriceTableSource::Anchor {
                card_id: anchor_record.id.clone(),
                card_name: anchor_record.name.clone(),
            },
        }
    }

    /// Constant table used when no anchor exists
    pub fn fallback() -> Self {
        Self {
            multipliers: FALLBACK_MULTIPLIERS.iter().copied().collect(),
            source: PriceTableSource::Fallback {
                version: FALLBACK_TABLE_VERSION,
            },
        }
    }

    pub fn source(&self) -> &PriceTableSource {
        &self.source
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, PriceTableSource::Fallback { .. })
    }

    /// Multiplier of a currency; untracked currencies use the fallback constant
    pub fn multiplier(&self, currency: Currency) -> f64 {
        if let Some(multiplier) = self.multipliers.get(&currency) {
            return *multiplier;
        }
        FALLBACK_MULTIPLIERS
            .iter()
            .find(|(fallback_currency, _)| *fallback_currency == currency)
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(1.0)
    }

    /// Convert an amount into the reference currency
    pub fn convert(&self, amount: f64, currency: Currency) -> f64 {
        amount * self.multiplier(currency)
    }
}

impl JsonObject for PriceTable {}

/// Resolve the display price of a top-level card.
///
/// Walks [`PriceField::RESOLUTION_ORDER`] and converts the first non-zero
/// amount. Returns 0 when nothing is priced, which is not an error.
pub fn resolve_price(prices: &SourcePrices, table: &PriceTable) -> f64 {
    PriceField::RESOLUTION_ORDER
        .iter()
        .map(|field| (field, field.amount(prices)))
        .find(|(_, amount)| *amount > 0.0)
        .map(|(field, amount)| table.convert(amount, field.currency()))
        .unwrap_or(0.0)
}
