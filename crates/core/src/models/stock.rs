use serde::{Deserialize, Serialize};

/// A scalar value held by one of the editable stock fields.
///
/// The dashboard's fields are either free text or numeric; the wire format
/// carries them as plain JSON strings and numbers, so this enum is untagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Whether this value counts as "nothing entered".
    /// The empty string and numeric zero are both empty: imported rows leave
    /// untouched numeric cells at 0, and completeness scoring treats them
    /// the same as missing data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(n) => *n == 0.0,
        }
    }

    /// The numeric value, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    /// Consume into text. Numbers are formatted with their shortest
    /// round-trip representation.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// The fixed set of user-editable stock fields.
///
/// This table drives completeness scoring during ticker merges and the
/// single-field PATCH endpoint. Backend-computed metrics (expected value,
/// Kelly fraction, buy zone) are not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockField {
    CompanyName,
    Sector,
    Isin,
    CurrentPrice,
    FairValue,
    Beta,
    Volatility,
    PeRatio,
    EpsGrowth,
    DebtToEbitda,
    DividendYield,
    SharesOwned,
    AveragePrice,
    Comment,
}

impl StockField {
    /// Every editable field, in display order.
    pub const ALL: [StockField; 14] = [
        StockField::CompanyName,
        StockField::Sector,
        StockField::Isin,
        StockField::CurrentPrice,
        StockField::FairValue,
        StockField::Beta,
        StockField::Volatility,
        StockField::PeRatio,
        StockField::EpsGrowth,
        StockField::DebtToEbitda,
        StockField::DividendYield,
        StockField::SharesOwned,
        StockField::AveragePrice,
        StockField::Comment,
    ];

    /// Wire name of this field, as the backend spells it.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StockField::CompanyName => "company_name",
            StockField::Sector => "sector",
            StockField::Isin => "isin",
            StockField::CurrentPrice => "current_price",
            StockField::FairValue => "fair_value",
            StockField::Beta => "beta",
            StockField::Volatility => "volatility",
            StockField::PeRatio => "pe_ratio",
            StockField::EpsGrowth => "eps_growth",
            StockField::DebtToEbitda => "debt_to_ebitda",
            StockField::DividendYield => "dividend_yield",
            StockField::SharesOwned => "shares_owned",
            StockField::AveragePrice => "average_price",
            StockField::Comment => "comment",
        }
    }

    /// Look a field up by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<StockField> {
        StockField::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// The raw value this field holds on `stock`, if any.
    #[must_use]
    pub fn value_of(&self, stock: &Stock) -> Option<FieldValue> {
        match self {
            StockField::CompanyName => stock.company_name.clone().map(FieldValue::Text),
            StockField::Sector => stock.sector.clone().map(FieldValue::Text),
            StockField::Isin => stock.isin.clone().map(FieldValue::Text),
            StockField::CurrentPrice => stock.current_price.map(FieldValue::Number),
            StockField::FairValue => stock.fair_value.map(FieldValue::Number),
            StockField::Beta => stock.beta.map(FieldValue::Number),
            StockField::Volatility => stock.volatility.map(FieldValue::Number),
            StockField::PeRatio => stock.pe_ratio.map(FieldValue::Number),
            StockField::EpsGrowth => stock.eps_growth.map(FieldValue::Number),
            StockField::DebtToEbitda => stock.debt_to_ebitda.map(FieldValue::Number),
            StockField::DividendYield => stock.dividend_yield.map(FieldValue::Number),
            StockField::SharesOwned => stock.shares_owned.map(FieldValue::Number),
            StockField::AveragePrice => stock.average_price.map(FieldValue::Number),
            StockField::Comment => stock.comment.clone().map(FieldValue::Text),
        }
    }

    /// Whether `stock` has real data in this field.
    /// Missing, empty-string, and zero values all count as unfilled.
    #[must_use]
    pub fn is_filled_in(&self, stock: &Stock) -> bool {
        self.value_of(stock).is_some_and(|v| !v.is_empty())
    }
}

impl std::fmt::Display for StockField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One stock position as the backend stores it.
///
/// All editable fields are optional: a row may hold nothing beyond its
/// ticker. The analytics block (`expected_value` through `buy_zone_high`)
/// is computed server-side and carried here for display only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stock {
    /// Backend-assigned row id.
    pub id: i64,

    /// Ticker symbol as entered (casing preserved, compared case-insensitively).
    pub ticker: String,

    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub isin: Option<String>,

    /// Latest market price per share.
    pub current_price: Option<f64>,
    /// The user's own fair-value estimate per share.
    pub fair_value: Option<f64>,
    pub beta: Option<f64>,
    /// 52-week volatility, in percent.
    pub volatility: Option<f64>,
    pub pe_ratio: Option<f64>,
    /// Expected EPS growth rate, in percent.
    pub eps_growth: Option<f64>,
    pub debt_to_ebitda: Option<f64>,
    /// Dividend yield, in percent.
    pub dividend_yield: Option<f64>,

    pub shares_owned: Option<f64>,
    /// Average purchase price per share.
    pub average_price: Option<f64>,
    pub comment: Option<String>,

    /// Server-computed expected value. Display only.
    pub expected_value: Option<f64>,
    /// Server-computed Kelly allocation fraction. Display only.
    pub kelly_fraction: Option<f64>,
    pub buy_zone_low: Option<f64>,
    pub buy_zone_high: Option<f64>,

    /// Portfolio this position belongs to, if assigned.
    pub portfolio_id: Option<i64>,
}

impl Stock {
    pub fn new(id: i64, ticker: impl Into<String>) -> Self {
        Self {
            id,
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// Number of editable fields holding real data.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        StockField::ALL.iter().filter(|f| f.is_filled_in(self)).count()
    }

    /// The raw value of a single field, if any.
    #[must_use]
    pub fn field_value(&self, field: StockField) -> Option<FieldValue> {
        field.value_of(self)
    }

    /// Write one field. Numeric fields accept only `FieldValue::Number`;
    /// a mismatched kind clears the field.
    pub fn set_field(&mut self, field: StockField, value: Option<FieldValue>) {
        match field {
            StockField::CompanyName => self.company_name = value.map(FieldValue::into_text),
            StockField::Sector => self.sector = value.map(FieldValue::into_text),
            StockField::Isin => self.isin = value.map(FieldValue::into_text),
            StockField::CurrentPrice => self.current_price = value.and_then(|v| v.as_number()),
            StockField::FairValue => self.fair_value = value.and_then(|v| v.as_number()),
            StockField::Beta => self.beta = value.and_then(|v| v.as_number()),
            StockField::Volatility => self.volatility = value.and_then(|v| v.as_number()),
            StockField::PeRatio => self.pe_ratio = value.and_then(|v| v.as_number()),
            StockField::EpsGrowth => self.eps_growth = value.and_then(|v| v.as_number()),
            StockField::DebtToEbitda => self.debt_to_ebitda = value.and_then(|v| v.as_number()),
            StockField::DividendYield => self.dividend_yield = value.and_then(|v| v.as_number()),
            StockField::SharesOwned => self.shares_owned = value.and_then(|v| v.as_number()),
            StockField::AveragePrice => self.average_price = value.and_then(|v| v.as_number()),
            StockField::Comment => self.comment = value.map(FieldValue::into_text),
        }
    }
}

/// Payload for creating a new stock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockDraft {
    pub ticker: String,
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub isin: Option<String>,
    pub current_price: Option<f64>,
    pub fair_value: Option<f64>,
    pub shares_owned: Option<f64>,
    pub average_price: Option<f64>,
    pub comment: Option<String>,
    pub portfolio_id: Option<i64>,
}

impl StockDraft {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }
}

/// Partial update for an existing stock. `None` fields are left untouched,
/// so one PUT can batch a ticker change with any number of field writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fair_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eps_growth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_to_ebitda: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares_owned: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_id: Option<i64>,
}

impl StockUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Stage a write to one editable field. Same kind rules as
    /// [`Stock::set_field`].
    pub fn set(&mut self, field: StockField, value: FieldValue) {
        match field {
            StockField::CompanyName => self.company_name = Some(value.into_text()),
            StockField::Sector => self.sector = Some(value.into_text()),
            StockField::Isin => self.isin = Some(value.into_text()),
            StockField::CurrentPrice => self.current_price = value.as_number(),
            StockField::FairValue => self.fair_value = value.as_number(),
            StockField::Beta => self.beta = value.as_number(),
            StockField::Volatility => self.volatility = value.as_number(),
            StockField::PeRatio => self.pe_ratio = value.as_number(),
            StockField::EpsGrowth => self.eps_growth = value.as_number(),
            StockField::DebtToEbitda => self.debt_to_ebitda = value.as_number(),
            StockField::DividendYield => self.dividend_yield = value.as_number(),
            StockField::SharesOwned => self.shares_owned = value.as_number(),
            StockField::AveragePrice => self.average_price = value.as_number(),
            StockField::Comment => self.comment = Some(value.into_text()),
        }
    }

    /// True when nothing has been staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One row of a bulk stock update (`PUT /stocks/bulk`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkStockUpdate {
    pub id: i64,
    #[serde(flatten)]
    pub changes: StockUpdate,
}
