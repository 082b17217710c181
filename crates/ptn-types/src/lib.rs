//! Shared API Types for the PTN dashboard
//!
//! This crate is the SINGLE SOURCE OF TRUTH for the payload crossing the
//! `/api/charts/{ptn}` boundary.
//!
//! ## Boundary
//!
//! ```text
//! ┌──────────────────┐         ┌──────────────────┐
//! │  Charts server   │  JSON   │  WASM UI         │
//! │  /api/charts/..  │ ──────► │  (web-sys)       │
//! └──────────────────┘         └──────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. Every field the server may omit is defaulted, never required
//! 2. The fee column is `UKT` on the wire; `UKT_RUPIAH` is accepted too, and
//!    `UKT` wins when a row carries both (same for `error` over `message`)
//! 3. Chart specs travel as JSON strings and are decoded with [`ChartSpec::parse`]

pub mod chart;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub use chart::ChartSpec;

// ============================================================================
// CHARTS API
// ============================================================================

/// Response of `GET /api/charts/{ptn}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawChartPayload")]
pub struct ChartPayload {
    pub success: bool,

    /// Failure text. The server answers "not found" under `message`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Average capacity (daya tampung), already formatted by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_daya_tampung: Option<String>,

    /// Average fee (UKT), already formatted as Rupiah by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_ukt: Option<String>,

    /// Serialized pie chart spec (capacity distribution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pie_chart: Option<String>,

    /// Serialized bar chart spec (fee per programme)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_chart: Option<String>,

    /// Table rows in server ranking order
    pub table_data: Vec<RowRecord>,
}

/// Wire shape of [`ChartPayload`]: both failure fields may be present
#[derive(Deserialize)]
struct RawChartPayload {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    avg_daya_tampung: Option<String>,
    #[serde(default)]
    avg_ukt: Option<String>,
    #[serde(default)]
    pie_chart: Option<String>,
    #[serde(default)]
    bar_chart: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    table_data: Vec<RowRecord>,
}

impl From<RawChartPayload> for ChartPayload {
    fn from(raw: RawChartPayload) -> Self {
        Self {
            success: raw.success,
            error: raw.error.or(raw.message),
            avg_daya_tampung: raw.avg_daya_tampung,
            avg_ukt: raw.avg_ukt,
            pie_chart: raw.pie_chart,
            bar_chart: raw.bar_chart,
            table_data: raw.table_data,
        }
    }
}

impl ChartPayload {
    /// Failed payload carrying a server message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

/// One programme row of the PTN table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRowRecord")]
pub struct RowRecord {
    /// Programme name (jurusan)
    #[serde(rename = "JURUSAN")]
    pub category: String,

    /// Seat capacity (daya tampung)
    #[serde(rename = "DAYA TAMPUNG")]
    pub capacity: Option<CellValue>,

    /// Tuition fee (UKT), shown exactly as the server formatted it
    #[serde(rename = "UKT")]
    pub fee: Option<CellValue>,
}

/// Wire shape of [`RowRecord`]: older exports name the fee `UKT_RUPIAH`,
/// some carry both columns
#[derive(Deserialize)]
struct RawRowRecord {
    #[serde(rename = "JURUSAN", default)]
    category: String,
    #[serde(rename = "DAYA TAMPUNG", default)]
    capacity: Option<CellValue>,
    #[serde(rename = "UKT", default)]
    fee: Option<CellValue>,
    #[serde(rename = "UKT_RUPIAH", default)]
    fee_rupiah: Option<CellValue>,
}

impl From<RawRowRecord> for RowRecord {
    fn from(raw: RawRowRecord) -> Self {
        Self {
            category: raw.category,
            capacity: raw.capacity,
            fee: raw.fee.or(raw.fee_rupiah),
        }
    }
}

impl RowRecord {
    pub fn new(
        category: impl Into<String>,
        capacity: Option<CellValue>,
        fee: Option<CellValue>,
    ) -> Self {
        Self {
            category: category.into(),
            capacity,
            fee,
        }
    }
}

/// Loosely typed cell value as pandas emits it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// True for values a browser treats as falsy: `0`, `NaN`, `""`, `false`
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Number(n) => *n == 0.0 || n.is_nan(),
            CellValue::Text(s) => s.is_empty(),
            CellValue::Bool(b) => !b,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => f.write_str(&js_number(*n)),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// Format a number the way JavaScript's `Number.prototype.toString` does:
/// shortest round-trip digits, plain notation for decimal exponents in
/// `-6..21`, `1e+21` style outside it, and `0` for negative zero.
fn js_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-trip digits as `d.ddde<exp>`
    let sci = format!("{:e}", n.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return n.to_string();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return n.to_string();
    };
    let digits = mantissa.replace('.', "");
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit
    let point = exp + 1;

    let body = if k <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{}.{}", int, frac)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let (first, rest) = digits.split_at(1);
        let sign = if exp < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, exp.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, exp.abs())
        }
    };

    if n < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Helper to deserialize `null` into an empty collection
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
