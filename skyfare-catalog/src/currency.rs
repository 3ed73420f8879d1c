use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static exchange-rate table used to normalize upstream prices.
///
/// Each rate is the multiplier from that currency into `default`. The table
/// is built once at startup (from config) and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyTable {
    /// Display currency every price is normalized into
    #[serde(default = "default_currency")]
    pub default: String,

    /// Currency code => multiplier into `default`
    #[serde(default = "default_rates")]
    pub rates: HashMap<String, f64>,
}

fn default_currency() -> String { "INR".to_string() }

fn default_rates() -> HashMap<String, f64> {
    let mut m = HashMap::new();
    m.insert("GBP".to_string(), 108.0);
    m.insert("USD".to_string(), 86.0);
    m.insert("EUR".to_string(), 92.0);
    m.insert("AED".to_string(), 23.0);
    m.insert("INR".to_string(), 1.0);
    m
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self {
            default: default_currency(),
            rates: default_rates(),
        }
    }
}

impl CurrencyTable {
    pub fn new(default: impl Into<String>, rates: HashMap<String, f64>) -> Self {
        Self { default: default.into(), rates }
    }

    pub fn default_currency(&self) -> &str {
        &self.default
    }

    /// Whether `code` can be converted into the default currency.
    pub fn is_known(&self, code: &str) -> bool {
        self.is_default(code) || self.rate(code).is_some()
    }

    /// Multiplier for `code`; table keys are matched case-insensitively.
    pub fn rate(&self, code: &str) -> Option<f64> {
        let code = code.trim();
        self.rates
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(code))
            .map(|(_, rate)| *rate)
    }

    fn is_default(&self, code: &str) -> bool {
        code.trim().eq_ignore_ascii_case(self.default.trim())
    }

    /// Converts `amount` in `from` into the default currency, rounded to a
    /// whole unit. The default currency and unknown codes pass through as-is.
    pub fn convert(&self, amount: f64, from: &str) -> f64 {
        if self.is_default(from) {
            return amount;
        }
        match self.rate(from) {
            Some(rate) => (amount * rate).round(),
            None => {
                tracing::warn!("No exchange rate for {:?}, leaving amount unconverted", from);
                amount
            }
        }
    }
}

/// Renders a whole-unit price the way the en-IN locale does ("₹1,23,456").
///
/// Malformed codes fall back to "<CODE> <amount>".
pub fn format_price(amount: f64, currency: &str) -> String {
    let whole = amount.round() as i64;
    let code = currency.trim();

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return format!("{} {}", currency, whole);
    }

    let code = code.to_ascii_uppercase();
    let digits = group_indian(whole.unsigned_abs());
    let sign = if whole < 0 { "-" } else { "" };

    match symbol(&code) {
        Some(sym) => format!("{}{}{}", sign, sym, digits),
        None => format!("{}{} {}", sign, code, digits),
    }
}

fn symbol(code: &str) -> Option<&'static str> {
    match code {
        "INR" => Some("₹"),
        "USD" => Some("$"),
        "GBP" => Some("£"),
        "EUR" => Some("€"),
        "JPY" => Some("JP¥"),
        _ => None,
    }
}

/// Lakh/crore grouping: last three digits, then pairs.
fn group_indian(value: u64) -> String {
    let raw = value.to_string();
    if raw.len() <= 3 {
        return raw;
    }
    let (head, tail) = raw.split_at(raw.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
