//! Market classification and canonical symbols for chancay.
//!
//! Day files are named `{market}{code}.day` where `market` is a
//! two-letter exchange tag and `code` is a 6-digit instrument code
//! (e.g., `sh600000.day`). This crate maps those raw names to canonical
//! `{code}.{suffix}` symbols and filters out non-equity instruments
//! (indices, funds, bonds) by per-market code prefix rules.
//!
//! # Example
//!
//! ```
//! use chancay_instruments::{Classification, classify_day_file};
//!
//! assert_eq!(
//!     classify_day_file("sh600000.day"),
//!     Classification::Equity("600000.SS".to_string())
//! );
//! assert_eq!(classify_day_file("sz399001.day"), Classification::NonEquity);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// An exchange recognized in day-file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// Shanghai Stock Exchange (tag "sh", suffix "SS").
    Shanghai,
    /// Shenzhen Stock Exchange (tag "sz", suffix "SZ").
    Shenzhen,
    /// Beijing Stock Exchange (tag "bj", suffix "BJ").
    Beijing,
}

impl Market {
    /// All recognized markets, in the order day files are laid out.
    pub const ALL: [Self; 3] = [Self::Shanghai, Self::Shenzhen, Self::Beijing];

    /// Parses the two-letter market tag from a day-file name.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "sh" => Some(Self::Shanghai),
            "sz" => Some(Self::Shenzhen),
            "bj" => Some(Self::Beijing),
            _ => None,
        }
    }

    /// Returns the two-letter tag used in file and directory names.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Shanghai => "sh",
            Self::Shenzhen => "sz",
            Self::Beijing => "bj",
        }
    }

    /// Returns the canonical exchange suffix.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Shanghai => "SS",
            Self::Shenzhen => "SZ",
            Self::Beijing => "BJ",
        }
    }

    /// Returns true if the 6-digit code is an equity on this market.
    ///
    /// Shanghai equities start with '6' (mainboard and STAR); Shenzhen
    /// equities start with "00" (mainboard) or "30" (ChiNext); Beijing
    /// equities start with "43", "83", "87", or "92". Everything else
    /// (indices, funds, bonds) is non-equity.
    #[must_use]
    pub fn is_equity_code(&self, code: &str) -> bool {
        if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }

        match self {
            Self::Shanghai => code.starts_with('6'),
            Self::Shenzhen => matches!(&code[..2], "00" | "30"),
            Self::Beijing => matches!(&code[..2], "43" | "83" | "87" | "92"),
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// How a day-file name was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// An equity instrument with its canonical symbol.
    Equity(String),
    /// A recognized instrument that is not an equity (index, fund, bond).
    NonEquity,
    /// A name that does not match the `{market}{code}.day` pattern.
    Unrecognized,
}

impl Classification {
    /// Returns the canonical symbol if this is an equity.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Equity(symbol) => Some(symbol),
            _ => None,
        }
    }
}

/// Splits a day-file name into its market and 6-digit code.
///
/// Returns `None` for names that do not match `{market}{code}.day`.
#[must_use]
pub fn parse_day_filename(filename: &str) -> Option<(Market, &str)> {
    let base = filename.strip_suffix(".day")?;
    if base.len() < 2 {
        return None;
    }

    let market = Market::from_tag(&base[..2])?;
    let code = &base[2..];
    if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some((market, code))
}

/// Builds the canonical `{code}.{suffix}` symbol.
#[must_use]
pub fn canonical_symbol(market: Market, code: &str) -> String {
    format!("{}.{}", code, market.suffix())
}

/// Classifies a day-file name as equity, non-equity, or unrecognized.
///
/// Non-equity is a deliberate filter, not an error: index, fund, and
/// bond files are expected in the source archives and excluded here.
#[must_use]
pub fn classify_day_file(filename: &str) -> Classification {
    let Some((market, code)) = parse_day_filename(filename) else {
        return Classification::Unrecognized;
    };

    if market.is_equity_code(code) {
        Classification::Equity(canonical_symbol(market, code))
    } else {
        Classification::NonEquity
    }
}

/// A-share code prefixes accepted in quarterly statement rows.
const A_SHARE_PREFIXES: [&str; 12] = [
    "600", "601", "603", "605", "688", "689", // Shanghai
    "000", "001", "002", "003", "300", "301", // Shenzhen
];

/// Returns true if a bare 6-digit code is an A-share stock.
///
/// Used by the quarterly statement path, where rows carry codes without
/// a market tag.
#[must_use]
pub fn is_a_share_code(code: &str) -> bool {
    if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    A_SHARE_PREFIXES.contains(&&code[..3])
}

/// Maps a bare A-share code to its canonical symbol.
///
/// Codes starting with '6' are Shanghai, '0' or '3' are Shenzhen.
/// Returns `None` for codes that are not A-shares.
#[must_use]
pub fn a_share_symbol(code: &str) -> Option<String> {
    if !is_a_share_code(code) {
        return None;
    }

    let market = if code.starts_with('6') {
        Market::Shanghai
    } else {
        Market::Shenzhen
    };
    Some(canonical_symbol(market, code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_tags() {
        assert_eq!(Market::from_tag("sh"), Some(Market::Shanghai));
        assert_eq!(Market::from_tag("sz"), Some(Market::Shenzhen));
        assert_eq!(Market::from_tag("bj"), Some(Market::Beijing));
        assert_eq!(Market::from_tag("hk"), None);
    }

    #[test]
    fn test_shanghai_equity_rule() {
        let sh = Market::Shanghai;
        assert!(sh.is_equity_code("600000"));
        assert!(sh.is_equity_code("688981"));
        // SH indices start with 000.
        assert!(!sh.is_equity_code("000001"));
    }

    #[test]
    fn test_shenzhen_equity_rule() {
        let sz = Market::Shenzhen;
        assert!(sz.is_equity_code("000001"));
        assert!(sz.is_equity_code("300750"));
        // SZ indices start with 399.
        assert!(!sz.is_equity_code("399001"));
    }

    #[test]
    fn test_beijing_equity_rule() {
        let bj = Market::Beijing;
        assert!(bj.is_equity_code("430017"));
        assert!(bj.is_equity_code("832000"));
        assert!(bj.is_equity_code("872000"));
        assert!(bj.is_equity_code("920000"));
        assert!(!bj.is_equity_code("100000"));
    }

    #[test]
    fn test_classify_equity() {
        assert_eq!(
            classify_day_file("sh600000.day"),
            Classification::Equity("600000.SS".to_string())
        );
        assert_eq!(
            classify_day_file("sz000001.day"),
            Classification::Equity("000001.SZ".to_string())
        );
        assert_eq!(
            classify_day_file("bj430017.day"),
            Classification::Equity("430017.BJ".to_string())
        );
    }

    #[test]
    fn test_classify_non_equity() {
        // SH composite index and SZ component index.
        assert_eq!(classify_day_file("sh000001.day"), Classification::NonEquity);
        assert_eq!(classify_day_file("sz399001.day"), Classification::NonEquity);
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(classify_day_file("hk00700.day"), Classification::Unrecognized);
        assert_eq!(classify_day_file("sh600000.dat"), Classification::Unrecognized);
        assert_eq!(classify_day_file("sh60000.day"), Classification::Unrecognized);
        assert_eq!(classify_day_file("readme.txt"), Classification::Unrecognized);
    }

    #[test]
    fn test_classification_symbol() {
        let c = classify_day_file("sh600519.day");
        assert_eq!(c.symbol(), Some("600519.SS"));
        assert_eq!(Classification::NonEquity.symbol(), None);
    }

    #[test]
    fn test_a_share_codes() {
        assert!(is_a_share_code("600000"));
        assert!(is_a_share_code("300750"));
        assert!(!is_a_share_code("430017")); // BJ codes excluded
        assert!(!is_a_share_code("399001"));
        assert!(!is_a_share_code("60000"));
    }

    #[test]
    fn test_a_share_symbol() {
        assert_eq!(a_share_symbol("600000"), Some("600000.SS".to_string()));
        assert_eq!(a_share_symbol("000001"), Some("000001.SZ".to_string()));
        assert_eq!(a_share_symbol("399001"), None);
    }
}
