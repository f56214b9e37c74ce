//! Quarterly financial statement rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical financial statement fields.
///
/// The set is declared statically so that the source-column mapping at
/// the fetch boundary can be checked exhaustively; an unmapped field is
/// a compile error there, not a silent drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementField {
    /// Basic earnings per share (yuan).
    BasicEps,
    /// EPS after non-recurring items (yuan).
    EpsDeducted,
    /// Net asset value per share (yuan).
    NavPs,
    /// Capital reserve per share (yuan).
    CapitalReservePs,
    /// Return on equity (percent).
    Roe,
    /// Operating cash flow per share (yuan).
    OperatingCashFlowPs,
    /// Total assets (yuan).
    TotalAssets,
    /// Total liabilities (yuan).
    TotalLiabilities,
    /// Total shareholders' equity (yuan).
    TotalEquity,
    /// Operating revenue (yuan).
    OperatingRevenue,
    /// Operating cost (yuan).
    OperatingCost,
    /// Operating profit (yuan).
    OperatingProfit,
    /// Total profit (yuan).
    TotalProfit,
    /// Net profit (yuan).
    NetProfit,
    /// Net profit attributable to the parent company (yuan).
    NetProfitParent,
    /// Net cash from operations (yuan).
    OperatingCashFlowNet,
    /// Total shares outstanding.
    TotalShares,
}

impl StatementField {
    /// All fields, for exhaustive iteration.
    pub const ALL: [Self; 17] = [
        Self::BasicEps,
        Self::EpsDeducted,
        Self::NavPs,
        Self::CapitalReservePs,
        Self::Roe,
        Self::OperatingCashFlowPs,
        Self::TotalAssets,
        Self::TotalLiabilities,
        Self::TotalEquity,
        Self::OperatingRevenue,
        Self::OperatingCost,
        Self::OperatingProfit,
        Self::TotalProfit,
        Self::NetProfit,
        Self::NetProfitParent,
        Self::OperatingCashFlowNet,
        Self::TotalShares,
    ];

    /// Canonical field name used by the store.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BasicEps => "basic_eps",
            Self::EpsDeducted => "eps_deducted",
            Self::NavPs => "nav_ps",
            Self::CapitalReservePs => "capital_reserve_ps",
            Self::Roe => "roe",
            Self::OperatingCashFlowPs => "operating_cash_flow_ps",
            Self::TotalAssets => "total_assets",
            Self::TotalLiabilities => "total_liabilities",
            Self::TotalEquity => "total_equity",
            Self::OperatingRevenue => "operating_revenue",
            Self::OperatingCost => "operating_cost",
            Self::OperatingProfit => "operating_profit",
            Self::TotalProfit => "total_profit",
            Self::NetProfit => "net_profit",
            Self::NetProfitParent => "np_parent_company",
            Self::OperatingCashFlowNet => "operating_cash_flow_net",
            Self::TotalShares => "total_shares",
        }
    }
}

impl std::fmt::Display for StatementField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One symbol's statement values for a single reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Canonical instrument code.
    pub symbol: String,
    /// Reporting period end date.
    pub period_end: NaiveDate,
    /// Announcement date, when known.
    pub publ_date: Option<NaiveDate>,
    /// Field values present in this row (source nulls are omitted).
    pub values: Vec<(StatementField, f64)>,
}

impl StatementRow {
    /// Looks up a field value in this row.
    #[must_use]
    pub fn get(&self, field: StatementField) -> Option<f64> {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_unique() {
        let mut names: Vec<&str> = StatementField::ALL.iter().map(|f| f.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), StatementField::ALL.len());
    }

    #[test]
    fn test_row_get() {
        let row = StatementRow {
            symbol: "600000.SS".to_string(),
            period_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            publ_date: None,
            values: vec![(StatementField::BasicEps, 1.82), (StatementField::Roe, 10.5)],
        };

        assert_eq!(row.get(StatementField::BasicEps), Some(1.82));
        assert_eq!(row.get(StatementField::NetProfit), None);
    }
}
