use rustc_hash::FxHashSet;

/// Utility functions shared by the transform stages
pub struct CardUtils;

impl CardUtils {
    /// Parse a price or amount string into a float.
    ///
    /// Thousands separators (`,` and `'`) and surrounding whitespace are
    /// stripped. Anything unparseable, negative or non-finite yields 0.
    pub fn parse_amount(amount: &str) -> f64 {
        let cleaned: String = amount
            .chars()
            .filter(|c| *c != ',' && *c != '\'')
            .collect();

        match cleaned.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => value,
            _ => 0.0,
        }
    }

    /// Parse an optional amount, missing values count as 0
    pub fn parse_optional_amount(amount: Option<&str>) -> f64 {
        amount.map(Self::parse_amount).unwrap_or(0.0)
    }

    /// Build a name set from a curated list
    pub fn name_set<I, S>(names: I) -> FxHashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Into::into).collect()
    }
}
