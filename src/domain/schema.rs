//! Column identifiers of the company dataset.
//!
//! The dataset carries a fixed list of known columns. The header row of the
//! CSV is normalized and checked against it once, at load time, so that the
//! presenters never have to guess the shape of a record.

pub const NAME: &str = "Nom de l'entreprise";
pub const CREATION: &str = "Création";
pub const WEBSITE: &str = "Site Web";
pub const GAPSE: &str = "GAPSE";
pub const PEPS: &str = "PEPS";
pub const LABEL_ZERO_HIDDEN_FEES: &str = "Label \"Zéro frais caché\"";
pub const SIMULATOR: &str = "Simulateur";
pub const SIMULATOR_ALT: &str = "Simulateur.1";
pub const VERIFIED: &str = "✅";
pub const TJM: &str = "TJM";
pub const WORKDAYS: &str = "Jours travaillés";
pub const GROSS_REVENUE: &str = "Revenu Brut";
pub const EMPLOYER_CHARGES: &str = "Charges patronales";
pub const EMPLOYEE_CHARGES: &str = "Charges salariales";
pub const MANAGEMENT_FEES: &str = "Frais de gestion";
pub const NET_SHARE: &str = "Part Net du CA";
pub const SOCIAL_CONTRIBUTIONS: &str = "Cotisations sociales";
pub const NET_REVENUE: &str = "Revenu net";

/// Every column the dataset is expected to carry, in file order.
pub const KNOWN_COLUMNS: [&str; 18] = [
    NAME,
    CREATION,
    WEBSITE,
    GAPSE,
    PEPS,
    LABEL_ZERO_HIDDEN_FEES,
    SIMULATOR,
    SIMULATOR_ALT,
    VERIFIED,
    TJM,
    WORKDAYS,
    GROSS_REVENUE,
    EMPLOYER_CHARGES,
    EMPLOYEE_CHARGES,
    MANAGEMENT_FEES,
    NET_SHARE,
    SOCIAL_CONTRIBUTIONS,
    NET_REVENUE,
];

/// Columns the table always declares first, and shows by default.
pub const BASE_COLUMNS: [&str; 5] = [NAME, CREATION, MANAGEMENT_FEES, NET_SHARE, NET_REVENUE];

/// Columns never appended to the table after the base ones.
pub const TABLE_EXCLUDED_COLUMNS: [&str; 6] =
    [NAME, CREATION, WEBSITE, MANAGEMENT_FEES, NET_SHARE, NET_REVENUE];

/// Ordered column names of a loaded dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    missing: Vec<&'static str>,
}

impl Schema {
    /// Builds a schema from raw header names.
    ///
    /// Headers are normalized (`&apos;` decoded, duplicates suffixed with
    /// `_1`, `_2`, ...) and the known columns absent from the result are
    /// remembered in [`Schema::missing`].
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns: Vec<String> = Vec::new();
        for raw in headers {
            let name = normalize_header(raw.as_ref());
            let unique = if columns.contains(&name) {
                let mut suffix = 1;
                while columns.contains(&format!("{}_{}", name, suffix)) {
                    suffix += 1;
                }
                format!("{}_{}", name, suffix)
            } else {
                name
            };
            columns.push(unique);
        }

        let missing = KNOWN_COLUMNS
            .iter()
            .copied()
            .filter(|known| !columns.iter().any(|c| c == known))
            .collect();

        Self { columns, missing }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Known columns that the header row does not provide.
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    /// Schema columns appended to the table after the base columns.
    pub fn extra_table_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| !TABLE_EXCLUDED_COLUMNS.contains(c))
    }
}

fn normalize_header(raw: &str) -> String {
    raw.replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_header_has_nothing_missing() {
        let schema = Schema::from_headers(KNOWN_COLUMNS);
        assert_eq!(schema.len(), KNOWN_COLUMNS.len());
        assert!(schema.missing().is_empty());
    }

    #[test]
    fn test_entity_in_header_is_decoded() {
        let schema = Schema::from_headers(["Nom de l&apos;entreprise", "Création"]);
        assert_eq!(schema.columns()[0], NAME);
        assert!(schema.contains(NAME));
    }

    #[test]
    fn test_duplicate_headers_get_suffix() {
        let schema = Schema::from_headers(["A", "B", "A", "A"]);
        assert_eq!(schema.columns(), ["A", "B", "A_1", "A_2"]);
    }

    #[test]
    fn test_missing_known_columns_are_flagged() {
        let schema = Schema::from_headers([NAME, TJM]);
        assert!(schema.missing().contains(&WEBSITE));
        assert!(schema.missing().contains(&NET_REVENUE));
        assert!(!schema.missing().contains(&TJM));
        assert_eq!(schema.missing().len(), KNOWN_COLUMNS.len() - 2);
    }

    #[test]
    fn test_extra_table_columns_keep_header_order() {
        let schema = Schema::from_headers([TJM, NAME, WEBSITE, GAPSE, NET_REVENUE, "Autre"]);
        let extras: Vec<&str> = schema.extra_table_columns().collect();
        assert_eq!(extras, vec![TJM, GAPSE, "Autre"]);
    }
}
