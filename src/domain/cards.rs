use super::models::{Dataset, RowId};
use super::schema;

/// Summary of one company as shown in the card grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCard {
    pub id: RowId,
    pub name: String,
    pub management_fees: String,
    pub creation: String,
    pub website: String,
}

impl CompanyCard {
    pub fn fees_line(&self) -> String {
        format!("Frais: {}%", self.management_fees)
    }

    pub fn creation_line(&self) -> String {
        format!("Création: {}", self.creation)
    }

    pub fn website_line(&self) -> String {
        format!("Site Web: {}", self.website)
    }
}

/// One card per record, in source order.
pub fn company_cards(dataset: &Dataset) -> Vec<CompanyCard> {
    dataset
        .iter()
        .map(|(id, record)| CompanyCard {
            id,
            name: record.name().to_string(),
            management_fees: record.value(schema::MANAGEMENT_FEES).to_string(),
            creation: record.value(schema::CREATION).to_string(),
            website: record.website().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DatasetParser;

    #[test]
    fn test_one_card_per_record() {
        let csv = format!(
            "{},{},{},{}\nAlpha,2008,https://a.example,5\nBeta,2012,https://b.example,6.5\n",
            schema::NAME,
            schema::CREATION,
            schema::WEBSITE,
            schema::MANAGEMENT_FEES
        );
        let dataset = DatasetParser::parse(&csv).unwrap();
        let cards = company_cards(&dataset);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].name, "Beta");
        assert_eq!(cards[1].fees_line(), "Frais: 6.5%");
        assert_eq!(cards[1].creation_line(), "Création: 2012");
        assert_eq!(cards[1].website_line(), "Site Web: https://b.example");
    }

    #[test]
    fn test_duplicate_names_stay_distinct() {
        let csv = format!("{},{}\nAlpha,5\nAlpha,7\n", schema::NAME, schema::MANAGEMENT_FEES);
        let dataset = DatasetParser::parse(&csv).unwrap();
        let cards = company_cards(&dataset);
        assert_eq!(cards.len(), 2);
        assert_ne!(cards[0].id, cards[1].id);
        assert_eq!(cards[0].management_fees, "5");
        assert_eq!(cards[1].management_fees, "7");
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let dataset = DatasetParser::parse(&format!("{}\nAlpha\n", schema::NAME)).unwrap();
        let card = &company_cards(&dataset)[0];
        assert_eq!(card.fees_line(), "Frais: %");
        assert!(card.website.is_empty());
    }
}
