//! Typed filter descriptions mapped onto the API's `conditions[...]`.
//!
//! These are what the tool layer deserializes its flat arguments into;
//! each knows which condition keys and shapes the API expects.

use serde::{Deserialize, Serialize};

use crate::query::{ConditionValue, Conditions};

/// Document type codes accepted by `conditions[type][]`.
pub const DOCUMENT_TYPES: &[&str] = &["RULE", "PRORULE", "NOTICE", "PRESDOCU"];

/// Facets served by `/documents/facets/{facet}`.
pub const DOCUMENT_FACETS: &[&str] = &[
    "daily",
    "weekly",
    "monthly",
    "quarterly",
    "yearly",
    "agency",
    "topic",
    "section",
    "type",
    "subtype",
];

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn list_of(values: &[String]) -> Option<ConditionValue> {
    let values: Vec<&str> = values
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    (!values.is_empty()).then(|| ConditionValue::list(values))
}

/// Filters for `/documents.json` searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentFilter {
    /// Free-text search.
    pub term: Option<String>,
    /// `RULE`, `PRORULE`, `NOTICE`, `PRESDOCU`.
    pub document_types: Vec<String>,
    /// Agency slugs, e.g. `environmental-protection-agency`.
    pub agencies: Vec<String>,
    pub publication_date_gte: Option<String>,
    pub publication_date_lte: Option<String>,
    pub effective_date_gte: Option<String>,
    pub effective_date_lte: Option<String>,
    /// President slug, e.g. `joe-biden`.
    pub president: Option<String>,
    pub docket_id: Option<String>,
    /// Regulation Identifier Number.
    pub regulation_id_number: Option<String>,
    /// Only significant documents (EO 12866).
    pub significant: Option<bool>,
}

impl DocumentFilter {
    /// Builds the condition set, skipping every absent filter.
    pub fn to_conditions(&self) -> Conditions {
        let mut c = Conditions::new();
        c.insert_opt("term", non_empty(&self.term).map(ConditionValue::scalar));
        c.insert_opt("type", list_of(&self.document_types));
        c.insert_opt("agencies", list_of(&self.agencies));
        c.insert_opt(
            "publication_date",
            ConditionValue::range(
                non_empty(&self.publication_date_gte),
                non_empty(&self.publication_date_lte),
            ),
        );
        c.insert_opt(
            "effective_date",
            ConditionValue::range(
                non_empty(&self.effective_date_gte),
                non_empty(&self.effective_date_lte),
            ),
        );
        c.insert_opt("president", non_empty(&self.president).map(ConditionValue::scalar));
        c.insert_opt("docket_id", non_empty(&self.docket_id).map(ConditionValue::scalar));
        c.insert_opt(
            "regulation_id_number",
            non_empty(&self.regulation_id_number).map(ConditionValue::scalar),
        );
        if self.significant == Some(true) {
            c.insert("significant", ConditionValue::scalar("1"));
        }
        c
    }
}

/// Filters for executive order searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutiveOrderFilter {
    pub term: Option<String>,
    /// President slug, e.g. `donald-trump`.
    pub president: Option<String>,
    /// Signing year.
    pub year: Option<u32>,
    pub signing_date_gte: Option<String>,
    pub signing_date_lte: Option<String>,
}

impl ExecutiveOrderFilter {
    /// Builds the condition set; always restricted to executive orders.
    pub fn to_conditions(&self) -> Conditions {
        let mut c = executive_order_conditions();
        c.insert_opt("term", non_empty(&self.term).map(ConditionValue::scalar));
        c.insert_opt("president", non_empty(&self.president).map(ConditionValue::scalar));

        let year = self.year.map(|y| y.to_string());
        let signing = ConditionValue::nested([
            ("year", year.as_deref()),
            ("gte", non_empty(&self.signing_date_gte)),
            ("lte", non_empty(&self.signing_date_lte)),
        ]);
        if !signing.is_empty() {
            c.insert("signing_date", signing);
        }
        c
    }
}

/// The two conditions that narrow a search to executive orders.
pub fn executive_order_conditions() -> Conditions {
    [
        ("type", ConditionValue::list(["PRESDOCU"])),
        (
            "presidential_document_type",
            ConditionValue::scalar("executive_order"),
        ),
    ]
    .into_iter()
    .collect()
}

/// Filters for `/public-inspection-documents.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicInspectionFilter {
    /// Date the documents were available for inspection (`YYYY-MM-DD`).
    pub available_on: Option<String>,
    pub agencies: Vec<String>,
    pub document_types: Vec<String>,
    pub special_filing: Option<bool>,
}

impl PublicInspectionFilter {
    pub fn to_conditions(&self) -> Conditions {
        let mut c = Conditions::new();
        c.insert_opt(
            "available_on",
            non_empty(&self.available_on).map(ConditionValue::scalar),
        );
        c.insert_opt("agencies", list_of(&self.agencies));
        c.insert_opt("type", list_of(&self.document_types));
        if let Some(special) = self.special_filing {
            c.insert("special_filing", ConditionValue::scalar(if special { "1" } else { "0" }));
        }
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchQuery;

    #[test]
    fn empty_document_filter_has_no_conditions() {
        assert!(DocumentFilter::default().to_conditions().is_empty());
    }

    #[test]
    fn document_filter_encodes_all_shapes() {
        let filter = DocumentFilter {
            term: Some("emissions".into()),
            document_types: vec!["RULE".into(), "PRORULE".into()],
            agencies: vec!["environmental-protection-agency".into()],
            publication_date_gte: Some("2024-01-01".into()),
            significant: Some(true),
            ..DocumentFilter::default()
        };
        let qs = SearchQuery::new()
            .with_conditions(filter.to_conditions())
            .to_query_string();
        assert_eq!(
            qs,
            "conditions[term]=emissions\
             &conditions[type][]=RULE&conditions[type][]=PRORULE\
             &conditions[agencies][]=environmental-protection-agency\
             &conditions[publication_date][gte]=2024-01-01\
             &conditions[significant]=1"
        );
    }

    #[test]
    fn blank_strings_are_treated_as_absent() {
        let filter = DocumentFilter {
            term: Some("   ".into()),
            agencies: vec![String::new()],
            ..DocumentFilter::default()
        };
        assert!(filter.to_conditions().is_empty());
    }

    #[test]
    fn executive_order_filter_always_restricts_type() {
        let c = ExecutiveOrderFilter::default().to_conditions();
        assert_eq!(c.get("type"), Some(&ConditionValue::list(["PRESDOCU"])));
        assert_eq!(
            c.get("presidential_document_type"),
            Some(&ConditionValue::scalar("executive_order"))
        );
        assert!(c.get("signing_date").is_none());
    }

    #[test]
    fn executive_order_year_goes_under_signing_date() {
        let filter = ExecutiveOrderFilter {
            president: Some("joe-biden".into()),
            year: Some(2021),
            ..ExecutiveOrderFilter::default()
        };
        let qs = SearchQuery::new()
            .with_conditions(filter.to_conditions())
            .to_query_string();
        assert!(qs.ends_with("&conditions[president]=joe-biden&conditions[signing_date][year]=2021"));
    }

    #[test]
    fn public_inspection_filter() {
        let filter = PublicInspectionFilter {
            available_on: Some("2025-03-03".into()),
            special_filing: Some(false),
            ..PublicInspectionFilter::default()
        };
        let qs = SearchQuery::new()
            .with_conditions(filter.to_conditions())
            .to_query_string();
        assert_eq!(qs, "conditions[available_on]=2025-03-03&conditions[special_filing]=0");
    }

    #[test]
    fn filter_deserializes_from_flat_arguments() {
        let filter: DocumentFilter = serde_json::from_value(serde_json::json!({
            "term": "water",
            "agencies": ["interior-department"],
            "unrelated": 1
        }))
        .expect("deserialize");
        assert_eq!(filter.agencies, vec!["interior-department".to_string()]);
        assert!(filter.document_types.is_empty());
    }
}
