//! Query-string construction for the Federal Register search endpoints.
//!
//! The API nests filters under `conditions[...]` and repeats array
//! values with a trailing `[]`:
//!
//! ```text
//! conditions[term]=climate
//! conditions[agencies][]=energy-department&conditions[agencies][]=interior-department
//! conditions[publication_date][gte]=2024-01-01
//! fields[]=title&fields[]=document_number
//! per_page=20&page=2&order=newest
//! ```
//!
//! Name segments and values are percent-encoded; the structural
//! brackets are emitted as-is. Filter shapes deeper than
//! `conditions[key][sub]` (or arrays of objects) cannot be expressed
//! with [`ConditionValue`] and are not supported by the API.

use std::borrow::Cow;

/// One filter value, tagged by shape at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionValue {
    /// `conditions[k]=v`
    Scalar(String),
    /// `conditions[k][]=v1&conditions[k][]=v2`; empty emits nothing.
    List(Vec<String>),
    /// `conditions[k][sub]=v` per entry, in order; empty emits nothing.
    Nested(Vec<(String, String)>),
}

impl ConditionValue {
    /// A scalar value.
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    /// A repeated value.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// A nested sub-mapping; entries with `None` values are dropped.
    pub fn nested<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Nested(
            entries
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k.into(), v.into())))
                .collect(),
        )
    }

    /// A `gte`/`lte` date range, or `None` when both ends are open.
    pub fn range(gte: Option<&str>, lte: Option<&str>) -> Option<Self> {
        match Self::nested([("gte", gte), ("lte", lte)]) {
            Self::Nested(entries) if entries.is_empty() => None,
            value => Some(value),
        }
    }

    /// Returns `true` when the value would encode to no pairs.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(_) => false,
            Self::List(values) => values.is_empty(),
            Self::Nested(entries) => entries.is_empty(),
        }
    }
}

/// Ordered filter condition set. Re-inserting a key replaces its value
/// in place, keeping the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions(Vec<(String, ConditionValue)>);

impl Conditions {
    /// An empty condition set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a condition.
    pub fn insert(&mut self, key: impl Into<String>, value: ConditionValue) -> &mut Self {
        let key = key.into();
        match self.0.iter().position(|(k, _)| *k == key) {
            Some(pos) => self.0[pos].1 = value,
            None => self.0.push((key, value)),
        }
        self
    }

    /// Inserts the value only when present.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<ConditionValue>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&ConditionValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates conditions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConditionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ConditionValue)> for Conditions {
    fn from_iter<I: IntoIterator<Item = (K, ConditionValue)>>(iter: I) -> Self {
        let mut conditions = Self::new();
        for (k, v) in iter {
            conditions.insert(k, v);
        }
        conditions
    }
}

/// A complete search request: filters, field selection, paging and sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub conditions: Conditions,
    /// Empty means "all fields" (API default).
    pub fields: Vec<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    /// `newest`, `oldest`, `relevance` or `executive_order_number`.
    pub order: Option<String>,
    pub format: Option<String>,
}

impl SearchQuery {
    /// Creates a query that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text `conditions[term]`.
    pub fn with_term(self, term: impl Into<String>) -> Self {
        self.with_condition("term", ConditionValue::scalar(term))
    }

    /// Adds or replaces one condition.
    pub fn with_condition(mut self, key: impl Into<String>, value: ConditionValue) -> Self {
        self.conditions.insert(key, value);
        self
    }

    /// Replaces the condition set.
    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = conditions;
        self
    }

    /// Sets the field selection.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Raw (unencoded) key/value pairs in wire order: conditions, fields,
    /// then `per_page`, `page`, `order`, `format`.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        for (key, value) in self.conditions.iter() {
            let key = encode(key);
            match value {
                ConditionValue::Scalar(v) => {
                    pairs.push((format!("conditions[{key}]"), v.clone()));
                }
                ConditionValue::List(values) => {
                    for v in values {
                        pairs.push((format!("conditions[{key}][]"), v.clone()));
                    }
                }
                ConditionValue::Nested(entries) => {
                    for (sub, v) in entries {
                        pairs.push((format!("conditions[{key}][{}]", encode(sub)), v.clone()));
                    }
                }
            }
        }

        for field in &self.fields {
            pairs.push(("fields[]".to_string(), field.clone()));
        }

        if let Some(per_page) = self.per_page.filter(|n| *n > 0) {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(page) = self.page.filter(|n| *n > 0) {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(order) = self.order.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("order".to_string(), order.to_string()));
        }
        if let Some(format) = self.format.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("format".to_string(), format.to_string()));
        }

        pairs
    }

    /// Encodes the query string (without a leading `?`).
    ///
    /// An empty query yields an empty string.
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(k, v)| format!("{k}={}", encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Appends `query` to `path`, adding `?` only when there is a query.
pub fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

fn encode(s: &str) -> Cow<'_, str> {
    urlencoding::encode(s)
}
