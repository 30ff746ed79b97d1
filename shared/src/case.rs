use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Opaque case identifier. The backend may send numbers or strings; the two
/// never compare equal to each other. Numbers outside the i64 range are kept
/// as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CaseId {
    Number(i64),
    Text(String),
}

impl CaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self::Text(id.into())
    }
}

impl From<i64> for CaseId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<i32> for CaseId {
    fn from(id: i32) -> Self {
        Self::Number(i64::from(id))
    }
}

impl From<&str> for CaseId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl<'de> Deserialize<'de> for CaseId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(n
                .as_i64()
                .map_or_else(|| Self::Text(n.to_string()), Self::Number)),
            Value::String(s) => Ok(Self::Text(s)),
            other => Err(de::Error::custom(format!(
                "case id must be a number or a string, got {other}"
            ))),
        }
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Case status as the backend spells it. Unknown values are carried through
/// untouched; non-string values are kept as their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum CaseStatus {
    Assigned,
    UnderInvestigation,
    Closed,
    Other(String),
}

impl CaseStatus {
    /// The values offered when editing a case.
    pub const SELECTABLE: [CaseStatus; 3] = [
        CaseStatus::Assigned,
        CaseStatus::UnderInvestigation,
        CaseStatus::Closed,
    ];

    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "assigned" => Self::Assigned,
            "under-investigation" => Self::UnderInvestigation,
            "closed" => Self::Closed,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Assigned => "assigned",
            Self::UnderInvestigation => "under-investigation",
            Self::Closed => "closed",
            Self::Other(s) => s,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Assigned => "Assigned",
            Self::UnderInvestigation => "Under Investigation",
            Self::Closed => "Closed",
            Self::Other(s) => s,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl From<String> for CaseStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl<'de> Deserialize<'de> for CaseStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Self::parse(&s),
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<CaseStatus> for String {
    fn from(status: CaseStatus) -> Self {
        match status {
            CaseStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text tags. Read-only on this page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Tags {
    Text(String),
    List(Vec<String>),
}

impl Tags {
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::List(items) => items.join(", "),
        }
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Self::List(items.into_iter().filter_map(scalar_text).collect()),
            other => Self::Text(scalar_text(other).unwrap_or_default()),
        })
    }
}

/// Renders any JSON value as display text. Null is absent.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_text))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: CaseId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub case_heading: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub applicable_article: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<CaseStatus>,
    #[serde(default)]
    pub tags: Option<Tags>,
    /// Anything else the backend sends, kept so a replaced entry is exactly
    /// what the server returned.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Case {
    pub fn new(id: impl Into<CaseId>) -> Self {
        Self {
            id: id.into(),
            case_heading: None,
            query: None,
            applicable_article: None,
            description: None,
            status: None,
            tags: None,
            extra: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.case_heading = Some(heading.into());
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_article(mut self, article: impl Into<String>) -> Self {
        self.applicable_article = Some(article.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// Body of `GET case_list/`. Entries stay raw until [`Self::into_cases`] so
/// one bad record cannot sink the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseListResponse {
    #[serde(default)]
    pub cases: Option<Vec<Value>>,
}

impl CaseListResponse {
    /// Decodes each entry on its own, dropping the ones that don't parse.
    #[must_use]
    pub fn into_cases(self) -> Vec<Case> {
        self.cases
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value::<Case>(raw) {
                Ok(case) => Some(case),
                Err(error) => {
                    warn!(index, %error, "skipping malformed case record");
                    None
                }
            })
            .collect()
    }
}

/// Cases in server order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseCollection {
    cases: Vec<Case>,
}

impl CaseCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cases(cases: Vec<Case>) -> Self {
        Self { cases }
    }

    pub fn get(&self, id: &CaseId) -> Option<&Case> {
        self.cases.iter().find(|c| &c.id == id)
    }

    /// Swaps in `case` for the entry with the same id. Returns false and
    /// leaves the collection alone when no entry matches.
    pub fn replace(&mut self, case: Case) -> bool {
        match self.cases.iter_mut().find(|c| c.id == case.id) {
            Some(slot) => {
                *slot = case;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn clear(&mut self) {
        self.cases.clear();
    }

    pub fn as_slice(&self) -> &[Case] {
        &self.cases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn case_deserializes_camel_case() {
        let case: Case = serde_json::from_value(json!({
            "id": 7,
            "caseHeading": "Land dispute",
            "query": "Who owns the plot?",
            "applicableArticle": "Art. 300A",
            "description": "Long running",
            "status": "under-investigation",
            "tags": "property, land",
            "created_at": "2024-09-01"
        }))
        .unwrap();

        assert_eq!(case.id, CaseId::Number(7));
        assert_eq!(case.case_heading.as_deref(), Some("Land dispute"));
        assert_eq!(case.applicable_article.as_deref(), Some("Art. 300A"));
        assert_eq!(case.status, Some(CaseStatus::UnderInvestigation));
        assert_eq!(case.tags, Some(Tags::Text("property, land".into())));
        assert_eq!(case.extra.get("created_at"), Some(&json!("2024-09-01")));
    }

    #[test]
    fn missing_and_null_fields_are_absent() {
        let case: Case = serde_json::from_value(json!({
            "id": "abc",
            "query": null
        }))
        .unwrap();
        assert_eq!(case.id, CaseId::new("abc"));
        assert!(case.query.is_none());
        assert!(case.case_heading.is_none());
        assert!(case.status.is_none());
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let case: Case =
            serde_json::from_value(json!({ "id": 1, "status": "escalated" })).unwrap();
        assert_eq!(case.status, Some(CaseStatus::Other("escalated".into())));
        let back = serde_json::to_value(&case).unwrap();
        assert_eq!(back["status"], json!("escalated"));
    }

    #[test]
    fn extra_fields_survive_round_trip() {
        let raw = json!({ "id": 3, "caseHeading": "A", "assignee": { "name": "R" } });
        let case: Case = serde_json::from_value(raw).unwrap();
        let back = serde_json::to_value(&case).unwrap();
        assert_eq!(back["assignee"], json!({ "name": "R" }));
        assert_eq!(back["caseHeading"], json!("A"));
    }

    #[test]
    fn numeric_and_text_ids_differ() {
        assert_ne!(CaseId::Number(1), CaseId::new("1"));
        assert_eq!(CaseId::Number(1).to_string(), "1");
        assert_eq!(CaseId::new("x-9").to_string(), "x-9");
    }

    #[test]
    fn tag_lists_display_joined() {
        let tags: Tags = serde_json::from_value(json!(["labour", "wages"])).unwrap();
        assert_eq!(tags.display(), "labour, wages");
    }

    #[test]
    fn status_labels() {
        assert_eq!(CaseStatus::UnderInvestigation.label(), "Under Investigation");
        assert_eq!(CaseStatus::parse("closed"), CaseStatus::Closed);
        assert!(CaseStatus::Other(String::new()).is_empty());
        assert!(!CaseStatus::Assigned.is_empty());
    }

    #[test]
    fn list_response_tolerates_missing_cases() {
        let empty: CaseListResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.cases.is_none());
        assert!(empty.into_cases().is_empty());
        let null: CaseListResponse = serde_json::from_value(json!({ "cases": null })).unwrap();
        assert!(null.into_cases().is_empty());
    }

    #[test]
    fn bad_records_are_dropped_individually() {
        let response: CaseListResponse = serde_json::from_value(json!({
            "cases": [
                { "id": 1, "caseHeading": "first" },
                { "caseHeading": "no id" },
                { "id": true },
                null,
                { "id": 2, "caseHeading": "second" }
            ]
        }))
        .unwrap();

        let ids: Vec<_> = response.into_cases().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CaseId::Number(1), CaseId::Number(2)]);
    }

    #[test]
    fn odd_field_types_are_coerced() {
        let case: Case = serde_json::from_value(json!({
            "id": 4,
            "caseHeading": 1234,
            "query": false,
            "description": { "text": "nested" },
            "status": 7,
            "tags": ["a", 2, null]
        }))
        .unwrap();

        assert_eq!(case.case_heading.as_deref(), Some("1234"));
        assert_eq!(case.query.as_deref(), Some("false"));
        assert_eq!(case.description.as_deref(), Some(r#"{"text":"nested"}"#));
        assert_eq!(case.status, Some(CaseStatus::Other("7".into())));
        assert_eq!(case.tags, Some(Tags::List(vec!["a".into(), "2".into()])));
    }

    #[test]
    fn ids_beyond_i64_are_kept_as_text() {
        let case: Case =
            serde_json::from_value(json!({ "id": 18_446_744_073_709_551_615_u64 })).unwrap();
        assert_eq!(case.id, CaseId::new("18446744073709551615"));
        assert_eq!(CaseId::from("x"), CaseId::new("x"));
    }

    #[test]
    fn replace_keeps_order_and_ignores_unknown_ids() {
        let mut collection = CaseCollection::from_cases(vec![
            Case::new(1).with_heading("one"),
            Case::new(2).with_heading("two"),
            Case::new(3).with_heading("three"),
        ]);

        assert!(collection.replace(Case::new(2).with_heading("TWO")));
        let headings: Vec<_> = collection
            .iter()
            .map(|c| c.case_heading.clone().unwrap())
            .collect();
        assert_eq!(headings, vec!["one", "TWO", "three"]);

        assert!(!collection.replace(Case::new(9).with_heading("nine")));
        assert_eq!(collection.len(), 3);
    }
}
