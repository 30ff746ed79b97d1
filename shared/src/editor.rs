//! Case editor: the open modal, its scratch draft and the minimal update
//! computed from it.
//!
//! Everything here is pure state; the app decides when to send the
//! resulting [`CaseUpdate`].

use serde::{Deserialize, Serialize};

use crate::case::{Case, CaseId, CaseStatus};
use crate::error::SaveRejected;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditableField {
    CaseHeading,
    Query,
    ApplicableArticle,
    Description,
    Status,
}

impl EditableField {
    pub const ALL: [EditableField; 5] = [
        EditableField::CaseHeading,
        EditableField::Query,
        EditableField::ApplicableArticle,
        EditableField::Description,
        EditableField::Status,
    ];

    /// Wire name, as used in the JSON payload.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CaseHeading => "caseHeading",
            Self::Query => "query",
            Self::ApplicableArticle => "applicableArticle",
            Self::Description => "description",
            Self::Status => "status",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CaseHeading => "Case Heading",
            Self::Query => "Query",
            Self::ApplicableArticle => "Applicable Articles",
            Self::Description => "Description",
            Self::Status => "Status",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::CaseHeading | Self::Query | Self::Status)
    }
}

/// Editable fields of a case. `None` means the case had no value and the
/// user has not typed one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDraft {
    pub case_heading: Option<String>,
    pub query: Option<String>,
    pub applicable_article: Option<String>,
    pub description: Option<String>,
    pub status: Option<CaseStatus>,
}

impl CaseDraft {
    #[must_use]
    pub fn from_case(case: &Case) -> Self {
        Self {
            case_heading: case.case_heading.clone(),
            query: case.query.clone(),
            applicable_article: case.applicable_article.clone(),
            description: case.description.clone(),
            status: case.status.clone(),
        }
    }

    pub fn set(&mut self, field: EditableField, value: String) {
        match field {
            EditableField::CaseHeading => self.case_heading = Some(value),
            EditableField::Query => self.query = Some(value),
            EditableField::ApplicableArticle => self.applicable_article = Some(value),
            EditableField::Description => self.description = Some(value),
            EditableField::Status => self.status = Some(CaseStatus::parse(&value)),
        }
    }

    #[must_use]
    pub fn get(&self, field: EditableField) -> Option<&str> {
        match field {
            EditableField::CaseHeading => self.case_heading.as_deref(),
            EditableField::Query => self.query.as_deref(),
            EditableField::ApplicableArticle => self.applicable_article.as_deref(),
            EditableField::Description => self.description.as_deref(),
            EditableField::Status => self.status.as_ref().map(CaseStatus::as_str),
        }
    }

    /// Required fields that are absent or empty, in field order.
    #[must_use]
    pub fn missing_required(&self) -> Vec<EditableField> {
        EditableField::ALL
            .into_iter()
            .filter(|f| f.is_required())
            .filter(|f| self.get(*f).map_or(true, str::is_empty))
            .collect()
    }

    /// Fields whose value differs from `original`, compared strictly (an
    /// absent value and an empty string are different).
    #[must_use]
    pub fn diff(&self, original: &CaseDraft) -> CaseUpdate {
        fn changed<T: Clone + PartialEq>(draft: &Option<T>, original: &Option<T>) -> Option<T> {
            if draft == original {
                None
            } else {
                draft.clone()
            }
        }

        CaseUpdate {
            case_heading: changed(&self.case_heading, &original.case_heading),
            query: changed(&self.query, &original.query),
            applicable_article: changed(&self.applicable_article, &original.applicable_article),
            description: changed(&self.description, &original.description),
            status: changed(&self.status, &original.status),
        }
    }
}

/// Sparse write payload. `id` and `tags` have no slot here, so they can
/// never be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable_article: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
}

impl CaseUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    #[must_use]
    pub fn changed_fields(&self) -> Vec<EditableField> {
        let mut fields = Vec::new();
        if self.case_heading.is_some() {
            fields.push(EditableField::CaseHeading);
        }
        if self.query.is_some() {
            fields.push(EditableField::Query);
        }
        if self.applicable_article.is_some() {
            fields.push(EditableField::ApplicableArticle);
        }
        if self.description.is_some() {
            fields.push(EditableField::Description);
        }
        if self.status.is_some() {
            fields.push(EditableField::Status);
        }
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    Viewing,
    Editing,
}

impl EditMode {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Viewing => Self::Editing,
            Self::Editing => Self::Viewing,
        }
    }
}

/// The open modal. Holds its own snapshot of the case so the diff baseline
/// does not move if the collection changes underneath.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub case_id: CaseId,
    pub original: Case,
    pub draft: CaseDraft,
    pub mode: EditMode,
    pub saving: bool,
}

impl EditSession {
    #[must_use]
    pub fn open(case: &Case, mode: EditMode) -> Self {
        Self {
            case_id: case.id.clone(),
            original: case.clone(),
            draft: CaseDraft::from_case(case),
            mode,
            saving: false,
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
    }

    /// Applies a keystroke. Returns false when the session is not accepting
    /// edits.
    pub fn update_field(&mut self, field: EditableField, value: String) -> bool {
        if !self.is_editing() || self.saving {
            return false;
        }
        self.draft.set(field, value);
        true
    }

    /// Validates the draft and computes the payload to send.
    pub fn prepare_save(&self) -> Result<CaseUpdate, SaveRejected> {
        if !self.is_editing() {
            return Err(SaveRejected::NotEditing);
        }
        if self.saving {
            return Err(SaveRejected::SaveInFlight);
        }
        if !self.draft.missing_required().is_empty() {
            return Err(SaveRejected::MissingRequiredFields);
        }

        let update = self.draft.diff(&CaseDraft::from_case(&self.original));
        if update.is_empty() {
            return Err(SaveRejected::NoChanges);
        }
        Ok(update)
    }
}
