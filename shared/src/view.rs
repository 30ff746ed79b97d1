use serde::{Deserialize, Serialize};

use crate::case::CaseStatus;
use crate::editor::EditableField;
use crate::error::AppError;
use crate::notice::{Notice, NoticeKind};
use crate::viewport::NavigationLayout;

pub const PAGE_TITLE: &str = "Case Database";
pub const EMPTY_MESSAGE: &str = "No cases available";

/// Badge colouring for a status.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Affirmative,
    Negative,
    Caution,
    Neutral,
}

impl StatusTone {
    #[must_use]
    pub fn for_status(status: Option<&CaseStatus>) -> Self {
        match status {
            Some(CaseStatus::Assigned) => Self::Affirmative,
            Some(CaseStatus::Closed) => Self::Negative,
            Some(CaseStatus::UnderInvestigation) => Self::Caution,
            Some(CaseStatus::Other(_)) | None => Self::Neutral,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseCard {
    pub id: String,
    pub heading: String,
    pub status: String,
    pub status_tone: StatusTone,
    pub query: String,
    pub tags: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldControl {
    Text,
    TextArea { rows: u8 },
    Select,
}

impl FieldControl {
    #[must_use]
    pub const fn for_field(field: EditableField) -> Self {
        match field {
            EditableField::CaseHeading | EditableField::ApplicableArticle => Self::Text,
            EditableField::Query => Self::TextArea { rows: 3 },
            EditableField::Description => Self::TextArea { rows: 4 },
            EditableField::Status => Self::Select,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldView {
    pub field: EditableField,
    pub label: String,
    pub value: String,
    pub control: FieldControl,
    pub editable: bool,
    pub required: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusOption {
    pub value: String,
    pub label: String,
}

impl StatusOption {
    #[must_use]
    pub fn all() -> Vec<Self> {
        CaseStatus::SELECTABLE
            .iter()
            .map(|s| Self {
                value: s.as_str().to_string(),
                label: s.label().to_string(),
            })
            .collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseModal {
    pub case_id: String,
    pub editing: bool,
    pub saving: bool,
    pub fields: Vec<FieldView>,
    pub tags: String,
    pub status_options: Vec<StatusOption>,
    pub can_save: bool,
}

impl CaseModal {
    #[must_use]
    pub fn field(&self, field: EditableField) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.field == field)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeView {
    pub message: String,
    pub kind: NoticeKind,
    pub duration_ms: u64,
}

impl From<&Notice> for NoticeView {
    fn from(n: &Notice) -> Self {
        Self {
            message: n.message.clone(),
            kind: n.kind,
            duration_ms: n.kind.default_duration_ms(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserFacingError {
    pub message: String,
    pub is_transient: bool,
    pub error_code: String,
}

impl From<&AppError> for UserFacingError {
    fn from(e: &AppError) -> Self {
        Self {
            message: e.user_facing_message(),
            is_transient: e.kind.is_transient(),
            error_code: e.code().to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub title: String,
    pub navigation: NavigationLayout,
    pub show_scroll_to_top: bool,
    pub load_status: LoadStatus,
    pub empty_message: Option<String>,
    pub cards: Vec<CaseCard>,
    pub modal: Option<CaseModal>,
    pub notice: Option<NoticeView>,
    pub error: Option<UserFacingError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tones() {
        assert_eq!(
            StatusTone::for_status(Some(&CaseStatus::Assigned)),
            StatusTone::Affirmative
        );
        assert_eq!(
            StatusTone::for_status(Some(&CaseStatus::Closed)),
            StatusTone::Negative
        );
        assert_eq!(
            StatusTone::for_status(Some(&CaseStatus::UnderInvestigation)),
            StatusTone::Caution
        );
        assert_eq!(
            StatusTone::for_status(Some(&CaseStatus::Other("pending".into()))),
            StatusTone::Neutral
        );
        assert_eq!(StatusTone::for_status(None), StatusTone::Neutral);
    }

    #[test]
    fn status_options_in_order() {
        let options = StatusOption::all();
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["assigned", "under-investigation", "closed"]);
        assert_eq!(options[1].label, "Under Investigation");
    }

    #[test]
    fn controls_per_field() {
        assert_eq!(
            FieldControl::for_field(EditableField::Description),
            FieldControl::TextArea { rows: 4 }
        );
        assert_eq!(FieldControl::for_field(EditableField::Status), FieldControl::Select);
    }
}
