use serde::{Deserialize, Serialize};

use crate::case::{Case, CaseId};
use crate::error::AppResult;
use crate::editor::EditableField;
use crate::viewport::ViewportMetrics;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum Event {
    #[default]
    Noop,

    // Lifecycle
    Mounted {
        viewport: ViewportMetrics,
    },
    Unmounted,
    ConfigureApi {
        base_url: String,
    },

    // Viewport
    Resized {
        width: f64,
    },
    Scrolled {
        offset_y: f64,
    },
    ScrollToTopRequested,

    // Case editor
    ShowDetails {
        case_id: CaseId,
    },
    EditCase {
        case_id: CaseId,
    },
    ToggleEditMode,
    CloseSession,
    FieldChanged {
        field: EditableField,
        value: String,
    },
    SaveRequested,

    DismissNotice,

    // Capability responses (boxed to keep the enum small)
    #[serde(skip)]
    CasesResponse {
        generation: u64,
        result: Box<AppResult<Vec<Case>>>,
    },
    #[serde(skip)]
    SaveResponse {
        generation: u64,
        /// Matches the in-flight marker set when the request went out.
        token: u64,
        case_id: CaseId,
        result: Box<AppResult<Case>>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Mounted { .. } => "mounted",
            Self::Unmounted => "unmounted",
            Self::ConfigureApi { .. } => "configure_api",
            Self::Resized { .. } => "resized",
            Self::Scrolled { .. } => "scrolled",
            Self::ScrollToTopRequested => "scroll_to_top_requested",
            Self::ShowDetails { .. } => "show_details",
            Self::EditCase { .. } => "edit_case",
            Self::ToggleEditMode => "toggle_edit_mode",
            Self::CloseSession => "close_session",
            Self::FieldChanged { .. } => "field_changed",
            Self::SaveRequested => "save_requested",
            Self::DismissNotice => "dismiss_notice",
            Self::CasesResponse { .. } => "cases_response",
            Self::SaveResponse { .. } => "save_response",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::ScrollToTopRequested
                | Self::ShowDetails { .. }
                | Self::EditCase { .. }
                | Self::ToggleEditMode
                | Self::CloseSession
                | Self::FieldChanged { .. }
                | Self::SaveRequested
                | Self::DismissNotice
        )
    }
}
