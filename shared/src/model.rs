use crate::case::{CaseCollection, CaseId};
use crate::config::ApiConfig;
use crate::editor::EditSession;
use crate::error::AppError;
use crate::notice::Notice;
use crate::viewport::ViewportState;

/// Outcome of the one-shot case list load.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(AppError),
}

impl LoadState {
    #[must_use]
    pub fn error(&self) -> Option<&AppError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// The one save request allowed on the wire at a time. Outlives the edit
/// session, so closing and reopening the modal cannot start a second save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    pub case_id: CaseId,
    pub token: u64,
}

/// All page state.
#[derive(Debug, Default)]
pub struct Model {
    pub config: ApiConfig,
    pub collection: CaseCollection,
    pub load: LoadState,
    pub session: Option<EditSession>,
    pub viewport: ViewportState,
    pub notice: Option<Notice>,

    /// Bumped on every mount; responses tagged with an older value are stale.
    pub generation: u64,
    pub mounted: bool,

    pub pending_save: Option<PendingSave>,
    next_save_token: u64,
}

impl Model {
    /// Resets per-mount state and starts a new generation.
    pub fn mount(&mut self, viewport: ViewportState) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.mounted = true;
        self.collection.clear();
        self.load = LoadState::Idle;
        self.session = None;
        self.pending_save = None;
        self.notice = None;
        self.viewport = viewport;
        self.generation
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.session = None;
        self.pending_save = None;
    }

    /// Marks a save for `case_id` as in flight and returns its token.
    pub fn begin_save(&mut self, case_id: CaseId) -> u64 {
        self.next_save_token = self.next_save_token.wrapping_add(1);
        let token = self.next_save_token;
        self.pending_save = Some(PendingSave { case_id, token });
        token
    }

    /// Clears the in-flight marker if `token` is the one it holds.
    pub fn finish_save(&mut self, token: u64) -> Option<PendingSave> {
        if self.pending_save.as_ref().is_some_and(|p| p.token == token) {
            self.pending_save.take()
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.pending_save.is_some()
    }

    /// True when a response issued under `generation` may still touch the
    /// model.
    #[must_use]
    pub fn is_live(&self, generation: u64) -> bool {
        self.mounted && generation == self.generation
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
