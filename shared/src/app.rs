use crux_http::Response;
use tracing::{debug, error, info, warn};

use crate::capabilities::Capabilities;
use crate::case::{Case, CaseCollection, CaseId, CaseListResponse};
use crate::config::ApiConfig;
use crate::editor::{CaseDraft, EditMode, EditSession, EditableField};
use crate::error::{AppError, AppResult, ErrorKind, SaveRejected};
use crate::event::Event;
use crate::model::{LoadState, Model};
use crate::notice::{Notice, SAVE_SUCCESS_MESSAGE};
use crate::view::{
    CaseCard, CaseModal, FieldControl, FieldView, LoadStatus, NoticeView, StatusOption,
    StatusTone, UserFacingError, ViewModel, EMPTY_MESSAGE, PAGE_TITLE,
};
use crate::viewport::ViewportState;

#[derive(Default)]
pub struct App;

impl App {
    fn decode_case_list(
        result: crux_http::Result<Response<CaseListResponse>>,
    ) -> AppResult<Vec<Case>> {
        match result {
            Ok(mut response) if response.status().is_success() => Ok(response
                .take_body()
                .map(CaseListResponse::into_cases)
                .unwrap_or_default()),
            Ok(response) => Err(AppError::from_http_status(
                u16::from(response.status()),
                None,
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// The update body is read by hand so a backend `message` on a failed
    /// save reaches the notice.
    fn decode_updated_case(result: crux_http::Result<Response<Vec<u8>>>) -> AppResult<Case> {
        let mut response = result?;
        let status = response.status();
        let body = response.take_body().unwrap_or_default();

        if !status.is_success() {
            return Err(AppError::from_http_status(u16::from(status), Some(&body)));
        }
        serde_json::from_slice::<Case>(&body)
            .map_err(|e| AppError::new(ErrorKind::Deserialization, e.to_string()))
    }

    fn send_list_request(model: &mut Model, caps: &Capabilities) {
        let generation = model.generation;

        let url = match model.config.case_list_url() {
            Ok(url) => url,
            Err(e) => {
                let error = AppError::from(e);
                error!(%error, "could not build case list request");
                model.load = LoadState::Failed(error);
                return;
            }
        };

        info!(%url, generation, "loading cases");
        model.load = LoadState::Loading;
        caps.http
            .get(&url)
            .expect_json::<CaseListResponse>()
            .send(move |result| Event::CasesResponse {
                generation,
                result: Box::new(Self::decode_case_list(result)),
            });
    }

    fn handle_cases_response(outcome: AppResult<Vec<Case>>, model: &mut Model) {
        match outcome {
            Ok(cases) => {
                info!(count = cases.len(), "cases loaded");
                model.collection = CaseCollection::from_cases(cases);
                model.load = LoadState::Loaded;
            }
            Err(error) => {
                // The page shows its empty state; the failure is kept in
                // `load` for shells that want to say more.
                error!(%error, "error fetching cases");
                model.collection.clear();
                model.load = LoadState::Failed(error);
            }
        }
    }

    fn open_session(model: &mut Model, case_id: &CaseId, mode: EditMode) {
        if let Some(pending) = &model.pending_save {
            debug!(%case_id, saving = %pending.case_id, "open refused while saving");
            model.show_notice(Notice::warning(SaveRejected::SaveInFlight.to_string()));
            return;
        }

        let Some(case) = model.collection.get(case_id) else {
            warn!(%case_id, "cannot open unknown case");
            return;
        };

        debug!(%case_id, ?mode, "opening case");
        model.session = Some(EditSession::open(case, mode));
    }

    fn request_save(model: &mut Model, caps: &Capabilities) {
        let Some(session) = model.session.as_mut() else {
            debug!("save requested with no open case");
            return;
        };

        if !session.saving {
            if let Some(pending) = &model.pending_save {
                info!(saving = %pending.case_id, "save rejected, another is in flight");
                model.show_notice(Notice::warning(SaveRejected::SaveInFlight.to_string()));
                return;
            }
        }

        let update = match session.prepare_save() {
            Ok(update) => update,
            Err(rejected) => {
                let notice = match rejected {
                    SaveRejected::MissingRequiredFields => Notice::warning(rejected.to_string()),
                    SaveRejected::NoChanges => Notice::info(rejected.to_string()),
                    SaveRejected::NotEditing | SaveRejected::SaveInFlight => {
                        debug!(reason = %rejected, "save ignored");
                        return;
                    }
                };
                info!(reason = %rejected, "save rejected");
                model.show_notice(notice);
                return;
            }
        };

        let case_id = session.case_id.clone();
        let generation = model.generation;

        let request = model
            .config
            .case_update_url(&case_id)
            .map_err(AppError::from)
            .and_then(|url| {
                caps.http
                    .post(&url)
                    .body_json(&update)
                    .map_err(AppError::from)
            });
        let request = match request {
            Ok(request) => request,
            Err(error) => {
                error!(%error, %case_id, "could not build update request");
                model.show_notice(Notice::save_failed(None));
                return;
            }
        };

        session.saving = true;
        let token = model.begin_save(case_id.clone());
        info!(%case_id, token, fields = ?update.changed_fields(), "saving case");

        request.send(move |result| Event::SaveResponse {
            generation,
            token,
            case_id,
            result: Box::new(Self::decode_updated_case(result)),
        });
    }

    fn handle_save_response(token: u64, outcome: AppResult<Case>, model: &mut Model) {
        let Some(pending) = model.finish_save(token) else {
            debug!(token, "dropping save response with no matching request");
            return;
        };
        let case_id = pending.case_id;
        let owns_session = model
            .session
            .as_ref()
            .is_some_and(|s| s.saving && s.case_id == case_id);

        match outcome {
            Ok(updated) => {
                let updated_id = updated.id.clone();
                if !model.collection.replace(updated) {
                    warn!(case_id = %updated_id, "updated case is not in the collection");
                }
                if owns_session {
                    model.session = None;
                }
                info!(case_id = %updated_id, "case updated");
                model.show_notice(Notice::success(SAVE_SUCCESS_MESSAGE));
            }
            Err(error) => {
                error!(%error, %case_id, "error updating case");
                // Keep the modal and draft so the user can retry.
                if owns_session {
                    if let Some(session) = model.session.as_mut() {
                        session.saving = false;
                    }
                }
                model.show_notice(Notice::save_failed(error.server_message.as_deref()));
            }
        }
    }

    fn build_card(case: &Case) -> CaseCard {
        CaseCard {
            id: case.id.to_string(),
            heading: case.case_heading.clone().unwrap_or_default(),
            status: case
                .status
                .as_ref()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            status_tone: StatusTone::for_status(case.status.as_ref()),
            query: case.query.clone().unwrap_or_default(),
            tags: case.tags.as_ref().map(|t| t.display()).unwrap_or_default(),
        }
    }

    fn build_modal(session: &EditSession) -> CaseModal {
        let editing = session.is_editing();
        let original = CaseDraft::from_case(&session.original);
        // Viewing shows the case as opened; editing shows the draft.
        let shown = if editing { &session.draft } else { &original };

        let fields = EditableField::ALL
            .into_iter()
            .map(|field| FieldView {
                field,
                label: field.label().to_string(),
                value: shown.get(field).unwrap_or_default().to_string(),
                control: FieldControl::for_field(field),
                editable: editing && !session.saving,
                required: field.is_required(),
            })
            .collect();

        CaseModal {
            case_id: session.case_id.to_string(),
            editing,
            saving: session.saving,
            fields,
            tags: session
                .original
                .tags
                .as_ref()
                .map(|t| t.display())
                .unwrap_or_default(),
            status_options: StatusOption::all(),
            can_save: editing && !session.saving,
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(
            event = event.name(),
            user_action = event.is_user_initiated(),
            "update"
        );

        match event {
            Event::Noop => {}

            Event::Mounted { viewport } => {
                if model.mounted {
                    // remount without an unmount in between
                    caps.viewport.unsubscribe();
                }
                let generation = model.mount(ViewportState::new(viewport));
                debug!(generation, "page mounted");
                caps.viewport.subscribe();
                Self::send_list_request(model, caps);
                caps.render.render();
            }

            Event::Unmounted => {
                if !model.mounted {
                    return;
                }
                model.unmount();
                caps.viewport.unsubscribe();
                debug!(generation = model.generation, "page unmounted");
            }

            Event::ConfigureApi { base_url } => {
                match ApiConfig::new(base_url) {
                    Ok(config) => {
                        info!(base_url = config.base_url().as_str(), "api configured");
                        model.config = config;
                    }
                    Err(e) => {
                        let error = AppError::from(e);
                        warn!(%error, "rejected api configuration");
                        model.show_notice(Notice::error(error.user_facing_message()));
                    }
                }
                caps.render.render();
            }

            Event::Resized { width } => {
                if model.mounted && model.viewport.resize(width) {
                    caps.render.render();
                }
            }

            Event::Scrolled { offset_y } => {
                if model.mounted && model.viewport.scroll(offset_y) {
                    caps.render.render();
                }
            }

            Event::ScrollToTopRequested => {
                if model.mounted {
                    caps.viewport.scroll_to_top();
                }
            }

            Event::ShowDetails { case_id } => {
                Self::open_session(model, &case_id, EditMode::Viewing);
                caps.render.render();
            }

            Event::EditCase { case_id } => {
                Self::open_session(model, &case_id, EditMode::Editing);
                caps.render.render();
            }

            Event::ToggleEditMode => {
                if let Some(session) = model.session.as_mut().filter(|s| !s.saving) {
                    session.toggle_mode();
                    caps.render.render();
                }
            }

            Event::CloseSession => {
                if model.session.take().is_some() {
                    caps.render.render();
                }
            }

            Event::FieldChanged { field, value } => {
                let accepted = model
                    .session
                    .as_mut()
                    .is_some_and(|s| s.update_field(field, value));
                if accepted {
                    caps.render.render();
                } else {
                    debug!(field = field.name(), "field change ignored");
                }
            }

            Event::SaveRequested => {
                Self::request_save(model, caps);
                caps.render.render();
            }

            Event::DismissNotice => {
                model.clear_notice();
                caps.render.render();
            }

            Event::CasesResponse { generation, result } => {
                if !model.is_live(generation) {
                    debug!(generation, "dropping stale case list response");
                    return;
                }
                Self::handle_cases_response(*result, model);
                caps.render.render();
            }

            Event::SaveResponse {
                generation,
                token,
                case_id,
                result,
            } => {
                if !model.is_live(generation) {
                    debug!(generation, %case_id, "dropping stale save response");
                    return;
                }
                Self::handle_save_response(token, *result, model);
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        let load_status = match model.load {
            LoadState::Idle => LoadStatus::Idle,
            LoadState::Loading => LoadStatus::Loading,
            LoadState::Loaded => LoadStatus::Loaded,
            LoadState::Failed(_) => LoadStatus::Failed,
        };

        ViewModel {
            title: PAGE_TITLE.to_string(),
            navigation: model.viewport.navigation,
            show_scroll_to_top: model.viewport.show_scroll_to_top,
            load_status,
            empty_message: model
                .collection
                .is_empty()
                .then(|| EMPTY_MESSAGE.to_string()),
            cards: model.collection.iter().map(Self::build_card).collect(),
            modal: model.session.as_ref().map(Self::build_modal),
            notice: model.notice.as_ref().map(NoticeView::from),
            error: model.load.error().map(UserFacingError::from),
        }
    }
}
