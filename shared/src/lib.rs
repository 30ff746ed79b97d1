// lib.rs - Case Database page core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod capabilities;
pub mod case;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod model;
pub mod notice;
pub mod view;
pub mod viewport;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use case::{Case, CaseCollection, CaseId, CaseStatus, Tags};
pub use config::{ApiConfig, ConfigError, DEFAULT_API_BASE_URL};
pub use crux_core::{render::Render, App as CruxApp};
pub use editor::{CaseDraft, CaseUpdate, EditMode, EditSession, EditableField};
pub use error::{AppError, AppResult, ErrorKind, SaveRejected};
pub use event::Event;
pub use model::{LoadState, Model, PendingSave};
pub use notice::{Notice, NoticeKind};
pub use view::ViewModel;
pub use viewport::{NavigationLayout, ViewportMetrics, ViewportState};
