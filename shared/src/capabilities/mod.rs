mod viewport;

pub use self::viewport::{ScrollBehavior, Viewport, ViewportOperation};

// Crux's built-in Render capability covers view updates as-is.
pub use crux_core::render::{Render, RenderOperation};
pub use crux_http::protocol::{HttpRequest, HttpResponse};
pub use crux_http::Http;

use crux_core::bridge::ResolveSerialized;
use crux_core::capability::{Capability, ProtoContext};
use crux_core::{Request, WithContext};
use serde::Serialize;

use crate::app::App;
use crate::event::Event;

pub type HttpOperation = <Http<Event> as Capability<Event>>::Operation;

pub struct Capabilities {
    pub http: Http<Event>,
    pub viewport: Viewport<Event>,
    pub render: Render<Event>,
}

// The effect enum and its FFI twin are spelled out by hand; the derive in
// crux_macros 0.3.10 targets a newer `WithContext` signature.
#[derive(Debug)]
pub enum Effect {
    Http(Request<HttpOperation>),
    Viewport(Request<ViewportOperation>),
    Render(Request<RenderOperation>),
}

#[derive(Serialize)]
#[serde(rename = "Effect")]
pub enum EffectFfi {
    Http(HttpOperation),
    Viewport(ViewportOperation),
    Render(RenderOperation),
}

impl crux_core::Effect for Effect {
    type Ffi = EffectFfi;

    fn serialize(self) -> (Self::Ffi, ResolveSerialized) {
        match self {
            Effect::Http(request) => request.serialize(EffectFfi::Http),
            Effect::Viewport(request) => request.serialize(EffectFfi::Viewport),
            Effect::Render(request) => request.serialize(EffectFfi::Render),
        }
    }
}

impl WithContext<App, Effect> for Capabilities {
    fn new_with_context(context: ProtoContext<Effect, Event>) -> Capabilities {
        Capabilities {
            http: Http::new(context.specialize(Effect::Http)),
            viewport: Viewport::new(context.specialize(Effect::Viewport)),
            render: Render::new(context.specialize(Effect::Render)),
        }
    }
}

impl Effect {
    pub fn is_http(&self) -> bool {
        matches!(self, Effect::Http(_))
    }

    pub fn is_render(&self) -> bool {
        matches!(self, Effect::Render(_))
    }

    pub fn into_http(self) -> Option<Request<HttpOperation>> {
        match self {
            Effect::Http(request) => Some(request),
            _ => None,
        }
    }

    pub fn as_viewport(&self) -> Option<&ViewportOperation> {
        match self {
            Effect::Viewport(request) => Some(&request.operation),
            _ => None,
        }
    }
}
