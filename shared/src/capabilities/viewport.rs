use serde::{Deserialize, Serialize};

use crux_core::capability::{Capability, CapabilityContext, Operation};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// Window-level requests. None of these produce an output; the shell reports
/// resulting window changes back as `Resized`/`Scrolled` events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ViewportOperation {
    /// Start forwarding resize and scroll events.
    Subscribe,
    /// Stop forwarding resize and scroll events.
    Unsubscribe,
    ScrollTo { top: f64, behavior: ScrollBehavior },
}

impl Operation for ViewportOperation {
    type Output = ();
}

pub struct Viewport<Ev> {
    context: CapabilityContext<ViewportOperation, Ev>,
}

impl<Ev> Capability<Ev> for Viewport<Ev> {
    type Operation = ViewportOperation;
    type MappedSelf<MappedEv> = Viewport<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        Viewport::new(self.context.map_event(f))
    }
}

impl<Ev> Viewport<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<ViewportOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn subscribe(&self) {
        self.notify(ViewportOperation::Subscribe);
    }

    pub fn unsubscribe(&self) {
        self.notify(ViewportOperation::Unsubscribe);
    }

    pub fn scroll_to_top(&self) {
        self.notify(ViewportOperation::ScrollTo {
            top: 0.0,
            behavior: ScrollBehavior::Smooth,
        });
    }

    fn notify(&self, operation: ViewportOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }
}
