//! Outbound channel: host -> renderer triggers.

use tracing::{debug, warn};

use crate::codec::{self, Payload};
use crate::ipc::js_function_call;
use crate::registry::TriggerableEvent;
use crate::renderer::RendererContext;

/// Runs triggers as renderer function calls.
///
/// Fire-and-forget: nothing is awaited and delivery is not guaranteed. A
/// trigger sent while no document is loaded is dropped, which is expected
/// for UI actions issued before the first load completes.
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageEventSender;

impl MessageEventSender {
    pub fn new() -> Self {
        Self
    }

    /// Call `event`'s renderer function with no argument.
    pub fn trigger(&self, renderer: &dyn RendererContext, event: TriggerableEvent) {
        self.send(renderer, event, None);
    }

    /// Serialize `payload` and pass the text as the function's argument.
    pub fn trigger_with<T: Payload>(
        &self,
        renderer: &dyn RendererContext,
        event: TriggerableEvent,
        payload: &T,
    ) {
        let text = codec::serialize(payload);
        self.send(renderer, event, Some(&text));
    }

    fn send(&self, renderer: &dyn RendererContext, event: TriggerableEvent, arg: Option<&str>) {
        let name = event.wire_name();
        if !renderer.is_ready() {
            debug!(event = name, "renderer not ready, trigger dropped");
            return;
        }

        debug!(event = name, payload = arg.unwrap_or(""), "trigger");
        if let Err(e) = renderer.execute_script(&js_function_call(name, arg)) {
            warn!(event = name, error = %e, "trigger dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{PageChange, Search};
    use crate::renderer::ScriptRecorder;

    #[test]
    fn trigger_without_payload() {
        let renderer = ScriptRecorder::ready();
        MessageEventSender::new().trigger(&renderer, TriggerableEvent::RotateClockwise);
        assert_eq!(
            renderer.function_calls(),
            vec![("rotateClockwise".to_string(), None)]
        );
    }

    #[test]
    fn trigger_with_payload_passes_serialized_text() {
        let renderer = ScriptRecorder::ready();
        MessageEventSender::new().trigger_with(
            &renderer,
            TriggerableEvent::SetPage,
            &PageChange { page_number: 5 },
        );
        assert_eq!(
            renderer.function_calls(),
            vec![(
                "setPage".to_string(),
                Some(r#"{"pageNumber":5}"#.to_string())
            )]
        );
    }

    #[test]
    fn trigger_before_load_is_dropped() {
        let mut renderer = ScriptRecorder::new();
        let sender = MessageEventSender::new();
        sender.trigger(&renderer, TriggerableEvent::GotoNextPage);
        sender.trigger_with(
            &renderer,
            TriggerableEvent::FindNext,
            &Search {
                search_target: "lemma".into(),
            },
        );
        assert!(renderer.scripts().is_empty());

        // Nothing queued up for later either
        renderer.set_ready(true);
        assert!(renderer.scripts().is_empty());
    }

    #[test]
    fn triggers_keep_call_order() {
        let renderer = ScriptRecorder::ready();
        let sender = MessageEventSender::new();
        sender.trigger(&renderer, TriggerableEvent::SpreadOddPages);
        sender.trigger(&renderer, TriggerableEvent::IncreaseScale);
        let names: Vec<_> = renderer
            .function_calls()
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["spreadOddPages", "increaseScale"]);
    }
}
