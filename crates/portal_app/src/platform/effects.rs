use std::sync::Arc;
use std::time::Duration;

use portal_core::{Editable, Effect, Msg, Notification};
use portal_engine::{EngineEvent, EngineHandle, Resource, Transport};
use portal_logging::{portal_debug, portal_info, portal_warn};

/// Turns screen effects into engine requests and engine events back into
/// screen messages.
pub struct EffectRunner<R: Resource> {
    engine: EngineHandle<R>,
    /// Scope of the latest collection request; older results are dropped.
    scope_id: Option<String>,
    in_flight: usize,
}

impl<R: Resource> EffectRunner<R> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            engine: EngineHandle::new(transport),
            scope_id: None,
            in_flight: 0,
        }
    }

    /// Sends IO effects to the engine and hands notifications back to the
    /// caller for display.
    pub fn enqueue(&mut self, effects: Vec<Effect<R::Item>>) -> Vec<Notification> {
        let mut notifications = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchCollection { scope_id } => {
                    portal_info!("FetchCollection {} scope={}", R::NAME, scope_id);
                    self.scope_id = Some(scope_id.clone());
                    self.engine.fetch(scope_id);
                    self.in_flight += 1;
                }
                Effect::RefetchCollection { scope_id } => {
                    portal_info!("RefetchCollection {} scope={}", R::NAME, scope_id);
                    self.scope_id = Some(scope_id.clone());
                    self.engine.refetch(scope_id);
                    self.in_flight += 1;
                }
                Effect::RunMutation(command) => {
                    portal_info!("RunMutation {} kind={}", R::NAME, command.kind());
                    self.engine.mutate(command);
                    self.in_flight += 1;
                }
                Effect::Notify(notification) => notifications.push(notification),
            }
        }
        notifications
    }

    /// No engine request is waiting for a result.
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    /// Waits up to `timeout` for the next engine result.
    pub fn next_msg(&mut self, timeout: Duration) -> Option<Msg<R::Item>> {
        let event = self.engine.recv_timeout(timeout)?;
        // A header precedes its collection; only the collection ends the request.
        if !matches!(event, EngineEvent::HeaderLoaded { .. }) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        Some(map_event(event, self.scope_id.as_deref()))
    }
}

fn map_event<T: Editable>(event: EngineEvent<T>, current_scope: Option<&str>) -> Msg<T> {
    match event {
        EngineEvent::HeaderLoaded { scope_id, header } => {
            if current_scope != Some(scope_id.as_str()) {
                portal_debug!("Dropping stale header for scope={}", scope_id);
                return Msg::NoOp;
            }
            Msg::HeaderLoaded(header)
        }
        EngineEvent::CollectionLoaded { scope_id, result } => {
            if current_scope != Some(scope_id.as_str()) {
                portal_debug!("Dropping stale collection for scope={}", scope_id);
                return Msg::NoOp;
            }
            match result {
                Ok(items) => Msg::CollectionLoaded(items),
                Err(err) => Msg::CollectionFailed(err.message),
            }
        }
        EngineEvent::MutationCompleted { kind, result } => match result {
            Ok(_) => Msg::MutationSucceeded(kind),
            Err(err) => {
                portal_warn!("Mutation {} failed: {} ({})", kind, err, err.kind);
                Msg::MutationFailed {
                    kind,
                    message: err.message,
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use portal_core::{Category, ScopeHeader};

    use super::*;

    #[test]
    fn results_for_a_replaced_scope_become_noop() {
        let loaded: EngineEvent<Category> = EngineEvent::CollectionLoaded {
            scope_id: "org-1".to_string(),
            result: Ok(Vec::new()),
        };
        assert_eq!(map_event(loaded, Some("org-2")), Msg::NoOp);

        let header: EngineEvent<Category> = EngineEvent::HeaderLoaded {
            scope_id: "org-1".to_string(),
            header: ScopeHeader::default(),
        };
        assert_eq!(map_event(header, Some("org-2")), Msg::NoOp);
    }

    #[test]
    fn results_for_the_current_scope_pass_through() {
        let loaded: EngineEvent<Category> = EngineEvent::CollectionLoaded {
            scope_id: "org-1".to_string(),
            result: Ok(Vec::new()),
        };
        assert_eq!(map_event(loaded, Some("org-1")), Msg::CollectionLoaded(Vec::new()));
    }
}
