use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{channel::Notification, registry::ButtonRegistry};

/// Routes shell notifications to the handlers of the installed buttons.
#[derive(Clone)]
pub struct EventDispatcher {
    registry: Arc<ButtonRegistry>,
}

impl EventDispatcher {
    pub fn new(registry: Arc<ButtonRegistry>) -> Self {
        EventDispatcher { registry }
    }

    /// Handles one notification against the buttons installed right now.
    /// Returns whether a handler ran; an index with no button is dropped.
    pub fn dispatch(&self, notification: Notification) -> bool {
        match notification {
            Notification::ButtonClicked { index } => match self.registry.get(index) {
                Some(button) => {
                    debug!("Button {index} clicked: {button:?}");
                    button.click();
                    true
                }
                None => {
                    debug!("Dropping click for stale button index {index}");
                    false
                }
            },
        }
    }

    /// Dispatches notifications until the sender side is dropped.
    pub async fn run(self, mut notifications: UnboundedReceiver<Notification>) {
        while let Some(notification) = notifications.recv().await {
            self.dispatch(notification);
        }
        info!("Notification channel closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::tests::{counting_button, fixture_icons};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc::unbounded_channel;

    fn counters(n: usize) -> Vec<Arc<AtomicUsize>> {
        (0..n).map(|_| Arc::new(AtomicUsize::new(0))).collect()
    }

    fn counts(counters: &[Arc<AtomicUsize>]) -> Vec<usize> {
        counters.iter().map(|c| c.load(Ordering::SeqCst)).collect()
    }

    #[test]
    fn click_runs_exactly_the_matching_handler() {
        let (_dir, resolver) = fixture_icons();
        let counters = counters(3);
        let registry = Arc::new(ButtonRegistry::new());
        registry
            .replace(
                ["a", "b", "c"]
                    .iter()
                    .zip(&counters)
                    .map(|(name, counter)| counting_button(&resolver, name, counter))
                    .collect(),
            )
            .unwrap();
        let dispatcher = EventDispatcher::new(Arc::clone(&registry));

        assert!(dispatcher.dispatch(Notification::ButtonClicked { index: 1 }));
        assert_eq!(counts(&counters), [0, 1, 0]);
    }

    #[test]
    fn stale_index_is_dropped_after_replace() {
        let (_dir, resolver) = fixture_icons();
        let old = counters(3);
        let new = counters(1);
        let registry = Arc::new(ButtonRegistry::new());
        let dispatcher = EventDispatcher::new(Arc::clone(&registry));
        registry
            .replace(
                ["a", "b", "c"]
                    .iter()
                    .zip(&old)
                    .map(|(name, counter)| counting_button(&resolver, name, counter))
                    .collect(),
            )
            .unwrap();
        registry
            .replace(vec![counting_button(&resolver, "x", &new[0])])
            .unwrap();

        assert!(!dispatcher.dispatch(Notification::ButtonClicked { index: 2 }));
        assert_eq!(counts(&old), [0, 0, 0]);
        assert_eq!(counts(&new), [0]);

        // Index 0 now belongs to the new generation.
        assert!(dispatcher.dispatch(Notification::ButtonClicked { index: 0 }));
        assert_eq!(counts(&old), [0, 0, 0]);
        assert_eq!(counts(&new), [1]);
    }

    #[test]
    fn click_on_empty_registry_is_ignored() {
        let dispatcher = EventDispatcher::new(Arc::new(ButtonRegistry::new()));
        assert!(!dispatcher.dispatch(Notification::ButtonClicked { index: 0 }));
    }

    #[tokio::test]
    async fn run_drains_until_sender_closes() {
        let (_dir, resolver) = fixture_icons();
        let counters = counters(2);
        let registry = Arc::new(ButtonRegistry::new());
        registry
            .replace(vec![
                counting_button(&resolver, "a", &counters[0]),
                counting_button(&resolver, "b", &counters[1]),
            ])
            .unwrap();
        let (tx, rx) = unbounded_channel();
        for index in [0, 1, 1, 6] {
            tx.send(Notification::ButtonClicked { index }).unwrap();
        }
        drop(tx);

        EventDispatcher::new(registry).run(rx).await;
        assert_eq!(counts(&counters), [1, 2]);
    }

    #[test]
    fn handler_may_reenter_registry() {
        let (_dir, resolver) = fixture_icons();
        let registry = Arc::new(ButtonRegistry::new());
        let seen = Arc::new(AtomicUsize::new(usize::MAX));
        let icon = resolver.resolve("a.ico").unwrap();
        let inner = Arc::clone(&registry);
        let observed = Arc::clone(&seen);
        registry
            .replace(vec![crate::button::ThumbnailButton::new(icon, "a", move || {
                observed.store(inner.len(), Ordering::SeqCst);
            })])
            .unwrap();

        EventDispatcher::new(registry).dispatch(Notification::ButtonClicked { index: 0 });
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
