use crossbeam_channel::{Receiver, Sender, unbounded};
use digraph_core::{DiagramItem, LinkId, NodeIndex};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Notifications from the editor core to whatever presents the diagram.
///
/// Every node/link event means "redraw this item"; document events drive
/// the window title and error reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // Graph
    NodeAdded {
        index: NodeIndex,
    },
    /// Text or colors changed.
    NodeChanged {
        index: NodeIndex,
    },
    NodeMoved {
        index: NodeIndex,
        x: f64,
        y: f64,
    },
    NodeRestacked {
        index: NodeIndex,
        z: i32,
    },
    NodeRemoved {
        index: NodeIndex,
    },
    LinkAdded {
        id: LinkId,
        from: NodeIndex,
        to: NodeIndex,
    },
    LinkChanged {
        id: LinkId,
    },
    LinkRemoved {
        id: LinkId,
    },
    DiagramCleared,

    // Selection
    SelectionChanged {
        items: Vec<DiagramItem>,
    },

    // Document
    DocumentOpened {
        path: PathBuf,
        skipped_entries: usize,
    },
    DocumentOpenFailed {
        path: PathBuf,
        error: String,
    },
    DocumentSaved {
        path: PathBuf,
    },
    DocumentSaveFailed {
        path: PathBuf,
        error: String,
    },
    /// The modified flag flipped.
    DocumentModified {
        modified: bool,
    },
    TitleChanged {
        title: String,
    },

    // Clipboard
    ClipboardChanged,
}

#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        let _ = self.tx.send(event);
    }

    /// Everything published so far, in order.
    pub fn drain(&self) -> Vec<Event> {
        self.rx.try_iter().collect()
    }

    /// Hands every queued event to `listener`; call once per UI frame.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) {
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
        }
    }
}

/// A view that redraws in response to editor events.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RedrawCounter {
        nodes: usize,
        links: usize,
    }

    impl EventListener for RedrawCounter {
        fn handle_event(&mut self, event: &Event) {
            match event {
                Event::NodeAdded { .. } | Event::NodeChanged { .. } | Event::NodeMoved { .. } => {
                    self.nodes += 1
                }
                Event::LinkAdded { .. } | Event::LinkChanged { .. } => self.links += 1,
                _ => {}
            }
        }
    }

    #[test]
    fn test_event_bus_publish_receive() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let receiver = bus.receiver();

        sender
            .send(Event::NodeAdded {
                index: NodeIndex(3),
            })
            .unwrap();

        match receiver.recv().unwrap() {
            Event::NodeAdded { index } => assert_eq!(index, NodeIndex(3)),
            other => panic!("Expected NodeAdded event, got {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_to_listener_drains_queue() {
        let bus = EventBus::new();
        bus.publish(Event::NodeAdded {
            index: NodeIndex(1),
        });
        bus.publish(Event::NodeMoved {
            index: NodeIndex(1),
            x: 4.0,
            y: 2.0,
        });
        bus.publish(Event::LinkAdded {
            id: LinkId(1),
            from: NodeIndex(1),
            to: NodeIndex(2),
        });
        bus.publish(Event::DiagramCleared);

        let mut counter = RedrawCounter::default();
        bus.dispatch_to(&mut counter);

        assert_eq!(counter.nodes, 2);
        assert_eq!(counter.links, 1);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_drain_preserves_order() {
        let bus = EventBus::new();
        bus.publish(Event::DocumentModified { modified: true });
        bus.publish(Event::TitleChanged {
            title: "Diagram - Untitled*".to_string(),
        });

        assert_eq!(
            bus.drain(),
            vec![
                Event::DocumentModified { modified: true },
                Event::TitleChanged {
                    title: "Diagram - Untitled*".to_string()
                },
            ]
        );
    }
}
