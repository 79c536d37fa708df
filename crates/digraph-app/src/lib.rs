use digraph_core::{Color, DiagramItem, LinkId, NodeIndex, Point};
use digraph_events::{Event, EventBus};
use digraph_graph::{DeletionSummary, GraphStore, Node, NodeColors, Placement, Selection};
use digraph_storage::{LoadReport, load_file_into, save_file};
use std::path::{Path, PathBuf};

pub mod actions;
pub mod clipboard;
pub mod document;
pub mod error;
pub mod settings;

pub use actions::ActionState;
pub use clipboard::{Clipboard, MemoryClipboard, NodeClip};
pub use document::DocumentState;
pub use error::AppError;
pub use settings::EditorSettings;

/// What the properties dialog edits on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeProperties {
    pub text: String,
    pub colors: NodeColors,
}

impl NodeProperties {
    pub fn from_node(node: &Node) -> Self {
        Self {
            text: node.text().to_string(),
            colors: node.colors(),
        }
    }
}

/// GUI-agnostic editing session for one diagram.
///
/// A presentation layer forwards user commands here and redraws from the
/// events published on [`DiagramController::events`]. Everything runs on the
/// caller's thread.
pub struct DiagramController {
    store: GraphStore,
    selection: Selection,
    document: DocumentState,
    clipboard: Box<dyn Clipboard>,
    settings: EditorSettings,
    events: EventBus,
}

impl Default for DiagramController {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl DiagramController {
    pub fn new(settings: EditorSettings) -> Self {
        Self::with_clipboard(settings, Box::new(MemoryClipboard::default()))
    }

    pub fn with_clipboard(settings: EditorSettings, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            store: GraphStore::with_layout(settings.layout),
            selection: Selection::new(),
            document: DocumentState::default(),
            clipboard,
            settings,
            events: EventBus::new(),
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn document(&self) -> &DocumentState {
        &self.document
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn window_title(&self) -> String {
        self.document.window_title()
    }

    pub fn is_modified(&self) -> bool {
        self.document.is_modified()
    }

    /// The host should ask the user to save before `new_file`/`open`/quit.
    pub fn needs_save_prompt(&self) -> bool {
        self.document.needs_save_prompt()
    }

    pub fn action_state(&self) -> ActionState {
        ActionState::for_selection(&self.selection)
    }

    // ------------------------------------------------------------------
    // File commands
    // ------------------------------------------------------------------

    pub fn new_file(&mut self) {
        self.store.clear();
        self.set_selection(Vec::new());
        self.document.set_current_file(None);
        self.events.publish(Event::DiagramCleared);
        self.publish_title();
    }

    /// Replaces the diagram with the file's contents. On failure the current
    /// diagram is left untouched.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, AppError> {
        let path = path.as_ref();
        let loaded = match load_file_into(path, GraphStore::with_layout(self.settings.layout)) {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::warn!("Failed to open {:?}: {}", path, err);
                self.events.publish(Event::DocumentOpenFailed {
                    path: path.to_path_buf(),
                    error: err.to_string(),
                });
                return Err(err.into());
            }
        };

        self.store = loaded.store;
        self.set_selection(Vec::new());
        self.document.set_current_file(Some(path.to_path_buf()));

        self.events.publish(Event::DiagramCleared);
        for node in self.store.nodes() {
            self.events.publish(Event::NodeAdded {
                index: node.index(),
            });
        }
        for link in self.store.links() {
            self.events.publish(Event::LinkAdded {
                id: link.id(),
                from: link.from(),
                to: link.to(),
            });
        }
        self.events.publish(Event::DocumentOpened {
            path: path.to_path_buf(),
            skipped_entries: loaded.report.skipped.len(),
        });
        self.publish_title();
        Ok(loaded.report)
    }

    /// Saves to the current file.
    pub fn save(&mut self) -> Result<PathBuf, AppError> {
        let path = self
            .document
            .current_file()
            .map(Path::to_path_buf)
            .ok_or(AppError::NoDocumentPath)?;
        self.save_as(&path)?;
        Ok(path)
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<(), AppError> {
        let path = path.as_ref();
        if let Err(err) = save_file(path, &self.store, self.settings.output_style) {
            tracing::warn!("Failed to save {:?}: {}", path, err);
            self.events.publish(Event::DocumentSaveFailed {
                path: path.to_path_buf(),
                error: err.to_string(),
            });
            return Err(err.into());
        }

        self.document.set_current_file(Some(path.to_path_buf()));
        self.events.publish(Event::DocumentSaved {
            path: path.to_path_buf(),
        });
        self.publish_title();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Edit commands
    // ------------------------------------------------------------------

    /// New auto-placed node named after its index, selected on its own.
    pub fn add_node(&mut self) -> Result<NodeIndex, AppError> {
        let index = self.store.next_index();
        let node = Node::new(index).with_text(format!("Node {index}"));
        self.insert_node(node, Placement::Auto)
    }

    /// New node with the given text, at `position` or auto-placed.
    pub fn add_node_with(
        &mut self,
        text: impl Into<String>,
        position: Option<Point>,
    ) -> Result<NodeIndex, AppError> {
        let index = self.store.next_index();
        let node = Node::new(index).with_text(text);
        match position {
            Some(position) => self.insert_node(node.at(position), Placement::Explicit),
            None => self.insert_node(node, Placement::Auto),
        }
    }

    fn insert_node(&mut self, node: Node, placement: Placement) -> Result<NodeIndex, AppError> {
        let index = self.store.add_node(node, placement)?;
        self.events.publish(Event::NodeAdded { index });
        self.set_selection(vec![DiagramItem::Node(index)]);
        self.mark_modified();
        Ok(index)
    }

    /// Links the selected node pair, first to second. `None` without a pair.
    pub fn add_link(&mut self) -> Result<Option<LinkId>, AppError> {
        let Some((from, to)) = self.selection.selected_node_pair() else {
            return Ok(None);
        };
        self.link_nodes(from, to).map(Some)
    }

    pub fn link_nodes(&mut self, from: NodeIndex, to: NodeIndex) -> Result<LinkId, AppError> {
        let id = self.store.add_link(from, to)?;
        self.events.publish(Event::LinkAdded { id, from, to });
        self.mark_modified();
        Ok(id)
    }

    pub fn delete_selection(&mut self) -> DeletionSummary {
        let items = self.selection.items().to_vec();
        self.delete_items(&items)
    }

    /// Deletes the given items; nodes take their links with them.
    pub fn delete_items(&mut self, items: &[DiagramItem]) -> DeletionSummary {
        let summary = self.store.delete_items(items);
        if summary.is_empty() {
            return summary;
        }

        for id in &summary.links {
            self.events.publish(Event::LinkRemoved { id: *id });
        }
        for index in &summary.nodes {
            self.events.publish(Event::NodeRemoved { index: *index });
        }
        if self.selection.prune(&self.store) {
            self.publish_selection();
        }
        self.mark_modified();
        summary
    }

    pub fn move_node(&mut self, index: NodeIndex, position: Point) -> Result<(), AppError> {
        self.store.move_node(index, position)?;
        self.events.publish(Event::NodeMoved {
            index,
            x: position.x,
            y: position.y,
        });
        let incident: Vec<LinkId> = self.store.incident_links(index).map(|l| l.id()).collect();
        for id in incident {
            self.events.publish(Event::LinkChanged { id });
        }
        self.mark_modified();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Copies the single selected node. Returns `false` without one.
    pub fn copy(&mut self) -> bool {
        let Some(node) = self
            .selection
            .selected_node()
            .and_then(|index| self.store.node(index))
        else {
            return false;
        };
        let clip = NodeClip::from_node(node);
        self.clipboard.set_text(clip.to_string());
        self.events.publish(Event::ClipboardChanged);
        true
    }

    /// Copy, then delete the node and its links.
    pub fn cut(&mut self) -> bool {
        let Some(index) = self.selection.selected_node() else {
            return false;
        };
        if !self.copy() {
            return false;
        }
        self.delete_items(&[DiagramItem::Node(index)]);
        true
    }

    /// Creates a node from clipboard text in the node clip format.
    pub fn paste(&mut self) -> Result<Option<NodeIndex>, AppError> {
        let Some(clip) = self.clipboard.text().as_deref().and_then(NodeClip::parse) else {
            tracing::debug!("Clipboard holds no node, nothing to paste");
            return Ok(None);
        };

        let node = Node::new(self.store.next_index())
            .with_text(clip.text)
            .with_colors(clip.colors);
        self.insert_node(node, Placement::Auto).map(Some)
    }

    // ------------------------------------------------------------------
    // Z-order and properties
    // ------------------------------------------------------------------

    pub fn bring_to_front(&mut self) -> Result<Option<i32>, AppError> {
        let Some(index) = self.selection.selected_node() else {
            return Ok(None);
        };
        let z = self.store.bring_to_front(index)?;
        self.events.publish(Event::NodeRestacked { index, z });
        Ok(Some(z))
    }

    pub fn send_to_back(&mut self) -> Result<Option<i32>, AppError> {
        let Some(index) = self.selection.selected_node() else {
            return Ok(None);
        };
        let z = self.store.send_to_back(index)?;
        self.events.publish(Event::NodeRestacked { index, z });
        Ok(Some(z))
    }

    /// Applies edited text and colors to the single selected node.
    pub fn set_node_properties(&mut self, properties: NodeProperties) -> bool {
        let Some(index) = self.selection.selected_node() else {
            return false;
        };
        let Some(node) = self.store.node_mut(index) else {
            return false;
        };
        if NodeProperties::from_node(node) == properties {
            return true;
        }

        node.set_text(properties.text);
        node.set_colors(properties.colors);
        self.events.publish(Event::NodeChanged { index });
        self.mark_modified();
        true
    }

    pub fn set_link_color(&mut self, color: Color) -> bool {
        let Some(id) = self.selection.selected_link() else {
            return false;
        };
        let Some(link) = self.store.link_mut(id) else {
            return false;
        };
        if link.color() != color {
            link.set_color(color);
            self.events.publish(Event::LinkChanged { id });
            self.mark_modified();
        }
        true
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Replaces the selection; items the store doesn't hold are ignored.
    pub fn select(&mut self, items: impl IntoIterator<Item = DiagramItem>) {
        let items: Vec<DiagramItem> = items
            .into_iter()
            .filter(|item| self.store.contains(*item))
            .collect();
        self.set_selection(items);
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(Vec::new());
    }

    fn set_selection(&mut self, items: Vec<DiagramItem>) {
        let before = self.selection.clone();
        self.selection.set(items);
        if self.selection != before {
            self.publish_selection();
        }
    }

    fn publish_selection(&self) {
        self.events.publish(Event::SelectionChanged {
            items: self.selection.items().to_vec(),
        });
    }

    fn mark_modified(&mut self) {
        if self.document.set_modified(true) {
            self.events.publish(Event::DocumentModified { modified: true });
            self.publish_title();
        }
    }

    fn publish_title(&self) {
        self.events.publish(Event::TitleChanged {
            title: self.window_title(),
        });
    }
}
