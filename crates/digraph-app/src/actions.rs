use digraph_graph::Selection;

/// Which edit commands make sense for the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    pub add_link: bool,
    pub delete: bool,
    pub cut: bool,
    pub copy: bool,
    pub bring_to_front: bool,
    pub send_to_back: bool,
    pub properties: bool,
}

impl ActionState {
    pub fn for_selection(selection: &Selection) -> Self {
        let single_node = selection.selected_node().is_some();
        let single_link = selection.selected_link().is_some();
        Self {
            add_link: selection.selected_node_pair().is_some(),
            delete: !selection.is_empty(),
            cut: single_node,
            copy: single_node,
            bring_to_front: single_node,
            send_to_back: single_node,
            properties: single_node || single_link,
        }
    }
}
