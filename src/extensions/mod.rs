//! Built-in extensions.

mod search;
mod test_pane;

pub use search::{SearchExtension, SEARCH_ACTIVITY_ID, SEARCH_EXTENSION_ID, SEARCH_PANE_ID};
pub use test_pane::{
    search_results, tab_for_node, tab_for_picked_file, TestPaneExtension, SEARCH_WARNING,
    TEST_PANE_EXTENSION_ID, TEST_PANE_ID,
};
