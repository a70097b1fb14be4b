//! Data model shared between services and extensions.

pub mod element;
pub mod layout;
pub mod search_result;
pub mod tab;
pub mod tree_node;

pub use element::{render_fn, Element, Render};
pub use layout::{LayoutState, Position, RegionLayout, SideBarLayout};
pub use search_result::{SearchResult, ValidateInfo, ValidateKind};
pub use tab::{language_for_extension, EditorTab, TabData};
pub use tree_node::{FileType, TreeNode};
