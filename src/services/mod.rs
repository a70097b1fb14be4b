//! Host services.
//!
//! Each service owns its state behind interior mutability and exposes its events
//! as subscription methods. Reads hand out snapshots; no borrow outlives a call.

pub mod activity_bar;
pub mod adapters;
pub mod collection;
pub mod editor;
pub mod error;
pub mod folder_tree;
pub mod layout;
pub mod menu_bar;
pub mod ports;
pub mod search;
pub mod settings;
pub mod sidebar;

pub use activity_bar::{ActivityBarItem, ActivityBarItemPatch, ActivityBarSelect, ActivityBarService};
pub use collection::{SelectionState, SelectionStatePatch};
pub use editor::{EditorService, EditorState};
pub use error::{SettingsError, StateError};
pub use folder_tree::{CreateRequest, FolderTreeService, FolderTreeState};
pub use layout::LayoutService;
pub use menu_bar::{
    default_menus, MenuBarService, MenuItem, MenuItemPatch, ICON_CHECK, MENU_FILE, MENU_FILE_OPEN,
    MENU_VIEW, MENU_VIEW_ACTIVITYBAR, MENU_VIEW_MENUBAR, MENU_VIEW_STATUSBAR,
};
pub use search::{SearchService, SearchState};
pub use settings::SettingsService;
pub use sidebar::{SidebarPane, SidebarPanePatch, SidebarService};
