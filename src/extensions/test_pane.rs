//! The demo extension: a test pane, the editor entry view and handlers that tie
//! settings, menus, the folder tree and search together.

use serde_json::Value;
use std::rc::Rc;
use uuid::Uuid;

use crate::core::HandlerResult;
use crate::extension::{Extension, ExtensionContext, ExtensionError, Services};
use crate::models::{
    language_for_extension, render_fn, Element, EditorTab, FileType, Position, SearchResult,
    TabData, TreeNode, ValidateInfo, ValidateKind,
};
use crate::services::ports::FilePicker;
use crate::services::{
    ActivityBarItem, CreateRequest, EditorService, MenuBarService, MenuItemPatch, SidebarPane,
    ICON_CHECK, MENU_FILE_OPEN, MENU_VIEW_ACTIVITYBAR, MENU_VIEW_MENUBAR, MENU_VIEW_STATUSBAR,
};

pub const TEST_PANE_EXTENSION_ID: &str = "testPane";
pub const TEST_PANE_ID: &str = "ActivityBarTestPane";

pub const SEARCH_WARNING: &str =
    "The result set only contains a subset of all matches, narrow your search";

const RESULTS_PER_QUERY: usize = 5;
const FILE_ICON: &str = "file-code";
const ROOT_NAME: &str = "molecule";

pub struct TestPaneExtension {
    picker: Rc<dyn FilePicker>,
}

impl TestPaneExtension {
    pub fn new(picker: Rc<dyn FilePicker>) -> Self {
        Self { picker }
    }
}

impl Extension for TestPaneExtension {
    fn id(&self) -> &str {
        TEST_PANE_EXTENSION_ID
    }

    fn activate(&self, ctx: &ExtensionContext) -> Result<(), ExtensionError> {
        let services = ctx.services();

        services
            .activity_bar
            .add(ActivityBarItem::new(TEST_PANE_ID, "Test").with_icon("beaker"))?;
        services.sidebar.add(
            SidebarPane::new(TEST_PANE_ID, "TEST")
                .with_render(render_fn(|| Element::new("TestPane"))),
        )?;
        services.editor.set_entry(render_fn(|| Element::new("Entry")));

        {
            let handler_services = services.clone();
            ctx.track(services.settings.on_change_configuration(move |value: Value| {
                let services = handler_services.clone();
                async move { apply_configuration(&services, value).await }
            }));
        }

        {
            let ctx_for_open = ctx.clone();
            let picker = Rc::clone(&self.picker);
            ctx.track(services.menu_bar.on_select(move |menu_id| {
                if menu_id == MENU_FILE_OPEN {
                    let picker = Rc::clone(&picker);
                    let editor = Rc::clone(&ctx_for_open.services().editor);
                    ctx_for_open.spawn_future(open_picked_file(picker, editor));
                }
                Ok(())
            }));
        }

        {
            let folder_tree = Rc::clone(&services.folder_tree);
            ctx.track(services.folder_tree.on_create(move |req: &CreateRequest| {
                folder_tree.add(new_node(req.file_type), req.parent_id.as_deref())?;
                Ok(())
            }));
        }

        {
            let search = Rc::clone(&services.search);
            ctx.track(services.search.on_search(move |query| {
                search.set_result(search_results(query));
                search.set_validate_info(
                    (!query.is_empty())
                        .then(|| ValidateInfo::new(ValidateKind::Warning, SEARCH_WARNING)),
                );
                Ok(())
            }));
        }

        ctx.track(services.search.on_result_click(|item| {
            tracing::info!(key = %item.key, name = %item.name, "search result clicked");
            Ok(())
        }));

        {
            let editor = Rc::clone(&services.editor);
            ctx.track(services.folder_tree.on_select_file(move |node| {
                editor.open(tab_for_node(node));
                Ok(())
            }));
        }

        Ok(())
    }
}

/// Commits `value`, re-reads the stored configuration and applies it to the
/// layout and the View menu check marks.
///
/// A configuration that cannot be written or read changes nothing.
async fn apply_configuration(services: &Services, value: Value) -> HandlerResult {
    if let Err(e) = services.settings.update(&value) {
        tracing::warn!(error = %e, "configuration not committed, ignoring change");
        return Ok(());
    }
    let config = match services.settings.get_configuration().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "configuration unreadable, ignoring change");
            return Ok(());
        }
    };
    let Some(workbench) = config.get("workbench") else {
        return Ok(());
    };

    // Layout is read again at every merge; other events may have changed it
    // while the read above was pending.
    if let Some(hidden) = region_hidden(workbench, "activityBar") {
        services
            .layout
            .update_state(|layout| layout.activity_bar.hidden = hidden);
        set_check_mark(&services.menu_bar, MENU_VIEW_ACTIVITYBAR, hidden)?;
    }
    if let Some(hidden) = region_hidden(workbench, "menuBar") {
        services
            .layout
            .update_state(|layout| layout.menu_bar.hidden = hidden);
        set_check_mark(&services.menu_bar, MENU_VIEW_MENUBAR, hidden)?;
    }
    if let Some(position) = workbench
        .get("sidebar")
        .and_then(Value::as_str)
        .and_then(Position::from_name)
    {
        services.layout.set_side_bar_position(position);
    }
    if let Some(hidden) = region_hidden(workbench, "statusBar") {
        services
            .layout
            .update_state(|layout| layout.status_bar.hidden = hidden);
        set_check_mark(&services.menu_bar, MENU_VIEW_STATUSBAR, hidden)?;
    }
    Ok(())
}

fn region_hidden(workbench: &Value, region: &str) -> Option<bool> {
    workbench.get(region)?.get("hidden")?.as_bool()
}

fn set_check_mark(menu_bar: &MenuBarService, menu_id: &str, hidden: bool) -> HandlerResult {
    let icon = if hidden { "" } else { ICON_CHECK };
    menu_bar.update(
        menu_id,
        MenuItemPatch {
            icon: Some(icon.to_string()),
            ..MenuItemPatch::default()
        },
    )?;
    Ok(())
}

async fn open_picked_file(picker: Rc<dyn FilePicker>, editor: Rc<EditorService>) {
    let Some(file) = picker.pick().await else {
        tracing::debug!("no file picked");
        return;
    };
    let name = file.name.clone();
    match String::from_utf8(file.bytes) {
        Ok(value) => editor.open(tab_for_picked_file(&name, value, file.last_modified)),
        Err(e) => tracing::warn!(name = %name, error = %e, "picked file is not utf-8, not opened"),
    }
}

/// Editor tab for a file picked from disk.
pub fn tab_for_picked_file(name: &str, value: String, last_modified: u64) -> EditorTab {
    let ext = name.rsplit_once('.').map_or("", |(_, ext)| ext);
    EditorTab {
        id: format!("{last_modified}{name}"),
        name: name.to_string(),
        location: Some(format!("{ROOT_NAME}/{name}")),
        file_type: Some(FileType::File),
        icon: Some(FILE_ICON.to_string()),
        modified: false,
        data: TabData {
            value,
            language: language_for_extension(ext).to_string(),
            path: None,
        },
    }
}

/// Editor tab for a selected folder-tree leaf. Node ids carry an optional
/// `_suffix` that the tab id drops.
pub fn tab_for_node(node: &TreeNode) -> EditorTab {
    let id = node.id.split('_').next().unwrap_or(&node.id);
    let data = node.data.clone().unwrap_or_else(|| TabData {
        value: node.content.clone().unwrap_or_default(),
        language: node.extension().to_string(),
        path: node.location.clone(),
    });
    EditorTab {
        id: id.to_string(),
        name: node.name.clone(),
        location: node.location.clone(),
        file_type: Some(node.file_type),
        icon: node.icon.clone(),
        modified: false,
        data,
    }
}

fn new_node(file_type: FileType) -> TreeNode {
    let id = Uuid::new_v4().to_string();
    match file_type {
        FileType::RootFolder => {
            TreeNode::new(id, ROOT_NAME, FileType::RootFolder).with_location(ROOT_NAME)
        }
        other => TreeNode::new(id, "", other).with_icon(FILE_ICON).editable(true),
    }
}

/// Demo result forest for `query`: nothing for an empty query, otherwise one
/// file with a fixed number of matches.
pub fn search_results(query: &str) -> Vec<SearchResult> {
    if query.is_empty() {
        return Vec::new();
    }
    let children = (0..RESULTS_PER_QUERY)
        .map(|i| SearchResult::leaf(i.to_string(), format!("{query}-{i}")))
        .collect();
    vec![SearchResult::group(ROOT_NAME, "molecule.test.js", children)]
}

#[cfg(test)]
#[path = "../../tests/unit/extensions/test_pane.rs"]
mod tests;
