use std::rc::Rc;

use crate::extension::{Extension, ExtensionContext, ExtensionError};
use crate::models::{render_fn, Element};
use crate::services::{ActivityBarItem, SelectionStatePatch, SidebarPane};

pub const SEARCH_EXTENSION_ID: &str = "search";
pub const SEARCH_ACTIVITY_ID: &str = "search";
pub const SEARCH_PANE_ID: &str = "searchPane";

/// Contributes the search pane and the activity-bar item that shows it.
pub struct SearchExtension;

impl Extension for SearchExtension {
    fn id(&self) -> &str {
        SEARCH_EXTENSION_ID
    }

    fn activate(&self, ctx: &ExtensionContext) -> Result<(), ExtensionError> {
        let services = ctx.services();

        services.sidebar.push(
            SidebarPane::new(SEARCH_PANE_ID, "SEARCH")
                .with_render(render_fn(|| Element::new("SearchPane"))),
        )?;
        services.activity_bar.push(
            ActivityBarItem::new(SEARCH_ACTIVITY_ID, "Search").with_icon("codicon-search"),
        )?;

        let sidebar = Rc::clone(&services.sidebar);
        ctx.track(services.activity_bar.on_select(move |event| {
            if event.item.id == SEARCH_ACTIVITY_ID {
                sidebar.update_state(SelectionStatePatch {
                    current: Some(SEARCH_PANE_ID.to_string()),
                    hidden: None,
                });
            }
            Ok(())
        }));

        ctx.track(services.editor.change_tab(|tab| {
            tracing::info!(id = %tab.id, modified = tab.modified, "tab changed");
            Ok(())
        }));
        ctx.track(services.editor.select_tab(|tab| {
            tracing::info!(id = %tab.id, "tab selected");
            Ok(())
        }));
        Ok(())
    }
}
