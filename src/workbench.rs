//! One shell instance: the service registry, the error sink and the extension host.

use serde::Serialize;
use std::rc::Rc;

use crate::core::service::Result as ServiceResult;
use crate::core::{ErrorSink, ServiceRegistry, TracingErrorSink};
use crate::extension::{Extension, ExtensionError, ExtensionHost, ExtensionsConfig, Services};
use crate::extensions::{SearchExtension, TestPaneExtension};
use crate::models::LayoutState;
use crate::services::adapters::{InMemoryConfigurationStore, TokioLocalExecutor};
use crate::services::ports::{ConfigurationStore, FilePicker, LocalExecutor};
use crate::services::{
    ActivityBarItem, ActivityBarService, EditorService, EditorState, FolderTreeService,
    FolderTreeState, LayoutService, MenuBarService, MenuItem, SearchService, SearchState,
    SelectionState, SettingsService, SidebarService,
};

/// Registers every well-known service, in a fixed order.
pub fn build_registry(
    store: Rc<dyn ConfigurationStore>,
    sink: Rc<dyn ErrorSink>,
) -> ServiceResult<ServiceRegistry> {
    let mut registry = ServiceRegistry::new();
    registry.register(Rc::new(ActivityBarService::new(Rc::clone(&sink))))?;
    registry.register(Rc::new(SidebarService::new(Rc::clone(&sink))))?;
    registry.register(Rc::new(MenuBarService::with_default_menus(Rc::clone(&sink))))?;
    registry.register(Rc::new(EditorService::new(Rc::clone(&sink))))?;
    registry.register(Rc::new(FolderTreeService::new(Rc::clone(&sink))))?;
    registry.register(Rc::new(SearchService::new(Rc::clone(&sink))))?;
    registry.register(Rc::new(SettingsService::new(store, Rc::clone(&sink))))?;
    registry.register(Rc::new(LayoutService::new(sink)))?;
    Ok(registry)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaneSummary {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbenchSnapshot {
    pub activity_bar: Vec<ActivityBarItem>,
    pub activity_bar_state: SelectionState,
    pub sidebar: Vec<PaneSummary>,
    pub sidebar_state: SelectionState,
    pub menu_bar: Vec<MenuItem>,
    pub editor: EditorState,
    pub folder_tree: FolderTreeState,
    pub search: SearchState,
    pub layout: LayoutState,
}

pub struct Workbench {
    registry: Rc<ServiceRegistry>,
    services: Services,
    host: ExtensionHost,
}

impl Workbench {
    pub fn new(
        store: Rc<dyn ConfigurationStore>,
        executor: Rc<dyn LocalExecutor>,
    ) -> Result<Self, ExtensionError> {
        Self::with_sink(store, executor, Rc::new(TracingErrorSink))
    }

    pub fn with_sink(
        store: Rc<dyn ConfigurationStore>,
        executor: Rc<dyn LocalExecutor>,
        sink: Rc<dyn ErrorSink>,
    ) -> Result<Self, ExtensionError> {
        let registry = Rc::new(build_registry(store, sink)?);
        let services = Services::resolve(&registry)?;
        let host = ExtensionHost::new(Rc::clone(&registry), executor)?;
        tracing::debug!(services = ?registry.names(), "workbench created");
        Ok(Self {
            registry,
            services,
            host,
        })
    }

    /// In-memory configuration, tokio local executor.
    pub fn in_memory() -> Result<Self, ExtensionError> {
        Self::new(
            Rc::new(InMemoryConfigurationStore::new()),
            Rc::new(TokioLocalExecutor::new()),
        )
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub fn host(&self) -> &ExtensionHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut ExtensionHost {
        &mut self.host
    }

    pub fn register(&mut self, extension: Rc<dyn Extension>) -> Result<(), ExtensionError> {
        self.host.register(extension)
    }

    /// Registers the built-in extensions `config` leaves enabled.
    pub fn register_builtin(
        &mut self,
        picker: Rc<dyn FilePicker>,
        config: &ExtensionsConfig,
    ) -> Result<(), ExtensionError> {
        let builtin: [Rc<dyn Extension>; 2] = [
            Rc::new(SearchExtension),
            Rc::new(TestPaneExtension::new(picker)),
        ];
        for extension in builtin {
            if config.is_enabled(extension.id()) {
                self.host.register(extension)?;
            } else {
                tracing::info!(extension = extension.id(), "extension disabled");
            }
        }
        Ok(())
    }

    pub fn activate_all(&mut self) -> Vec<ExtensionError> {
        self.host.activate_all()
    }

    pub fn shutdown(&mut self) {
        self.host.deactivate_all();
    }

    pub fn snapshot(&self) -> WorkbenchSnapshot {
        let s = &self.services;
        WorkbenchSnapshot {
            activity_bar: s.activity_bar.items().iter().map(|i| (**i).clone()).collect(),
            activity_bar_state: s.activity_bar.get_state(),
            sidebar: s
                .sidebar
                .panes()
                .iter()
                .map(|p| PaneSummary {
                    id: p.id.clone(),
                    title: p.title.clone(),
                })
                .collect(),
            sidebar_state: s.sidebar.get_state(),
            menu_bar: s.menu_bar.menus().iter().map(|m| (**m).clone()).collect(),
            editor: s.editor.get_state(),
            folder_tree: s.folder_tree.get_state(),
            search: s.search.get_state(),
            layout: s.layout.get_state(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/workbench.rs"]
mod tests;
