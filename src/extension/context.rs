use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::core::service::Result as ServiceResult;
use crate::core::{Disposable, LocalBoxFuture, NamedService, Service, ServiceRegistry};
use crate::services::ports::LocalExecutor;
use crate::services::{
    ActivityBarService, EditorService, FolderTreeService, LayoutService, MenuBarService,
    SearchService, SettingsService, SidebarService,
};

/// Typed handles to every well-known service of one shell.
#[derive(Clone)]
pub struct Services {
    pub activity_bar: Rc<ActivityBarService>,
    pub sidebar: Rc<SidebarService>,
    pub menu_bar: Rc<MenuBarService>,
    pub editor: Rc<EditorService>,
    pub folder_tree: Rc<FolderTreeService>,
    pub search: Rc<SearchService>,
    pub settings: Rc<SettingsService>,
    pub layout: Rc<LayoutService>,
}

impl Services {
    pub fn resolve(registry: &ServiceRegistry) -> ServiceResult<Self> {
        Ok(Self {
            activity_bar: registry.resolve()?,
            sidebar: registry.resolve()?,
            menu_bar: registry.resolve()?,
            editor: registry.resolve()?,
            folder_tree: registry.resolve()?,
            search: registry.resolve()?,
            settings: registry.resolve()?,
            layout: registry.resolve()?,
        })
    }
}

/// What an extension sees while it activates and from its handlers afterwards.
#[derive(Clone)]
pub struct ExtensionContext {
    extension_id: Rc<str>,
    services: Services,
    registry: Rc<ServiceRegistry>,
    executor: Rc<dyn LocalExecutor>,
    subscriptions: Rc<RefCell<Vec<Disposable>>>,
}

impl ExtensionContext {
    pub fn new(
        extension_id: &str,
        services: Services,
        registry: Rc<ServiceRegistry>,
        executor: Rc<dyn LocalExecutor>,
    ) -> Self {
        Self {
            extension_id: Rc::from(extension_id),
            services,
            registry,
            executor,
            subscriptions: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn extension_id(&self) -> &str {
        &self.extension_id
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub fn get(&self, name: &str) -> ServiceResult<Rc<dyn Service>> {
        self.registry.get(name)
    }

    pub fn resolve<S: NamedService>(&self) -> ServiceResult<Rc<S>> {
        self.registry.resolve()
    }

    /// Keeps `subscription` until the extension is deactivated.
    pub fn track(&self, subscription: Disposable) {
        self.subscriptions.borrow_mut().push(subscription);
    }

    pub fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.executor.spawn_local(task);
    }

    pub fn spawn_future<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        self.executor.spawn_local(Box::pin(task));
    }

    /// Disposes every tracked subscription. Returns how many were live.
    pub(crate) fn dispose_subscriptions(&self) -> usize {
        let subscriptions = std::mem::take(&mut *self.subscriptions.borrow_mut());
        let live = subscriptions.iter().filter(|d| !d.is_disposed()).count();
        for subscription in &subscriptions {
            subscription.dispose();
        }
        live
    }
}
