use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::rc::Rc;

/// Opaque description of a view, produced by a render callback and consumed by
/// whatever renderer drives the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub component: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub props: Value,
}

impl Element {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            props: Value::Null,
        }
    }

    pub fn with_props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }
}

pub type Render = Rc<dyn Fn() -> Element>;

pub fn render_fn(f: impl Fn() -> Element + 'static) -> Render {
    Rc::new(f)
}
