//! Context actions for admin table rows.

use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    View,
    Edit,
    Delete,
    UpdateStatus,
    Custom(String),
}

pub type ActionHandler = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Clone)]
pub struct RowAction {
    pub capability: Capability,
    pub label: String,
    pub handler: ActionHandler,
}

impl fmt::Debug for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction").field("capability", &self.capability).field("label", &self.label).finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default)]
pub struct RowActions {
    actions: Vec<RowAction>,
}

impl RowActions {
    pub fn new() -> Self { Self::default() }

    pub fn push(mut self, capability: Capability, label: impl Into<String>, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.actions.push(RowAction { capability, label: label.into(), handler: Arc::new(handler) });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowAction> { self.actions.iter() }
    pub fn len(&self) -> usize { self.actions.len() }
    pub fn is_empty(&self) -> bool { self.actions.is_empty() }

    /// Keeps only actions whose capability `allowed` accepts, e.g. for a read-only role.
    pub fn with_capabilities(&self, allowed: impl Fn(&Capability) -> bool) -> Self {
        Self { actions: self.actions.iter().filter(|a| allowed(&a.capability)).cloned().collect() }
    }

    /// Runs the first action with `capability` for `row_id`. False if none matches.
    pub fn invoke(&self, capability: &Capability, row_id: &str) -> bool {
        match self.actions.iter().find(|a| a.capability == *capability) {
            Some(action) => {
                (action.handler)(row_id);
                true
            }
            None => false,
        }
    }
}
