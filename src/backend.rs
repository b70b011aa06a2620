//! The widget side of a window: instantiation, parenting, visibility, order.
//!
//! The registry decides *what* happens to a window; a [`WidgetBackend`] makes
//! it so on whatever surface the host renders to.

use std::collections::{BTreeMap, BTreeSet};

use crate::window::{TypeKey, WindowFlags, WindowId, WindowTemplate};

/// Container a widget is parented to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layer {
    /// The main canvas where open windows are drawn.
    #[default]
    Active,
    /// Holding area for minimized windows.
    Minimized,
    /// Hidden area where closed, pooled windows wait for reuse.
    Parked,
}

pub trait WidgetBackend {
    /// Build a fresh widget for `key`. `Err` carries why the resources could not be loaded.
    fn instantiate(
        &mut self,
        id: WindowId,
        key: &TypeKey,
        template: &WindowTemplate,
    ) -> Result<(), String>;

    /// False once the widget has been destroyed, by us or by someone else.
    fn is_alive(&self, id: WindowId) -> bool;

    fn set_layer(&mut self, id: WindowId, layer: Layer);

    fn set_visible(&mut self, id: WindowId, visible: bool);

    /// Draw `id` above every sibling in its layer.
    fn raise_to_top(&mut self, id: WindowId);

    /// Draw `id` beneath every sibling in its layer.
    fn lower_to_bottom(&mut self, id: WindowId);

    fn set_title(&mut self, id: WindowId, title: &str);

    /// Show or hide header, border and header buttons.
    fn apply_chrome(&mut self, _id: WindowId, _flags: &WindowFlags) {}

    fn destroy(&mut self, id: WindowId);
}

impl<T: WidgetBackend + ?Sized> WidgetBackend for Box<T> {
    fn instantiate(
        &mut self,
        id: WindowId,
        key: &TypeKey,
        template: &WindowTemplate,
    ) -> Result<(), String> {
        (**self).instantiate(id, key, template)
    }

    fn is_alive(&self, id: WindowId) -> bool {
        (**self).is_alive(id)
    }

    fn set_layer(&mut self, id: WindowId, layer: Layer) {
        (**self).set_layer(id, layer)
    }

    fn set_visible(&mut self, id: WindowId, visible: bool) {
        (**self).set_visible(id, visible)
    }

    fn raise_to_top(&mut self, id: WindowId) {
        (**self).raise_to_top(id)
    }

    fn lower_to_bottom(&mut self, id: WindowId) {
        (**self).lower_to_bottom(id)
    }

    fn set_title(&mut self, id: WindowId, title: &str) {
        (**self).set_title(id, title)
    }

    fn apply_chrome(&mut self, id: WindowId, flags: &WindowFlags) {
        (**self).apply_chrome(id, flags)
    }

    fn destroy(&mut self, id: WindowId) {
        (**self).destroy(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWidget {
    pub key: TypeKey,
    pub title: String,
    pub layer: Layer,
    pub visible: bool,
    pub flags: WindowFlags,
}

/// In-memory backend. Keeps just enough state to observe what the registry did.
#[derive(Debug, Default, Clone)]
pub struct HeadlessBackend {
    widgets: BTreeMap<WindowId, HeadlessWidget>,
    /// Bottom-to-top draw order of every live widget.
    draw_order: Vec<WindowId>,
    missing: BTreeSet<TypeKey>,
    instantiated: usize,
    destroyed: usize,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future `instantiate` for `key` fail as if its resources were gone.
    pub fn mark_missing(&mut self, key: impl Into<TypeKey>) {
        self.missing.insert(key.into());
    }

    pub fn clear_missing(&mut self, key: &TypeKey) {
        self.missing.remove(key);
    }

    /// Destroy a widget behind the registry's back.
    pub fn destroy_externally(&mut self, id: WindowId) {
        self.remove_widget(id);
    }

    pub fn widget(&self, id: WindowId) -> Option<&HeadlessWidget> {
        self.widgets.get(&id)
    }

    pub fn draw_order(&self) -> &[WindowId] {
        &self.draw_order
    }

    pub fn instantiated_count(&self) -> usize {
        self.instantiated
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    pub fn live_count(&self) -> usize {
        self.widgets.len()
    }

    fn remove_widget(&mut self, id: WindowId) -> bool {
        self.draw_order.retain(|x| *x != id);
        self.widgets.remove(&id).is_some()
    }
}

impl WidgetBackend for HeadlessBackend {
    fn instantiate(
        &mut self,
        id: WindowId,
        key: &TypeKey,
        template: &WindowTemplate,
    ) -> Result<(), String> {
        if self.missing.contains(key) {
            return Err(format!("no widget template named `{key}`"));
        }
        self.widgets.insert(
            id,
            HeadlessWidget {
                key: key.clone(),
                title: String::new(),
                layer: Layer::Active,
                visible: true,
                flags: template.flags,
            },
        );
        self.draw_order.push(id);
        self.instantiated += 1;
        Ok(())
    }

    fn is_alive(&self, id: WindowId) -> bool {
        self.widgets.contains_key(&id)
    }

    fn set_layer(&mut self, id: WindowId, layer: Layer) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.layer = layer;
        }
    }

    fn set_visible(&mut self, id: WindowId, visible: bool) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.visible = visible;
        }
    }

    fn raise_to_top(&mut self, id: WindowId) {
        if !self.widgets.contains_key(&id) {
            return;
        }
        self.draw_order.retain(|x| *x != id);
        self.draw_order.push(id);
    }

    fn lower_to_bottom(&mut self, id: WindowId) {
        if !self.widgets.contains_key(&id) {
            return;
        }
        self.draw_order.retain(|x| *x != id);
        self.draw_order.insert(0, id);
    }

    fn set_title(&mut self, id: WindowId, title: &str) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.title = title.to_string();
        }
    }

    fn apply_chrome(&mut self, id: WindowId, flags: &WindowFlags) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.flags = *flags;
        }
    }

    fn destroy(&mut self, id: WindowId) {
        if self.remove_widget(id) {
            self.destroyed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fail_to_instantiate() {
        let mut backend = HeadlessBackend::new();
        backend.mark_missing("Broken");
        let template = WindowTemplate::default();
        assert!(
            backend
                .instantiate(WindowId::from_raw(1), &TypeKey::from("Broken"), &template)
                .is_err()
        );
        assert_eq!(backend.instantiated_count(), 0);
        backend.clear_missing(&TypeKey::from("Broken"));
        assert!(
            backend
                .instantiate(WindowId::from_raw(1), &TypeKey::from("Broken"), &template)
                .is_ok()
        );
    }

    #[test]
    fn raise_moves_to_end_of_draw_order() {
        let mut backend = HeadlessBackend::new();
        let template = WindowTemplate::default();
        for raw in 1..=3 {
            backend
                .instantiate(WindowId::from_raw(raw), &TypeKey::from("A"), &template)
                .expect("instantiate");
        }
        backend.raise_to_top(WindowId::from_raw(1));
        assert_eq!(
            backend.draw_order(),
            &[
                WindowId::from_raw(2),
                WindowId::from_raw(3),
                WindowId::from_raw(1)
            ]
        );
        backend.lower_to_bottom(WindowId::from_raw(3));
        assert_eq!(backend.draw_order().first(), Some(&WindowId::from_raw(3)));
        backend.destroy_externally(WindowId::from_raw(2));
        assert!(!backend.is_alive(WindowId::from_raw(2)));
        assert_eq!(backend.destroyed_count(), 0);
    }
}
