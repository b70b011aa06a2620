//! The window manager proper.
//!
//! [`WindowRegistry`] owns every window record, the stacking list, the reuse
//! pool and the coordinate scaler. All mutation goes through its methods;
//! collaborators only ever see events and hand back commands.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::backend::{Layer, WidgetBackend};
use crate::config::RegistryConfig;
use crate::constants::{DOUBLE_CLICK_THRESHOLD_MS, DPI_PREFERENCE_KEY, MAX_DISPATCH_ROUNDS};
use crate::drag::{DragEnd, DragHandle, DragResizeController, PointerEvent};
use crate::error::{Result, WindowError};
use crate::events::{
    CommandQueue, ListenerId, RegistryCommand, WindowEvent, WindowEventListener,
};
use crate::geometry::{Placement, Vec2};
use crate::hit_test::{self, Hit};
use crate::prefs::{MemoryPreferences, PreferenceStore};
use crate::scaler::{CoordinateScaler, DpiChange};
use crate::window::state_machine::{self, Transition};
use crate::window::{TypeKey, Window, WindowCatalog, WindowId, WindowMode};
use crate::z_order::ZOrderList;

/// What the cancel (escape) action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Closed(WindowId),
    OpenedFallback(WindowId),
    Nothing,
}

pub struct WindowRegistry<B: WidgetBackend> {
    catalog: WindowCatalog,
    backend: B,
    prefs: Box<dyn PreferenceStore>,
    config: RegistryConfig,
    windows: BTreeMap<WindowId, Window>,
    z_order: ZOrderList<WindowId>,
    pool: BTreeMap<TypeKey, WindowId>,
    scaler: CoordinateScaler,
    drag: DragResizeController,
    listeners: Vec<(ListenerId, Box<dyn WindowEventListener>)>,
    // events raised by the current call; dispatched once it has finished mutating
    pending: Vec<WindowEvent>,
    commands: CommandQueue,
    dispatching: bool,
    last_header_click: Option<(WindowId, Instant)>,
    next_window_seq: u64,
    next_listener_seq: u64,
}

impl<B: WidgetBackend> WindowRegistry<B> {
    pub fn new(catalog: WindowCatalog, backend: B) -> Self {
        Self {
            catalog,
            backend,
            prefs: Box::new(MemoryPreferences::new()),
            config: RegistryConfig::default(),
            windows: BTreeMap::new(),
            z_order: ZOrderList::new(),
            pool: BTreeMap::new(),
            scaler: CoordinateScaler::new(),
            drag: DragResizeController::new(),
            listeners: Vec::new(),
            pending: Vec::new(),
            commands: CommandQueue::new(),
            dispatching: false,
            last_header_click: None,
            next_window_seq: 1,
            next_listener_seq: 1,
        }
    }

    pub fn with_config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_preferences(mut self, prefs: impl PreferenceStore + 'static) -> Self {
        self.prefs = Box::new(prefs);
        self
    }

    /// Apply the stored DPI preference (or the configured default) to the
    /// configured screen resolution.
    pub fn init(&mut self) -> Result<DpiChange> {
        let stored = self.prefs.get_f32(DPI_PREFERENCE_KEY);
        let dpi = stored.unwrap_or(self.config.default_dpi);
        let (width, height) = (self.config.screen_width, self.config.screen_height);
        let result = match self.set_dpi_inner(width, height, dpi) {
            Err(WindowError::InvalidDpi(bad)) if stored.is_some() => {
                tracing::warn!(dpi = bad, "ignoring unusable stored dpi preference");
                self.set_dpi_inner(width, height, self.config.default_dpi)
            }
            other => other,
        };
        tracing::info!(
            screen_width = width,
            screen_height = height,
            dpi = self.scaler.dpi(),
            kinds = self.catalog.len(),
            "window registry initialized"
        );
        self.finish(result)
    }

    /// Destroy every window and forget all listeners.
    pub fn shutdown(&mut self) {
        let ids: Vec<WindowId> = self.windows.keys().copied().collect();
        for id in &ids {
            self.backend.destroy(*id);
        }
        self.windows.clear();
        self.z_order.clear();
        self.pool.clear();
        self.drag = DragResizeController::new();
        self.listeners.clear();
        self.pending.clear();
        self.commands.take();
        self.last_header_click = None;
        tracing::info!(destroyed = ids.len(), "window registry shut down");
    }

    // ---- accessors -------------------------------------------------------

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn catalog(&self) -> &WindowCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut WindowCatalog {
        &mut self.catalog
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn scaler(&self) -> &CoordinateScaler {
        &self.scaler
    }

    pub fn preferences(&self) -> &dyn PreferenceStore {
        self.prefs.as_ref()
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }

    pub fn z_order(&self) -> &ZOrderList<WindowId> {
        &self.z_order
    }

    /// Topmost open, non-minimized window.
    pub fn topmost(&self) -> Option<WindowId> {
        self.z_order.tail()
    }

    /// Number of open, non-minimized windows.
    pub fn open_count(&self) -> usize {
        self.z_order.len()
    }

    pub fn minimized_windows(&self) -> Vec<WindowId> {
        self.windows
            .values()
            .filter(|w| w.is_minimized())
            .map(Window::id)
            .collect()
    }

    pub fn pooled(&self, key: &TypeKey) -> Option<WindowId> {
        self.pool.get(key).copied()
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Parent size in logical units.
    pub fn logical_bounds(&self) -> Vec2 {
        self.scaler.reference_resolution()
    }

    // ---- listeners -------------------------------------------------------

    pub fn subscribe(&mut self, listener: impl WindowEventListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_seq);
        self.next_listener_seq += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    // ---- creation --------------------------------------------------------

    pub fn create(&mut self, key: impl Into<TypeKey>, title: Option<&str>) -> Result<WindowId> {
        let key = key.into();
        let result = self.get_or_create_inner(&key, title, None);
        self.finish(result)
    }

    pub fn create_with_placement(
        &mut self,
        key: impl Into<TypeKey>,
        title: Option<&str>,
        placement: Placement,
    ) -> Result<WindowId> {
        let key = key.into();
        let result = self.get_or_create_inner(&key, title, Some(placement));
        self.finish(result)
    }

    /// Hand back the pooled instance of `key` if there is one, otherwise build a new one.
    pub fn get_or_create(
        &mut self,
        key: &TypeKey,
        title: Option<&str>,
        placement: Option<Placement>,
    ) -> Result<WindowId> {
        let result = self.get_or_create_inner(key, title, placement);
        self.finish(result)
    }

    /// Open `key` beneath every other window, leaving focus where it is.
    ///
    /// Meant for a backdrop or wallpaper window. A pooled instance that is
    /// already open is pushed to the back as well.
    pub fn open_in_background(
        &mut self,
        key: impl Into<TypeKey>,
        title: Option<&str>,
    ) -> Result<WindowId> {
        let key = key.into();
        let result = self.get_or_create_inner(&key, title, None).map(|id| {
            self.send_to_back(id);
            id
        });
        self.finish(result)
    }

    fn get_or_create_inner(
        &mut self,
        key: &TypeKey,
        title: Option<&str>,
        placement: Option<Placement>,
    ) -> Result<WindowId> {
        let template = self.catalog.resolve(key)?.template.clone();

        if !template.flags.allow_multiple_instance
            && let Some(&id) = self.pool.get(key)
        {
            if self.backend.is_alive(id) && self.windows.contains_key(&id) {
                tracing::debug!(key = %key, window_id = %id, "reusing pooled window");
                self.reactivate(id)?;
                return Ok(id);
            }
            tracing::error!(
                key = %key,
                window_id = %id,
                "pooled window was already destroyed; creating a new one"
            );
            self.pool.remove(key);
            self.forget(id);
        }

        let id = WindowId::from_raw(self.next_window_seq);
        self.next_window_seq += 1;
        self.backend
            .instantiate(id, key, &template)
            .map_err(|reason| WindowError::ResourceMissing {
                key: key.to_string(),
                reason,
            })?;

        let mut window = Window::from_template(id, key.clone(), &template);
        if let Some(placement) = placement {
            placement.apply(&mut window.geometry);
        }
        window.title = title
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| template.default_title.clone())
            .unwrap_or_else(|| key.to_string());
        state_machine::refresh_snapshot(&mut window);

        self.backend.set_title(id, &window.title);
        self.backend.apply_chrome(id, &window.flags);
        if window.flags.qualifies_for_pool() {
            self.pool.insert(key.clone(), id);
        }
        tracing::debug!(
            key = %key,
            window_id = %id,
            title = %window.title,
            pooled = window.flags.qualifies_for_pool(),
            "created window"
        );
        self.windows.insert(id, window);
        self.on_opened(id);
        Ok(id)
    }

    fn reactivate(&mut self, id: WindowId) -> Result<()> {
        let window = self.window_mut(id)?;
        let reopened = state_machine::reopen(window) == Transition::Reopened;
        let unminimized = matches!(
            state_machine::unminimize(window),
            Transition::Unminimized { .. }
        );
        if reopened || unminimized {
            self.backend.set_visible(id, true);
            self.on_opened(id);
        } else {
            self.on_focused(id);
        }
        Ok(())
    }

    /// Drop every trace of a window whose widget is gone.
    fn forget(&mut self, id: WindowId) {
        self.z_order.remove(id);
        self.drag.cancel_for(id);
        self.windows.remove(&id);
    }

    // ---- lifecycle -------------------------------------------------------

    pub fn focus(&mut self, id: WindowId) -> Result<()> {
        let result = self.focus_inner(id);
        self.finish(result)
    }

    fn focus_inner(&mut self, id: WindowId) -> Result<()> {
        let window = self.window_mut(id)?;
        if !window.is_open() {
            return Err(WindowError::NotOpen(id));
        }
        if window.mode() == WindowMode::Minimized {
            state_machine::unminimize(window);
            self.on_opened(id);
            return Ok(());
        }
        self.on_focused(id);
        Ok(())
    }

    pub fn close(&mut self, id: WindowId) -> Result<()> {
        let result = self.close_inner(id);
        self.finish(result)
    }

    fn close_inner(&mut self, id: WindowId) -> Result<()> {
        let window = self.window_mut(id)?;
        match state_machine::close(window) {
            Transition::Closed => {
                self.on_closed(id);
                Ok(())
            }
            _ => Err(WindowError::NotOpen(id)),
        }
    }

    pub fn minimize(&mut self, id: WindowId) -> Result<()> {
        let result = self.minimize_inner(id);
        self.finish(result)
    }

    fn minimize_inner(&mut self, id: WindowId) -> Result<()> {
        let window = self.open_window_mut(id)?;
        if let Transition::Minimized { .. } = state_machine::minimize(window)? {
            self.on_minimized(id);
        }
        Ok(())
    }

    /// Bring a minimized window back in the mode it was minimized from.
    pub fn restore_minimized(&mut self, id: WindowId) -> Result<()> {
        let result = self.restore_minimized_inner(id);
        self.finish(result)
    }

    fn restore_minimized_inner(&mut self, id: WindowId) -> Result<()> {
        let window = self.open_window_mut(id)?;
        if let Transition::Unminimized { .. } = state_machine::unminimize(window) {
            self.on_opened(id);
        }
        Ok(())
    }

    pub fn maximize(&mut self, id: WindowId) -> Result<()> {
        let result = self.set_mode_inner(id, WindowMode::Maximized);
        self.finish(result)
    }

    pub fn restore(&mut self, id: WindowId) -> Result<()> {
        let result = self.set_mode_inner(id, WindowMode::Windowed);
        self.finish(result)
    }

    /// Header maximize button and header double click.
    pub fn toggle_maximize(&mut self, id: WindowId) -> Result<()> {
        let result = self.toggle_maximize_inner(id);
        self.finish(result)
    }

    fn toggle_maximize_inner(&mut self, id: WindowId) -> Result<()> {
        let target = match self.open_window_mut(id)?.mode() {
            WindowMode::Maximized => WindowMode::Windowed,
            WindowMode::Windowed | WindowMode::Minimized => WindowMode::Maximized,
        };
        self.set_mode_inner(id, target)
    }

    pub fn set_mode(&mut self, id: WindowId, mode: WindowMode) -> Result<()> {
        let result = self.set_mode_inner(id, mode);
        self.finish(result)
    }

    /// Like [`set_mode`](Self::set_mode) for modes named by external input.
    pub fn set_mode_named(&mut self, id: WindowId, mode: &str) -> Result<()> {
        let result = mode
            .parse::<WindowMode>()
            .and_then(|mode| self.set_mode_inner(id, mode));
        self.finish(result)
    }

    fn set_mode_inner(&mut self, id: WindowId, target: WindowMode) -> Result<()> {
        let header_reserve = self.config.header_reserve;
        let window = self.open_window_mut(id)?;
        let transition = state_machine::request(window, target, header_reserve)?;
        let flags = *window.flags();
        match transition {
            Transition::Maximized { from } => {
                self.backend.apply_chrome(id, &flags);
                self.drag.cancel_for(id);
                self.bring_back(id, from);
                self.emit(WindowEvent::Maximized(id));
            }
            Transition::Restored { from } => {
                self.backend.apply_chrome(id, &flags);
                self.bring_back(id, from);
                self.emit(WindowEvent::Restored(id));
            }
            Transition::Minimized { .. } => {
                self.on_minimized(id);
            }
            Transition::Unminimized { .. } => {
                self.on_opened(id);
            }
            Transition::Closed | Transition::Reopened | Transition::Unchanged => {}
        }
        Ok(())
    }

    /// Return a window to the top after a mode change: reopen if it came from
    /// `Minimized`, otherwise just raise it.
    fn bring_back(&mut self, id: WindowId, from: WindowMode) {
        if from == WindowMode::Minimized {
            self.on_opened(id);
        } else {
            self.on_focused(id);
        }
    }

    /// The cancel/escape action.
    pub fn close_topmost(&mut self) -> Result<CancelOutcome> {
        let result = self.close_topmost_inner();
        self.finish(result)
    }

    fn close_topmost_inner(&mut self) -> Result<CancelOutcome> {
        if let Some(id) = self.z_order.tail() {
            self.close_inner(id)?;
            return Ok(CancelOutcome::Closed(id));
        }
        let Some(key) = self.config.fallback_kind.clone() else {
            tracing::debug!("cancel with no open windows and no fallback kind");
            return Ok(CancelOutcome::Nothing);
        };
        let id = self.get_or_create_inner(&key, None, None)?;
        Ok(CancelOutcome::OpenedFallback(id))
    }

    pub fn set_title(&mut self, id: WindowId, title: impl Into<String>) -> Result<()> {
        let result = self.window_mut(id).map(|window| {
            window.title = title.into();
            window.title.clone()
        });
        if let Ok(title) = &result {
            self.backend.set_title(id, title);
        }
        self.finish(result.map(|_| ()))
    }

    // ---- pool ------------------------------------------------------------

    /// Destroy every pooled window that is currently closed. Returns how many went.
    pub fn trim_pool(&mut self) -> usize {
        let idle: Vec<(TypeKey, WindowId)> = self
            .pool
            .iter()
            .filter(|(_, id)| !self.windows.get(id).is_some_and(Window::is_open))
            .map(|(key, id)| (key.clone(), *id))
            .collect();
        for (key, id) in &idle {
            self.backend.destroy(*id);
            self.windows.remove(id);
            self.pool.remove(key);
            tracing::debug!(key = %key, window_id = %id, "trimmed pooled window");
        }
        idle.len()
    }

    pub fn on_low_memory(&mut self) -> usize {
        tracing::warn!(
            pooled = self.pool.len(),
            "low memory; destroying unused pooled windows"
        );
        self.trim_pool()
    }

    // ---- scaling ---------------------------------------------------------

    pub fn set_dpi(&mut self, screen_width: u32, screen_height: u32, dpi: f32) -> Result<DpiChange> {
        let result = self.set_dpi_inner(screen_width, screen_height, dpi);
        self.finish(result)
    }

    fn set_dpi_inner(&mut self, screen_width: u32, screen_height: u32, dpi: f32) -> Result<DpiChange> {
        let change = self.scaler.set_dpi(screen_width, screen_height, dpi)?;
        if let Err(err) = self.prefs.set_f32(DPI_PREFERENCE_KEY, dpi) {
            WindowError::from(err).report();
        }
        self.emit(WindowEvent::DpiChanged(change));
        Ok(change)
    }

    // ---- pointer ---------------------------------------------------------

    /// Topmost window under a logical point, and which part of it was hit.
    pub fn hit_test(&self, point: Vec2) -> Option<Hit> {
        let bounds = self.logical_bounds();
        self.z_order.snapshot().into_iter().rev().find_map(|id| {
            let window = self.windows.get(&id)?;
            let rect = window.geometry().resolve(bounds);
            hit_test::classify(window, rect, point).map(|region| Hit { id, region })
        })
    }

    /// Route one pointer event aimed at `handle` of window `id` (`None` = content).
    /// Returns true when the event changed anything.
    pub fn handle_pointer(
        &mut self,
        id: WindowId,
        handle: Option<DragHandle>,
        event: PointerEvent,
    ) -> Result<bool> {
        match event {
            PointerEvent::Down => self.pointer_down_at(id, handle, Instant::now()),
            PointerEvent::DragBegin => match handle {
                Some(handle) => self.begin_drag(id, handle).map(|_| true),
                None => Ok(false),
            },
            PointerEvent::DragMove(delta) => Ok(self.drag_by(id, delta)),
            PointerEvent::DragEnd => Ok(self.end_drag(id).is_some()),
        }
    }

    /// Pointer pressed on a window. Focuses it; a second header press within
    /// the double-click window toggles maximize.
    pub fn pointer_down_at(
        &mut self,
        id: WindowId,
        handle: Option<DragHandle>,
        now: Instant,
    ) -> Result<bool> {
        let mut result = self.focus_inner(id).map(|_| true);
        if result.is_ok() && handle == Some(DragHandle::Header) {
            let threshold = Duration::from_millis(DOUBLE_CLICK_THRESHOLD_MS);
            let double = self
                .last_header_click
                .is_some_and(|(last, at)| last == id && now.saturating_duration_since(at) <= threshold);
            if double {
                self.last_header_click = None;
                result = self.toggle_maximize_inner(id).map(|_| true);
            } else {
                self.last_header_click = Some((id, now));
            }
        }
        self.finish(result)
    }

    pub fn begin_drag(&mut self, id: WindowId, handle: DragHandle) -> Result<()> {
        let result = self.open_window_mut(id).map(|_| ());
        if result.is_ok()
            && let Some(window) = self.windows.get(&id)
        {
            self.drag.begin(window, handle);
        }
        self.finish(result)
    }

    /// Apply one raw pointer delta to the window being dragged.
    pub fn drag_by(&mut self, id: WindowId, raw_delta: Vec2) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        self.drag.drag(window, raw_delta, &self.scaler)
    }

    pub fn end_drag(&mut self, id: WindowId) -> Option<DragEnd> {
        if self.drag.session().is_some_and(|s| s.id != id) {
            return None;
        }
        let end = self.drag.end()?;
        if end.refreshes_snapshot()
            && let Some(window) = self.windows.get_mut(&end.id)
            && state_machine::refresh_snapshot(window)
        {
            tracing::debug!(window_id = %end.id, "refreshed restore snapshot after move");
        }
        Some(end)
    }

    // ---- reactions -------------------------------------------------------

    fn on_opened(&mut self, id: WindowId) {
        self.backend.set_layer(id, Layer::Active);
        self.backend.raise_to_top(id);
        self.z_order.insert_at_tail(id);
        self.emit(WindowEvent::Opened(id));
    }

    fn send_to_back(&mut self, id: WindowId) {
        if self.z_order.remove(id) {
            self.z_order.insert_at_head(id);
            self.backend.lower_to_bottom(id);
        }
    }

    fn on_focused(&mut self, id: WindowId) {
        if !self.z_order.move_to_tail(id) {
            return;
        }
        self.backend.raise_to_top(id);
        self.emit(WindowEvent::Focused(id));
    }

    fn on_minimized(&mut self, id: WindowId) {
        self.drag.cancel_for(id);
        self.z_order.remove(id);
        self.backend.set_layer(id, Layer::Minimized);
        self.emit(WindowEvent::Minimized(id));
    }

    fn on_closed(&mut self, id: WindowId) {
        self.drag.cancel_for(id);
        self.z_order.remove(id);
        self.backend.set_visible(id, false);
        // behaviors still see the record before it is dropped
        self.emit(WindowEvent::Closed(id));
        let pooled = self
            .windows
            .get(&id)
            .is_some_and(|w| w.flags().qualifies_for_pool());
        if pooled {
            self.backend.set_layer(id, Layer::Parked);
        } else {
            self.backend.destroy(id);
            self.windows.remove(&id);
            tracing::debug!(window_id = %id, "destroyed window on close");
        }
    }

    // ---- dispatch --------------------------------------------------------

    fn emit(&mut self, event: WindowEvent) {
        if let Some(id) = event.window()
            && let Some(window) = self.windows.get(&id)
            && let Some(kind) = self.catalog.get(window.type_key())
        {
            kind.behavior.on_event(window, &event, &mut self.commands);
        }
        self.pending.push(event);
    }

    fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            err.report();
        }
        self.flush();
        result
    }

    fn flush(&mut self) {
        if self.dispatching {
            return;
        }
        self.dispatching = true;
        let mut rounds = 0;
        while !self.pending.is_empty() || !self.commands.is_empty() {
            if rounds == MAX_DISPATCH_ROUNDS {
                tracing::warn!(
                    dropped_events = self.pending.len(),
                    dropped_commands = self.commands.len(),
                    "event dispatch did not settle; dropping the rest"
                );
                self.pending.clear();
                self.commands.take();
                break;
            }
            rounds += 1;

            // Work on local copies: listeners may queue commands that change
            // the very lists these events describe.
            let events = std::mem::take(&mut self.pending);
            let mut listeners = std::mem::take(&mut self.listeners);
            for event in &events {
                for (_, listener) in listeners.iter_mut() {
                    listener.on_event(event, &mut self.commands);
                }
            }
            self.listeners = listeners;

            for command in self.commands.take() {
                if let Err(err) = self.apply_command(command) {
                    err.report();
                }
            }
        }
        self.dispatching = false;
    }

    fn apply_command(&mut self, command: RegistryCommand) -> Result<()> {
        tracing::debug!(?command, "applying queued command");
        match command {
            RegistryCommand::Create { key, title } => {
                self.get_or_create_inner(&key, title.as_deref(), None).map(|_| ())
            }
            RegistryCommand::Close(id) => self.close_inner(id),
            RegistryCommand::Focus(id) => self.focus_inner(id),
            RegistryCommand::Minimize(id) => self.minimize_inner(id),
            RegistryCommand::Maximize(id) => self.set_mode_inner(id, WindowMode::Maximized),
            RegistryCommand::Restore(id) => self.set_mode_inner(id, WindowMode::Windowed),
            RegistryCommand::CloseTopmost => self.close_topmost_inner().map(|_| ()),
        }
    }

    // ---- helpers ---------------------------------------------------------

    fn window_mut(&mut self, id: WindowId) -> Result<&mut Window> {
        self.windows
            .get_mut(&id)
            .ok_or(WindowError::UnknownWindow(id))
    }

    fn open_window_mut(&mut self, id: WindowId) -> Result<&mut Window> {
        let window = self.window_mut(id)?;
        if window.is_open() {
            Ok(window)
        } else {
            Err(WindowError::NotOpen(id))
        }
    }
}
