//! Typed lifecycle events and the commands listeners may answer with.
//!
//! Listeners never get a mutable handle on the registry. Anything they want
//! changed goes into a [`CommandQueue`] that the registry drains after the
//! current dispatch, so a close triggered from inside a focus listener cannot
//! corrupt the stacking list it is being notified about.

use std::cell::RefCell;
use std::rc::Rc;

use crate::scaler::DpiChange;
use crate::window::{TypeKey, WindowId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Opened(WindowId),
    Closed(WindowId),
    Focused(WindowId),
    Minimized(WindowId),
    Maximized(WindowId),
    Restored(WindowId),
    DpiChanged(DpiChange),
}

impl WindowEvent {
    pub fn window(&self) -> Option<WindowId> {
        match *self {
            WindowEvent::Opened(id)
            | WindowEvent::Closed(id)
            | WindowEvent::Focused(id)
            | WindowEvent::Minimized(id)
            | WindowEvent::Maximized(id)
            | WindowEvent::Restored(id) => Some(id),
            WindowEvent::DpiChanged(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryCommand {
    Create {
        key: TypeKey,
        title: Option<String>,
    },
    Close(WindowId),
    Focus(WindowId),
    Minimize(WindowId),
    Maximize(WindowId),
    Restore(WindowId),
    CloseTopmost,
}

#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<RegistryCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: RegistryCommand) {
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub(crate) fn take(&mut self) -> Vec<RegistryCommand> {
        std::mem::take(&mut self.commands)
    }
}

pub trait WindowEventListener {
    fn on_event(&mut self, event: &WindowEvent, commands: &mut CommandQueue);
}

impl<F> WindowEventListener for F
where
    F: FnMut(&WindowEvent, &mut CommandQueue),
{
    fn on_event(&mut self, event: &WindowEvent, commands: &mut CommandQueue) {
        self(event, commands)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Listener that stores every event it sees, for hosts that poll.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<WindowEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener feeding this recorder.
    pub fn listener(&self) -> impl WindowEventListener + 'static {
        let events = Rc::clone(&self.events);
        move |event: &WindowEvent, _: &mut CommandQueue| {
            events.borrow_mut().push(*event);
        }
    }

    pub fn take(&self) -> Vec<WindowEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
