//! Process-wide registry for hosts that want a single shared instance.
//!
//! The slot is thread-local: the registry is single-threaded and its
//! listeners hold `Rc`s. Access goes through [`with_registry`], which refuses
//! reentrant use instead of panicking on a double borrow.

use std::cell::{Cell, RefCell};

use crate::backend::WidgetBackend;
use crate::error::{Result, WindowError};
use crate::registry::WindowRegistry;

pub type SharedRegistry = WindowRegistry<Box<dyn WidgetBackend>>;

thread_local! {
    static REGISTRY: RefCell<Option<SharedRegistry>> = const { RefCell::new(None) };
    static INITIALIZING: Cell<bool> = const { Cell::new(false) };
}

/// Clears the initializing flag even if the builder unwinds.
struct InitGuard;

impl InitGuard {
    fn enter() -> Option<Self> {
        if INITIALIZING.with(|flag| flag.replace(true)) {
            None
        } else {
            Some(InitGuard)
        }
    }
}

impl Drop for InitGuard {
    fn drop(&mut self) {
        INITIALIZING.with(|flag| flag.set(false));
    }
}

pub fn is_initialized() -> bool {
    REGISTRY.with(|slot| slot.try_borrow().map(|r| r.is_some()).unwrap_or(true))
}

/// Install `registry` as the shared instance and run its `init`.
///
/// Returns `Ok(false)` and drops `registry` when an instance is already installed.
pub fn init(registry: SharedRegistry) -> Result<bool> {
    get_or_init_with(move || registry)
}

/// Build the shared instance on first use. Later calls do nothing.
pub fn get_or_init(build: impl FnOnce() -> SharedRegistry) -> Result<()> {
    get_or_init_with(build).map(|_| ())
}

fn get_or_init_with(build: impl FnOnce() -> SharedRegistry) -> Result<bool> {
    if is_initialized() {
        return Ok(false);
    }
    let Some(_guard) = InitGuard::enter() else {
        tracing::warn!("window registry requested while it is being constructed");
        return Err(WindowError::Busy);
    };
    let mut registry = build();
    registry.init()?;
    REGISTRY.with(|slot| {
        let mut slot = slot.try_borrow_mut().map_err(|_| WindowError::Busy)?;
        // built reentrantly by someone else in the meantime
        if slot.is_some() {
            return Ok(false);
        }
        *slot = Some(registry);
        Ok(true)
    })
}

/// Run `f` against the shared registry.
pub fn with_registry<T>(f: impl FnOnce(&mut SharedRegistry) -> T) -> Result<T> {
    REGISTRY.with(|slot| {
        let mut slot = slot.try_borrow_mut().map_err(|_| WindowError::Busy)?;
        let registry = slot.as_mut().ok_or(WindowError::Uninitialized)?;
        Ok(f(registry))
    })
}

/// Tear down the shared instance. Returns whether there was one.
pub fn shutdown() -> Result<bool> {
    let taken = REGISTRY.with(|slot| {
        slot.try_borrow_mut()
            .map(|mut slot| slot.take())
            .map_err(|_| WindowError::Busy)
    })?;
    match taken {
        Some(mut registry) => {
            registry.shutdown();
            Ok(true)
        }
        None => Ok(false),
    }
}
