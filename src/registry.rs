use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use log::{debug, info};

use crate::{button::ThumbnailButton, Error, Result};

/// Most buttons a thumbnail toolbar can show.
pub const MAX_THUMBNAIL_BUTTONS: usize = 7;

static GLOBAL_REGISTRY: OnceLock<Arc<ButtonRegistry>> = OnceLock::new();

struct Installed {
    generation: u64,
    buttons: Vec<Arc<ThumbnailButton>>,
}

/// The toolbar buttons currently installed, in shell order.
///
/// A button's index is the id the shell reports when it is clicked, so an
/// index is only meaningful for the generation that installed it. Each
/// `replace` or `clear` starts a new generation.
pub struct ButtonRegistry {
    installed: RwLock<Installed>,
}

impl ButtonRegistry {
    pub fn new() -> Self {
        ButtonRegistry {
            installed: RwLock::new(Installed {
                generation: 0,
                buttons: Vec::new(),
            }),
        }
    }

    /// Process-wide registry, empty until the first install.
    pub fn global() -> Arc<ButtonRegistry> {
        Arc::clone(GLOBAL_REGISTRY.get_or_init(|| Arc::new(ButtonRegistry::new())))
    }

    pub fn check_capacity(count: usize) -> Result<()> {
        if count > MAX_THUMBNAIL_BUTTONS {
            return Err(Error::TooManyButtons(count));
        }
        Ok(())
    }

    /// Swaps in `buttons` wholesale and returns the new generation. On error
    /// the installed buttons are left untouched.
    pub fn replace(&self, buttons: Vec<ThumbnailButton>) -> Result<u64> {
        Self::check_capacity(buttons.len())?;
        let buttons: Vec<_> = buttons.into_iter().map(Arc::new).collect();
        let count = buttons.len();
        let mut installed = self
            .installed
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        installed.generation += 1;
        let generation = installed.generation;
        let previous = std::mem::replace(&mut installed.buttons, buttons);
        drop(installed);
        info!("Installed {count} thumbnail buttons, generation {generation}");
        // Handlers may own arbitrary state; release them outside the lock.
        drop(previous);
        Ok(generation)
    }

    pub fn clear(&self) -> Result<u64> {
        self.replace(Vec::new())
    }

    pub fn get(&self, index: usize) -> Option<Arc<ThumbnailButton>> {
        let installed = self.read();
        let button = installed.buttons.get(index).cloned();
        if button.is_none() {
            debug!(
                "No button at index {index} in generation {} ({} installed)",
                installed.generation,
                installed.buttons.len()
            );
        }
        button
    }

    pub fn len(&self) -> usize {
        self.read().buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    /// Installed buttons in order, as of the call.
    pub fn snapshot(&self) -> Vec<Arc<ThumbnailButton>> {
        self.read().buttons.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Installed> {
        self.installed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ButtonRegistry {
    fn default() -> Self {
        Self::new()
    }
}
