//! Theme registry and switch notifier
//!
//! [`ThemeRegistry`] holds the registered themes, the identifier of the
//! current one, and the listeners told about switches.
//!
//! Construct one with [`ThemeRegistry::new`] and hand it to whatever needs it.
//! [`ThemeRegistry::shared`] offers a lazily created process-wide instance for
//! code that cannot be handed one, and [`ThemeRegistry::reset_shared`]
//! discards it so tests can start clean.
//!
//! # Notification
//!
//! Switching takes the write lock only long enough to update the current
//! theme and snapshot the listener list. Listeners run afterwards, on the
//! switching thread, in registration order. They may read the registry, and
//! may add or remove listeners, but must not assume that the theme they were
//! passed is still current by the time they run.
//!
//! Switching to the theme that is already current is a no-op and notifies
//! nobody.

use crate::error::{Result, ThemeError};
use crate::presets::ThemePreset;
use crate::theme::Theme;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-wide registry, created on first use
static SHARED: RwLock<Option<Arc<ThemeRegistry>>> = RwLock::new(None);

/// Callback invoked with the newly current theme
pub type ThemeListener = Arc<dyn Fn(&Theme) + Send + Sync>;

/// Handle returned by [`ThemeRegistry::add_theme_change_listener`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ListenerSnapshot = SmallVec<[ThemeListener; 4]>;

struct RegistryInner {
    /// Themes in registration order
    themes: Vec<Arc<Theme>>,
    /// Identifier -> position in `themes`
    index: FxHashMap<String, usize>,
    /// Position of the current theme; always valid
    current: usize,
    listeners: Vec<(ListenerId, ThemeListener)>,
}

impl RegistryInner {
    fn listener_snapshot(&self) -> ListenerSnapshot {
        self.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
    }

    /// Move `current` to `position`, returning what to notify
    fn switch(&mut self, position: usize) -> (Arc<Theme>, ListenerSnapshot) {
        self.current = position;
        (Arc::clone(&self.themes[position]), self.listener_snapshot())
    }

    /// Reject ids already bound to a different theme
    ///
    /// Returns false when an identical theme is already registered.
    fn check_new(&self, theme: &Theme) -> Result<bool> {
        match self.index.get(theme.identifier()) {
            Some(&position) if *self.themes[position] == *theme => Ok(false),
            Some(_) => Err(ThemeError::DuplicateIdentifier(
                theme.identifier().to_string(),
            )),
            None => Ok(true),
        }
    }
}

/// Keyed registry of themes with one current selection
pub struct ThemeRegistry {
    inner: RwLock<RegistryInner>,
    next_listener: AtomicU64,
}

impl ThemeRegistry {
    /// Registry holding the built-in presets, with `default` current
    pub fn new() -> Self {
        let themes = ThemePreset::all()
            .iter()
            .map(|preset| preset.theme())
            .collect::<Vec<_>>();
        Self::from_unique(themes)
    }

    /// Registry holding exactly `themes`, with the first one current
    pub fn with_themes(themes: impl IntoIterator<Item = Theme>) -> Result<Self> {
        let mut unique: Vec<Theme> = Vec::new();
        for theme in themes {
            let existing = unique.iter().find(|t| t.identifier() == theme.identifier());
            match existing {
                Some(existing) if *existing == theme => continue,
                Some(_) => {
                    return Err(ThemeError::DuplicateIdentifier(
                        theme.identifier().to_string(),
                    ))
                }
                None => unique.push(theme),
            }
        }

        if unique.is_empty() {
            return Err(ThemeError::Empty);
        }
        Ok(Self::from_unique(unique))
    }

    fn from_unique(themes: Vec<Theme>) -> Self {
        let themes: Vec<Arc<Theme>> = themes.into_iter().map(Arc::new).collect();
        let index = themes
            .iter()
            .enumerate()
            .map(|(i, theme)| (theme.identifier().to_string(), i))
            .collect();

        tracing::debug!("ThemeRegistry created with {} themes", themes.len());

        Self {
            inner: RwLock::new(RegistryInner {
                themes,
                index,
                current: 0,
                listeners: Vec::new(),
            }),
            next_listener: AtomicU64::new(0),
        }
    }

    /// Get the process-wide registry, creating it on first use
    pub fn shared() -> Arc<ThemeRegistry> {
        {
            let slot = SHARED.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(registry) = slot.as_ref() {
                return Arc::clone(registry);
            }
        }

        let mut slot = SHARED.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slot.get_or_insert_with(|| Arc::new(ThemeRegistry::new())))
    }

    /// Discard the process-wide registry; the next `shared()` builds a new one
    ///
    /// Holders of the previous instance keep it alive but stop seeing
    /// switches made through `shared()`.
    pub fn reset_shared() {
        tracing::debug!("ThemeRegistry: resetting shared instance");
        SHARED
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Lookup ==========

    /// Get a theme by identifier
    pub fn theme(&self, identifier: &str) -> Option<Arc<Theme>> {
        let inner = self.read();
        inner
            .index
            .get(identifier)
            .map(|&position| Arc::clone(&inner.themes[position]))
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.read().index.contains_key(identifier)
    }

    /// Snapshot of all themes in registration order
    pub fn all_themes(&self) -> Vec<Arc<Theme>> {
        self.read().themes.clone()
    }

    /// Snapshot of all identifiers in registration order
    pub fn all_theme_identifiers(&self) -> Vec<String> {
        self.read()
            .themes
            .iter()
            .map(|theme| theme.identifier().to_string())
            .collect()
    }

    /// Snapshot of the light or dark themes, in registration order
    pub fn themes_by_mode(&self, dark: bool) -> Vec<Arc<Theme>> {
        self.read()
            .themes
            .iter()
            .filter(|theme| theme.is_dark_mode() == dark)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().themes.len()
    }

    /// Always false; a registry holds at least one theme
    pub fn is_empty(&self) -> bool {
        self.read().themes.is_empty()
    }

    // ========== Current Theme ==========

    pub fn current_theme(&self) -> Arc<Theme> {
        let inner = self.read();
        Arc::clone(&inner.themes[inner.current])
    }

    pub fn current_theme_identifier(&self) -> String {
        self.current_theme().identifier().to_string()
    }

    /// Switch themes, ignoring unknown identifiers
    ///
    /// Returns true when the current theme changed and listeners ran.
    pub fn set_current_theme(&self, identifier: &str) -> bool {
        match self.switch_to(identifier) {
            Ok(changed) => changed,
            Err(err) => {
                tracing::debug!("ThemeRegistry::set_current_theme ignored: {}", err);
                false
            }
        }
    }

    /// Switch themes, reporting unknown identifiers
    ///
    /// `Ok(false)` means the theme was already current.
    pub fn try_set_current_theme(&self, identifier: &str) -> Result<bool> {
        let result = self.switch_to(identifier);
        if let Err(err) = &result {
            tracing::warn!("ThemeRegistry::try_set_current_theme failed: {}", err);
        }
        result
    }

    fn switch_to(&self, identifier: &str) -> Result<bool> {
        let (theme, listeners) = {
            let mut inner = self.write();
            let Some(&position) = inner.index.get(identifier) else {
                return Err(ThemeError::UnknownTheme(identifier.to_string()));
            };
            if position == inner.current {
                return Ok(false);
            }
            inner.switch(position)
        };

        self.notify(&theme, &listeners);
        Ok(true)
    }

    /// Advance to the next theme in registration order, wrapping around
    ///
    /// Returns the theme that is current afterwards.
    pub fn cycle_theme(&self) -> Arc<Theme> {
        let (theme, listeners) = {
            let mut inner = self.write();
            let next = (inner.current + 1) % inner.themes.len();
            if next == inner.current {
                return Arc::clone(&inner.themes[next]);
            }
            inner.switch(next)
        };

        self.notify(&theme, &listeners);
        theme
    }

    fn notify(&self, theme: &Theme, listeners: &[ThemeListener]) {
        tracing::debug!(
            "ThemeRegistry: switched to {:?}, notifying {} listeners",
            theme.identifier(),
            listeners.len()
        );
        for listener in listeners {
            listener(theme);
        }
    }

    // ========== Listeners ==========

    /// Register a callback for theme switches
    pub fn add_theme_change_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Theme) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.write().listeners.push((id, Arc::new(listener)));
        id
    }

    /// Unregister a callback; returns false if it was not registered
    ///
    /// A switch already in progress on another thread may still call it once.
    pub fn remove_theme_change_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.write();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _)| *listener_id != id);
        inner.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.read().listeners.len()
    }

    // ========== Registration ==========

    /// Add a theme after the existing ones
    ///
    /// Registering an identical theme again is accepted and changes nothing.
    pub fn register_theme(&self, theme: Theme) -> Result<()> {
        self.register_themes([theme])
    }

    /// Add several themes; either all are accepted or none are
    pub fn register_themes(&self, themes: impl IntoIterator<Item = Theme>) -> Result<()> {
        let themes: Vec<Theme> = themes.into_iter().collect();
        let mut inner = self.write();

        let mut fresh: Vec<Theme> = Vec::with_capacity(themes.len());
        for theme in themes {
            let in_batch = fresh
                .iter()
                .find(|t| t.identifier() == theme.identifier());
            let checked = match in_batch {
                Some(existing) if *existing == theme => Ok(false),
                Some(_) => Err(ThemeError::DuplicateIdentifier(
                    theme.identifier().to_string(),
                )),
                None => inner.check_new(&theme),
            };
            match checked {
                Ok(true) => fresh.push(theme),
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!("ThemeRegistry: rejected batch: {}", err);
                    return Err(err);
                }
            }
        }

        for theme in fresh {
            tracing::debug!("ThemeRegistry: registered {:?}", theme.identifier());
            let position = inner.themes.len();
            inner.index.insert(theme.identifier().to_string(), position);
            inner.themes.push(Arc::new(theme));
        }
        Ok(())
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ThemeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("ThemeRegistry")
            .field("themes", &inner.themes.len())
            .field("current", &inner.themes[inner.current].identifier())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::palette;
    use qmui_core::Color;

    fn custom(id: &str, primary: u32) -> Theme {
        Theme::new(id, id, palette(Color::from_hex(primary), false), false)
    }

    #[test]
    fn test_with_themes_requires_one_theme() {
        assert!(matches!(
            ThemeRegistry::with_themes(Vec::new()),
            Err(ThemeError::Empty)
        ));
    }

    #[test]
    fn test_with_themes_first_is_current() {
        let registry =
            ThemeRegistry::with_themes([custom("a", 0x111111), custom("b", 0x222222)]).unwrap();
        assert_eq!(registry.current_theme_identifier(), "a");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_with_themes_rejects_conflicts() {
        let result = ThemeRegistry::with_themes([custom("a", 0x111111), custom("a", 0x222222)]);
        assert!(matches!(result, Err(ThemeError::DuplicateIdentifier(id)) if id == "a"));
    }

    #[test]
    fn test_single_theme_cycle_stays_put() {
        let registry = ThemeRegistry::with_themes([custom("solo", 0x111111)]).unwrap();
        let calls = Arc::new(AtomicU64::new(0));
        let counter = calls.clone();
        registry.add_theme_change_listener(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(registry.cycle_theme().identifier(), "solo");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_register_batch_is_all_or_nothing() {
        let registry = ThemeRegistry::new();
        let result =
            registry.register_themes([custom("forest", 0x2E7D32), custom("dark", 0x000000)]);

        assert!(matches!(result, Err(ThemeError::DuplicateIdentifier(id)) if id == "dark"));
        assert!(!registry.contains("forest"));
        assert_eq!(registry.len(), ThemePreset::all().len());
    }
}
