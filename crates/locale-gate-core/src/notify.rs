// crates/locale-gate-core/src/notify.rs
// ============================================================================
// Module: Locale Switch Notifier
// Description: Active-language state with observer registration and dispatch.
// Purpose: Propagate language switches to every consumer from one owner.
// Dependencies: crate::{catalog, identifiers, time}, thiserror, tracing
// ============================================================================

//! ## Overview
//! The notifier owns the single "current active language" value and the
//! observer list. A switch validates the requested tag against the live
//! catalog, persists the preference, and then invokes every listener that
//! was registered at the moment of the call, synchronously and in
//! registration order. One listener failing is logged and never prevents
//! the remaining listeners from running.
//!
//! Listener callbacks run outside the notifier's internal lock, so a
//! listener may read the active language or unsubscribe itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::Weak;

use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::catalog::CatalogHandle;
use crate::identifiers::LanguageTag;
use crate::time::Timestamp;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Transition record delivered to listeners on a switch.
///
/// Ephemeral; exists only to drive notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleChangeEvent {
    /// Language that was active before the switch.
    pub previous: LanguageTag,
    /// Language that is active after the switch.
    pub next: LanguageTag,
    /// When the switch was recorded.
    pub at: Timestamp,
}

// ============================================================================
// SECTION: Listeners
// ============================================================================

/// Failure reported by a listener during notification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("listener failed: {0}")]
pub struct ListenerError(pub String);

/// Boxed listener callback.
type Listener = Box<dyn FnMut(&LocaleChangeEvent) -> Result<(), ListenerError> + Send>;

/// One registered listener with its subscription identifier.
struct ListenerEntry {
    /// Identifier handed out to the subscription handle.
    id: u64,
    /// The callback, individually locked so dispatch can run outside the
    /// notifier state lock.
    callback: Arc<Mutex<Listener>>,
}

/// Handle returned by [`LocaleSwitchNotifier::on_change`].
///
/// Dropping the handle without calling [`Subscription::unsubscribe`] keeps
/// the listener registered.
#[derive(Debug)]
pub struct Subscription {
    /// Identifier of the listener this handle controls.
    id: u64,
    /// Weak link back to the notifier state; a dead link makes unsubscribe a
    /// no-op.
    state: Weak<Mutex<NotifierState>>,
}

impl Subscription {
    /// Removes the listener this handle registered.
    pub fn unsubscribe(self) {
        if let Some(state) = self.state.upgrade() {
            let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
            guard.listeners.retain(|entry| entry.id != self.id);
        }
    }
}

// ============================================================================
// SECTION: Notifier
// ============================================================================

/// Mutable notifier internals behind one lock.
struct NotifierState {
    /// Currently active language.
    active: LanguageTag,
    /// Listeners in registration order.
    listeners: Vec<ListenerEntry>,
    /// Next subscription identifier to hand out.
    next_subscription: u64,
}

/// Process-wide active-language state plus the observer list.
///
/// # Invariants
/// - The active language always names a table loaded in the catalog the
///   notifier was constructed with (or a later replacement that still
///   carries it).
/// - Listeners are notified in registration order, synchronously with
///   [`LocaleSwitchNotifier::set_active`].
pub struct LocaleSwitchNotifier {
    /// Live catalog used to validate switch targets.
    catalog: CatalogHandle,
    /// Persistence seam for the user's locale preference.
    preferences: Arc<dyn PreferenceStore>,
    /// Active tag and observer list.
    state: Arc<Mutex<NotifierState>>,
}

impl LocaleSwitchNotifier {
    /// Creates a notifier over `catalog`, seeding the active language from
    /// the persisted preference when it names a loaded language, otherwise
    /// from the catalog default.
    #[must_use]
    pub fn new(catalog: CatalogHandle, preferences: Arc<dyn PreferenceStore>) -> Self {
        let snapshot = catalog.current();
        let active = match preferences.load() {
            Some(saved) if snapshot.contains_language(&saved) => saved,
            Some(saved) => {
                debug!(saved = %saved, "persisted locale preference not loaded; using default");
                snapshot.default_language().clone()
            }
            None => snapshot.default_language().clone(),
        };
        Self {
            catalog,
            preferences,
            state: Arc::new(Mutex::new(NotifierState {
                active,
                listeners: Vec::new(),
                next_subscription: 1,
            })),
        }
    }

    /// Returns the currently active language.
    #[must_use]
    pub fn active(&self) -> LanguageTag {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active
            .clone()
    }

    /// Registers a listener invoked on every subsequent switch.
    ///
    /// Listeners run in registration order. A listener returning an error is
    /// logged individually and does not affect other listeners.
    pub fn on_change(
        &self,
        listener: impl FnMut(&LocaleChangeEvent) -> Result<(), ListenerError> + Send + 'static,
    ) -> Subscription {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let id = guard.next_subscription;
        guard.next_subscription += 1;
        guard.listeners.push(ListenerEntry {
            id,
            callback: Arc::new(Mutex::new(Box::new(listener))),
        });
        Subscription {
            id,
            state: Arc::downgrade(&self.state),
        }
    }

    /// Switches the active language and notifies listeners.
    ///
    /// Switching to the already-active language is a no-op: nothing is
    /// persisted and no listener runs. On a real switch the preference is
    /// persisted (a store failure is logged, not fatal) and every listener
    /// registered before the call is invoked exactly once, in registration
    /// order, before this method returns.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedLanguageError`] when `next` names no loaded
    /// language; the active language is left unchanged.
    pub fn set_active(
        &self,
        next: LanguageTag,
    ) -> Result<LocaleChangeEvent, UnsupportedLanguageError> {
        let snapshot = self.catalog.current();
        if !snapshot.contains_language(&next) {
            return Err(UnsupportedLanguageError {
                language: next,
            });
        }

        let (event, callbacks) = {
            let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if guard.active == next {
                let event = LocaleChangeEvent {
                    previous: next.clone(),
                    next,
                    at: Timestamp::now(),
                };
                return Ok(event);
            }
            let previous = std::mem::replace(&mut guard.active, next.clone());
            let event = LocaleChangeEvent {
                previous,
                next,
                at: Timestamp::now(),
            };
            let callbacks: Vec<(u64, Arc<Mutex<Listener>>)> = guard
                .listeners
                .iter()
                .map(|entry| (entry.id, Arc::clone(&entry.callback)))
                .collect();
            (event, callbacks)
        };

        if let Err(err) = self.preferences.save(&event.next) {
            warn!(language = %event.next, error = %err, "failed to persist locale preference");
        }

        for (id, callback) in callbacks {
            let mut callback = callback.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(err) = callback(&event) {
                warn!(subscription = id, error = %err, "locale change listener failed");
            }
        }

        Ok(event)
    }
}

// ============================================================================
// SECTION: Preference Store
// ============================================================================

/// Persistence seam for the user's locale preference.
///
/// Implementations decide the medium (file, cookie, profile field); the
/// notifier only loads at construction and saves on a successful switch.
pub trait PreferenceStore: Send + Sync {
    /// Loads the persisted preference, if any readable one exists.
    fn load(&self) -> Option<LanguageTag>;

    /// Persists the preference.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] when the medium rejects the write.
    fn save(&self, language: &LanguageTag) -> Result<(), PreferenceError>;
}

/// Failure writing a locale preference.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("preference store failure: {0}")]
pub struct PreferenceError(pub String);

/// In-memory preference store for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    /// Last saved preference.
    slot: Mutex<Option<LanguageTag>>,
}

impl MemoryPreferenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a preference.
    #[must_use]
    pub fn with_preference(language: LanguageTag) -> Self {
        Self {
            slot: Mutex::new(Some(language)),
        }
    }

    /// Returns the last saved preference.
    #[must_use]
    pub fn saved(&self) -> Option<LanguageTag> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<LanguageTag> {
        self.saved()
    }

    fn save(&self, language: &LanguageTag) -> Result<(), PreferenceError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(language.clone());
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rejected switch to a language with no loaded table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("language '{language}' is not loaded in the catalog")]
pub struct UnsupportedLanguageError {
    /// Tag that named no loaded table.
    pub language: LanguageTag,
}
