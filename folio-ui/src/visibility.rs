//! Viewport visibility observation with trigger-once semantics
//!
//! The rendering runtime owns the actual intersection geometry. It forwards
//! each intersection-ratio change to [`ViewportRegistry::report_intersection`]
//! (or directly to a [`VisibilityObserver`]); sections hold the matching
//! [`VisibilityState`] and wait on it without blocking anything.
//!
//! `has_been_visible` is sticky: it flips false → true the first time the
//! visible fraction reaches the threshold and never flips back, even if the
//! element scrolls out and in again.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, warn};

use folio_common::{Error, Result};

use crate::sequence::TargetId;

/// Fraction of the element that must be visible before it counts as seen
pub const DEFAULT_THRESHOLD: f32 = 0.2;

/// Observation policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserveOptions {
    /// Visible fraction in [0, 1]; 0 means "any pixel"
    pub threshold: f32,
    /// Stop observing after the first crossing
    pub trigger_once: bool,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            trigger_once: true,
        }
    }
}

impl ObserveOptions {
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_nan() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidInput(format!(
                "visibility threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    fn is_crossed(&self, ratio: f32) -> bool {
        if ratio.is_nan() {
            return false;
        }
        if self.threshold == 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Visibility {
    has_been_visible: bool,
    in_view: bool,
}

/// Returned by [`VisibilityState::wait_visible`] when observation ended first
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("observation ended before the element became visible")]
pub struct ObservationClosed;

/// Runtime-facing half of an observation
#[derive(Debug)]
pub struct VisibilityObserver {
    root: TargetId,
    options: ObserveOptions,
    tx: watch::Sender<Visibility>,
}

impl VisibilityObserver {
    pub fn root(&self) -> &TargetId {
        &self.root
    }

    pub fn options(&self) -> ObserveOptions {
        self.options
    }

    /// Feed a new intersection ratio
    ///
    /// Returns true only for the report that made the element visible for
    /// the first time.
    pub fn report(&self, ratio: f32) -> bool {
        let crossed = self.options.is_crossed(ratio);
        let trigger_once = self.options.trigger_once;
        let mut fired = false;

        self.tx.send_if_modified(|state| {
            let before = *state;

            if crossed && !state.has_been_visible {
                state.has_been_visible = true;
                fired = true;
            }

            // Once-observations stay "in view" after firing
            state.in_view = crossed || (trigger_once && state.has_been_visible);

            *state != before
        });

        if fired {
            debug!(root = %self.root, ratio, "Element became visible");
        }
        fired
    }

    /// Whether the became-visible event has fired
    pub fn has_fired(&self) -> bool {
        self.tx.borrow().has_been_visible
    }

    /// Another handle onto this observation
    pub fn state(&self) -> VisibilityState {
        VisibilityState {
            rx: self.tx.subscribe(),
        }
    }
}

/// Section-facing reactive handle
#[derive(Debug, Clone)]
pub struct VisibilityState {
    rx: watch::Receiver<Visibility>,
}

impl VisibilityState {
    /// Handle for sections that animate on mount without waiting for scroll
    pub fn always_visible() -> Self {
        let (_tx, rx) = watch::channel(Visibility {
            has_been_visible: true,
            in_view: true,
        });
        Self { rx }
    }

    /// Sticky: true from the first threshold crossing onward
    pub fn has_been_visible(&self) -> bool {
        self.rx.borrow().has_been_visible
    }

    /// Current in-view flag (sticky for trigger-once observations)
    pub fn in_view(&self) -> bool {
        self.rx.borrow().in_view
    }

    /// Wait until the element has been visible
    ///
    /// Resolves immediately if it already was. Fails with
    /// [`ObservationClosed`] if the observer is dropped (unmount) first.
    pub async fn wait_visible(&mut self) -> std::result::Result<(), ObservationClosed> {
        if self.has_been_visible() {
            return Ok(());
        }
        self.rx
            .wait_for(|state| state.has_been_visible)
            .await
            .map(|_| ())
            .map_err(|_| ObservationClosed)
    }
}

/// Start observing `root`
///
/// Registration is passive: nothing happens until the runtime reports an
/// intersection ratio to the returned observer.
pub fn observe(
    root: impl Into<TargetId>,
    options: ObserveOptions,
) -> Result<(VisibilityObserver, VisibilityState)> {
    options.validate()?;
    let (tx, rx) = watch::channel(Visibility::default());
    let observer = VisibilityObserver {
        root: root.into(),
        options,
        tx,
    };
    Ok((observer, VisibilityState { rx }))
}

/// Identifies one registration in a [`ViewportRegistry`]
///
/// A root can be observed again after a remount; the id tells the two
/// registrations apart so releasing the old one leaves the new one alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservationId(u64);

#[derive(Debug)]
struct Registration {
    id: ObservationId,
    observer: VisibilityObserver,
}

/// All live observations of a page, keyed by root element
///
/// Cheap to clone; clones share the same observations.
#[derive(Debug, Clone, Default)]
pub struct ViewportRegistry {
    observers: Arc<Mutex<HashMap<TargetId, Registration>>>,
    next_id: Arc<AtomicU64>,
}

impl ViewportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observation; replaces any previous one for the same root
    pub fn observe(
        &self,
        root: impl Into<TargetId>,
        options: ObserveOptions,
    ) -> Result<VisibilityState> {
        self.observe_scoped(root, options).map(|(_, state)| state)
    }

    /// Register an observation and return the id that owns it
    ///
    /// Pass the id to [`ViewportRegistry::release`] to end this registration
    /// without touching a later one for the same root.
    pub fn observe_scoped(
        &self,
        root: impl Into<TargetId>,
        options: ObserveOptions,
    ) -> Result<(ObservationId, VisibilityState)> {
        let (observer, state) = observe(root, options)?;
        let root = observer.root().clone();
        let id = ObservationId(self.next_id.fetch_add(1, Ordering::Relaxed));

        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        if observers.insert(root.clone(), Registration { id, observer }).is_some() {
            warn!(root = %root, "Replacing existing visibility observation");
        }
        Ok((id, state))
    }

    /// Forward an intersection change from the runtime
    ///
    /// Unknown roots are ignored. Trigger-once observations are dropped after
    /// they fire, so later reports for that root are no-ops.
    pub fn report_intersection(&self, root: &TargetId, ratio: f32) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(Registration { observer, .. }) = observers.get(root) else {
            return false;
        };

        let fired = observer.report(ratio);
        if observer.options().trigger_once && observer.has_fired() {
            observers.remove(root);
        }
        fired
    }

    /// Stop observing `root`; pending waiters see [`ObservationClosed`]
    pub fn unobserve(&self, root: &TargetId) -> bool {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(root)
            .is_some()
    }

    /// Stop observing `root` only if `id` is still its registration
    pub fn release(&self, root: &TargetId, id: ObservationId) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        match observers.get(root) {
            Some(registration) if registration.id == id => {
                observers.remove(root);
                true
            }
            Some(_) => {
                debug!(root = %root, "Observation already replaced, keeping the newer one");
                false
            }
            None => false,
        }
    }

    pub fn is_observing(&self, root: &TargetId) -> bool {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(root)
    }

    /// Number of live observations
    pub fn len(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ObserveOptions::default();
        assert_eq!(options.threshold, 0.2);
        assert!(options.trigger_once);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        for threshold in [-0.1, 1.5, f32::NAN] {
            let result = observe("about", ObserveOptions::with_threshold(threshold));
            assert!(matches!(result, Err(Error::InvalidInput(_))), "{}", threshold);
        }
        assert!(observe("about", ObserveOptions::with_threshold(0.0)).is_ok());
        assert!(observe("about", ObserveOptions::with_threshold(1.0)).is_ok());
    }

    #[test]
    fn test_fires_once_and_stays_visible() {
        let (observer, state) = observe("about", ObserveOptions::default()).unwrap();
        assert!(!state.has_been_visible());

        assert!(!observer.report(0.1));
        assert!(!state.has_been_visible());

        assert!(observer.report(0.2));
        assert!(state.has_been_visible());

        // Leave and re-enter: no second event, never reverts
        assert!(!observer.report(0.0));
        assert!(state.has_been_visible());
        assert!(state.in_view());
        assert!(!observer.report(0.9));
        assert!(state.has_been_visible());
    }

    #[test]
    fn test_continuous_observation_tracks_in_view() {
        let options = ObserveOptions {
            threshold: 0.5,
            trigger_once: false,
        };
        let (observer, state) = observe("skills", options).unwrap();

        assert!(observer.report(0.6));
        assert!(state.in_view());

        assert!(!observer.report(0.1));
        assert!(!state.in_view());
        assert!(state.has_been_visible(), "has_been_visible is sticky");

        assert!(!observer.report(0.7), "event fires once even when not trigger_once");
        assert!(state.in_view());
    }

    #[test]
    fn test_zero_threshold_needs_a_visible_pixel() {
        let (observer, state) = observe("footer", ObserveOptions::with_threshold(0.0)).unwrap();
        assert!(!observer.report(0.0));
        assert!(!state.has_been_visible());
        assert!(observer.report(0.01));
    }

    #[test]
    fn test_nan_ratio_ignored() {
        let (observer, state) = observe("about", ObserveOptions::default()).unwrap();
        assert!(!observer.report(f32::NAN));
        assert!(!state.has_been_visible());
    }

    #[tokio::test]
    async fn test_wait_visible_resolves_on_crossing() {
        let (observer, mut state) = observe("contact", ObserveOptions::default()).unwrap();

        let waiter = tokio::spawn(async move { state.wait_visible().await });
        tokio::task::yield_now().await;
        observer.report(0.3);

        assert_eq!(waiter.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_wait_visible_fails_when_observer_dropped() {
        let (observer, mut state) = observe("contact", ObserveOptions::default()).unwrap();
        drop(observer);
        assert_eq!(state.wait_visible().await, Err(ObservationClosed));
    }

    #[tokio::test]
    async fn test_always_visible() {
        let mut state = VisibilityState::always_visible();
        assert!(state.has_been_visible());
        assert_eq!(state.wait_visible().await, Ok(()));
    }

    #[test]
    fn test_registry_drops_once_observation_after_firing() {
        let registry = ViewportRegistry::new();
        let about = TargetId::from("about");
        let state = registry.observe("about", ObserveOptions::default()).unwrap();
        assert!(registry.is_observing(&about));

        assert!(!registry.report_intersection(&about, 0.05));
        assert!(registry.is_observing(&about));

        assert!(registry.report_intersection(&about, 0.5));
        assert!(!registry.is_observing(&about));
        assert!(state.has_been_visible());

        // Later reports are no-ops
        assert!(!registry.report_intersection(&about, 0.5));
        assert!(state.has_been_visible());
    }

    #[test]
    fn test_registry_sections_are_independent() {
        let registry = ViewportRegistry::new();
        let about = registry.observe("about", ObserveOptions::default()).unwrap();
        let skills = registry.observe("skills", ObserveOptions::default()).unwrap();

        registry.report_intersection(&TargetId::from("skills"), 1.0);
        assert!(skills.has_been_visible());
        assert!(!about.has_been_visible());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_unknown_root_ignored() {
        let registry = ViewportRegistry::new();
        assert!(!registry.report_intersection(&TargetId::from("nowhere"), 1.0));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_registry_unobserve_closes_waiters() {
        let registry = ViewportRegistry::new();
        let mut state = registry.observe("projects", ObserveOptions::default()).unwrap();
        assert!(registry.unobserve(&TargetId::from("projects")));
        assert_eq!(state.wait_visible().await, Err(ObservationClosed));
        assert!(!registry.unobserve(&TargetId::from("projects")));
    }

    #[test]
    fn test_release_ignores_replaced_registration() {
        let registry = ViewportRegistry::new();
        let about = TargetId::from("about");
        let (old_id, _old) = registry
            .observe_scoped("about", ObserveOptions::default())
            .unwrap();
        let (new_id, new_state) = registry
            .observe_scoped("about", ObserveOptions::default())
            .unwrap();
        assert_ne!(old_id, new_id);

        assert!(!registry.release(&about, old_id));
        assert!(registry.is_observing(&about));

        assert!(registry.report_intersection(&about, 1.0));
        assert!(new_state.has_been_visible());
    }

    #[tokio::test]
    async fn test_release_own_registration_closes_waiters() {
        let registry = ViewportRegistry::new();
        let projects = TargetId::from("projects");
        let (id, mut state) = registry
            .observe_scoped("projects", ObserveOptions::default())
            .unwrap();

        assert!(registry.release(&projects, id));
        assert!(!registry.is_observing(&projects));
        assert_eq!(state.wait_visible().await, Err(ObservationClosed));
        assert!(!registry.release(&projects, id));
    }
}
