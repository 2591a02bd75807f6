//! Visibility-triggered orchestration of staggered reveals
//!
//! [`apply_sequence`] is the pure decision: before the section has been seen
//! every item is pinned at its hidden values; afterwards each item gets a
//! [`Transition`] starting at its delay offset. [`SectionAnimator`] is the
//! async driver that waits for visibility and pushes frames into a
//! [`Renderer`] until everything has settled or the section is unmounted.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use folio_common::{Easing, Result};

use crate::sections::{SectionDefinition, Trigger};
use crate::sequence::{AnimationSequenceSpec, TargetId};
use crate::variants::{PropertySet, VariantName};
use crate::visibility::{ObservationId, ViewportRegistry, VisibilityState};

/// Default frame pacing (60 fps)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// One scheduled hidden → visible interpolation
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub target: TargetId,
    pub from: PropertySet,
    pub to: PropertySet,
    /// Offset from the trigger instant
    pub start: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }

    /// Linear progress in [0, 1] at `elapsed` since the trigger
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if elapsed < self.start {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let into = (elapsed - self.start).as_secs_f32();
        (into / self.duration.as_secs_f32()).min(1.0)
    }

    /// Interpolated properties at `elapsed` since the trigger
    pub fn sample(&self, elapsed: Duration) -> PropertySet {
        let progress = self.progress(elapsed);
        if progress >= 1.0 {
            return self.to;
        }
        if progress <= 0.0 {
            return self.from;
        }
        self.from.lerp(&self.to, self.easing.apply(progress))
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.end()
    }
}

/// All transitions of one trigger, in declared order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    transitions: Vec<Transition>,
}

impl Timeline {
    /// Schedule every item of `spec` relative to the trigger instant
    pub fn from_spec(spec: &AnimationSequenceSpec) -> Self {
        Self::from_specs(std::iter::once(spec))
    }

    /// Several sibling sequences sharing one trigger
    ///
    /// Each sequence keeps its own stagger; there is no ordering across them.
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a AnimationSequenceSpec>) -> Self {
        let transitions = specs
            .into_iter()
            .flat_map(|spec| spec.iter())
            .map(|item| Transition {
                target: item.target.clone(),
                from: item.variants.hidden,
                to: *item.variants.get(item.animate_to),
                start: item.delay,
                duration: item.variants.transition.duration,
                easing: item.variants.transition.easing,
            })
            .collect();
        Self { transitions }
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Values of every target at `elapsed` since the trigger
    ///
    /// Items whose start lies in the future hold their hidden values.
    pub fn sample(&self, elapsed: Duration) -> Vec<(TargetId, PropertySet)> {
        self.transitions
            .iter()
            .map(|t| (t.target.clone(), t.sample(elapsed)))
            .collect()
    }

    pub fn total_duration(&self) -> Duration {
        self.transitions
            .iter()
            .map(Transition::end)
            .max()
            .unwrap_or_default()
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.total_duration()
    }
}

/// What a sequence should be doing right now
#[derive(Debug, Clone, PartialEq)]
pub enum SequencePlan {
    /// Not yet seen: every item held at its hidden values
    Pinned(Vec<(TargetId, PropertySet)>),
    /// Seen: transitions relative to the trigger instant
    Scheduled(Timeline),
}

/// Hidden values for every item of `spec`
pub fn pinned_values(spec: &AnimationSequenceSpec) -> Vec<(TargetId, PropertySet)> {
    spec.iter()
        .map(|item| (item.target.clone(), *item.variants.get(VariantName::Hidden)))
        .collect()
}

/// Decide between pinning and scheduling based on visibility
pub fn apply_sequence(spec: &AnimationSequenceSpec, state: &VisibilityState) -> SequencePlan {
    if state.has_been_visible() {
        SequencePlan::Scheduled(Timeline::from_spec(spec))
    } else {
        SequencePlan::Pinned(pinned_values(spec))
    }
}

/// External renderer receiving per-frame property values
pub trait Renderer: Send {
    fn apply(&mut self, target: &TargetId, properties: &PropertySet);
}

/// How a section animation run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every item reached its visible values
    Completed,
    /// Unmounted (or observation dropped) before finishing
    Cancelled,
}

/// Async driver for one section's sequences
#[derive(Debug, Clone)]
pub struct SectionAnimator {
    sequences: Vec<AnimationSequenceSpec>,
    frame_interval: Duration,
}

impl SectionAnimator {
    pub fn new(sequences: Vec<AnimationSequenceSpec>) -> Self {
        Self {
            sequences,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }

    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval.max(Duration::from_millis(1));
        self
    }

    pub fn sequences(&self) -> &[AnimationSequenceSpec] {
        &self.sequences
    }

    /// Pin, wait for visibility, then play frames until settled
    ///
    /// Cancellation at any point ends the run quietly with
    /// [`RunOutcome::Cancelled`]; no further frames are applied.
    pub async fn run<R: Renderer>(
        &self,
        renderer: &mut R,
        mut visibility: VisibilityState,
        cancel: CancellationToken,
    ) -> RunOutcome {
        for spec in &self.sequences {
            for (target, hidden) in pinned_values(spec) {
                renderer.apply(&target, &hidden);
            }
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return RunOutcome::Cancelled,
            seen = visibility.wait_visible() => {
                if seen.is_err() {
                    return RunOutcome::Cancelled;
                }
            }
        }

        let timeline = Timeline::from_specs(&self.sequences);
        debug!(
            transitions = timeline.transitions().len(),
            total_ms = timeline.total_duration().as_millis() as u64,
            "Section reveal started"
        );

        let started = Instant::now();
        let mut ticker = tokio::time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Section reveal cancelled");
                    return RunOutcome::Cancelled;
                }
                _ = ticker.tick() => {
                    let elapsed = started.elapsed();
                    for (target, properties) in timeline.sample(elapsed) {
                        renderer.apply(&target, &properties);
                    }
                    if timeline.is_complete(elapsed) {
                        debug!("Section reveal completed");
                        return RunOutcome::Completed;
                    }
                }
            }
        }
    }
}

/// A section whose animator is running on its own task
pub struct MountedSection {
    root: TargetId,
    cancel: CancellationToken,
    registry: ViewportRegistry,
    observation: Option<ObservationId>,
    task: Option<JoinHandle<RunOutcome>>,
}

impl MountedSection {
    pub fn root(&self) -> &TargetId {
        &self.root
    }

    /// Cancel pending transitions and this section's visibility observation
    ///
    /// A later mount of the same root keeps its own observation. Idempotent;
    /// never fails.
    pub fn unmount(&self) {
        self.cancel.cancel();
        if let Some(id) = self.observation {
            self.registry.release(&self.root, id);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the animator task to end
    pub async fn finished(mut self) -> RunOutcome {
        match self.task.take() {
            Some(task) => task.await.unwrap_or(RunOutcome::Cancelled),
            None => RunOutcome::Cancelled,
        }
    }
}

impl Drop for MountedSection {
    fn drop(&mut self) {
        // Dropping the handle is an unmount
        if !self.is_finished() {
            self.unmount();
        }
    }
}

/// Observe a section's root (if it waits for scroll) and start its animator
pub fn mount_section<R>(
    definition: &SectionDefinition,
    registry: &ViewportRegistry,
    mut renderer: R,
) -> Result<MountedSection>
where
    R: Renderer + 'static,
{
    let root = TargetId::from(definition.id);
    let (observation, visibility) = match definition.trigger {
        Trigger::OnMount => (None, VisibilityState::always_visible()),
        Trigger::InView(options) => {
            let (id, state) = registry.observe_scoped(root.clone(), options)?;
            (Some(id), state)
        }
    };

    let animator = SectionAnimator::new(definition.sequences.clone());
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();

    debug!(section = %root, "Mounting section");
    let task = tokio::spawn(async move {
        animator.run(&mut renderer, visibility, task_cancel).await
    });

    Ok(MountedSection {
        root,
        cancel,
        registry: registry.clone(),
        observation,
        task: Some(task),
    })
}
