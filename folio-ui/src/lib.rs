//! folio-ui - client-side behaviour of the portfolio sections
//!
//! Rendering is external: the runtime reports viewport intersections into a
//! [`ViewportRegistry`] and receives per-frame property values through a
//! [`Renderer`]. This crate decides *when* each element moves and *where* it
//! is at every instant, and owns the contact form's state machine.

pub mod contact;
pub mod orchestrator;
pub mod sections;
pub mod sequence;
pub mod variants;
pub mod visibility;

pub use contact::{ContactForm, FormError, Notice, NoticeKind, SubmissionOutcome};
pub use orchestrator::{
    apply_sequence, mount_section, MountedSection, Renderer, RunOutcome, SectionAnimator,
    SequencePlan, Timeline, Transition,
};
pub use sections::{footer_copyright, SectionDefinition, SectionKind, Trigger};
pub use sequence::{AnimationSequenceSpec, SequenceBuilder, SequenceItem, TargetId};
pub use variants::{PropertySet, TransitionSpec, VariantName, Variants};
pub use visibility::{
    observe, ObservationId, ObserveOptions, ViewportRegistry, VisibilityObserver, VisibilityState,
};
