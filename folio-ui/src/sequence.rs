//! Declared animation sequences
//!
//! A sequence is the ordered list of sibling elements a section reveals,
//! each with its variant pair and a delay offset from the trigger instant.
//! Offsets never decrease along the list, which is what makes the siblings
//! appear one after another (the stagger).

use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use folio_common::time::secs_to_duration;
use folio_common::{Error, Result};

use crate::variants::{VariantName, Variants};

/// Identifier of a rendered element (section root or animated child)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TargetId(Cow<'static, str>);

impl TargetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TargetId {
    fn from(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }
}

impl From<String> for TargetId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One element of a sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceItem {
    pub target: TargetId,
    pub variants: Variants,
    /// Variant the element travels to once triggered
    pub animate_to: VariantName,
    /// Offset from the trigger instant
    pub delay: Duration,
}

impl SequenceItem {
    /// When this item's transition is over, relative to the trigger
    pub fn end(&self) -> Duration {
        self.delay + self.variants.transition.duration
    }
}

/// Immutable, validated sequence of sibling items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationSequenceSpec {
    items: Vec<SequenceItem>,
}

impl AnimationSequenceSpec {
    pub fn builder() -> SequenceBuilder {
        SequenceBuilder::default()
    }

    /// Staggered children: item `i` starts at `lead + i * stagger` seconds
    pub fn staggered<I, T>(lead: f32, stagger: f32, children: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, Variants)>,
        T: Into<TargetId>,
    {
        children
            .into_iter()
            .fold(Self::builder().delay_children(lead).stagger(stagger), |b, (t, v)| {
                b.child(t, v)
            })
            .build()
    }

    pub fn items(&self) -> &[SequenceItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequenceItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Largest delay offset (the last item's, since offsets never decrease)
    pub fn max_delay(&self) -> Duration {
        self.items.last().map(|i| i.delay).unwrap_or_default()
    }

    /// Time from trigger until every item has settled
    pub fn total_duration(&self) -> Duration {
        self.items
            .iter()
            .map(SequenceItem::end)
            .max()
            .unwrap_or_default()
    }
}

/// Builder for [`AnimationSequenceSpec`]
#[derive(Debug, Clone, Default)]
pub struct SequenceBuilder {
    items: Vec<SequenceItem>,
    lead: Duration,
    stagger: Duration,
    children: u32,
}

impl SequenceBuilder {
    /// Offset before the first staggered child starts (seconds)
    pub fn delay_children(mut self, secs: f32) -> Self {
        self.lead = secs_to_duration(secs);
        self
    }

    /// Gap between consecutive staggered children (seconds)
    pub fn stagger(mut self, secs: f32) -> Self {
        self.stagger = secs_to_duration(secs);
        self
    }

    /// Next staggered child, revealed to its visible variant
    pub fn child(mut self, target: impl Into<TargetId>, variants: Variants) -> Self {
        let delay = self.lead + self.stagger * self.children;
        self.children += 1;
        self.items.push(SequenceItem {
            target: target.into(),
            variants,
            animate_to: VariantName::Visible,
            delay,
        });
        self
    }

    /// Item with an explicit delay (seconds), outside the stagger count
    pub fn at(mut self, target: impl Into<TargetId>, variants: Variants, delay_secs: f32) -> Self {
        self.items.push(SequenceItem {
            target: target.into(),
            variants,
            animate_to: VariantName::Visible,
            delay: secs_to_duration(delay_secs),
        });
        self
    }

    /// Validate and freeze
    ///
    /// Fails if a delay is smaller than its predecessor's or a target repeats.
    pub fn build(self) -> Result<AnimationSequenceSpec> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(&item.target) {
                return Err(Error::InvalidInput(format!(
                    "target '{}' appears twice in one sequence",
                    item.target
                )));
            }
        }

        for pair in self.items.windows(2) {
            if pair[1].delay < pair[0].delay {
                return Err(Error::InvalidInput(format!(
                    "delay of '{}' ({:?}) is earlier than '{}' ({:?})",
                    pair[1].target, pair[1].delay, pair[0].target, pair[0].delay
                )));
            }
        }

        Ok(AnimationSequenceSpec { items: self.items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger_offsets() {
        let spec = AnimationSequenceSpec::staggered(
            0.1,
            0.2,
            [
                ("about.heading", Variants::fade_up()),
                ("about.divider", Variants::fade_up()),
                ("about.body", Variants::fade_up()),
            ],
        )
        .unwrap();

        let delays: Vec<Duration> = spec.iter().map(|i| i.delay).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(300),
                Duration::from_millis(500)
            ]
        );
        assert_eq!(spec.max_delay(), Duration::from_millis(500));
        assert_eq!(spec.total_duration(), Duration::from_millis(1300));
    }

    #[test]
    fn test_items_keep_declared_order() {
        let spec = AnimationSequenceSpec::builder()
            .child("a", Variants::fade_up())
            .child("b", Variants::fade_up())
            .at("c", Variants::pop(), 1.0)
            .build()
            .unwrap();
        let targets: Vec<&str> = spec.iter().map(|i| i.target.as_str()).collect();
        assert_eq!(targets, vec!["a", "b", "c"]);
        assert!(spec.iter().all(|i| i.animate_to == VariantName::Visible));
    }

    #[test]
    fn test_decreasing_delay_rejected() {
        let result = AnimationSequenceSpec::builder()
            .at("late", Variants::fade_up(), 0.5)
            .at("early", Variants::fade_up(), 0.2)
            .build();
        let err = result.unwrap_err().to_string();
        assert!(err.contains("early"), "{}", err);
    }

    #[test]
    fn test_equal_delays_allowed() {
        let spec = AnimationSequenceSpec::builder()
            .at("one", Variants::pop(), 0.0)
            .at("two", Variants::pop(), 0.0)
            .build()
            .unwrap();
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.total_duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_duplicate_target_rejected() {
        let result = AnimationSequenceSpec::builder()
            .child("same", Variants::fade_up())
            .child("same", Variants::fade_up())
            .build();
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty_sequence() {
        let spec = AnimationSequenceSpec::builder().build().unwrap();
        assert!(spec.is_empty());
        assert_eq!(spec.max_delay(), Duration::ZERO);
        assert_eq!(spec.total_duration(), Duration::ZERO);
    }

    #[test]
    fn test_last_start_within_budget() {
        let spec = AnimationSequenceSpec::staggered(
            0.1,
            0.1,
            (0..6).map(|i| (format!("skills.card.{}", i), Variants::fade_up())),
        )
        .unwrap();
        let last = spec.items().last().unwrap();
        let budget = Variants::fade_up().transition.duration + spec.max_delay();
        assert!(last.delay <= budget);
        assert_eq!(spec.total_duration(), budget);
    }

    #[test]
    fn test_target_id_display() {
        assert_eq!(TargetId::from("hero").to_string(), "hero");
        assert_eq!(TargetId::from(String::from("x")).as_str(), "x");
    }
}
