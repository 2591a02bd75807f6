//! Animation variants
//!
//! A variant pair is the fixed hidden/visible property set of an element plus
//! the transition used to travel between them. The presets below are the ones
//! the portfolio sections use.

use serde::Serialize;
use std::time::Duration;

use folio_common::time::secs_to_duration;
use folio_common::Easing;

/// Animated visual properties of one element
///
/// Offsets are in CSS pixels, rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropertySet {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub rotate: f32,
}

impl PropertySet {
    /// Fully shown, untransformed
    pub const IDENTITY: PropertySet = PropertySet {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotate: 0.0,
    };

    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub const fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    pub const fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub const fn with_rotate(mut self, rotate: f32) -> Self {
        self.rotate = rotate;
        self
    }

    /// Linearly interpolate every property by factor t
    ///
    /// t is not clamped so overshooting easings carry through.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            opacity: mix(self.opacity, other.opacity),
            x: mix(self.x, other.x),
            y: mix(self.y, other.y),
            scale: mix(self.scale, other.scale),
            rotate: mix(self.rotate, other.rotate),
        }
    }
}

impl Default for PropertySet {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Which end of a variant pair an element is heading to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantName {
    Hidden,
    Visible,
}

/// Duration and curve of a hidden → visible transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionSpec {
    /// Ease-out transition of the given length in seconds
    pub fn ease_out(secs: f32) -> Self {
        Self {
            duration: secs_to_duration(secs),
            easing: Easing::EaseOut,
        }
    }
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self::ease_out(0.3)
    }
}

/// A named hidden/visible pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variants {
    pub name: &'static str,
    pub hidden: PropertySet,
    pub visible: PropertySet,
    pub transition: TransitionSpec,
}

impl Variants {
    pub fn new(
        name: &'static str,
        hidden: PropertySet,
        visible: PropertySet,
        transition: TransitionSpec,
    ) -> Self {
        Self {
            name,
            hidden,
            visible,
            transition,
        }
    }

    /// Property values for one end of the pair
    pub fn get(&self, variant: VariantName) -> &PropertySet {
        match variant {
            VariantName::Hidden => &self.hidden,
            VariantName::Visible => &self.visible,
        }
    }

    /// Override the transition length (seconds)
    pub fn with_duration(mut self, secs: f32) -> Self {
        self.transition.duration = secs_to_duration(secs);
        self
    }

    /// Section and group containers: plain fade
    pub fn container() -> Self {
        Self::new(
            "container",
            PropertySet::IDENTITY.with_opacity(0.0),
            PropertySet::IDENTITY,
            TransitionSpec::ease_out(0.3),
        )
    }

    /// Headings, paragraphs and cards: fade while rising 20px
    pub fn fade_up() -> Self {
        Self::new(
            "fade_up",
            PropertySet::IDENTITY.with_opacity(0.0).with_y(20.0),
            PropertySet::IDENTITY,
            TransitionSpec::ease_out(0.8),
        )
    }

    /// Icons: grow from nothing
    pub fn pop() -> Self {
        Self::new(
            "pop",
            PropertySet::IDENTITY.with_scale(0.0),
            PropertySet::IDENTITY,
            TransitionSpec::ease_out(0.5),
        )
    }

    /// Timeline dots: grow and fade in
    pub fn dot() -> Self {
        Self::new(
            "dot",
            PropertySet::IDENTITY.with_scale(0.0).with_opacity(0.0),
            PropertySet::IDENTITY,
            TransitionSpec::ease_out(0.5),
        )
    }

    /// Experience icon: grow while unwinding a half turn
    pub fn spin_pop() -> Self {
        Self::new(
            "spin_pop",
            PropertySet::IDENTITY.with_scale(0.0).with_rotate(-180.0),
            PropertySet::IDENTITY,
            TransitionSpec::ease_out(0.6),
        )
    }

    /// Bullet points: fade while sliding 10px from the left
    pub fn slide_in() -> Self {
        Self::new(
            "slide_in",
            PropertySet::IDENTITY.with_opacity(0.0).with_x(-10.0),
            PropertySet::IDENTITY,
            TransitionSpec::ease_out(0.5),
        )
    }

    /// Logo: fade while sliding 20px from the left
    pub fn slide_from_left() -> Self {
        Self::new(
            "slide_from_left",
            PropertySet::IDENTITY.with_opacity(0.0).with_x(-20.0),
            PropertySet::IDENTITY,
            TransitionSpec::ease_out(0.5),
        )
    }

    /// Skill chips: quick fade from 80% size
    pub fn chip() -> Self {
        Self::new(
            "chip",
            PropertySet::IDENTITY.with_opacity(0.0).with_scale(0.8),
            PropertySet::IDENTITY,
            TransitionSpec::ease_out(0.3),
        )
    }

    /// Social icons: fade from 80% size
    pub fn scale_in() -> Self {
        Self::new(
            "scale_in",
            PropertySet::IDENTITY.with_opacity(0.0).with_scale(0.8),
            PropertySet::IDENTITY,
            TransitionSpec::ease_out(0.5),
        )
    }

    /// Navigation links: fade while dropping 10px from above
    pub fn drop_in() -> Self {
        Self::new(
            "drop_in",
            PropertySet::IDENTITY.with_opacity(0.0).with_y(-10.0),
            PropertySet::IDENTITY,
            TransitionSpec::ease_out(0.5),
        )
    }

    /// Footer block: fade while rising 20px, shorter than `fade_up`
    pub fn footer_rise() -> Self {
        Self::fade_up().with_duration(0.5).renamed("footer_rise")
    }

    fn renamed(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let hidden = PropertySet::IDENTITY.with_opacity(0.0).with_y(20.0);
        let visible = PropertySet::IDENTITY;

        assert_eq!(hidden.lerp(&visible, 0.0), hidden);
        assert_eq!(hidden.lerp(&visible, 1.0), visible);

        let mid = hidden.lerp(&visible, 0.5);
        assert!((mid.opacity - 0.5).abs() < 1e-6);
        assert!((mid.y - 10.0).abs() < 1e-6);
        assert_eq!(mid.scale, 1.0);
    }

    #[test]
    fn test_every_preset_ends_at_identity() {
        let presets = [
            Variants::container(),
            Variants::fade_up(),
            Variants::pop(),
            Variants::dot(),
            Variants::spin_pop(),
            Variants::slide_in(),
            Variants::slide_from_left(),
            Variants::chip(),
            Variants::scale_in(),
            Variants::drop_in(),
            Variants::footer_rise(),
        ];
        for preset in presets {
            assert_eq!(preset.visible, PropertySet::IDENTITY, "{}", preset.name);
            assert_ne!(preset.hidden, preset.visible, "{}", preset.name);
            assert_eq!(preset.transition.easing, Easing::EaseOut);
        }
    }

    #[test]
    fn test_fade_up_values() {
        let fade_up = Variants::fade_up();
        assert_eq!(fade_up.get(VariantName::Hidden).opacity, 0.0);
        assert_eq!(fade_up.get(VariantName::Hidden).y, 20.0);
        assert_eq!(fade_up.transition.duration, Duration::from_millis(800));
    }

    #[test]
    fn test_footer_rise() {
        let rise = Variants::footer_rise();
        assert_eq!(rise.name, "footer_rise");
        assert_eq!(rise.transition.duration, Duration::from_millis(500));
        assert_eq!(rise.hidden, Variants::fade_up().hidden);
    }
}
