//! Section catalogue
//!
//! Every section of the page as data: its root element, when it starts
//! animating, and the sequences it reveals. Header and Hero play as soon as
//! they mount; everything further down waits until it scrolls into view.

use std::fmt;
use std::time::Duration;

use folio_common::time::Clock;
use folio_common::{Error, Result};

use crate::sequence::{AnimationSequenceSpec, TargetId};
use crate::variants::Variants;
use crate::visibility::ObserveOptions;

/// Shown in the footer copyright line
pub const SITE_OWNER: &str = "Ganesh Samgir";

/// Navigation anchors, in header order
pub const NAV_ITEMS: [&str; 6] = ["home", "about", "skills", "projects", "experience", "contact"];

const SOCIAL_LINKS: [&str; 3] = ["linkedin", "github", "email"];
const SKILLS_PER_CATEGORY: [usize; 4] = [7, 5, 6, 3];
const PROJECT_COUNT: usize = 8;
const TIMELINE_ENTRIES: usize = 3;
const EXPERIENCE_STATS: usize = 3;
const ACHIEVEMENTS: usize = 5;
const CONTACT_INFO: usize = 3;

/// Page sections, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Header,
    Hero,
    About,
    Skills,
    Projects,
    Experience,
    Contact,
    Footer,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Header,
        SectionKind::Hero,
        SectionKind::About,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Experience,
        SectionKind::Contact,
        SectionKind::Footer,
    ];

    /// Root element id (also the navigation anchor where there is one)
    pub fn id(&self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Hero => "home",
            SectionKind::About => "about",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Experience => "experience",
            SectionKind::Contact => "contact",
            SectionKind::Footer => "footer",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn trigger(&self) -> Trigger {
        match self {
            SectionKind::Header | SectionKind::Hero => Trigger::OnMount,
            _ => Trigger::InView(ObserveOptions::default()),
        }
    }

    /// Build this section's definition
    pub fn definition(&self) -> Result<SectionDefinition> {
        let sequences = match self {
            SectionKind::Header => header_sequences()?,
            SectionKind::Hero => hero_sequences()?,
            SectionKind::About => about_sequences()?,
            SectionKind::Skills => skills_sequences()?,
            SectionKind::Projects => projects_sequences()?,
            SectionKind::Experience => experience_sequences()?,
            SectionKind::Contact => contact_sequences()?,
            SectionKind::Footer => footer_sequences()?,
        };
        Ok(SectionDefinition {
            id: self.id(),
            kind: *self,
            trigger: self.trigger(),
            sequences,
        })
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// When a section starts playing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Immediately on mount
    OnMount,
    /// First time the root crosses the observation threshold
    InView(ObserveOptions),
}

/// A section's root, trigger and sibling sequences
///
/// Sequences of one section share the trigger instant but have no ordering
/// relative to each other.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDefinition {
    pub id: &'static str,
    pub kind: SectionKind,
    pub trigger: Trigger,
    pub sequences: Vec<AnimationSequenceSpec>,
}

impl SectionDefinition {
    /// Time from trigger until the last item settles
    pub fn total_duration(&self) -> Duration {
        self.sequences
            .iter()
            .map(AnimationSequenceSpec::total_duration)
            .max()
            .unwrap_or_default()
    }

    pub fn item_count(&self) -> usize {
        self.sequences.iter().map(AnimationSequenceSpec::len).sum()
    }
}

/// Definitions for the whole page, in document order
pub fn catalogue() -> Result<Vec<SectionDefinition>> {
    SectionKind::ALL.iter().map(SectionKind::definition).collect()
}

/// Footer copyright line for the clock's current year
pub fn footer_copyright(clock: &impl Clock) -> String {
    format!(
        "© {} {} | Built with React + Tailwind CSS",
        clock.current_year(),
        SITE_OWNER
    )
}

fn target(section: impl fmt::Display, part: impl fmt::Display) -> TargetId {
    TargetId::from(format!("{}.{}", section, part))
}

/// Heading plus underline bar used at the top of most sections
fn section_heading(section: &str, stagger: f32) -> Result<AnimationSequenceSpec> {
    AnimationSequenceSpec::staggered(
        0.1,
        stagger,
        [
            (target(section, "heading"), Variants::fade_up()),
            (target(section, "divider"), Variants::fade_up()),
        ],
    )
}

fn header_sequences() -> Result<Vec<AnimationSequenceSpec>> {
    let mut builder =
        AnimationSequenceSpec::builder().at("header.logo", Variants::slide_from_left(), 0.0);

    for (i, item) in NAV_ITEMS.iter().enumerate() {
        builder = builder.at(target("header.nav", item), Variants::drop_in(), i as f32 * 0.05);
    }
    for (i, social) in SOCIAL_LINKS.iter().enumerate() {
        builder = builder.at(
            target("header.social", social),
            Variants::scale_in(),
            0.3 + i as f32 * 0.05,
        );
    }

    let bar = builder.at("header.hire_me", Variants::scale_in(), 0.45).build()?;
    Ok(vec![bar])
}

fn hero_sequences() -> Result<Vec<AnimationSequenceSpec>> {
    let content = AnimationSequenceSpec::staggered(
        0.1,
        0.2,
        ["greeting", "name", "role", "summary", "actions"]
            .into_iter()
            .map(|part| (target("home", part), Variants::fade_up())),
    )?;

    let scroll_hint = AnimationSequenceSpec::builder()
        .at("home.scroll_hint", Variants::container().with_duration(1.0), 1.5)
        .build()?;

    Ok(vec![content, scroll_hint])
}

fn about_sequences() -> Result<Vec<AnimationSequenceSpec>> {
    let body = AnimationSequenceSpec::staggered(
        0.1,
        0.2,
        [
            (target("about", "summary"), Variants::fade_up()),
            (target("about", "timeline"), Variants::fade_up()),
        ],
    )?;

    let dots = (0..TIMELINE_ENTRIES)
        .fold(AnimationSequenceSpec::builder(), |b, i| {
            b.at(target("about.timeline.dot", i), Variants::dot(), i as f32 * 0.2)
        })
        .build()?;

    Ok(vec![section_heading("about", 0.2)?, body, dots])
}

fn skills_sequences() -> Result<Vec<AnimationSequenceSpec>> {
    let mut sequences = vec![section_heading("skills", 0.1)?];

    sequences.push(AnimationSequenceSpec::staggered(
        0.1,
        0.1,
        (0..SKILLS_PER_CATEGORY.len()).map(|c| (target("skills.category", c), Variants::fade_up())),
    )?);

    // Chips restart their offsets per category, so each category is its own sequence
    for (category, &count) in SKILLS_PER_CATEGORY.iter().enumerate() {
        let chips = (0..count)
            .fold(AnimationSequenceSpec::builder(), |b, skill| {
                b.at(
                    target(format!("skills.category.{}.chip", category), skill),
                    Variants::chip(),
                    category as f32 * 0.1 + skill as f32 * 0.05,
                )
            })
            .build()?;
        sequences.push(chips);
    }

    Ok(sequences)
}

fn projects_sequences() -> Result<Vec<AnimationSequenceSpec>> {
    let cards = AnimationSequenceSpec::staggered(
        0.1,
        0.1,
        (0..PROJECT_COUNT).map(|i| (target("projects.card", i), Variants::fade_up())),
    )?;
    Ok(vec![section_heading("projects", 0.1)?, cards])
}

fn experience_sequences() -> Result<Vec<AnimationSequenceSpec>> {
    let stats = AnimationSequenceSpec::staggered(
        0.1,
        0.1,
        (0..EXPERIENCE_STATS).map(|i| (target("experience.stat", i), Variants::fade_up())),
    )?;

    let stat_icons = (0..EXPERIENCE_STATS)
        .fold(AnimationSequenceSpec::builder(), |b, i| {
            b.at(target("experience.stat.icon", i), Variants::pop(), i as f32 * 0.1)
        })
        .build()?;

    let role = AnimationSequenceSpec::builder()
        .child("experience.role", Variants::fade_up())
        .build()?;

    let role_details = (0..ACHIEVEMENTS)
        .fold(
            AnimationSequenceSpec::builder().at("experience.role.icon", Variants::spin_pop(), 0.0),
            |b, idx| {
                b.at(
                    target("experience.role.achievement", idx),
                    Variants::slide_in(),
                    idx as f32 * 0.05,
                )
            },
        )
        .build()?;

    Ok(vec![
        section_heading("experience", 0.1)?,
        stats,
        stat_icons,
        role,
        role_details,
    ])
}

fn contact_sequences() -> Result<Vec<AnimationSequenceSpec>> {
    let columns = AnimationSequenceSpec::staggered(
        0.1,
        0.1,
        [
            (target("contact", "info"), Variants::fade_up()),
            (target("contact", "form"), Variants::fade_up()),
        ],
    )?;

    let icons = (0..CONTACT_INFO)
        .fold(AnimationSequenceSpec::builder(), |b, i| {
            b.at(target("contact.info.icon", i), Variants::pop(), i as f32 * 0.1)
        })
        .build()?;

    Ok(vec![section_heading("contact", 0.1)?, columns, icons])
}

fn footer_sequences() -> Result<Vec<AnimationSequenceSpec>> {
    let footer = AnimationSequenceSpec::builder()
        .at("footer.body", Variants::footer_rise(), 0.0)
        .at("footer.copyright", Variants::container().with_duration(0.5), 0.2)
        .build()?;
    Ok(vec![footer])
}

/// Look up a section by root id
pub fn definition_for(id: &str) -> Result<SectionDefinition> {
    SectionKind::from_id(id)
        .ok_or_else(|| Error::InvalidInput(format!("unknown section '{}'", id)))?
        .definition()
}
