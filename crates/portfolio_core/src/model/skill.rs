//! Skill record.

use super::icon::Icon;
use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the skills section.
///
/// `icon` is skipped by serde: a freshly decoded skill carries
/// `Icon::FALLBACK` until hydration reattaches the default's icon by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Natural key.
    pub name: String,
    pub category: String,
    /// Proficiency percentage, 0..=100. Stored values above 100 decode as 100.
    #[serde(deserialize_with = "clamp_level")]
    pub level: u8,
    #[serde(skip)]
    pub icon: Icon,
}

impl Skill {
    pub fn new(name: impl Into<String>, category: impl Into<String>, level: u8, icon: Icon) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: category.into(),
            level: level.min(100),
            icon,
        }
    }
}

fn clamp_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let level = u32::deserialize(deserializer)?.min(100);
    Ok(level as u8)
}

/// Distinct categories in first-seen order.
pub fn skill_categories(skills: &[Skill]) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();
    for skill in skills {
        if !categories.contains(&skill.category.as_str()) {
            categories.push(skill.category.as_str());
        }
    }
    categories
}

/// Skills in `category`, or all of them when `category` is `None`.
pub fn filter_by_category<'a>(skills: &'a [Skill], category: Option<&str>) -> Vec<&'a Skill> {
    skills
        .iter()
        .filter(|skill| category.map_or(true, |wanted| skill.category == wanted))
        .collect()
}
