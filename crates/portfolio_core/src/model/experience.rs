//! Experience timeline record.

use super::icon::Icon;
use serde::{Deserialize, Serialize};

/// One entry of the experience timeline; `id` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: u32,
    pub role: String,
    pub company: String,
    /// Free-form period label, e.g. `Jan 2023 - Mar 2023`.
    pub duration: String,
    pub description: String,
    pub technologies: Vec<String>,
}

/// Timeline marker for the entry at `index` in display order.
pub fn timeline_icon(index: usize) -> Icon {
    match index {
        0 => Icon::Code,
        1 => Icon::Briefcase,
        2 => Icon::Lightbulb,
        3 => Icon::GraduationCap,
        _ => Icon::Briefcase,
    }
}
