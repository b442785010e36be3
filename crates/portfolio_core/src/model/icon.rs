//! Icon references used by content sections.

/// Closed registry of icons a record can point at.
///
/// Icons are render-time assets, so they are never serialized; records get
/// them back from the default collections after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Icon {
    #[default]
    Code,
    FileCode,
    Blocks,
    BrainCircuit,
    Paintbrush,
    GitBranch,
    Box,
    LayoutGrid,
    PenTool,
    Globe,
    Server,
    Database,
    Briefcase,
    Lightbulb,
    GraduationCap,
}

impl Icon {
    /// Icon used when a record has no matching default.
    pub const FALLBACK: Icon = Icon::Code;

    /// Stable kebab-case asset name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::FileCode => "file-code",
            Self::Blocks => "blocks",
            Self::BrainCircuit => "brain-circuit",
            Self::Paintbrush => "paintbrush",
            Self::GitBranch => "git-branch",
            Self::Box => "box",
            Self::LayoutGrid => "layout-grid",
            Self::PenTool => "pen-tool",
            Self::Globe => "globe",
            Self::Server => "server",
            Self::Database => "database",
            Self::Briefcase => "briefcase",
            Self::Lightbulb => "lightbulb",
            Self::GraduationCap => "graduation-cap",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
