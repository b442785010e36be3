//! Compiled-in default collections.
//!
//! # Responsibility
//! - Provide the baseline skills, experience and project collections.
//! - Validate that every baseline has unique natural keys.
//!
//! # Invariants
//! - Order here is display order.

use crate::model::experience::Experience;
use crate::model::icon::Icon;
use crate::model::project::Project;
use crate::model::skill::Skill;
use crate::service::collection_service::{validate_unique_keys, HydrationResult};

/// Default skills, grouped by category.
pub fn default_skills() -> Vec<Skill> {
    vec![
        Skill::new("HTML & CSS", "frontend", 90, Icon::FileCode),
        Skill::new("JavaScript", "frontend", 85, Icon::BrainCircuit),
        Skill::new("React", "frontend", 80, Icon::Code),
        Skill::new("TypeScript", "frontend", 60, Icon::Blocks),
        Skill::new("Tailwind CSS", "frontend", 85, Icon::Paintbrush),
        Skill::new("Node.js", "backend", 75, Icon::Server),
        Skill::new("MongoDB", "backend", 70, Icon::Database),
        Skill::new("Git & GitHub", "tools", 80, Icon::GitBranch),
        Skill::new("Next.js", "tools", 50, Icon::Box),
        Skill::new("Responsive Design", "design", 85, Icon::LayoutGrid),
        Skill::new("UI/UX Design", "design", 65, Icon::PenTool),
        Skill::new("WordPress", "cms", 80, Icon::Globe),
    ]
}

/// Default experience timeline, oldest first.
pub fn default_experiences() -> Vec<Experience> {
    vec![
        experience(
            1,
            "Frontend Foundations",
            "Jan 2023 - Mar 2023",
            "Mastered HTML5, CSS3, and JavaScript fundamentals. Built responsive layouts and interactive user interfaces using modern web technologies.",
            &["HTML5", "CSS3", "JavaScript", "Responsive Design"],
        ),
        experience(
            2,
            "React Development",
            "Apr 2023 - Jun 2023",
            "Specialized in React.js development, learning component architecture, hooks, state management, and modern development practices.",
            &["React.js", "Hooks", "State Management", "Component Design"],
        ),
        experience(
            3,
            "Advanced Frontend Skills",
            "Jul 2023 - Sep 2023",
            "Expanded expertise with TypeScript, Next.js, and Tailwind CSS. Focused on building performant and scalable web applications.",
            &["TypeScript", "Next.js", "Tailwind CSS", "Web Performance"],
        ),
        experience(
            4,
            "Full Stack Development",
            "Oct 2023 - Present",
            "Building full-stack applications with modern technologies. Working on personal projects and continuously learning new development tools.",
            &["Full Stack", "API Integration", "Git", "Modern Tooling"],
        ),
    ]
}

/// Default project gallery.
pub fn default_projects() -> Vec<Project> {
    vec![
        project(
            1,
            "E-Commerce Dashboard",
            "A comprehensive dashboard for e-commerce businesses with analytics, inventory management, and order processing features.",
            "photo-1551288049-bebda4e38f71",
            &["React", "Redux", "Tailwind CSS", "Chart.js"],
        ),
        project(
            2,
            "Task Management App",
            "A productivity application for managing tasks, projects, and deadlines with collaborative features.",
            "photo-1484480974693-6ca0a78fb36b",
            &["React", "TypeScript", "Firebase", "CSS Modules"],
        ),
        project(
            3,
            "Weather Forecast Application",
            "A weather application with 7-day forecasts, location-based services, and interactive maps.",
            "photo-1592210454359-9043f067919b",
            &["React", "Context API", "OpenWeather API", "Styled Components"],
        ),
        project(
            4,
            "Social Media Platform",
            "A full-featured social media platform with real-time messaging, post sharing, and user authentication.",
            "photo-1611162617213-7d7a39e9b1d7",
            &["React", "Node.js", "Socket.io", "MongoDB"],
        ),
        project(
            5,
            "E-Learning Platform",
            "An educational platform for online courses, featuring video lectures, quizzes, and progress tracking.",
            "photo-1501504905252-473c47e087f8",
            &["React", "Express", "PostgreSQL", "AWS"],
        ),
        project(
            6,
            "Fitness Tracking Application",
            "A health and fitness application for tracking workouts, nutrition, and personal goals.",
            "photo-1517836357463-d25dfeac3438",
            &["React Native", "Redux", "Expo", "HealthKit API"],
        ),
    ]
}

/// Fails when any default collection repeats a natural key.
///
/// Intended to run once at startup so a bad baseline fails fast instead of
/// silently shadowing entries during hydration.
pub fn validate_catalog() -> HydrationResult<()> {
    validate_unique_keys(&default_skills())?;
    validate_unique_keys(&default_experiences())?;
    validate_unique_keys(&default_projects())?;
    Ok(())
}

fn experience(
    id: u32,
    role: &str,
    duration: &str,
    description: &str,
    technologies: &[&str],
) -> Experience {
    Experience {
        id,
        role: role.to_string(),
        company: "Self-Learning Path".to_string(),
        duration: duration.to_string(),
        description: description.to_string(),
        technologies: technologies.iter().map(|value| value.to_string()).collect(),
    }
}

fn project(id: u32, title: &str, description: &str, photo: &str, tags: &[&str]) -> Project {
    Project {
        id,
        title: title.to_string(),
        description: description.to_string(),
        image: format!("https://images.unsplash.com/{photo}?q=80&w=2070&auto=format&fit=crop"),
        tags: tags.iter().map(|value| value.to_string()).collect(),
        demo_url: format!("https://example.com/demo{id}"),
        github_url: format!("https://github.com/username/project{id}"),
        category: None,
    }
}

#[cfg(test)]
mod tests {
    use super::{default_experiences, default_projects, default_skills, validate_catalog};

    #[test]
    fn catalog_has_unique_keys() {
        validate_catalog().expect("default collections must not repeat keys");
    }

    #[test]
    fn catalog_sizes_are_stable() {
        assert_eq!(default_skills().len(), 12);
        assert_eq!(default_experiences().len(), 4);
        assert_eq!(default_projects().len(), 6);
    }
}
