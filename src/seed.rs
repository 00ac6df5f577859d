//! Initial content for a fresh database.
//!
//! Everything is looked up by its natural key first (technology name,
//! project title), so running the seed repeatedly never duplicates rows
//! or overwrites edits made through the admin API.

use tracing::info;

use crate::{
    entities::{
        project::{ProjectCategory, ProjectInsert, ProjectStatus},
        technology::{TechnologyCategory, TechnologyInsert},
        user::NewAdmin,
    },
    errors::AppError,
    AppState,
};

struct SeedTechnology {
    name: &'static str,
    category: TechnologyCategory,
    icon: &'static str,
    color: &'static str,
}

struct SeedProject {
    title: &'static str,
    description: &'static str,
    category: ProjectCategory,
    featured: bool,
    github_url: &'static str,
    live_url: Option<&'static str>,
    technologies: &'static str,
    status: ProjectStatus,
    order: i32,
}

const TECHNOLOGIES: &[SeedTechnology] = &[
    SeedTechnology { name: "Python", category: TechnologyCategory::Language, icon: "fab fa-python", color: "#3776ab" },
    SeedTechnology { name: "Django", category: TechnologyCategory::Framework, icon: "fab fa-python", color: "#092e20" },
    SeedTechnology { name: "JavaScript", category: TechnologyCategory::Language, icon: "fab fa-js-square", color: "#f7df1e" },
    SeedTechnology { name: "React", category: TechnologyCategory::Library, icon: "fab fa-react", color: "#61dafb" },
    SeedTechnology { name: "Next.js", category: TechnologyCategory::Framework, icon: "fab fa-js", color: "#000000" },
    SeedTechnology { name: "TypeScript", category: TechnologyCategory::Language, icon: "fab fa-js", color: "#3178c6" },
    SeedTechnology { name: "PostgreSQL", category: TechnologyCategory::Database, icon: "fas fa-database", color: "#336791" },
    SeedTechnology { name: "HTML5", category: TechnologyCategory::Language, icon: "fab fa-html5", color: "#e34f26" },
    SeedTechnology { name: "CSS3", category: TechnologyCategory::Language, icon: "fab fa-css3-alt", color: "#1572b6" },
];

const PROJECTS: &[SeedProject] = &[
    SeedProject {
        title: "Suncore",
        description: "An open-source offline web-based audio processor with features like nightcore effect, reverb, and bass boost. Built with modern web technologies for optimal performance.",
        category: ProjectCategory::Web,
        featured: true,
        github_url: "https://github.com/Dimeji-G/suncore",
        live_url: Some("https://suncore.vercel.app"),
        technologies: "Next.js, TypeScript, Audio Processing, Web Audio API, Offline",
        status: ProjectStatus::Completed,
        order: 1,
    },
    SeedProject {
        title: "Flashy",
        description: "Modern offline flashcard application designed for students. Features spaced repetition, progress tracking, and offline functionality for seamless studying.",
        category: ProjectCategory::Web,
        featured: true,
        github_url: "https://github.com/Dimeji-G/flashy",
        live_url: Some("https://flashy-byigitt.vercel.app"),
        technologies: "Next.js, TypeScript, PWA, Study Tools, Flashcards",
        status: ProjectStatus::Completed,
        order: 2,
    },
    SeedProject {
        title: "OneTimeLink",
        description: "Secure one-time-link generator for file sharing. Features encryption, expiration times, and secure file uploads with automatic cleanup.",
        category: ProjectCategory::Tools,
        featured: false,
        github_url: "https://github.com/Dimeji-G/onetimelink",
        live_url: None,
        technologies: "Next.js, TypeScript, File Upload, Security, Encryption",
        status: ProjectStatus::Completed,
        order: 3,
    },
    SeedProject {
        title: "Portfolio Website",
        description: "My personal portfolio website built with Django, featuring modern design, responsive layout, and dynamic content management.",
        category: ProjectCategory::Web,
        featured: true,
        github_url: "https://github.com/Dimeji-G/portfolio",
        live_url: Some("https://dimroid.com"),
        technologies: "Django, Python, HTML5, CSS3, Responsive",
        status: ProjectStatus::Active,
        order: 4,
    },
    SeedProject {
        title: "Inventory Automation System",
        description: "Python automation system for retail inventory management. Saves 100+ hours monthly with automated supplier tracking and price optimization.",
        category: ProjectCategory::Tools,
        featured: true,
        github_url: "https://github.com/Dimeji-G/inventory-automation",
        live_url: None,
        technologies: "Python, Automation, Data Processing, Business Logic",
        status: ProjectStatus::Completed,
        order: 5,
    },
    SeedProject {
        title: "Web Scraping Suite",
        description: "Comprehensive web scraping toolkit with support for multiple sites, data processing, and automated reporting systems.",
        category: ProjectCategory::Tools,
        featured: false,
        github_url: "https://github.com/Dimeji-G/scraping-suite",
        live_url: None,
        technologies: "Python, Selenium, BeautifulSoup, Data Mining",
        status: ProjectStatus::Completed,
        order: 6,
    },
    SeedProject {
        title: "Django E-commerce Platform",
        description: "Full-featured e-commerce platform with payment processing, inventory management, and customer analytics built with Django.",
        category: ProjectCategory::Web,
        featured: false,
        github_url: "https://github.com/Dimeji-G/django-ecommerce",
        live_url: None,
        technologies: "Django, Python, PostgreSQL, Stripe, E-commerce",
        status: ProjectStatus::Completed,
        order: 7,
    },
    SeedProject {
        title: "API Integration Framework",
        description: "Reusable framework for integrating multiple third-party APIs with automatic retry logic, rate limiting, and error handling.",
        category: ProjectCategory::Tools,
        featured: false,
        github_url: "https://github.com/Dimeji-G/api-framework",
        live_url: None,
        technologies: "Python, API, Framework, Integration",
        status: ProjectStatus::Completed,
        order: 8,
    },
    SeedProject {
        title: "Data Analysis Dashboard",
        description: "Interactive dashboard for business data analysis with real-time charts, filtering, and export capabilities.",
        category: ProjectCategory::Web,
        featured: false,
        github_url: "https://github.com/Dimeji-G/data-dashboard",
        live_url: None,
        technologies: "Django, Chart.js, Data Analysis, Dashboard",
        status: ProjectStatus::Completed,
        order: 9,
    },
    SeedProject {
        title: "Automated Report Generator",
        description: "Python tool for generating automated business reports from multiple data sources with PDF and Excel export.",
        category: ProjectCategory::Tools,
        featured: false,
        github_url: "https://github.com/Dimeji-G/report-generator",
        live_url: None,
        technologies: "Python, Automation, Reporting, PDF Generation",
        status: ProjectStatus::Completed,
        order: 10,
    },
];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub technologies_created: usize,
    pub technologies_existing: usize,
    pub projects_created: usize,
    pub projects_existing: usize,
    pub admin_created: bool,
}

impl SeedTechnology {
    fn to_insert(&self) -> TechnologyInsert {
        TechnologyInsert {
            name: self.name.to_string(),
            category: self.category,
            icon: Some(self.icon.to_string()),
            color: Some(self.color.to_string()),
            website: None,
        }
    }
}

impl SeedProject {
    fn to_insert(&self) -> ProjectInsert {
        ProjectInsert {
            title: self.title.to_string(),
            slug: String::new(),
            slug_is_custom: false,
            description: self.description.to_string(),
            short_description: String::new(),
            category: self.category,
            status: self.status,
            featured: self.featured,
            visible: true,
            github_url: self.github_url.to_string(),
            live_url: self.live_url.map(str::to_string),
            documentation_url: None,
            image: None,
            thumbnail: None,
            technologies: self.technologies.to_string(),
            order: self.order,
            start_date: None,
            end_date: None,
        }
    }
}

/// Get-or-creates the initial technologies and projects, then the admin
/// account when one is supplied.
pub async fn seed_content(state: &AppState, admin: Option<NewAdmin>) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();

    for seed in TECHNOLOGIES {
        let (technology, created) = state.technology_handler.get_or_create(seed.to_insert()).await?;
        if created {
            info!("Created technology: {}", technology.name);
            report.technologies_created += 1;
        } else {
            report.technologies_existing += 1;
        }
    }

    for seed in PROJECTS {
        let (project, created) = state.project_handler.get_or_create(seed.to_insert()).await?;
        if created {
            info!(slug = %project.slug, "Created project: {}", project.title);
            report.projects_created += 1;
        } else {
            info!("Project already exists: {}", project.title);
            report.projects_existing += 1;
        }
    }

    if let Some(admin) = admin {
        let email = admin.email.clone();
        report.admin_created = state.auth_handler.ensure_admin(admin).await?;
        if report.admin_created {
            info!(%email, "Created admin user");
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SHORT_DESCRIPTION_LIMIT;
    use std::collections::HashSet;

    #[test]
    fn seed_titles_and_names_are_unique() {
        let titles: HashSet<_> = PROJECTS.iter().map(|p| p.title).collect();
        let names: HashSet<_> = TECHNOLOGIES.iter().map(|t| t.name).collect();
        assert_eq!(titles.len(), PROJECTS.len());
        assert_eq!(names.len(), TECHNOLOGIES.len());
    }

    #[test]
    fn seed_projects_get_derived_slug_and_summary() {
        let mut insert = PROJECTS[0].to_insert();
        insert.prepare();

        assert_eq!(insert.slug, "suncore");
        assert!(!insert.slug_is_custom);
        assert!(insert.short_description.chars().count() <= SHORT_DESCRIPTION_LIMIT + 3);
    }
}
