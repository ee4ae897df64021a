//! Static content panels: projects, experience, fun facts, reviews

use serde::{Deserialize, Serialize};

use crate::config::content::{
    Experience, Hobby, PersonalityTrait, Project, ProjectCategory, Review, SiteContent, SkillGroup,
};

use super::carousel::{Carousel, Dot};

/// Project grid filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectFilter {
    #[default]
    All,
    #[serde(untagged)]
    Category(ProjectCategory),
}

impl ProjectFilter {
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("all") {
            Some(ProjectFilter::All)
        } else {
            ProjectCategory::parse(name).map(ProjectFilter::Category)
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Category(c) => project.category == *c,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectFilter::All => "All Projects",
            ProjectFilter::Category(c) => c.label(),
        }
    }

    /// Filter buttons in display order
    pub fn options() -> Vec<ProjectFilter> {
        std::iter::once(ProjectFilter::All)
            .chain(ProjectCategory::ALL.into_iter().map(ProjectFilter::Category))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    pub id: ProjectFilter,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsView {
    pub filters: Vec<FilterOption>,
    pub active: ProjectFilter,
    pub projects: Vec<Project>,
}

/// Projects matching `filter`, in content order
pub fn projects_view(content: &SiteContent, filter: ProjectFilter) -> ProjectsView {
    ProjectsView {
        filters: ProjectFilter::options()
            .into_iter()
            .map(|f| FilterOption {
                id: f,
                label: f.label(),
                active: f == filter,
            })
            .collect(),
        active: filter,
        projects: content
            .projects
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceView {
    pub timeline: Vec<Experience>,
    pub skills: Vec<SkillGroup>,
    /// Distinct technologies across all roles, first-seen order
    pub technologies: Vec<String>,
}

pub fn experience_view(content: &SiteContent) -> ExperienceView {
    let mut technologies: Vec<String> = Vec::new();
    for tech in content.experience.iter().flat_map(|e| &e.technologies) {
        if !technologies.contains(tech) {
            technologies.push(tech.clone());
        }
    }

    ExperienceView {
        timeline: content.experience.clone(),
        skills: content.skills.clone(),
        technologies,
    }
}

/// Which hobby card is expanded, if any
#[derive(Debug, Clone, Default)]
pub struct HobbySpotlight {
    active: Option<String>,
}

impl HobbySpotlight {
    /// Clicking the open card closes it; clicking another one switches to it
    pub fn toggle(&mut self, id: &str) -> Option<&str> {
        if self.active.as_deref() == Some(id) {
            self.active = None;
        } else {
            self.active = Some(id.to_string());
        }
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HobbyCard {
    #[serde(flatten)]
    pub hobby: Hobby,
    pub active: bool,
    /// Only present on the expanded card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunView {
    pub hobbies: Vec<HobbyCard>,
    pub achievements: Vec<String>,
    pub facts: Vec<String>,
    pub traits: Vec<PersonalityTrait>,
}

pub fn fun_view(content: &SiteContent, spotlight: &HobbySpotlight) -> FunView {
    FunView {
        hobbies: content
            .fun
            .hobbies
            .iter()
            .map(|h| {
                let active = spotlight.active() == Some(h.id.as_str());
                HobbyCard {
                    hobby: h.clone(),
                    active,
                    note: active.then(|| content.fun.hobby_note.clone()).flatten(),
                }
            })
            .collect(),
        achievements: content.fun.achievements.clone(),
        facts: content.fun.facts.clone(),
        traits: content.fun.traits.clone(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewsView {
    pub selected_index: usize,
    pub selected: Review,
    pub reviews: Vec<Review>,
    pub dots: Vec<Dot>,
    pub average_rating: f32,
}

pub fn reviews_view(carousel: &Carousel<Review>) -> ReviewsView {
    let reviews = carousel.items();
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();

    ReviewsView {
        selected_index: carousel.selected_index(),
        selected: carousel.selected().clone(),
        reviews: reviews.to_vec(),
        dots: carousel.dots(),
        average_rating: total as f32 / reviews.len() as f32,
    }
}
