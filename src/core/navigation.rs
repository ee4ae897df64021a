//! Sidebar navigation context
//!
//! Active section, theme and mobile menu live here and are passed to the
//! panels explicitly instead of being global UI state.

use serde::{Deserialize, Serialize};

use crate::config::content::{Profile, SocialLink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Section {
    #[default]
    Chat,
    Projects,
    Experience,
    Contact,
    Fun,
    Reviews,
}

impl Section {
    /// Sidebar order
    pub const ALL: [Section; 6] = [
        Section::Chat,
        Section::Projects,
        Section::Experience,
        Section::Contact,
        Section::Fun,
        Section::Reviews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Chat => "chat",
            Section::Projects => "projects",
            Section::Experience => "experience",
            Section::Contact => "contact",
            Section::Fun => "fun",
            Section::Reviews => "reviews",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Chat => "Chat",
            Section::Projects => "Projects",
            Section::Experience => "Experience",
            Section::Contact => "Contact",
            Section::Fun => "Fun",
            Section::Reviews => "Reviews",
        }
    }

    /// Unknown names fall back to the chat panel. "review" is accepted as an
    /// alias for the reviews panel.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "projects" => Section::Projects,
            "experience" => Section::Experience,
            "contact" => Section::Contact,
            "fun" => Section::Fun,
            "reviews" | "review" => Section::Reviews,
            _ => Section::Chat,
        }
    }
}

impl From<String> for Section {
    fn from(name: String) -> Self {
        Section::from_name(&name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavContext {
    active: Section,
    theme: Theme,
    mobile_menu_open: bool,
}

impl NavContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    /// Switch panels; always closes the mobile menu
    pub fn navigate(&mut self, section: Section) {
        self.active = section;
        self.mobile_menu_open = false;
    }

    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.mobile_menu_open = !self.mobile_menu_open;
        self.mobile_menu_open
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn view(&self, profile: &Profile) -> SidebarView {
        SidebarView {
            profile: ProfileCard {
                name: profile.name.clone(),
                initials: profile.initials.clone(),
                title: profile.title.clone(),
                location: profile.location.clone(),
                available: profile.available,
                tagline: profile.tagline.clone(),
            },
            navigation: Section::ALL
                .iter()
                .map(|s| NavItem {
                    id: *s,
                    label: s.label(),
                    active: *s == self.active,
                })
                .collect(),
            social: profile.social.clone(),
            active: self.active,
            theme: self.theme,
            mobile_menu_open: self.mobile_menu_open,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileCard {
    pub name: String,
    pub initials: String,
    pub title: String,
    pub location: String,
    pub available: bool,
    pub tagline: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub id: Section,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SidebarView {
    pub profile: ProfileCard,
    pub navigation: Vec<NavItem>,
    pub social: Vec<SocialLink>,
    pub active: Section,
    pub theme: Theme,
    pub mobile_menu_open: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let nav = NavContext::new();
        assert_eq!(nav.active(), Section::Chat);
        assert_eq!(nav.theme(), Theme::Light);
        assert!(!nav.mobile_menu_open());
    }

    #[test]
    fn test_navigate_closes_mobile_menu() {
        let mut nav = NavContext::new();
        assert!(nav.toggle_mobile_menu());

        nav.navigate(Section::Projects);
        assert_eq!(nav.active(), Section::Projects);
        assert!(!nav.mobile_menu_open());
    }

    #[test]
    fn test_unknown_section_falls_back_to_chat() {
        assert_eq!(Section::from_name("blog"), Section::Chat);
        assert_eq!(Section::from_name("Review"), Section::Reviews);
        assert_eq!(Section::from_name(" fun "), Section::Fun);
    }

    #[test]
    fn test_section_decodes_like_from_name() {
        let decoded: Vec<Section> =
            serde_json::from_str(r#"["review", "blog", "projects"]"#).unwrap();
        assert_eq!(decoded, vec![Section::Reviews, Section::Chat, Section::Projects]);
        assert_eq!(serde_json::to_string(&Section::Reviews).unwrap(), "\"reviews\"");
    }

    #[test]
    fn test_theme_toggle() {
        let mut nav = NavContext::new();
        assert_eq!(nav.toggle_theme(), Theme::Dark);
        assert_eq!(nav.toggle_theme(), Theme::Light);
    }

    #[test]
    fn test_view_marks_single_active_item() {
        let mut nav = NavContext::new();
        nav.navigate(Section::Contact);
        let view = nav.view(&Profile::default());

        assert_eq!(view.navigation.len(), 6);
        let active: Vec<Section> = view
            .navigation
            .iter()
            .filter(|i| i.active)
            .map(|i| i.id)
            .collect();
        assert_eq!(active, vec![Section::Contact]);
    }
}
