use crate::parsing::models::{CandidateProfile, Education, Experience};

/// A results section. Only non-empty sections are ever constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Section<'a> {
    Skills(&'a [String]),
    Experience(&'a [Experience]),
    Education(&'a [Education]),
}

impl Section<'_> {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Skills(_) => "Skills",
            Section::Experience(_) => "Experience",
            Section::Education(_) => "Education",
        }
    }
}

/// What the results view shows for one profile: the header plus the sections that have content.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub sections: Vec<Section<'a>>,
}

impl<'a> ProfileView<'a> {
    pub fn new(profile: &'a CandidateProfile) -> Self {
        let mut sections = Vec::with_capacity(3);
        if !profile.skills.is_empty() {
            sections.push(Section::Skills(&profile.skills));
        }
        if !profile.experience.is_empty() {
            sections.push(Section::Experience(&profile.experience));
        }
        if !profile.education.is_empty() {
            sections.push(Section::Education(&profile.education));
        }

        ProfileView {
            name: profile.name.as_str(),
            email: non_empty(&profile.email),
            phone: non_empty(&profile.phone),
            sections,
        }
    }
}

#[cfg(test)]
impl<'a> ProfileView<'a> {
    pub fn skill_badges(&self) -> &'a [String] {
        self.sections
            .iter()
            .find_map(|s| match s {
                Section::Skills(skills) => Some(*skills),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn has_section(&self, title: &str) -> bool {
        self.sections.iter().any(|s| s.title() == title)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> CandidateProfile {
        serde_json::from_str(
            r#"{"name":"Jane Doe","email":"jane@x.com","phone":"","skills":["Go","Rust"],"experience":[{"title":"Engineer","company":"Acme","duration":"2020-2023","description":""}],"education":[]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_jane_doe_view() {
        let profile = jane();
        let view = ProfileView::new(&profile);

        assert_eq!(view.name, "Jane Doe");
        assert_eq!(view.email, Some("jane@x.com"));
        assert_eq!(view.phone, None);
        assert_eq!(view.skill_badges().len(), 2);
        assert!(view.has_section("Experience"));
        assert!(!view.has_section("Education"));
    }

    #[test]
    fn test_empty_profile_has_no_sections() {
        let profile = CandidateProfile::default();
        let view = ProfileView::new(&profile);
        assert!(view.sections.is_empty());
        assert!(view.skill_badges().is_empty());
    }

    #[test]
    fn test_section_order_is_fixed() {
        let mut profile = jane();
        profile.education.push(Education {
            degree: "BSc".into(),
            institution: "MIT".into(),
            year: "2019".into(),
        });
        let titles: Vec<_> = ProfileView::new(&profile)
            .sections
            .iter()
            .map(Section::title)
            .collect();
        assert_eq!(titles, vec!["Skills", "Experience", "Education"]);
    }
}
