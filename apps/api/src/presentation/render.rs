//! HTML and terminal renderers for the upload page and the results view.

use std::fmt::Write;

use crate::parsing::models::CandidateProfile;
use crate::presentation::notice::{Notice, NoticeKind};
use crate::presentation::view::{ProfileView, Section};
use crate::presentation::widget::WidgetState;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// Renders the full upload page. Slots are filled in template order, so text
/// inside one slot is never mistaken for a later placeholder.
pub fn render_page(
    notice: Option<&Notice>,
    widget: &WidgetState,
    profile: Option<&CandidateProfile>,
) -> String {
    let notice_html = notice.map(render_notice_html).unwrap_or_default();
    let widget_html = render_widget_html(widget);
    let results_html = profile
        .map(|p| render_profile_html(&ProfileView::new(p)))
        .unwrap_or_default();

    fill_slots(
        INDEX_HTML,
        &[
            ("{{ notice }}", notice_html.as_str()),
            ("{{ widget }}", widget_html.as_str()),
            ("{{ results }}", results_html.as_str()),
        ],
    )
}

fn fill_slots(template: &str, slots: &[(&str, &str)]) -> String {
    let extra: usize = slots.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;
    for (placeholder, value) in slots {
        if let Some((before, after)) = rest.split_once(placeholder) {
            out.push_str(before);
            out.push_str(value);
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

pub fn render_notice_html(notice: &Notice) -> String {
    let class = match notice.kind {
        NoticeKind::Success => "success",
        NoticeKind::Error => "error",
    };
    format!(
        r#"<div class="notice {class}" role="status"><strong>{}</strong><div>{}</div></div>"#,
        html_escape(&notice.title),
        html_escape(&notice.description)
    )
}

pub fn render_widget_html(state: &WidgetState) -> String {
    match state {
        WidgetState::Processing { file_name } => format!(
            r#"<div id="dropzone" class="card dropzone processing"><p><strong>Processing Resume</strong></p><p class="muted">{}</p></div>"#,
            html_escape(file_name)
        ),
        WidgetState::Idle => r#"<div id="dropzone" class="card dropzone">
      <h3>Upload Resume</h3>
      <p class="muted">Drag and drop a PDF file here, or click to browse</p>
      <p class="muted">PDF files only</p>
      <form id="upload-form" method="post" action="/upload" enctype="multipart/form-data">
        <input id="file-input" type="file" name="resume" accept="application/pdf">
        <button type="submit">Choose File</button>
      </form>
    </div>"#
            .to_string(),
    }
}

pub fn render_profile_html(view: &ProfileView<'_>) -> String {
    let mut out = String::new();

    out.push_str(r#"<section id="results">"#);
    let _ = write!(
        out,
        r#"<div class="card"><h2>{}</h2><div class="muted">"#,
        html_escape(view.name)
    );
    if let Some(email) = view.email {
        let _ = write!(out, r#"<span class="email">{}</span> "#, html_escape(email));
    }
    if let Some(phone) = view.phone {
        let _ = write!(out, r#"<span class="phone">{}</span>"#, html_escape(phone));
    }
    out.push_str("</div></div>");

    for section in &view.sections {
        let _ = write!(
            out,
            r#"<div class="card section-{}"><h3>{}</h3>"#,
            section.title().to_lowercase(),
            section.title()
        );
        match section {
            Section::Skills(skills) => {
                for skill in skills.iter() {
                    let _ = write!(out, r#"<span class="badge">{}</span>"#, html_escape(skill));
                }
            }
            Section::Experience(entries) => {
                for (i, exp) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(r#"<hr class="separator">"#);
                    }
                    let _ = write!(
                        out,
                        r#"<div class="entry"><div><h4>{}</h4><p class="muted">{}</p></div><span class="badge outline">{}</span></div>"#,
                        html_escape(&exp.title),
                        html_escape(&exp.company),
                        html_escape(&exp.duration)
                    );
                    if !exp.description.trim().is_empty() {
                        let _ = write!(
                            out,
                            r#"<p class="muted">{}</p>"#,
                            html_escape(&exp.description)
                        );
                    }
                }
            }
            Section::Education(entries) => {
                for (i, edu) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(r#"<hr class="separator">"#);
                    }
                    let _ = write!(
                        out,
                        r#"<div class="entry"><div><h4>{}</h4><p class="muted">{}</p></div><span class="badge outline">{}</span></div>"#,
                        html_escape(&edu.degree),
                        html_escape(&edu.institution),
                        html_escape(&edu.year)
                    );
                }
            }
        }
        out.push_str("</div>");
    }
    out.push_str("</section>");
    out
}

/// Plain-text rendering for the terminal.
pub fn render_profile_text(view: &ProfileView<'_>) -> String {
    let mut out = String::new();

    let name = if view.name.is_empty() {
        "(no name found)"
    } else {
        view.name
    };
    let _ = writeln!(out, "{name}");
    let contacts: Vec<&str> = [view.email, view.phone].into_iter().flatten().collect();
    if !contacts.is_empty() {
        let _ = writeln!(out, "{}", contacts.join(" | "));
    }

    for section in &view.sections {
        let _ = writeln!(out, "\n{}", section.title());
        let _ = writeln!(out, "{}", "-".repeat(section.title().len()));
        match section {
            Section::Skills(skills) => {
                let badges: Vec<String> = skills.iter().map(|s| format!("[{s}]")).collect();
                let _ = writeln!(out, "{}", badges.join(" "));
            }
            Section::Experience(entries) => {
                for exp in entries.iter() {
                    let _ = writeln!(out, "* {} @ {} ({})", exp.title, exp.company, exp.duration);
                    if !exp.description.trim().is_empty() {
                        let _ = writeln!(out, "  {}", exp.description);
                    }
                }
            }
            Section::Education(entries) => {
                for edu in entries.iter() {
                    let _ = writeln!(out, "* {}, {} ({})", edu.degree, edu.institution, edu.year);
                }
            }
        }
    }
    out
}

pub fn render_widget_text(state: &WidgetState) -> String {
    match state {
        WidgetState::Idle => "Upload Resume: PDF files only".to_string(),
        WidgetState::Processing { file_name } => format!("Processing Resume {file_name}"),
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
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
    fn test_jane_doe_html() {
        let profile = jane();
        let html = render_profile_html(&ProfileView::new(&profile));

        assert!(html.contains("<h2>Jane Doe</h2>"));
        assert_eq!(html.matches(r#"<span class="badge">"#).count(), 2);
        assert!(html.contains("<h4>Engineer</h4>"));
        assert!(!html.contains("Education"));
        assert!(!html.contains(r#"class="phone""#));
    }

    #[test]
    fn test_missing_education_key_renders_without_section() {
        let profile: CandidateProfile =
            serde_json::from_str(r#"{"name":"Jane Doe","skills":["Go"],"experience":[]}"#).unwrap();
        let html = render_profile_html(&ProfileView::new(&profile));
        assert!(!html.contains("Education"));
        assert!(!html.contains("Experience"));
        assert!(html.contains("Skills"));
    }

    #[test]
    fn test_profile_text_is_escaped_in_html() {
        let mut profile = jane();
        profile.name = "<script>alert('x')</script>".into();
        let html = render_profile_html(&ProfileView::new(&profile));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_page_slots_are_not_reinterpreted() {
        let notice = Notice::failed("{{ results }}");
        let page = render_page(Some(&notice), &WidgetState::Idle, None);
        assert!(page.contains("{{ results }}"));
        assert!(!page.contains("{{ widget }}"));
    }

    #[test]
    fn test_idle_page_has_upload_form() {
        let page = render_page(None, &WidgetState::Idle, None);
        assert!(page.contains(r#"action="/upload""#));
        assert!(page.contains("PDF files only"));
        assert!(!page.contains(r#"id="results""#));
    }

    #[test]
    fn test_drop_zone_is_wired_to_page_drag_handling() {
        let page = render_page(None, &WidgetState::Idle, None);
        assert!(page.contains(r#"<div id="dropzone" class="card dropzone">"#));
        assert!(page.contains(r#"classList.add("dragging")"#));
        assert!(page.contains(r#"classList.remove("dragging")"#));
    }

    #[test]
    fn test_processing_widget_shows_file_name_and_no_form() {
        let html = render_widget_html(&WidgetState::Processing {
            file_name: "cv & letter.pdf".into(),
        });
        assert!(html.contains("Processing Resume"));
        assert!(html.contains("cv &amp; letter.pdf"));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn test_text_rendering() {
        let profile = jane();
        let text = render_profile_text(&ProfileView::new(&profile));
        assert!(text.starts_with("Jane Doe\njane@x.com\n"));
        assert!(text.contains("[Go] [Rust]"));
        assert!(text.contains("* Engineer @ Acme (2020-2023)"));
        assert!(!text.contains("Education"));
    }
}
