//! Plain-text rendering of API models. Pure functions; the command handlers
//! decide where the text goes.

use std::fmt::Write;

use crate::models::analysis::{Analysis, AnalysisCandidate};
use crate::models::user::{AreaRef, Experience, SkillRef, User};
use crate::scoring::ScoreBreakdown;

/// Experiences shown per candidate before collapsing into "+N more".
pub const EXPERIENCE_PREVIEW: usize = 2;
/// Skills shown per candidate before collapsing into "+N more".
pub const SKILL_PREVIEW: usize = 5;

/// Joins the first `limit` items and appends "+N more" for the rest.
fn preview<T>(items: &[T], limit: usize, label: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return "none listed".to_string();
    }
    let mut text = items
        .iter()
        .take(limit)
        .map(label)
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() > limit {
        let _ = write!(text, " +{} more", items.len() - limit);
    }
    text
}

pub fn date_range(experience: &Experience) -> String {
    let start = experience.start_date.format("%Y-%m-%d");
    match experience.end_date {
        Some(end) => format!("{start} to {}", end.format("%Y-%m-%d")),
        None => format!("{start} to present"),
    }
}

pub fn evaluation_status(user: &User) -> &'static str {
    if user.is_evaluated() {
        "Approved"
    } else {
        "Pending"
    }
}

pub fn profile(user: &User, skills: &[SkillRef], area: Option<&AreaRef>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}) <{}>", user.name, user.initials(), user.email);
    let _ = writeln!(out, "Status: {}", evaluation_status(user));
    let _ = writeln!(out, "Area: {}", area.map_or("not set", |a| a.name.as_str()));

    let _ = writeln!(out, "Skills:");
    if skills.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for skill in skills {
        let _ = writeln!(out, "  [{}] {}", skill.id, skill.name);
    }

    let _ = writeln!(out, "Experiences:");
    if user.experiences.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for experience in &user.experiences {
        let _ = writeln!(out, "  {}, {}", experience.title, date_range(experience));
        let _ = writeln!(out, "    {}", experience.description);
    }
    out
}

pub fn candidate(candidate: &AnalysisCandidate) -> String {
    let scores = ScoreBreakdown::from_candidate(candidate);
    let user = &candidate.candidate;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} <{}>  {}% ({})",
        user.name,
        user.email,
        scores.aggregate,
        scores.band.label()
    );
    let _ = writeln!(
        out,
        "  technical {}% | business {}% | behavioral {}%",
        scores.technical, scores.business, scores.behavioral
    );
    let _ = writeln!(out, "  {}", candidate.analysis_summary);
    let _ = writeln!(
        out,
        "  Experience: {}",
        preview(&user.experiences, EXPERIENCE_PREVIEW, |e| {
            format!("{} ({})", e.title, date_range(e))
        })
    );
    let _ = writeln!(
        out,
        "  Skills: {}",
        preview(&user.user_skills, SKILL_PREVIEW, |s| s.skill.name.clone())
    );
    out
}

pub fn analysis_row(analysis: &Analysis) -> String {
    format!(
        "[{}] {}  {}  {}",
        analysis.id,
        analysis.created_at.format("%Y-%m-%d %H:%M"),
        analysis.status.label(),
        analysis.query
    )
}

/// Numbered listing, one line per item, followed by the page indicator.
pub fn numbered_page<T>(
    items: &[T],
    page: u32,
    total_pages: u32,
    label: impl Fn(&T) -> String,
) -> String {
    let mut out = String::new();
    if items.is_empty() {
        let _ = writeln!(out, "No results.");
    }
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, label(item));
    }
    let _ = writeln!(out, "Page {page} of {}", total_pages.max(1));
    out
}
