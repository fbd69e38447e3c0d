use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Skill as embedded in a user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Area as embedded in a user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "crate::models::dates")]
    pub start_date: NaiveDate,
    #[serde(default, with = "crate::models::dates::option")]
    pub end_date: Option<NaiveDate>,
}

impl Experience {
    /// A missing end date means the position is current.
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}

/// Join record between a user and a catalog skill. Removal is by this id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSkill {
    pub id: String,
    pub skill: SkillRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserArea {
    pub id: String,
    pub area: AreaRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub is_recruiter: bool,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub user_skills: Vec<UserSkill>,
    #[serde(default)]
    pub user_areas: Vec<UserArea>,
    #[serde(default)]
    pub user_summary: Option<UserSummary>,
}

impl User {
    /// A profile is approved once the evaluation summary exists.
    pub fn is_evaluated(&self) -> bool {
        self.user_summary.is_some()
    }

    /// Upper-cased first letter of each name part: "ana maria" -> "AM".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Body of `POST /experiences/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExperience {
    pub title: String,
    pub description: String,
    #[serde(with = "crate::models::dates")]
    pub start_date: NaiveDate,
    #[serde(
        with = "crate::models::dates::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
}
