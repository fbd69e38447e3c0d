use std::io::Write;

use super::{load, render, Outcome, ViewResult};
use crate::forms::{ExperienceForm, LoginForm, RegisterForm};
use crate::navigation::{Navigator, Route};
use crate::state::ClientState;

pub async fn login(
    state: &ClientState,
    email: String,
    password: String,
    out: &mut dyn Write,
) -> ViewResult {
    let request = LoginForm { email, password }.validate()?;
    state.api.auth().login(&request).await?;
    state.history.navigate(Route::Home);
    writeln!(out, "Logged in as {}", request.email)?;
    Ok(Outcome::Rendered)
}

pub async fn register(
    state: &ClientState,
    name: String,
    email: String,
    password: String,
    out: &mut dyn Write,
) -> ViewResult {
    let request = RegisterForm {
        name,
        email,
        password,
    }
    .validate()?;
    state.api.auth().register(&request).await?;
    state.history.navigate(Route::Home);
    writeln!(out, "Welcome, {}", request.name)?;
    Ok(Outcome::Rendered)
}

pub fn logout(state: &ClientState, out: &mut dyn Write) -> ViewResult {
    state.api.auth().logout();
    writeln!(out, "Logged out")?;
    Ok(Outcome::Rendered)
}

pub async fn profile(state: &ClientState, out: &mut dyn Write) -> ViewResult {
    let Some(user) = load(state, state.api.users().me()).await? else {
        return Ok(Outcome::Failed);
    };
    let skills = load(state, state.api.skills().user_skills()).await?;
    let area = load(state, state.api.areas().user_area()).await?;
    write!(out, "{}", render::profile(&user, &skills, area.as_ref()))?;
    Ok(Outcome::Rendered)
}

pub async fn request_evaluation(state: &ClientState, out: &mut dyn Write) -> ViewResult {
    if let Some(user) = load(state, state.api.users().me()).await? {
        if user.is_evaluated() {
            writeln!(out, "Your profile has already been evaluated")?;
            return Ok(Outcome::Rendered);
        }
    }
    state.api.users().request_summary().await?;
    Ok(Outcome::Rendered)
}

pub async fn add_experience(
    state: &ClientState,
    title: String,
    description: String,
    start_date: String,
    end_date: Option<String>,
    out: &mut dyn Write,
) -> ViewResult {
    let experience = ExperienceForm {
        title,
        description,
        start_date,
        end_date,
    }
    .validate()?;
    state.api.experiences().create(&experience).await?;
    writeln!(out, "{}, {}", experience.title, experience.start_date)?;
    Ok(Outcome::Rendered)
}
