use std::io::Write;

use super::{load, render, Outcome, ViewResult};
use crate::api::analysis::DEFAULT_LIMIT;
use crate::scoring::rank_candidates;
use crate::state::ClientState;

pub async fn analyses(state: &ClientState, page: u32, out: &mut dyn Write) -> ViewResult {
    let listing = load(state, state.api.analysis().list(page, DEFAULT_LIMIT)).await?;
    write!(
        out,
        "{}",
        render::numbered_page(&listing.data, listing.page, listing.total_pages(), render::analysis_row)
    )?;
    Ok(Outcome::Rendered)
}

pub async fn analysis(state: &ClientState, id: &str, out: &mut dyn Write) -> ViewResult {
    let mut detail = load(state, state.api.analysis().get(id)).await?;
    writeln!(out, "{}", render::analysis_row(&detail.analysis))?;
    rank_candidates(&mut detail.users);
    for candidate in &detail.users {
        write!(out, "\n{}", render::candidate(candidate))?;
    }
    Ok(Outcome::Rendered)
}

pub async fn search(state: &ClientState, query: &str, out: &mut dyn Write) -> ViewResult {
    let query = query.trim();
    if query.is_empty() {
        writeln!(out, "  query: Describe who you are looking for")?;
        return Ok(Outcome::Failed);
    }
    let mut result = state.api.candidates().search(query).await?;
    writeln!(out, "Analysis {} ({} candidates)", result.analysis.id, result.users.len())?;
    rank_candidates(&mut result.users);
    for candidate in &result.users {
        write!(out, "\n{}", render::candidate(candidate))?;
    }
    Ok(Outcome::Rendered)
}
