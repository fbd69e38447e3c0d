use std::io::Write;

use super::{load, render, AreasCommand, CatalogArgs, Outcome, PickArgs, SkillsCommand, ViewResult};
use crate::api::{areas as area_api, skills as skill_api};
use crate::browse::{Catalog, CatalogPicker, Selection};
use crate::state::ClientState;

pub async fn skills(state: &ClientState, command: SkillsCommand, out: &mut dyn Write) -> ViewResult {
    let api = state.api.skills();
    match command {
        SkillsCommand::Catalog(args) => {
            let limit = args.limit.unwrap_or(skill_api::DEFAULT_LIMIT);
            let page = load(state, api.list(args.page, limit, args.search.as_deref())).await?;
            write!(
                out,
                "{}",
                render::numbered_page(&page.skills, page.page, page.total_pages, |s| {
                    format!("[{}] {}", s.id, s.name)
                })
            )?;
        }
        SkillsCommand::Add { skill_id } => api.add(&skill_id).await?,
        SkillsCommand::Remove { user_skill_id } => api.remove(&user_skill_id).await?,
        SkillsCommand::Pick(args) => {
            let picker = CatalogPicker::new(api, skill_api::PICKER_LIMIT);
            return pick(state, picker, args, false, out, |s| s.name.clone()).await;
        }
    }
    Ok(Outcome::Rendered)
}

pub async fn areas(state: &ClientState, command: AreasCommand, out: &mut dyn Write) -> ViewResult {
    let api = state.api.areas();
    match command {
        AreasCommand::Catalog(CatalogArgs {
            page,
            limit,
            search,
        }) => {
            let limit = limit.unwrap_or(area_api::PICKER_LIMIT);
            let listing = load(state, api.list(page, limit, search.as_deref())).await?;
            write!(
                out,
                "{}",
                render::numbered_page(&listing.areas, listing.page, listing.total_pages, |a| {
                    format!("[{}] {}", a.id, a.name)
                })
            )?;
            Ok(Outcome::Rendered)
        }
        AreasCommand::Pick { pick: args, yes } => {
            let picker = CatalogPicker::new(api, area_api::PICKER_LIMIT);
            pick(state, picker, args, yes, out, |a| a.name.clone()).await
        }
    }
}

/// Loads the first page, applies the debounced search, walks to `--page`, lists
/// the results and optionally chooses the `--select`ed one.
async fn pick<C: Catalog>(
    state: &ClientState,
    mut picker: CatalogPicker<C>,
    args: PickArgs,
    confirmed: bool,
    out: &mut dyn Write,
    label: impl Fn(&C::Item) -> String,
) -> ViewResult {
    load(state, picker.load()).await?;
    picker.type_search(&args.search);
    load(state, picker.settle()).await?;
    if args.page > 1 {
        load(state, picker.go_to_page(args.page)).await?;
    }

    let Some(current) = picker.current() else {
        return Ok(Outcome::Failed);
    };
    write!(
        out,
        "{}",
        render::numbered_page(&current.items, picker.page(), current.total_pages, &label)
    )?;

    let Some(position) = args.select else {
        return Ok(Outcome::Rendered);
    };
    let Some(item) = position
        .checked_sub(1)
        .and_then(|i| current.items.get(i))
        .cloned()
    else {
        writeln!(out, "No item at position {position}")?;
        return Ok(Outcome::Failed);
    };

    let name = label(&item);
    if picker.select(item).await? == Selection::AwaitingConfirmation {
        if !confirmed {
            picker.cancel();
            writeln!(out, "Re-run with --yes to confirm {name}")?;
            return Ok(Outcome::Rendered);
        }
        picker.confirm().await?;
    }
    writeln!(out, "Chose {name}")?;
    Ok(Outcome::Rendered)
}
