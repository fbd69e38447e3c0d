//! CLI views: one subcommand per screen.
//!
//! Every command maps to a `Route`. Before a handler runs, the route goes
//! through `guard_session` and, for recruiter screens, `guard_recruiter`.
//! Hook failures have already been toasted by the time they reach `run`;
//! a 401 turns into a redirect to the login screen.

mod account;
mod catalog;
mod recruiter;
pub mod render;

use std::future::Future;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use crate::errors::ClientError;
use crate::forms::FormError;
use crate::navigation::{guard_recruiter, guard_session, Access, Navigator, Route};
use crate::notify::{Notice, NoticeLevel, Notifier, Toasts};
use crate::state::ClientState;

#[derive(Parser)]
#[command(name = "vista")]
#[command(version)]
#[command(about = "Vista talent platform client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and store the access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "VISTA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and log in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "VISTA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored access token
    Logout,
    /// Show your profile
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommand>,
    },
    /// Browse the skill catalog and manage your skills
    Skills {
        #[command(subcommand)]
        command: SkillsCommand,
    },
    /// Browse the area catalog and set your area
    Areas {
        #[command(subcommand)]
        command: AreasCommand,
    },
    /// Manage your professional experiences
    Experiences {
        #[command(subcommand)]
        command: ExperiencesCommand,
    },
    /// List past candidate searches (recruiters only)
    Analyses {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[command(subcommand)]
        command: Option<AnalysesCommand>,
    },
    /// Search for candidates; works with or without a session
    Search {
        /// What you are looking for, in plain words
        query: String,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Ask for your profile to be evaluated
    RequestEvaluation,
}

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PickArgs {
    /// Search term, applied after the debounce
    #[arg(long, default_value = "")]
    pub search: String,
    /// Page to list, reached one page at a time from the first
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// 1-based position of the item to choose from the listed page
    #[arg(long, value_name = "N")]
    pub select: Option<usize>,
}

#[derive(Subcommand)]
pub enum SkillsCommand {
    /// List catalog skills
    Catalog(CatalogArgs),
    /// Add a catalog skill to your profile
    Add { skill_id: String },
    /// Remove a skill from your profile
    Remove { user_skill_id: String },
    /// Search the catalog and optionally add a result
    Pick(PickArgs),
}

#[derive(Subcommand)]
pub enum AreasCommand {
    /// List catalog areas
    Catalog(CatalogArgs),
    /// Search the catalog and optionally set a result as your area
    Pick {
        #[command(flatten)]
        pick: PickArgs,
        /// Confirm replacing your current area
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ExperiencesCommand {
    /// Add an experience (dates as YYYY-MM-DD)
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AnalysesCommand {
    /// Show one analysis with its ranked candidates
    Show { id: String },
}

impl Command {
    pub fn route(&self) -> Route {
        match self {
            Command::Login { .. } => Route::Login,
            Command::Register { .. } => Route::Register,
            Command::Logout => Route::Home,
            Command::Profile { .. }
            | Command::Skills { .. }
            | Command::Areas { .. }
            | Command::Experiences { .. } => Route::Profile,
            Command::Analyses {
                command: Some(AnalysesCommand::Show { id }),
                ..
            } => Route::AnalysisDetails(id.clone()),
            Command::Analyses { .. } => Route::Analyses,
            // Search lives on the public home screen.
            Command::Search { .. } => Route::Home,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered,
    Failed,
    Redirect(Route),
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Rendered => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
            Outcome::Redirect(_) => ExitCode::from(2),
        }
    }
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

pub type ViewResult = Result<Outcome, ViewError>;

/// Awaits a query and toasts its failure. Mutations toast on their own.
async fn load<T>(
    state: &ClientState,
    query: impl Future<Output = Result<T, ClientError>>,
) -> Result<T, ViewError> {
    query.await.map_err(|e| {
        if let Some(message) = e.notice_message() {
            state.toasts.notify(Notice::error(message));
        }
        ViewError::Client(e)
    })
}

fn redirect(state: &ClientState, to: Route) -> Outcome {
    state.history.navigate(to.clone());
    Outcome::Redirect(to)
}

/// Runs `command` behind the route guards and writes its screen to `out`.
pub async fn run(command: Command, state: &ClientState, out: &mut dyn Write) -> io::Result<Outcome> {
    let route = command.route();

    if let Access::Redirect(to) = guard_session(state.session(), &route) {
        debug!("{route} requires a session");
        return Ok(redirect(state, to));
    }

    if route.requires_recruiter() {
        let me = match load(state, state.api.users().me()).await {
            Ok(me) => me,
            Err(e) => return finish(state, Err(e), out),
        };
        if let Access::Redirect(to) = guard_recruiter(me.as_ref(), &route) {
            debug!("{route} is for recruiters only");
            return Ok(redirect(state, to));
        }
    }

    state.history.navigate(route);
    let result = dispatch(command, state, out).await;
    finish(state, result, out)
}

async fn dispatch(command: Command, state: &ClientState, out: &mut dyn Write) -> ViewResult {
    match command {
        Command::Login { email, password } => account::login(state, email, password, out).await,
        Command::Register {
            name,
            email,
            password,
        } => account::register(state, name, email, password, out).await,
        Command::Logout => account::logout(state, out),
        Command::Profile { command: None } => account::profile(state, out).await,
        Command::Profile {
            command: Some(ProfileCommand::RequestEvaluation),
        } => account::request_evaluation(state, out).await,
        Command::Experiences {
            command:
                ExperiencesCommand::Add {
                    title,
                    description,
                    start,
                    end,
                },
        } => account::add_experience(state, title, description, start, end, out).await,
        Command::Skills { command } => catalog::skills(state, command, out).await,
        Command::Areas { command } => catalog::areas(state, command, out).await,
        Command::Analyses { page, command: None } => recruiter::analyses(state, page, out).await,
        Command::Analyses {
            command: Some(AnalysesCommand::Show { id }),
            ..
        } => recruiter::analysis(state, &id, out).await,
        Command::Search { query } => recruiter::search(state, &query, out).await,
    }
}

fn finish(state: &ClientState, result: ViewResult, out: &mut dyn Write) -> io::Result<Outcome> {
    match result {
        Ok(outcome) => Ok(outcome),
        // The gateway already cleared the session and recorded the redirect.
        Err(ViewError::Client(ClientError::Unauthorized)) => {
            Ok(Outcome::Redirect(state.history.current().unwrap_or(Route::Login)))
        }
        Err(ViewError::Client(e)) => {
            debug!("command failed: {e}");
            Ok(Outcome::Failed)
        }
        Err(ViewError::Form(e)) => {
            for field in e.fields() {
                writeln!(out, "  {field}")?;
            }
            Ok(Outcome::Failed)
        }
        Err(ViewError::Io(e)) => Err(e),
    }
}

/// Prints pending toasts: successes to `out`, errors to `err`.
pub fn print_toasts(toasts: &Toasts, out: &mut dyn Write, err: &mut dyn Write) -> io::Result<()> {
    for notice in toasts.drain() {
        match notice.level {
            NoticeLevel::Success => writeln!(out, "✓ {}", notice.message)?,
            NoticeLevel::Error => writeln!(err, "✗ {}", notice.message)?,
        }
    }
    Ok(())
}
