//! Shared test fixtures: sample models and an in-process fake of the API.
//!
//! `FakeApi` keeps one mutable profile and a fixed catalog behind a mutex and
//! records every request it sees, so tests can assert on cache behaviour by
//! counting hits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

use crate::api::ApiContext;
use crate::gateway::ApiGateway;
use crate::models::analysis::{
    Analysis, AnalysisCandidate, AnalysisRef, AnalysisResponse, AnalysisStatus,
    GetAnalysisByIdResponse, ListAnalysisResponse,
};
use crate::models::auth::LoginRequest;
use crate::models::catalog::{Area, AreasResponse, Skill, SkillsResponse};
use crate::models::user::{
    AreaRef, Experience, SkillRef, User, UserArea, UserSkill, UserSummary,
};
use crate::navigation::History;
use crate::notify::Toasts;
use crate::query::QueryClient;
use crate::session::storage::{FileStorage, LocalStorage};
use crate::session::{Session, ACCESS_TOKEN_KEY};
use crate::state::ClientState;

pub const CANDIDATE_EMAIL: &str = "ana@example.com";
pub const RECRUITER_EMAIL: &str = "rui@example.com";
pub const PASSWORD: &str = "secret";

const SKILL_NAMES: [&str; 25] = [
    "Rust", "React", "Python", "Go", "TypeScript", "PostgreSQL", "Docker", "Kubernetes",
    "GraphQL", "Node.js", "Java", "Kotlin", "Swift", "Redis", "Terraform", "AWS", "Vue",
    "Angular", "Django", "Flask", "Rails", "Elixir", "Scala", "C++", "Haskell",
];

const AREA_NAMES: [&str; 6] = ["Backend", "Frontend", "Data", "DevOps", "Mobile", "Security"];

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn sample_user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        name: name.to_string(),
        is_recruiter: false,
        experiences: Vec::new(),
        user_skills: Vec::new(),
        user_areas: Vec::new(),
        user_summary: None,
    }
}

/// Candidate whose sub-scores are the same fraction of their maximum as `score` is of 100.
pub fn sample_candidate(id: &str, score: f64) -> AnalysisCandidate {
    AnalysisCandidate {
        analysis_id: format!("ac-{id}"),
        candidate_id: id.to_string(),
        analysis_summary: format!("Summary for {id}"),
        score,
        technical_match_score: score * 0.4,
        business_fit_score: score * 0.2,
        behavioral_match_score: score * 0.1,
        candidate: sample_user(id, &format!("Candidate {id}")),
    }
}

pub fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
}

fn token_for(email: &str) -> String {
    format!("token-{email}")
}

// ────────────────────────────────────────────────────────────
// Fake API
// ────────────────────────────────────────────────────────────

struct Account {
    name: String,
    password: String,
    is_recruiter: bool,
}

struct FakeState {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    skills: Vec<Skill>,
    areas: Vec<Area>,
    user_skills: Vec<String>,
    user_area: Option<String>,
    experiences: Vec<Experience>,
    evaluated: bool,
    analyses: Vec<GetAnalysisByIdResponse>,
    requests: Vec<(String, Option<String>)>,
}

#[derive(Clone)]
pub struct FakeApi(Arc<Mutex<FakeState>>);

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn reject(status: StatusCode, message: impl Into<Value>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message.into() })))
}

impl FakeApi {
    pub fn seeded() -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(
            CANDIDATE_EMAIL.to_string(),
            Account {
                name: "Ana Souza".into(),
                password: PASSWORD.into(),
                is_recruiter: false,
            },
        );
        accounts.insert(
            RECRUITER_EMAIL.to_string(),
            Account {
                name: "Rui Costa".into(),
                password: PASSWORD.into(),
                is_recruiter: true,
            },
        );

        let skills = SKILL_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| Skill {
                id: format!("s{}", i + 1),
                name: name.to_string(),
                description: None,
                area_id: None,
                created_at: timestamp(),
                updated_at: timestamp(),
            })
            .collect();
        let areas = AREA_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| Area {
                id: format!("a{}", i + 1),
                name: name.to_string(),
                description: Some(format!("{name} work")),
                parent_id: None,
                created_at: timestamp(),
                updated_at: timestamp(),
            })
            .collect();

        Self(Arc::new(Mutex::new(FakeState {
            accounts,
            tokens: HashMap::new(),
            skills,
            areas,
            user_skills: Vec::new(),
            user_area: None,
            experiences: Vec::new(),
            evaluated: false,
            analyses: Vec::new(),
            requests: Vec::new(),
        })))
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.0.lock().unwrap()
    }

    pub fn issue_token(&self, email: &str) -> String {
        let token = token_for(email);
        self.state().tokens.insert(token.clone(), email.to_string());
        token
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/users/me", get(me))
            .route("/users/summary/request", post(request_summary))
            .route("/areas", get(list_areas))
            .route("/areas/user", get(user_area).post(set_user_area))
            .route("/skills", get(list_skills))
            .route("/skills/user", get(user_skills).post(add_skill))
            .route("/skills/user/:id", delete(remove_skill))
            .route("/experiences/create", post(create_experience))
            .route("/analysis/list-all", get(list_analyses))
            .route("/analysis/get-by-id/:id", get(get_analysis))
            .route("/candidates-search", post(search_candidates))
            .layer(middleware::from_fn_with_state(self.clone(), record))
            .with_state(self.clone())
    }
}

impl FakeState {
    /// Email of the caller, or a 401 for a missing or unknown bearer token.
    fn caller(&self, headers: &HeaderMap) -> Result<String, (StatusCode, Json<Value>)> {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .and_then(|token| self.tokens.get(token).cloned())
            .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Unauthorized"))
    }

    fn skill_ref(&self, skill_id: &str) -> Option<SkillRef> {
        self.skills.iter().find(|s| s.id == skill_id).map(|s| SkillRef {
            id: s.id.clone(),
            name: s.name.clone(),
            description: s.description.clone(),
        })
    }

    fn area_ref(&self, area_id: &str) -> Option<AreaRef> {
        self.areas.iter().find(|a| a.id == area_id).map(|a| AreaRef {
            id: a.id.clone(),
            name: a.name.clone(),
            description: a.description.clone(),
        })
    }

    fn profile(&self, email: &str) -> User {
        let account = &self.accounts[email];
        User {
            id: email.to_string(),
            email: email.to_string(),
            name: account.name.clone(),
            is_recruiter: account.is_recruiter,
            experiences: self.experiences.clone(),
            user_skills: self
                .user_skills
                .iter()
                .filter_map(|id| self.skill_ref(id))
                .map(|skill| UserSkill {
                    id: format!("us-{}", skill.id),
                    skill,
                })
                .collect(),
            user_areas: self
                .user_area
                .iter()
                .filter_map(|id| self.area_ref(id))
                .map(|area| UserArea {
                    id: format!("ua-{}", area.id),
                    area,
                })
                .collect(),
            user_summary: self.evaluated.then(|| UserSummary {
                id: "summary-1".into(),
            }),
        }
    }
}

async fn record(State(api): State<FakeApi>, request: Request, next: Next) -> Response {
    let key = format!("{} {}", request.method(), request.uri().path());
    let query = request.uri().query().map(str::to_string);
    api.state().requests.push((key, query));
    next.run(request).await
}

fn to_json<T: serde::Serialize>(value: &T) -> Reply {
    Ok(Json(serde_json::to_value(value).unwrap()))
}

async fn login(State(api): State<FakeApi>, Json(body): Json<Value>) -> Reply {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let valid = api
        .state()
        .accounts
        .get(email)
        .is_some_and(|a| a.password == password);
    if !valid {
        return Err(reject(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }
    Ok(Json(json!({ "accessToken": api.issue_token(email) })))
}

async fn register(State(api): State<FakeApi>, Json(body): Json<Value>) -> Reply {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    {
        let mut state = api.state();
        if state.accounts.contains_key(&email) {
            return Err(reject(StatusCode::CONFLICT, "Email already in use"));
        }
        state.accounts.insert(
            email.clone(),
            Account {
                name: body["name"].as_str().unwrap_or_default().to_string(),
                password: body["password"].as_str().unwrap_or_default().to_string(),
                is_recruiter: false,
            },
        );
    }
    Ok(Json(json!({ "accessToken": api.issue_token(&email) })))
}

async fn me(State(api): State<FakeApi>, headers: HeaderMap) -> Reply {
    let state = api.state();
    let email = state.caller(&headers)?;
    to_json(&state.profile(&email))
}

async fn request_summary(State(api): State<FakeApi>, headers: HeaderMap) -> Reply {
    let mut state = api.state();
    state.caller(&headers)?;
    state.evaluated = true;
    Ok(Json(json!({ "message": "Evaluation requested" })))
}

#[derive(Deserialize)]
struct ListParams {
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
}

impl ListParams {
    fn page_of<T: Clone>(&self, items: Vec<T>) -> (Vec<T>, u32, u32, u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(10).max(1);
        let total = items.len() as u32;
        let slice = items
            .into_iter()
            .skip(((page - 1) * limit) as usize)
            .take(limit as usize)
            .collect();
        (slice, total, page, limit, total.div_ceil(limit))
    }

    fn matches(&self, name: &str) -> bool {
        self.search
            .as_deref()
            .map_or(true, |s| name.to_lowercase().contains(&s.to_lowercase()))
    }
}

async fn list_skills(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Reply {
    let state = api.state();
    state.caller(&headers)?;
    let matching = state
        .skills
        .iter()
        .filter(|s| params.matches(&s.name))
        .cloned()
        .collect();
    let (skills, total, page, limit, total_pages) = params.page_of(matching);
    to_json(&SkillsResponse {
        skills,
        total,
        page,
        limit,
        total_pages,
    })
}

async fn list_areas(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Reply {
    let state = api.state();
    state.caller(&headers)?;
    let matching = state
        .areas
        .iter()
        .filter(|a| params.matches(&a.name))
        .cloned()
        .collect();
    let (areas, total, page, limit, total_pages) = params.page_of(matching);
    to_json(&AreasResponse {
        areas,
        total,
        page,
        limit,
        total_pages,
    })
}

async fn user_area(State(api): State<FakeApi>, headers: HeaderMap) -> Reply {
    let state = api.state();
    state.caller(&headers)?;
    let area = state.user_area.as_deref().and_then(|id| state.area_ref(id));
    to_json(&area)
}

async fn set_user_area(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = api.state();
    state.caller(&headers)?;
    let area_id = body["areaId"].as_str().unwrap_or_default();
    if state.area_ref(area_id).is_none() {
        return Err(reject(StatusCode::NOT_FOUND, "Area not found"));
    }
    state.user_area = Some(area_id.to_string());
    Ok(Json(json!({ "areaId": area_id })))
}

async fn user_skills(State(api): State<FakeApi>, headers: HeaderMap) -> Reply {
    let state = api.state();
    state.caller(&headers)?;
    let skills: Vec<SkillRef> = state
        .user_skills
        .iter()
        .filter_map(|id| state.skill_ref(id))
        .collect();
    to_json(&skills)
}

async fn add_skill(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = api.state();
    state.caller(&headers)?;
    let skill_id = body["skillId"].as_str().unwrap_or_default().to_string();
    if state.skill_ref(&skill_id).is_none() {
        return Err(reject(StatusCode::NOT_FOUND, "Skill not found"));
    }
    if state.user_skills.contains(&skill_id) {
        return Err(reject(StatusCode::CONFLICT, "Skill already added"));
    }
    state.user_skills.push(skill_id);
    Ok(Json(json!({})))
}

async fn remove_skill(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    let mut state = api.state();
    state.caller(&headers)?;
    let before = state.user_skills.len();
    state.user_skills.retain(|s| *s != id);
    if state.user_skills.len() == before {
        return Err(reject(StatusCode::NOT_FOUND, "Skill not found"));
    }
    Ok(Json(Value::Null))
}

async fn create_experience(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Reply {
    let mut state = api.state();
    state.caller(&headers)?;
    body["id"] = json!(format!("exp-{}", state.experiences.len() + 1));
    let experience: Experience = serde_json::from_value(body)
        .map_err(|e| reject(StatusCode::BAD_REQUEST, e.to_string()))?;
    if experience.end_date.is_some_and(|end| end < experience.start_date) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            json!(["endDate must not be before startDate", "dates are out of order"]),
        ));
    }
    state.experiences.push(experience.clone());
    to_json(&experience)
}

async fn list_analyses(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Reply {
    let state = api.state();
    state.caller(&headers)?;
    let all: Vec<Analysis> = state.analyses.iter().map(|a| a.analysis.clone()).collect();
    let (data, total, page, limit, _) = params.page_of(all);
    to_json(&ListAnalysisResponse {
        data,
        total,
        page,
        limit,
    })
}

async fn get_analysis(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    let state = api.state();
    state.caller(&headers)?;
    match state.analyses.iter().find(|a| a.analysis.id == id) {
        Some(found) => to_json(found),
        None => Err(reject(StatusCode::NOT_FOUND, "Analysis not found")),
    }
}

async fn search_candidates(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = api.state();
    // Public endpoint: the token, when present, only attributes the analysis.
    let email = state
        .caller(&headers)
        .unwrap_or_else(|_| "anonymous".to_string());

    let id = format!("analysis-{}", state.analyses.len() + 1);
    let mut users = vec![sample_candidate("c1", 92.0), sample_candidate("c2", 55.0)];
    for candidate in &mut users {
        candidate.analysis_id = id.clone();
    }
    let analysis = Analysis {
        id: id.clone(),
        user_id: email,
        status: AnalysisStatus::Completed,
        created_at: timestamp(),
        updated_at: timestamp(),
        query: body["query"].as_str().unwrap_or_default().to_string(),
    };
    // Newest first, like the real listing.
    state.analyses.insert(
        0,
        GetAnalysisByIdResponse {
            analysis,
            users: users.clone(),
        },
    );
    to_json(&AnalysisResponse {
        analysis: AnalysisRef { id },
        users,
    })
}

// ────────────────────────────────────────────────────────────
// Client wired to the fake
// ────────────────────────────────────────────────────────────

/// A fully wired client talking to a fresh `FakeApi`, with file-backed storage
/// in a temporary directory.
pub struct TestClient {
    pub ctx: ApiContext,
    pub toasts: Arc<Toasts>,
    pub history: Arc<History>,
    pub api: FakeApi,
    pub storage_path: std::path::PathBuf,
    _dir: TempDir,
}

impl TestClient {
    /// Candidate client; when `authenticated`, a valid token is already persisted.
    pub async fn start(authenticated: bool) -> Self {
        Self::start_as(authenticated.then_some(CANDIDATE_EMAIL)).await
    }

    pub async fn recruiter() -> Self {
        Self::start_as(Some(RECRUITER_EMAIL)).await
    }

    pub async fn start_as(email: Option<&str>) -> Self {
        let api = FakeApi::seeded();
        let base_url = serve(api.router()).await;

        let dir = TempDir::new().unwrap();
        let storage_path = dir.path().join("local-storage.json");
        if let Some(email) = email {
            let token = api.issue_token(email);
            FileStorage::new(&storage_path)
                .set_item(ACCESS_TOKEN_KEY, &token)
                .unwrap();
        }

        let session = Arc::new(Session::init(Box::new(FileStorage::new(&storage_path))));
        let history = Arc::new(History::default());
        let toasts = Arc::new(Toasts::default());
        let gateway =
            ApiGateway::new(&base_url, Duration::from_secs(5), session, history.clone()).unwrap();

        Self {
            ctx: ApiContext {
                gateway: Arc::new(gateway),
                queries: Arc::new(QueryClient::default()),
                notifier: toasts.clone(),
            },
            toasts,
            history,
            api,
            storage_path,
            _dir: dir,
        }
    }

    /// The same wiring as the binary builds, sharing this client's handles.
    pub fn state(&self) -> ClientState {
        ClientState {
            api: self.ctx.clone(),
            history: self.history.clone(),
            toasts: self.toasts.clone(),
        }
    }

    /// Number of requests the fake saw for `"METHOD /path"`.
    pub fn hits(&self, key: &str) -> usize {
        self.api.state().requests.iter().filter(|(k, _)| k == key).count()
    }

    pub fn last_query(&self, key: &str) -> Option<String> {
        self.api
            .state()
            .requests
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .and_then(|(_, q)| q.clone())
    }

    /// Invalidates every token the fake has issued.
    pub fn expire_tokens(&self) {
        self.api.state().tokens.clear();
    }

    /// Reads the persisted storage from disk, as a restarted process would.
    pub fn storage_item(&self, key: &str) -> Option<String> {
        FileStorage::new(&self.storage_path).get_item(key).unwrap()
    }
}
