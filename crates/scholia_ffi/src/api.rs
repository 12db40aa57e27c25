//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level catalogue functions to Dart via FRB.
//! - Own the single store session the UI opens and closes explicitly.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call except `session_open` fails softly while no session is open.
//! - The session mutex is the only lock; a poisoned lock is recovered.

use chrono::Local;
use log::{info, warn};
use scholia_core::service::handlers::{
    self, handle_generate_tile, handle_get_academic, handle_graph, handle_novelty_feed,
    handle_related, handle_search, handle_submit_contribution, handle_toggle_favorite,
    SearchRequest,
};
use scholia_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    resolve_db_path, ContributionForm, RecordStore, SqliteStore, StoreConfig,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

static SESSION: Mutex<Option<RecordStore<SqliteStore>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`; conflicting calls fail.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Session lifecycle envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub ok: bool,
    /// Whether writes reach a database file.
    pub durable: bool,
    pub academic_count: u32,
    /// Dropped entries reported by the last load.
    pub load_warnings: u32,
    pub message: String,
}

/// One row of catalogue search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcademicItem {
    pub name: String,
    pub discipline: Option<String>,
    pub paper_count: u32,
    pub connection_count: u32,
    pub favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcademicSearchResponse {
    pub items: Vec<AcademicItem>,
    pub message: String,
    pub applied_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedItem {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedResponse {
    pub ok: bool,
    pub items: Vec<RelatedItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileItem {
    pub id: String,
    pub title: String,
    /// ISO-8601 calendar date.
    pub date: String,
    pub academics: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub ok: bool,
    pub items: Vec<TileItem>,
    pub total: u32,
    pub message: String,
}

/// Generic action envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Academic name or tile id touched by the action.
    pub subject: Option<String>,
    pub favorite: Option<bool>,
    /// Save outcome label (`saved`, `saved_after_eviction`, `skipped`,
    /// `failed`), or `None` when nothing was saved.
    pub save: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            subject: None,
            favorite: None,
            save: None,
            message: message.into(),
        }
    }
}

impl From<handlers::ActionResponse> for ActionResponse {
    fn from(value: handlers::ActionResponse) -> Self {
        Self {
            ok: value.ok,
            subject: value.subject,
            favorite: value.favorite,
            save: value.save,
            message: value.message,
        }
    }
}

/// JSON payload envelope for nested documents (records, graph data).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonResponse {
    pub ok: bool,
    pub json: String,
    pub message: String,
}

/// Contribution form as submitted by the UI. Blank fields count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionInput {
    pub kind: String,
    pub academic: String,
    pub title: Option<String>,
    pub year: Option<String>,
    pub coauthors: Option<String>,
    pub location: Option<String>,
    pub target: Option<String>,
    pub category: Option<String>,
    pub value: Option<String>,
}

/// Opens the store session.
///
/// `db_path = None` (or blank) resolves `SCHOLIA_DB_PATH`, then the temp
/// directory. When the database cannot be opened the session runs on an
/// in-memory database and reports `durable = false`.
///
/// # FFI contract
/// - Sync call; opens SQLite and loads the catalogue.
/// - Opening an already open session is a successful no-op.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_open(db_path: Option<String>) -> SessionResponse {
    let mut session = lock_session();
    if let Some(store) = session.as_ref() {
        return session_response(store, true, "Session already open.");
    }

    let path = db_path
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(resolve_db_path);
    let (backend, durable) = match SqliteStore::open(&path) {
        Ok(backend) => (backend, true),
        Err(err) => {
            warn!("event=session_open module=ffi status=degraded reason=db_unavailable error={err}");
            match SqliteStore::open_in_memory() {
                Ok(backend) => (backend, false),
                Err(err) => {
                    return SessionResponse {
                        ok: false,
                        durable: false,
                        academic_count: 0,
                        load_warnings: 0,
                        message: format!("session_open failed: {err}"),
                    };
                }
            }
        }
    };

    let store = RecordStore::open(backend, StoreConfig::from_env());
    let message = if durable {
        "Session opened."
    } else {
        "Database unavailable; session runs in memory."
    };
    let response = session_response(&store, durable, message);
    info!(
        "event=session_open module=ffi status=ok durable={durable} academics={}",
        response.academic_count
    );
    *session = Some(store);
    response
}

/// Saves and closes the session. Reports `ok = false` when none is open.
#[flutter_rust_bridge::frb(sync)]
pub fn session_close() -> ActionResponse {
    let Some(store) = lock_session().take() else {
        return ActionResponse::failure("No session open.");
    };
    drop(store.close());
    info!("event=session_close module=ffi status=ok");
    ActionResponse {
        ok: true,
        subject: None,
        favorite: None,
        save: None,
        message: "Session closed.".to_string(),
    }
}

/// Searches the catalogue.
///
/// # FFI contract
/// - `sort`: `name|papers|connections`; unknown values sort by name.
/// - `limit`: `None`/`0` means 20, capped at 100.
/// - Never panics; returns an empty list with a message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn academic_search(
    text: String,
    category: Option<String>,
    value: Option<String>,
    favorites_only: bool,
    sort: Option<String>,
    limit: Option<u32>,
) -> AcademicSearchResponse {
    let request = SearchRequest {
        text,
        category,
        value,
        favorites_only,
        sort,
        limit,
    };
    match with_session(|store| handle_search(store, &request)) {
        Ok(response) => AcademicSearchResponse {
            items: response
                .items
                .into_iter()
                .map(|item| AcademicItem {
                    name: item.name,
                    discipline: item.discipline,
                    paper_count: to_u32(item.paper_count),
                    connection_count: to_u32(item.connection_count),
                    favorite: item.favorite,
                })
                .collect(),
            message: response.message,
            applied_limit: response.applied_limit,
        },
        Err(message) => AcademicSearchResponse {
            items: Vec::new(),
            message: format!("academic_search failed: {message}"),
            applied_limit: 0,
        },
    }
}

/// Full academic record as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn academic_get(name: String) -> JsonResponse {
    let result = with_session(|store| {
        let response = handle_get_academic(store, name.as_str());
        match response.academic {
            Some(record) => serde_json::to_string(&record)
                .map_err(|err| format!("encode failed: {err}")),
            None => Err(response.message),
        }
    });
    json_response(result.and_then(|inner| inner), "academic_get")
}

/// Related academics, highest score first. `limit = None` uses the
/// configured default of six.
#[flutter_rust_bridge::frb(sync)]
pub fn academic_related(name: String, limit: Option<u32>) -> RelatedResponse {
    match with_session(|store| handle_related(store, name.as_str(), limit)) {
        Ok(response) => RelatedResponse {
            ok: response.ok,
            items: response
                .items
                .into_iter()
                .map(|item| RelatedItem {
                    name: item.name,
                    score: item.score,
                })
                .collect(),
            message: response.message,
        },
        Err(message) => RelatedResponse {
            ok: false,
            items: Vec::new(),
            message: format!("academic_related failed: {message}"),
        },
    }
}

/// Toggles a favorite and saves.
#[flutter_rust_bridge::frb(sync)]
pub fn favorite_toggle(name: String) -> ActionResponse {
    match with_session_mut(|store| handle_toggle_favorite(store, name.as_str())) {
        Ok(response) => ActionResponse::from(response),
        Err(message) => ActionResponse::failure(format!("favorite_toggle failed: {message}")),
    }
}

/// Submits a contribution dated today and saves.
#[flutter_rust_bridge::frb(sync)]
pub fn contribution_submit(input: ContributionInput) -> ActionResponse {
    let form = ContributionForm {
        kind: input.kind,
        academic: input.academic,
        title: input.title,
        year: input.year,
        coauthors: input.coauthors,
        location: input.location,
        target: input.target,
        category: input.category,
        value: input.value,
    };
    let today = Local::now().date_naive();
    match with_session_mut(|store| handle_submit_contribution(store, &form, today)) {
        Ok(response) => ActionResponse::from(response),
        Err(message) => ActionResponse::failure(format!("contribution_submit failed: {message}")),
    }
}

/// Generates one procedural novelty tile and saves.
#[flutter_rust_bridge::frb(sync)]
pub fn novelty_generate() -> ActionResponse {
    let today = Local::now().date_naive();
    let mut rng = rand::thread_rng();
    match with_session_mut(|store| handle_generate_tile(store, &mut rng, today)) {
        Ok(response) => ActionResponse::from(response),
        Err(message) => ActionResponse::failure(format!("novelty_generate failed: {message}")),
    }
}

/// Newest tiles first.
#[flutter_rust_bridge::frb(sync)]
pub fn novelty_feed(limit: Option<u32>) -> FeedResponse {
    match with_session(|store| handle_novelty_feed(store, limit)) {
        Ok(feed) => FeedResponse {
            ok: true,
            message: format!("{} tile(s) stored.", feed.total),
            items: feed
                .items
                .into_iter()
                .map(|tile| TileItem {
                    id: tile.id,
                    title: tile.title,
                    date: tile.date.to_string(),
                    academics: tile.academics,
                    description: tile.description,
                })
                .collect(),
            total: to_u32(feed.total),
        },
        Err(message) => FeedResponse {
            ok: false,
            items: Vec::new(),
            total: 0,
            message: format!("novelty_feed failed: {message}"),
        },
    }
}

/// Network graph `{nodes, links}` as JSON for the graph view.
#[flutter_rust_bridge::frb(sync)]
pub fn graph_data() -> JsonResponse {
    let result = with_session(|store| {
        serde_json::to_string(&handle_graph(store)).map_err(|err| format!("encode failed: {err}"))
    });
    json_response(result.and_then(|inner| inner), "graph_data")
}

fn lock_session() -> MutexGuard<'static, Option<RecordStore<SqliteStore>>> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

fn with_session<T>(f: impl FnOnce(&RecordStore<SqliteStore>) -> T) -> Result<T, String> {
    let session = lock_session();
    session
        .as_ref()
        .map(f)
        .ok_or_else(|| "no session open; call session_open first".to_string())
}

fn with_session_mut<T>(f: impl FnOnce(&mut RecordStore<SqliteStore>) -> T) -> Result<T, String> {
    let mut session = lock_session();
    session
        .as_mut()
        .map(f)
        .ok_or_else(|| "no session open; call session_open first".to_string())
}

fn session_response(
    store: &RecordStore<SqliteStore>,
    durable: bool,
    message: &str,
) -> SessionResponse {
    SessionResponse {
        ok: true,
        durable,
        academic_count: to_u32(store.academic_count()),
        load_warnings: to_u32(store.load_report().warnings.len()),
        message: message.to_string(),
    }
}

fn json_response(result: Result<String, String>, operation: &str) -> JsonResponse {
    match result {
        Ok(json) => JsonResponse {
            ok: true,
            json,
            message: String::new(),
        },
        Err(message) => JsonResponse {
            ok: false,
            json: String::new(),
            message: format!("{operation} failed: {message}"),
        },
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
