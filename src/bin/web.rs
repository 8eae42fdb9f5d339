//! Single binary web server: league records in memory, standings via a JSON REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080). Log level via RUST_LOG.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use league_ranking_web::{
    compute_league_leaderboard, Event, GameMatch, League, LeagueId, Player, ScoringSystem,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-league entry: league records + last activity time (for auto-cleanup).
struct LeagueEntry {
    league: League,
    last_activity: Instant,
}

/// In-memory state: many leagues by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<LeagueId, LeagueEntry>>>;

/// Inactivity threshold: leagues not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateLeagueBody {
    #[serde(default = "default_league_name")]
    name: String,
}

fn default_league_name() -> String {
    "League".to_string()
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct AddEventBody {
    date: NaiveDate,
}

#[derive(Deserialize)]
struct RecordMatchBody {
    player1_id: Uuid,
    player2_id: Uuid,
    player1_score: u32,
    player2_score: u32,
    #[serde(default)]
    draw: bool,
    #[serde(default = "default_round")]
    round: u32,
}

fn default_round() -> u32 {
    1
}

/// Snapshot for the stateless leaderboard endpoint.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComputeLeaderboardBody {
    league_id: LeagueId,
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    matches: Vec<GameMatch>,
    #[serde(default)]
    players: Vec<Player>,
    #[serde(default)]
    scoring_system: Option<ScoringSystem>,
}

/// Path segment: league id (e.g. /api/leagues/{id})
#[derive(Deserialize)]
struct LeaguePath {
    id: LeagueId,
}

/// Path segments: league id and player id (e.g. /api/leagues/{id}/players/{player_id})
#[derive(Deserialize)]
struct LeaguePlayerPath {
    id: LeagueId,
    player_id: Uuid,
}

/// Path segments: league id and event id (e.g. /api/leagues/{id}/events/{event_id})
#[derive(Deserialize)]
struct LeagueEventPath {
    id: LeagueId,
    event_id: Uuid,
}

/// Path segments: league id and match id (e.g. /api/leagues/{id}/matches/{match_id})
#[derive(Deserialize)]
struct LeagueMatchPath {
    id: LeagueId,
    match_id: Uuid,
}

fn no_league() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" }))
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-ranking-web",
    })
}

/// Create a new league (returns it with id; client stores id for subsequent requests).
#[post("/api/leagues")]
async fn api_create_league(state: AppState, body: Option<Json<CreateLeagueBody>>) -> HttpResponse {
    let name = body
        .map(|b| b.into_inner().name)
        .unwrap_or_else(default_league_name);
    let league = League::new(name);
    let response = HttpResponse::Ok().json(&league);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        league.id,
        LeagueEntry {
            league,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a league by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/leagues/{id}")]
async fn api_get_league(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.league)
        }
        None => no_league(),
    }
}

/// Register a player.
#[post("/api/leagues/{id}/players")]
async fn api_add_player(state: AppState, path: Path<LeaguePath>, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_league(),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match l.add_player(body.name.as_str()) {
        Ok(_) => HttpResponse::Ok().json(l),
        Err(e) => bad_request(e),
    }
}

/// Remove a player who has no recorded matches.
#[delete("/api/leagues/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<LeaguePlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_league(),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match l.remove_player(path.player_id) {
        Ok(()) => HttpResponse::Ok().json(l),
        Err(e) => bad_request(e),
    }
}

/// Schedule an event on a date.
#[post("/api/leagues/{id}/events")]
async fn api_add_event(state: AppState, path: Path<LeaguePath>, body: Json<AddEventBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_league(),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    l.add_event(body.date);
    HttpResponse::Ok().json(l)
}

/// Remove an event and its matches.
#[delete("/api/leagues/{id}/events/{event_id}")]
async fn api_remove_event(state: AppState, path: Path<LeagueEventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_league(),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match l.remove_event(path.event_id) {
        Ok(()) => HttpResponse::Ok().json(l),
        Err(e) => bad_request(e),
    }
}

/// Record one played match in an event.
#[post("/api/leagues/{id}/events/{event_id}/matches")]
async fn api_record_match(
    state: AppState,
    path: Path<LeagueEventPath>,
    body: Json<RecordMatchBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_league(),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    let mut m = GameMatch::new(
        path.event_id,
        body.player1_id,
        body.player2_id,
        body.player1_score,
        body.player2_score,
    )
    .in_round(body.round);
    m.draw = body.draw;
    match l.record_match(m) {
        Ok(_) => HttpResponse::Ok().json(l),
        Err(e) => bad_request(e),
    }
}

/// Import a CSV match log (request body) into an event. All rows or none are recorded.
#[post("/api/leagues/{id}/events/{event_id}/matches/import")]
async fn api_import_matches(state: AppState, path: Path<LeagueEventPath>, body: String) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_league(),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match l.import_matches_csv(path.event_id, body.as_bytes()) {
        Ok(ids) => {
            log::info!("Imported {} match(es) into league {}", ids.len(), path.id);
            HttpResponse::Ok().json(l)
        }
        Err(e) => bad_request(e),
    }
}

/// Delete a recorded match.
#[delete("/api/leagues/{id}/matches/{match_id}")]
async fn api_remove_match(state: AppState, path: Path<LeagueMatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_league(),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    match l.remove_match(path.match_id) {
        Ok(()) => HttpResponse::Ok().json(l),
        Err(e) => bad_request(e),
    }
}

/// Attach a scoring system (JSON object) or return to legacy rules (JSON null).
#[put("/api/leagues/{id}/scoring-system")]
async fn api_set_scoring_system(
    state: AppState,
    path: Path<LeaguePath>,
    body: Json<Option<ScoringSystem>>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_league(),
    };
    entry.last_activity = Instant::now();
    let l = &mut entry.league;
    l.set_scoring_system(body.into_inner());
    HttpResponse::Ok().json(l)
}

/// Current league standings.
#[get("/api/leagues/{id}/leaderboard")]
async fn api_leaderboard(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.league.leaderboard())
        }
        None => no_league(),
    }
}

/// Ranking of one event's participants.
#[get("/api/leagues/{id}/events/{event_id}/standings")]
async fn api_event_standings(state: AppState, path: Path<LeagueEventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_league(),
    };
    entry.last_activity = Instant::now();
    match entry.league.event_standings(path.event_id) {
        Ok(standings) => HttpResponse::Ok().json(standings),
        Err(e) => bad_request(e),
    }
}

/// Stateless: rank a caller-supplied snapshot without touching stored leagues.
#[post("/api/leaderboard")]
async fn api_compute_leaderboard(body: Json<ComputeLeaderboardBody>) -> HttpResponse {
    let leaderboard = compute_league_leaderboard(
        body.league_id,
        &body.events,
        &body.matches,
        &body.players,
        body.scoring_system.as_ref(),
    );
    HttpResponse::Ok().json(leaderboard)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<LeagueId, LeagueEntry>::new()));

    // Background task: every 30 minutes, remove leagues inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive league(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_league)
            .service(api_get_league)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_add_event)
            .service(api_remove_event)
            .service(api_record_match)
            .service(api_import_matches)
            .service(api_remove_match)
            .service(api_set_scoring_system)
            .service(api_leaderboard)
            .service(api_event_standings)
            .service(api_compute_leaderboard)
    })
    .bind(bind)?
    .run()
    .await
}
