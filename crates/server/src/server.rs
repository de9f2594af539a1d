use api_types::landing::Landing;
use auth_client::AuthClient;
use axum::{
    Json, Router,
    extract::State,
    middleware,
    routing::{get, post},
};
use engine::{Clock, ExpenseStore};

use std::sync::Arc;

use crate::{auth, categories, dashboard, expenses, guard, session};

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<ExpenseStore>,
    pub guard: Arc<guard::RouteGuard>,
    pub auth: AuthClient,
    pub clock: Clock,
    pub token_ttl_days: i64,
}

impl ServerState {
    pub fn new(store: ExpenseStore, auth: AuthClient) -> Self {
        Self {
            store: Arc::new(store),
            guard: Arc::new(guard::RouteGuard::default()),
            auth,
            clock: Clock::default(),
            token_ttl_days: session::DEFAULT_TTL_DAYS,
        }
    }

    #[must_use]
    pub fn with_guard(mut self, guard: guard::RouteGuard) -> Self {
        self.guard = Arc::new(guard);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_token_ttl_days(mut self, days: i64) -> Self {
        self.token_ttl_days = days;
        self
    }
}

/// Fixed page routes. The login page is mounted at the guard's login path,
/// which must not be one of these.
pub const PAGE_PATHS: [&str; 8] = [
    "/",
    "/logout",
    "/session",
    "/dashboard",
    "/expenses/list",
    "/expenses/export",
    "/expenses/new",
    "/categories",
];

async fn index(State(state): State<ServerState>) -> Json<Landing> {
    let pages = ["/dashboard", "/expenses/list", "/expenses/new", "/categories"];
    Json(Landing {
        name: "Expense Tracker".to_string(),
        links: std::iter::once(state.guard.login_path())
            .chain(pages)
            .map(str::to_string)
            .collect(),
    })
}

/// Every route, guarded by [`guard::RouteGuard`].
///
/// The guard is a `layer` rather than a `route_layer` so that unknown paths
/// under a protected prefix still redirect to the login page.
pub fn router(state: ServerState) -> Router {
    let login_path = state.guard.login_path().to_string();
    Router::new()
        .route("/", get(index))
        .route(&login_path, get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::session))
        .route("/dashboard", get(dashboard::get))
        .route("/expenses/list", get(expenses::list))
        .route("/expenses/export", get(expenses::export))
        .route("/expenses/new", get(expenses::form).post(expenses::create))
        .route("/categories", get(categories::list))
        .layer(middleware::from_fn_with_state(state.clone(), guard::guard))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(
        "Server listening on {} ({} expenses loaded)",
        addr,
        state.store.len()
    );

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
