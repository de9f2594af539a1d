use auth_client::AuthClient;
use engine::{Catalog, Clock, ExpenseStore};
use server::{RouteGuard, ServerState};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expense_tracker={level},server={level},engine={level},auth_client={level}",
            level = settings.app.level
        ))
        .init();

    let state = build_state(&settings)?;

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return Err(err.into());
        }
    };

    server::run_with_listener(state, listener).await?;
    Ok(())
}

fn build_state(
    settings: &settings::Settings,
) -> Result<ServerState, Box<dyn std::error::Error + Send + Sync>> {
    let store = match &settings.server.dataset {
        Some(path) => ExpenseStore::load(path, Catalog::standard())?,
        None => {
            tracing::info!("No dataset configured, serving mock expenses");
            ExpenseStore::mock()?
        }
    };

    let clock = match &settings.server.fixed_date {
        Some(date) => {
            let date = engine::parse_date(date)?;
            tracing::info!("Today is pinned to {date}");
            Clock::Fixed(date)
        }
        None => Clock::system(&settings.server.timezone)?,
    };

    let auth = AuthClient::new(&settings.auth.base_url)?;
    tracing::info!("Authentication backend at {}", auth.base_url());

    Ok(ServerState::new(store, auth)
        .with_guard(
            RouteGuard::new(settings.server.protected_paths.iter().cloned())
                .with_login_path(&settings.server.login_path)
                .with_landing_path(&settings.server.landing_path),
        )
        .with_clock(clock)
        .with_token_ttl_days(settings.server.token_ttl_days))
}
