mod config;
mod console;
mod fetcher;
mod filter;
mod images;
mod model;
mod normalizer;
mod render;
mod resolver;
mod state;
mod utils;

use config::{load_config, AppConfig};
use console::Console;
use fetcher::{HttpListingSource, ListingSource};
use filter::ListingFilter;
use normalizer::normalize_all;
use render::render_page;
use state::{AppState, LoadOutcome, LOADING_STATUS};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout only carries the cards
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".into());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    let source: Arc<dyn ListingSource> = match HttpListingSource::new(&config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to initialize HTTP client: {}", e);
            return;
        }
    };

    let state = Arc::new(Mutex::new(AppState::new(ListingFilter::from(&config.filter))));
    let refresh_notify = Arc::new(Notify::new());
    let shutdown_notify = Arc::new(Notify::new());

    console::spawn_listener(Console::new(
        state.clone(),
        refresh_notify.clone(),
        shutdown_notify.clone(),
    ));

    spawn_load(source.clone(), state.clone(), config.clone());

    loop {
        tokio::select! {
            _ = wait_for_timer(config.refresh_interval_seconds) => {
                info!("Timer triggered.");
            }
            _ = refresh_notify.notified() => {
                info!("Manual refresh triggered.");
            }
            _ = shutdown_notify.notified() => {
                info!("Shutting down.");
                break;
            }
        }
        spawn_load(source.clone(), state.clone(), config.clone());
    }
}

/// Never resolves when periodic refresh is disabled.
async fn wait_for_timer(interval_seconds: u64) {
    if interval_seconds == 0 {
        std::future::pending::<()>().await;
    } else {
        sleep(Duration::from_secs(interval_seconds)).await;
    }
}

/// Runs one load in the background and prints the page when it lands.
fn spawn_load(source: Arc<dyn ListingSource>, state: Arc<Mutex<AppState>>, config: Arc<AppConfig>) {
    tokio::spawn(async move {
        println!("{}", LOADING_STATUS);
        match process_load(source.as_ref(), &state, &config).await {
            LoadOutcome::Applied(_) => println!("{}", render_page(&*state.lock().await)),
            LoadOutcome::Failed(message) => println!("{}", message),
            LoadOutcome::Stale => {}
        }
    });
}

/// Fetches the full listing set and settles it into the state under a fresh ticket.
async fn process_load(source: &dyn ListingSource, state: &Mutex<AppState>, config: &AppConfig) -> LoadOutcome {
    let ticket = state.lock().await.begin_load();

    let result = source.fetch().await.map(|records| {
        info!("Load #{} fetched {} record(s)", ticket.seq(), records.len());
        normalize_all(&records, config)
    });
    if let Err(e) = &result {
        warn!("Load #{} fetch error: {:?}", ticket.seq(), e);
    }

    state.lock().await.complete_load(ticket, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::http::decode_listings;
    use crate::model::{FetchError, Record};

    struct StaticSource {
        body: &'static str,
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl ListingSource for StaticSource {
        async fn fetch(&self) -> Result<Vec<Record>, FetchError> {
            sleep(self.delay).await;
            decode_listings(self.body)
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl ListingSource for FailingSource {
        async fn fetch(&self) -> Result<Vec<Record>, FetchError> {
            Err(FetchError::Http("connection refused".into()))
        }
    }

    const ONE_LISTING: &str = r#"{"listings":[{"titulo":"Casa","precio":"100000","Fotos":"https://drive.google.com/file/d/ABC123/view"}]}"#;

    fn source(body: &'static str, millis: u64) -> StaticSource {
        StaticSource { body, delay: Duration::from_millis(millis) }
    }

    #[tokio::test]
    async fn load_renders_the_delivered_listing() {
        let state = Mutex::new(AppState::default());
        let outcome = process_load(&source(ONE_LISTING, 0), &state, &AppConfig::default()).await;
        assert_eq!(outcome, LoadOutcome::Applied(1));

        let state = state.lock().await;
        let listing = &state.listings()[0];
        assert_eq!(listing.title, "Casa");
        assert_eq!(listing.price, "100.000,00\u{a0}€");
        assert!(listing.hero_image().unwrap().primary.contains("ABC123"));

        let page = render_page(&state);
        assert!(page.contains("🏠 Casa"));
        assert!(page.ends_with("Showing 1 listing(s)."));
    }

    #[tokio::test]
    async fn listings_are_shown_newest_first() {
        let body = r#"{"listings":[{"titulo":"Primero"},{"titulo":"Segundo"}]}"#;
        let state = Mutex::new(AppState::default());
        process_load(&source(body, 0), &state, &AppConfig::default()).await;
        let state = state.lock().await;
        let titles: Vec<_> = state.listings().iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["Segundo", "Primero"]);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_listings() {
        let state = Mutex::new(AppState::default());
        let config = AppConfig::default();
        process_load(&source(ONE_LISTING, 0), &state, &config).await;
        let outcome = process_load(&FailingSource, &state, &config).await;
        assert_eq!(outcome, LoadOutcome::Failed("Could not load the listings.".into()));
        let state = state.lock().await;
        assert_eq!(state.listings().len(), 1);
        assert_eq!(state.status(), "Could not load the listings.");
    }

    #[tokio::test]
    async fn stale_refresh_is_discarded() {
        let state = Mutex::new(AppState::default());
        let config = AppConfig::default();
        let slow = source(r#"{"listings":[{"titulo":"Viejo"}]}"#, 200);
        let fast = source(r#"{"listings":[{"titulo":"Nuevo"}]}"#, 10);

        let slow_load = process_load(&slow, &state, &config);
        tokio::pin!(slow_load);
        // Poll once so the slow load takes the first ticket
        assert!(tokio::time::timeout(Duration::from_millis(1), &mut slow_load).await.is_err());

        let fast_outcome = process_load(&fast, &state, &config).await;
        let slow_outcome = slow_load.await;
        assert_eq!(fast_outcome, LoadOutcome::Applied(1));
        assert_eq!(slow_outcome, LoadOutcome::Stale);
        assert_eq!(state.lock().await.listings()[0].title, "Nuevo");
    }
}
