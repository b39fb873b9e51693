use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;

use folio::config::Config;
use folio::handlers::{handle_action, handle_assets, handle_root};
use folio::logger::Logger;
use folio::store::PageStore;
use folio::templates::TemplateSet;
use folio::types::AppState;
use folio::WikiError;

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("logger init failed: {}", e);
    }

    let config = Config::from_env();
    let state = AppState {
        store: PageStore::new(config.data_dir.clone()),
        assets_dir: Arc::new(config.assets_dir.clone()),
        templates: Arc::new(TemplateSet::load(&config.template_dir)),
        policy: config.policy,
    };

    let app = Router::new()
        .route("/", get(handle_root))
        .route("/assets/*path", get(handle_assets))
        .route("/*path", get(handle_action).post(handle_action))
        .with_state(state);

    let addr = config.socket_addr();
    log::info!("wiki listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(WikiError::from)
}
