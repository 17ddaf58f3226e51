//! Server construction and wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use roster_backend::ApiDoc;
use roster_backend::domain::UserDirectoryService;
use roster_backend::domain::ports::UserDirectory;
use roster_backend::inbound::http::health::{HealthState, health};
use roster_backend::inbound::http::state::HttpState;
use roster_backend::inbound::http::users::{
    create_user, delete_user, get_user, list_users, update_user,
};
use roster_backend::outbound::persistence::InMemoryUserStore;

/// Run the HTTP gateway until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let store = Arc::new(InMemoryUserStore::new());
    let directory: Arc<dyn UserDirectory> = Arc::new(UserDirectoryService::new(store));
    let http_state = web::Data::new(HttpState::new(directory));
    let health_state = web::Data::new(HealthState::new());

    info!(bind_addr = %config.bind_addr, "starting user directory gateway");

    HttpServer::new(move || build_app(http_state.clone(), health_state.clone()))
        .bind(config.bind_addr)?
        .run()
        .await
}

fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .app_data(health_state)
        .service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
        .service(health);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}
