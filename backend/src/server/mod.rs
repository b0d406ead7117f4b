//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use playforge_backend::Trace;
use playforge_backend::api::health::{HealthState, live, ready};
#[cfg(debug_assertions)]
use playforge_backend::doc::ApiDoc;
use playforge_backend::inbound::http::engagement::{record_play, toggle_like};
use playforge_backend::inbound::http::leaderboard::{top_builders, top_projects};
use playforge_backend::inbound::http::preview::preview;
use playforge_backend::inbound::http::projects::{
    create_project, delete_project, generate_document, list_projects, project_detail,
    toggle_featured, update_project,
};
use playforge_backend::inbound::http::state::HttpState;
use playforge_backend::inbound::http::transcribe::transcribe;
use playforge_backend::inbound::http::users::{builder_profile, builder_projects, resolve_user};
use playforge_backend::inbound::http::versions::{list_versions, restore_version, version_detail};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(resolve_user)
        .service(builder_profile)
        .service(builder_projects)
        .service(list_projects)
        .service(create_project)
        .service(project_detail)
        .service(update_project)
        .service(delete_project)
        .service(generate_document)
        .service(toggle_featured)
        .service(list_versions)
        .service(version_detail)
        .service(restore_version)
        .service(record_play)
        .service(toggle_like)
        .service(top_projects)
        .service(top_builders)
        .service(transcribe);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(preview)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] carrying the bind address and optional
///   database pool and hosted-API settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when assembling the shared state, binding the
/// socket, or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
