use actix_cors::Cors;
use actix_web::{http::Method, middleware::Logger, web, App, HttpServer};

use quizgen_server::{
    app_state::AppState,
    config::Config,
    handlers::{configure, json_config},
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let allowed_origin = config.cors_allowed_origin.clone();
    let max_request_bytes = config.max_request_bytes;

    log::info!(
        "Using model {} (search grounding: {})",
        config.gemini_model,
        config.search_grounding
    );

    let app_state = AppState::new(config).map_err(|e| {
        log::error!("Failed to initialize application state: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    let app_data = web::Data::new(app_state);

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec![Method::GET, Method::POST])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(app_data.clone())
            .app_data(json_config(max_request_bytes))
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
