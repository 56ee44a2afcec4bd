use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};

use mcq_server::{
    app_state::AppState, config::Config, handlers, logging, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    logging::init(config.log_dir.as_deref())?;

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config).map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::other(e)
    })?;
    let state = web::Data::new(state);

    log::info!("Starting HTTP server on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
