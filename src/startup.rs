use std::net::TcpListener;

use actix_web::{
    dev::Server,
    error::InternalError,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};

use crate::{
    configuration::FetcherSettings,
    routes::{ask_route, bad_request, default_route, models_route, scrape_route},
    services::{AnswerService, Fetcher},
};

pub fn run(
    listener: TcpListener,
    fetcher: Fetcher,
    answer_service: AnswerService,
    fetcher_settings: FetcherSettings,
) -> Result<Server, std::io::Error> {
    let fetcher = Data::new(fetcher);
    let answer_service = Data::new(answer_service);
    let fetcher_settings = Data::new(fetcher_settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(json_config())
            .service(default_route::health_check)
            .service(models_route::list_models)
            .service(scrape_route::scrape)
            .service(ask_route::ask)
            .app_data(fetcher.clone())
            .app_data(answer_service.clone())
            .app_data(fetcher_settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Malformed bodies are answered with the same `{"error": ...}` shape as
/// every other client error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::warn!("Rejected request body: {}", message);
        InternalError::from_response(err, bad_request(message)).into()
    })
}
