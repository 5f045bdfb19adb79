use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

use crate::{
    configuration::FetcherSettings,
    routes::{bad_request, pipeline_failure, required},
    services::{guarded, scrape_page, Fetcher},
};

#[derive(Deserialize)]
struct ScrapeBody {
    url: Option<String>,
}

#[post("/scrape")]
async fn scrape(
    body: web::Json<ScrapeBody>,
    fetcher: web::Data<Fetcher>,
    settings: web::Data<FetcherSettings>,
) -> HttpResponse {
    let url = match required(body.into_inner().url, "URL not provided") {
        Ok(url) => url,
        Err(message) => return bad_request(message),
    };

    match guarded(scrape_page(&fetcher, &settings, &url)).await {
        Ok(digest) => HttpResponse::Ok().json(digest),
        Err(e) => pipeline_failure(e),
    }
}
