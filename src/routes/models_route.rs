use actix_web::{get, HttpResponse};

use crate::domain::model_selection::PROVIDERS;

#[get("/models")]
async fn list_models() -> HttpResponse {
    HttpResponse::Ok().json(&PROVIDERS)
}
