use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::FetcherSettings,
    domain::model_selection::find_model,
    routes::{bad_request, pipeline_failure, required},
    services::{answer_page, guarded, AnswerService, Fetcher},
};

#[derive(Deserialize)]
struct AskBody {
    url: Option<String>,
    question: Option<String>,
    model: Option<String>,
}

#[derive(Debug, PartialEq)]
struct AskRequest {
    url: String,
    question: String,
    model: String,
}

impl TryFrom<AskBody> for AskRequest {
    type Error = String;

    fn try_from(body: AskBody) -> Result<Self, Self::Error> {
        let url = required(body.url, "URL not provided")?;
        let question = required(body.question, "Question not provided")?;
        let model = required(body.model, "Model not provided")?;

        if find_model(&model).is_none() {
            return Err(format!("Unknown model '{}'", model.trim()));
        }

        Ok(AskRequest {
            url,
            question,
            model,
        })
    }
}

#[derive(Serialize)]
struct AnswerBody {
    answer: String,
}

#[post("/ask")]
async fn ask(
    body: web::Json<AskBody>,
    fetcher: web::Data<Fetcher>,
    answers: web::Data<AnswerService>,
    settings: web::Data<FetcherSettings>,
) -> HttpResponse {
    let request = match AskRequest::try_from(body.into_inner()) {
        Ok(request) => request,
        Err(message) => return bad_request(message),
    };

    let pipeline = answer_page(
        &fetcher,
        &answers,
        &settings,
        &request.url,
        &request.question,
        &request.model,
    );

    match guarded(pipeline).await {
        Ok(answer) => HttpResponse::Ok().json(AnswerBody { answer }),
        Err(e) => pipeline_failure(e),
    }
}
