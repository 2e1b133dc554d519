use crate::classifier::classify;
use crate::config::{ConfigValidator, RouterConfig};
use crate::error::ApiError;
use crate::io_struct::{ClassifyResponse, TaskRequest};
use crate::logging;
use crate::task_state::{TaskState, validate_prompt};
use actix_web::{HttpRequest, HttpResponse, HttpServer, error, get, post, web};
use log::{error, info};

#[get("/health")]
pub async fn health(_req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().body("Ok")
}

#[post("/api/task")]
pub async fn task(
    req: web::Json<TaskRequest>,
    app_state: web::Data<TaskState>,
) -> Result<HttpResponse, ApiError> {
    app_state.handle(req.into_inner()).await
}

#[post("/api/classify")]
pub async fn classify_prompt(req: web::Json<TaskRequest>) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    validate_prompt(&req)?;
    Ok(HttpResponse::Ok().json(ClassifyResponse {
        task_type: classify(&req.prompt),
    }))
}

pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    error!("JSON payload error: {:?}", err);
    match &err {
        error::JsonPayloadError::OverflowKnownLength { length, limit } => ApiError::PayloadTooLarge(
            format!(
                "Payload too large: {} bytes exceeds limit of {} bytes",
                length, limit
            ),
        )
        .into(),
        error::JsonPayloadError::Overflow { limit } => {
            ApiError::PayloadTooLarge(format!("Payload exceeds limit of {} bytes", limit)).into()
        }
        _ => ApiError::BadRequest(format!("Invalid JSON payload: {}", err)).into(),
    }
}

/// Registers the routes on an app; shared by `startup` and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(task).service(classify_prompt);
}

pub async fn startup(config: RouterConfig) -> anyhow::Result<()> {
    let level = ConfigValidator::parse_log_level(&config.log_level)?;
    logging::init_logging(level);
    ConfigValidator::validate(&config)?;

    info!("Initializing task router on {}:{}", config.host, config.port);
    info!("Provider: {}", config.api_base);
    info!(
        "Models: chat={} image={}",
        config.chat_model, config.image_model
    );
    info!(
        "Max payload size: {} KB",
        config.max_payload_size / 1024
    );

    let app_state = web::Data::new(TaskState::new(&config)?);
    let max_payload_size = config.max_payload_size;

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(app_state.clone())
            .app_data(
                web::JsonConfig::default()
                    .limit(max_payload_size)
                    .error_handler(json_error_handler),
            )
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
