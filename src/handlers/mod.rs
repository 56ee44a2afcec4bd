pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::errors::AppError;

pub use health_handler::health_check;
pub use quiz_handler::{create_quiz, export_quiz_csv, index};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("invalid JSON body: {}", err)).into()
    }))
    .service(index)
    .service(health_check)
    .service(create_quiz)
    .service(export_quiz_csv);
}
