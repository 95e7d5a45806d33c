pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    drag_drop_editor::AuthoringLimits, question_service::QuestionService,
    reference_service::ReferenceService,
};
use reqwest::Client;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct AppState {
    pub reference_service: ReferenceService,
    pub question_service: QuestionService,
    pub limits: AuthoringLimits,
    /// Cancelled on shutdown; upstream fetches run on child tokens.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        let reference_service = ReferenceService::new(
            http_client.clone(),
            config.upstream_api_url.clone(),
            config.upstream_api_token.clone(),
        );
        let question_service = QuestionService::new(
            http_client,
            config.upstream_api_url.clone(),
            config.upstream_api_token.clone(),
            reference_service.clone(),
        );

        Ok(Self {
            reference_service,
            question_service,
            limits: config.limits,
            shutdown: CancellationToken::new(),
        })
    }
}
