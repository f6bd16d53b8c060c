use std::collections::HashMap;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use smokes_shared::error::ServiceError;
use smokes_shared::models::{CreateSmokeData, GameMap, MapId, Smoke, SmokeId};
use smokes_shared::votes::{RateBody, Vote};
use smokes_shared::workflow::SmokeService;

use crate::config;

/// Join an API path onto a base URL.
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn api_url(path: &str) -> String {
    endpoint(config::api_base_url(), path)
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: ErrorMessage,
}

/// Validation failures come back as a list, everything else as a single string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// Human-readable message for a failed request.
///
/// Uses the body's `message` when present, otherwise falls back to
/// `"<action> failed: <status>"`.
pub fn parse_error_message(body: &str, action: &str, status: u16) -> String {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: ErrorMessage::One(m),
        }) => m,
        Ok(ErrorBody {
            message: ErrorMessage::Many(ms),
        }) => ms.join(", "),
        Err(_) => String::new(),
    };
    if message.trim().is_empty() {
        format!("{action} failed: {status}")
    } else {
        message
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBody {
    pub reason: String,
}

fn authorized(req: RequestBuilder, token: &str) -> RequestBuilder {
    req.header("Authorization", format!("Bearer {token}"))
}

fn require_token(token: Option<&str>) -> Result<&str, ServiceError> {
    token
        .filter(|t| !t.trim().is_empty())
        .ok_or(ServiceError::Unauthenticated)
}

/// Send a request and return the raw body of a successful response.
async fn send(req: RequestBuilder, action: &str) -> Result<String, ServiceError> {
    let resp = req
        .send()
        .await
        .map_err(|e| ServiceError::Network(e.to_string()))?;
    let status = resp.status().as_u16();
    let body = resp
        .text()
        .await
        .map_err(|e| ServiceError::Network(e.to_string()))?;

    if status == 401 {
        return Err(ServiceError::Unauthenticated);
    }
    if !(200..300).contains(&status) {
        return Err(ServiceError::Http {
            status,
            message: parse_error_message(&body, action, status),
        });
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ServiceError> {
    serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))
}

async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder, action: &str) -> Result<T, ServiceError> {
    let body = send(req, action).await?;
    decode(&body)
}

// Maps

pub async fn fetch_maps() -> Result<Vec<GameMap>, ServiceError> {
    fetch_json(reqwest::Client::new().get(api_url("/maps")), "Fetch maps").await
}

pub async fn fetch_map(id: MapId) -> Result<GameMap, ServiceError> {
    fetch_json(
        reqwest::Client::new().get(api_url(&format!("/maps/{id}"))),
        "Fetch map",
    )
    .await
}

// Smokes

pub async fn fetch_smokes(map_id: MapId) -> Result<Vec<Smoke>, ServiceError> {
    fetch_json(
        reqwest::Client::new().get(api_url(&format!("/maps/{map_id}/smokes"))),
        "Fetch smokes",
    )
    .await
}

pub async fn create_smoke(token: Option<&str>, data: &CreateSmokeData) -> Result<Smoke, ServiceError> {
    let token = require_token(token)?;
    let req = authorized(reqwest::Client::new().post(api_url("/smokes")), token).json(data);
    fetch_json(req, "Create smoke").await
}

pub async fn delete_smoke(token: Option<&str>, id: SmokeId) -> Result<(), ServiceError> {
    let token = require_token(token)?;
    let req = authorized(
        reqwest::Client::new().delete(api_url(&format!("/smokes/{id}"))),
        token,
    );
    send(req, "Delete smoke").await.map(|_| ())
}

// Ratings

pub async fn rate_smoke(token: Option<&str>, id: SmokeId, vote: Vote) -> Result<(), ServiceError> {
    let token = require_token(token)?;
    let req = authorized(
        reqwest::Client::new().post(api_url(&format!("/smokes/{id}/rate"))),
        token,
    )
    .json(&RateBody { value: vote.value() });
    send(req, "Rate smoke").await.map(|_| ())
}

pub async fn remove_rating(token: Option<&str>, id: SmokeId) -> Result<(), ServiceError> {
    let token = require_token(token)?;
    let req = authorized(
        reqwest::Client::new().delete(api_url(&format!("/smokes/{id}/rate"))),
        token,
    );
    send(req, "Remove rating").await.map(|_| ())
}

/// The user's votes keyed by smoke id (`1` up, `-1` down).
pub async fn fetch_user_ratings(token: Option<&str>) -> Result<HashMap<SmokeId, i64>, ServiceError> {
    let token = require_token(token)?;
    let req = authorized(reqwest::Client::new().get(api_url("/ratings/user")), token);
    fetch_json(req, "Fetch ratings").await
}

// Reports

pub async fn report_smoke(token: Option<&str>, id: SmokeId, reason: &str) -> Result<(), ServiceError> {
    let token = require_token(token)?;
    let req = authorized(
        reqwest::Client::new().post(api_url(&format!("/smokes/{id}/report"))),
        token,
    )
    .json(&ReportBody {
        reason: reason.trim().to_string(),
    });
    send(req, "Report smoke").await.map(|_| ())
}

/// Smoke mutations against the REST API with the session's bearer token.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RestSmokeService {
    pub token: Option<String>,
}

impl RestSmokeService {
    pub fn new(token: Option<String>) -> Self {
        RestSmokeService { token }
    }
}

impl SmokeService for RestSmokeService {
    async fn create(&self, data: &CreateSmokeData) -> Result<Smoke, ServiceError> {
        create_smoke(self.token.as_deref(), data).await
    }

    async fn delete(&self, id: SmokeId) -> Result<(), ServiceError> {
        delete_smoke(self.token.as_deref(), id).await
    }
}
