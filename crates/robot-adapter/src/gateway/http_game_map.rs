//! HTTP Game Map Client
//!
//! Asks the map service whether two locations are neighbours:
//! `GET {base_url}/getNeighbor?startPlanet=..&targetPlanet=..`.
//! A 4xx answer means "not reachable"; everything else that is not a
//! decodable 200 is a client failure.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use robot_domain::LocationId;
use robot_usecase::{GameMapClient, GameMapError, TargetLocation};
use tracing::{debug, warn};

use crate::config::GameMapConfig;
use crate::dto::GameMapLocationDto;

const NEIGHBOR_PATH: &str = "/getNeighbor";

#[derive(Debug, Clone)]
pub struct HttpGameMapClient {
    base_url: String,
    client: Client,
}

impl HttpGameMapClient {
    pub fn new(config: &GameMapConfig) -> Result<Self, GameMapError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|err| GameMapError::Client {
                message: format!("failed to build game map http client: {err}"),
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl GameMapClient for HttpGameMapClient {
    fn retrieve_target_if_reachable(
        &self,
        start: &LocationId,
        target: &LocationId,
    ) -> Result<TargetLocation, GameMapError> {
        let url = format!("{}{}", self.base_url, NEIGHBOR_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("startPlanet", start.as_str()),
                ("targetPlanet", target.as_str()),
            ])
            .send()
            .map_err(|err| {
                warn!(url = %url, error = %err, "Game map request failed");
                GameMapError::Client {
                    message: format!("Could not connect to game map service: {err}"),
                }
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            let dto: GameMapLocationDto = response.json().map_err(|err| GameMapError::Client {
                message: format!("Game map service returned an unreadable location: {err}"),
            })?;
            debug!(
                start = %start,
                destination = %dto.id,
                cost = dto.movement_cost,
                "🗺️ Neighbour resolved"
            );
            return Ok(dto.into());
        }

        if status.is_client_error() {
            debug!(start = %start, destination = %target, status = %status, "Target not reachable");
            return Err(GameMapError::TargetUnreachable {
                target: target.clone(),
            });
        }

        warn!(status = %status, "Game map service returned an unexpected status");
        Err(GameMapError::Client {
            message: format!(
                "Game map service returned status {status} when retrieving target location for movement"
            ),
        })
    }
}
