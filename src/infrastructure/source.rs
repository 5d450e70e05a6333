use crate::domain::{FetchError, Restaurant, RestaurantId, dummy_restaurants};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Supplies the ordered list of restaurants to show.
#[async_trait]
pub trait EntitySource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Restaurant>, FetchError>;

    /// Short human readable label, shown in the header.
    fn describe(&self) -> String;
}

/// A fixed list, by default the built-in restaurants.
#[derive(Debug, Clone)]
pub struct StaticSource {
    restaurants: Vec<Restaurant>,
}

impl StaticSource {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new(dummy_restaurants())
    }
}

#[async_trait]
impl EntitySource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Restaurant>, FetchError> {
        Ok(self.restaurants.clone())
    }

    fn describe(&self) -> String {
        "built-in list".to_string()
    }
}

#[derive(Debug, Deserialize)]
struct WireRestaurant {
    id: RestaurantId,
    title: String,
    description: String,
}

impl From<WireRestaurant> for Restaurant {
    fn from(wire: WireRestaurant) -> Self {
        Restaurant::new(wire.id, wire.title, wire.description)
    }
}

/// Fetches `restaurants.json` below a base URL.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    url: String,
}

impl RemoteSource {
    pub const ENDPOINT: &'static str = "restaurants.json";

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(Box::new(e)))?;

        Ok(Self {
            client,
            url: Self::endpoint_url(base_url),
        })
    }

    fn endpoint_url(base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), Self::ENDPOINT)
    }
}

/// Decodes the wire array; any favorite flag on the wire is dropped.
pub fn decode_restaurants(body: &str) -> Result<Vec<Restaurant>, FetchError> {
    let wire: Vec<WireRestaurant> =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(wire.into_iter().map(Restaurant::from).collect())
}

#[async_trait]
impl EntitySource for RemoteSource {
    async fn fetch(&self) -> Result<Vec<Restaurant>, FetchError> {
        debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| match e.status() {
                Some(status) => FetchError::Status(status.as_u16()),
                None => FetchError::Transport(Box::new(e)),
            })?;

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(Box::new(e)))?;

        decode_restaurants(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
