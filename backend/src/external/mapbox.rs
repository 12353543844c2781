//! Mapbox terrain-RGB tile client

use image::ImageError;
use reqwest::Client;

use shared::tile::TileIndex;

use crate::config::MapboxConfig;
use crate::error::{AppError, AppResult};

const FETCH_FAILED: &str = "Failed to fetch topography data";

/// Terrain tile client
#[derive(Clone)]
pub struct TerrainClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl TerrainClient {
    pub fn new(client: Client, config: &MapboxConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        }
    }

    fn tile_path(&self, tile: TileIndex) -> String {
        format!(
            "{}/v4/mapbox.terrain-rgb/{}/{}/{}.pngraw",
            self.base_url, tile.zoom, tile.x, tile.y
        )
    }

    /// Fetch a tile and return its centre pixel as RGB
    pub async fn centre_pixel(&self, tile: TileIndex) -> AppResult<[u8; 3]> {
        let url = self.tile_path(tile);
        tracing::debug!("Fetching terrain tile {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await
            .map_err(|e| AppError::upstream(FETCH_FAILED, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                FETCH_FAILED,
                format!("Mapbox API error: {} - {}", status, body.trim()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::upstream(FETCH_FAILED, e))?;

        decode_centre_pixel(&bytes)
            .map_err(|e| AppError::upstream(FETCH_FAILED, format!("Failed to decode terrain tile: {}", e)))
    }
}

/// Decode an image and read the pixel at `(width / 2, height / 2)`
pub fn decode_centre_pixel(bytes: &[u8]) -> Result<[u8; 3], ImageError> {
    let img = image::load_from_memory(bytes)?.to_rgb8();
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageError::Parameter(image::error::ParameterError::from_kind(
            image::error::ParameterErrorKind::DimensionMismatch,
        )));
    }
    Ok(img.get_pixel(width / 2, height / 2).0)
}
