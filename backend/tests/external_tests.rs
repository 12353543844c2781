//! Upstream client integration tests
//!
//! Each provider is replaced by a local mockito server.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use mockito::{Matcher, Server};
use serde_json::json;

use ignis_backend::config::{
    FirmsConfig, HumanFactorsConfig, MapboxConfig, NoaaConfig, UpstreamConfig,
};
use ignis_backend::external::{
    build_http_client, FirmsClient, HumanFactorsClient, NoaaClient, TerrainClient,
};
use ignis_backend::AppError;
use shared::firms::parse_area_csv;
use shared::tile::TileIndex;
use shared::types::GeoPoint;

fn http() -> reqwest::Client {
    build_http_client(&UpstreamConfig {
        user_agent: "ignis-ai-test".to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn assert_upstream(err: AppError, expected_context: &str) {
    match err {
        AppError::Upstream { context, .. } => assert_eq!(context, expected_context),
        other => panic!("expected upstream error, got {:?}", other),
    }
}

// ============================================================================
// FIRMS
// ============================================================================

fn firms_client(base_url: String) -> FirmsClient {
    FirmsClient::new(
        http(),
        &FirmsConfig {
            base_url,
            api_key: "KEY".to_string(),
            source: "VIIRS_NOAA21_NRT".to_string(),
            bbox: "-125.0,24.0,-66.0,49.0".to_string(),
            day_range: 2,
        },
    )
}

#[tokio::test]
async fn test_firms_fetches_area_csv() {
    let mut server = Server::new_async().await;
    let body = "latitude,longitude,bright_ti4,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_ti5,frp,daynight\n\
                34.2271,-118.0562,331.4,0.39,0.36,2025-04-07,927,N21,VIIRS,n,2.0NRT,291.2,3.1,N\n";
    let mock = server
        .mock("GET", "/api/area/csv/KEY/VIIRS_NOAA21_NRT/-125.0,24.0,-66.0,49.0/2")
        .match_header("user-agent", "ignis-ai-test")
        .with_status(200)
        .with_header("content-type", "text/csv")
        .with_body(body)
        .create_async()
        .await;

    let csv = firms_client(server.url()).fetch_area_csv().await.unwrap();
    mock.assert_async().await;

    let outcome = parse_area_csv(&csv);
    assert_eq!(outcome.detections.len(), 1);
    assert_eq!(outcome.detections[0].satellite, "N21");
}

#[tokio::test]
async fn test_firms_error_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Any)
        .with_status(403)
        .with_body("Invalid MAP_KEY.")
        .create_async()
        .await;

    let err = firms_client(server.url()).fetch_area_csv().await.unwrap_err();
    assert_upstream(err, "Failed to fetch wildfire data");
}

// ============================================================================
// NOAA
// ============================================================================

fn noaa_client(base_url: String) -> NoaaClient {
    NoaaClient::new(
        http(),
        &NoaaConfig {
            base_url,
            default_latitude: 34.0522,
            default_longitude: -118.2437,
        },
    )
}

#[tokio::test]
async fn test_noaa_points_then_forecast() {
    let mut server = Server::new_async().await;
    let points = server
        .mock("GET", "/points/34.0522,-118.2437")
        .with_status(200)
        .with_header("content-type", "application/geo+json")
        .with_body(
            json!({"properties": {"gridId": "LOX", "gridX": 155, "gridY": 45}}).to_string(),
        )
        .create_async()
        .await;
    let forecast = server
        .mock("GET", "/gridpoints/LOX/155,45/forecast")
        .with_status(200)
        .with_header("content-type", "application/geo+json")
        .with_body(
            json!({
                "properties": {
                    "periods": [
                        {
                            "startTime": "2025-04-07T06:00:00-07:00",
                            "temperature": 68,
                            "windSpeed": "5 to 10 mph",
                            "relativeHumidity": {"value": 40},
                            "probabilityOfPrecipitation": {"value": 20},
                            "shortForecast": "Sunny"
                        },
                        {
                            "startTime": "2025-04-07T18:00:00-07:00",
                            "temperature": 55,
                            "windSpeed": "calm",
                            "probabilityOfPrecipitation": {"value": null}
                        }
                    ]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let observations = noaa_client(server.url())
        .forecast(GeoPoint::new(34.0522, -118.2437))
        .await
        .unwrap();
    points.assert_async().await;
    forecast.assert_async().await;

    assert_eq!(observations.len(), 2);
    assert_eq!(observations[0].temperature, 68.0);
    assert_eq!(observations[0].wind_speed, Some(5.0));
    assert_eq!(observations[0].humidity, Some(40.0));
    assert_eq!(observations[0].precipitation, 20.0);
    assert_eq!(observations[0].forecast, "Sunny");
    assert_eq!(observations[1].wind_speed, None);
    assert_eq!(observations[1].precipitation, 0.0);
    assert_eq!(observations[1].forecast, "No forecast available");
}

#[tokio::test]
async fn test_noaa_missing_grid() {
    let mut server = Server::new_async().await;
    let _points = server
        .mock("GET", "/points/34.0522,-118.2437")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let err = noaa_client(server.url())
        .forecast(GeoPoint::new(34.0522, -118.2437))
        .await
        .unwrap_err();
    assert_upstream(err, "Failed to fetch weather data");
}

// ============================================================================
// Mapbox terrain
// ============================================================================

fn terrain_png(centre: [u8; 3]) -> Vec<u8> {
    let mut img = RgbImage::from_pixel(256, 256, Rgb([0, 0, 0]));
    img.put_pixel(128, 128, Rgb(centre));
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).unwrap();
    png
}

#[tokio::test]
async fn test_terrain_centre_pixel() {
    let mut server = Server::new_async().await;
    let tile = TileIndex::containing(GeoPoint::new(34.0522, -118.2437), 14).unwrap();
    let path = format!("/v4/mapbox.terrain-rgb/14/{}/{}.pngraw", tile.x, tile.y);
    let mock = server
        .mock("GET", path.as_str())
        .match_query(Matcher::UrlEncoded("access_token".into(), "TOKEN".into()))
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(terrain_png([1, 138, 136]))
        .create_async()
        .await;

    let client = TerrainClient::new(
        http(),
        &MapboxConfig {
            base_url: server.url(),
            access_token: "TOKEN".to_string(),
            default_latitude: 34.0522,
            default_longitude: -118.2437,
        },
    );
    let rgb = client.centre_pixel(tile).await.unwrap();
    mock.assert_async().await;

    assert_eq!(rgb, [1, 138, 136]);
    assert!((shared::tile::terrain_rgb_elevation(rgb[0], rgb[1], rgb[2]) - 100.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_terrain_undecodable_tile() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_body("definitely not a png")
        .create_async()
        .await;

    let client = TerrainClient::new(
        http(),
        &MapboxConfig {
            base_url: server.url(),
            access_token: "TOKEN".to_string(),
            default_latitude: 0.0,
            default_longitude: 0.0,
        },
    );
    let err = client
        .centre_pixel(TileIndex { zoom: 14, x: 1, y: 1 })
        .await
        .unwrap_err();
    assert_upstream(err, "Failed to fetch topography data");
}

// ============================================================================
// Human factors
// ============================================================================

fn human_factors_client(api_url: String) -> HumanFactorsClient {
    HumanFactorsClient::new(http(), &HumanFactorsConfig { api_url })
}

#[tokio::test]
async fn test_human_factors_relayed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/factors")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([{"latitude": 34.1, "populationDensity": 3200}]).to_string())
        .create_async()
        .await;

    let data = human_factors_client(format!("{}/factors", server.url()))
        .fetch()
        .await
        .unwrap();
    assert_eq!(data, Some(json!([{"latitude": 34.1, "populationDensity": 3200}])));
}

#[tokio::test]
async fn test_human_factors_empty_payload() {
    let mut server = Server::new_async().await;
    let _empty = server
        .mock("GET", "/empty")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;
    let _null = server
        .mock("GET", "/null")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let empty = human_factors_client(format!("{}/empty", server.url()))
        .fetch()
        .await
        .unwrap();
    assert_eq!(empty, None);

    let null = human_factors_client(format!("{}/null", server.url()))
        .fetch()
        .await
        .unwrap();
    assert_eq!(null, None);
}
