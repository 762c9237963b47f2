//! Tests for the Tesla inventory client

use std::path::PathBuf;

use crate::config::WatchConfig;
use crate::tesla::{query_json, Listing};

fn test_config() -> WatchConfig {
    WatchConfig::new(
        "m3".to_string(),
        vec![2021, 2022],
        vec!["LRAWD".to_string(), "PAWD".to_string()],
        "GB".to_string(),
        "https://discord.test/webhook".to_string(),
        "new-thread".to_string(),
        "changed-thread".to_string(),
        PathBuf::from("cars.json"),
    )
}

#[test]
fn listing_deserializes_full_record() {
    let json = r#"{
        "Model": "m3",
        "Year": 2022,
        "VIN": "5YJ3E7EB0NF123456",
        "RegistrationDetails": {
            "LicensePlateNumber": "AB22 CDE",
            "firstRegistered": "2022-03-01"
        },
        "Odometer": 12345,
        "OdometerType": "miles",
        "TrimName": "Long Range AWD",
        "OptionCodeSpecs": {
            "C_OPTS": {
                "options": [
                    {"code": "$PPSW", "name": "Pearl White Paint"},
                    {"code": "$IN3PB", "name": "All Black Interior"}
                ]
            }
        },
        "VrlName": "Manchester",
        "InventoryPrice": 31000.0,
        "VehiclePhotos": [
            {"imageUrl": "https://img.test/1.jpg"},
            {"imageUrl": "https://img.test/2.jpg"}
        ]
    }"#;

    let listing: Listing = serde_json::from_str(json).unwrap();
    assert_eq!(listing.vin, "5YJ3E7EB0NF123456");
    assert_eq!(listing.year, 2022);
    assert_eq!(listing.trim, "Long Range AWD");
    assert_eq!(listing.registration.license_plate, "AB22 CDE");
    assert_eq!(listing.option_specs.c_opts.options.len(), 2);
    assert_eq!(listing.location, "Manchester");
    assert!((listing.price - 31000.0).abs() < 0.001);
    assert!(listing.has_photos());
}

#[test]
fn listing_deserializes_minimal_record() {
    let listing: Listing = serde_json::from_str(r#"{"VIN": "VIN1"}"#).unwrap();
    assert_eq!(listing.vin, "VIN1");
    assert_eq!(listing.year, 0);
    assert!(listing.photos.is_empty());
    assert!(!listing.has_photos());
    assert!(listing.registration.license_plate.is_empty());
}

#[test]
fn order_url_includes_model_and_vin() {
    let listing: Listing =
        serde_json::from_str(r#"{"Model": "m3", "VIN": "VIN1"}"#).unwrap();
    assert_eq!(
        listing.order_url(),
        "https://www.tesla.com/en_GB/m3/order/VIN1"
    );
}

#[test]
fn query_json_matches_api_shape() {
    let json = query_json(&test_config()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let query = &value["query"];
    assert_eq!(query["model"], "m3");
    assert_eq!(query["condition"], "used");
    assert_eq!(query["arrangeby"], "Year");
    assert_eq!(query["order"], "desc");
    assert_eq!(query["market"], "GB");
    assert_eq!(query["options"]["Year"], serde_json::json!([2021, 2022]));
    assert_eq!(
        query["options"]["TRIM"],
        serde_json::json!(["LRAWD", "PAWD"])
    );
}

#[tokio::test]
async fn fetch_inventory_parses_results() {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    let body = serde_json::json!({
        "results": [
            {"VIN": "VIN1", "InventoryPrice": 30000.0},
            {"VIN": "VIN2", "InventoryPrice": 25000.0}
        ]
    });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let listings = crate::tesla::fetch_inventory(&server.uri(), &test_config())
        .await
        .unwrap();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].vin, "VIN1");
}

#[tokio::test]
async fn fetch_inventory_error_status() {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = crate::tesla::fetch_inventory(&server.uri(), &test_config()).await;
    match result {
        Err(crate::error::WatchError::HttpStatus(status)) => {
            assert_eq!(status.as_u16(), 503);
        }
        Err(other) => panic!("Expected HttpStatus error, got: {:?}", other),
        Ok(listings) => panic!("Expected error, got {} listing(s)", listings.len()),
    }
}
