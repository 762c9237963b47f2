//! Tesla inventory API client
//!
//! Uses async reqwest for non-blocking HTTP requests. The query is a JSON
//! object passed as a `query` URL parameter, matching what the inventory
//! frontend sends.

use serde::{Deserialize, Serialize};

use crate::config::WatchConfig;
use crate::error::{Result, WatchError};

/// Inventory search endpoint
pub const INVENTORY_URL: &str = "https://www.tesla.com/inventory/api/v4/inventory-results";

/// Base URL for public order pages, model and VIN go on the end
pub const CAR_LINK_BASE_URL: &str = "https://www.tesla.com/en_GB";

/// One vehicle as returned by the inventory API
///
/// Every field is default-tolerant so partial records still parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Listing {
    #[serde(rename = "Model", default)]
    pub model: String,
    #[serde(rename = "Year", default)]
    pub year: i32,
    #[serde(rename = "VIN", default)]
    pub vin: String,
    #[serde(rename = "RegistrationDetails", default)]
    pub registration: RegistrationDetails,
    #[serde(rename = "Odometer", default)]
    pub odometer: i64,
    #[serde(rename = "OdometerType", default)]
    pub odometer_type: String,
    #[serde(rename = "TrimName", default)]
    pub trim: String,
    #[serde(rename = "OptionCodeSpecs", default)]
    pub option_specs: OptionCodeSpecs,
    /// Tesla centre the car is located at
    #[serde(rename = "VrlName", default)]
    pub location: String,
    #[serde(rename = "InventoryPrice", default)]
    pub price: f64,
    #[serde(rename = "VehiclePhotos", default)]
    pub photos: Vec<VehiclePhoto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationDetails {
    #[serde(rename = "LicensePlateNumber", default)]
    pub license_plate: String,
    #[serde(rename = "firstRegistered", default)]
    pub first_registered: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionCodeSpecs {
    #[serde(rename = "C_OPTS", default)]
    pub c_opts: OptionGroup,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionGroup {
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionSpec {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehiclePhoto {
    #[serde(rename = "imageUrl", default)]
    pub url: String,
}

impl Listing {
    /// Whether the listing carries any photos
    pub fn has_photos(&self) -> bool {
        !self.photos.is_empty()
    }

    /// Public order page for this vehicle
    pub fn order_url(&self) -> String {
        format!("{}/{}/order/{}", CAR_LINK_BASE_URL, self.model, self.vin)
    }
}

#[derive(Debug, Serialize)]
struct InventoryQuery<'a> {
    query: Query<'a>,
}

#[derive(Debug, Serialize)]
struct Query<'a> {
    model: &'a str,
    condition: &'a str,
    options: QueryOptions<'a>,
    arrangeby: &'a str,
    order: &'a str,
    market: &'a str,
}

#[derive(Debug, Serialize)]
struct QueryOptions<'a> {
    #[serde(rename = "Year")]
    year: &'a [i32],
    #[serde(rename = "TRIM")]
    trim: &'a [String],
}

#[derive(Debug, Deserialize)]
struct InventoryResponse {
    #[serde(default)]
    results: Vec<Listing>,
}

/// Serialize the search query for the `query` URL parameter
pub(crate) fn query_json(config: &WatchConfig) -> Result<String> {
    let query = InventoryQuery {
        query: Query {
            model: &config.model,
            condition: "used",
            options: QueryOptions {
                year: &config.years,
                trim: &config.trims,
            },
            arrangeby: "Year",
            order: "desc",
            market: &config.market,
        },
    };
    Ok(serde_json::to_string(&query)?)
}

/// Fetch the current used inventory matching the configured criteria
///
/// `base_url` is a parameter so tests can point it at a mock server.
pub async fn fetch_inventory(base_url: &str, config: &WatchConfig) -> Result<Vec<Listing>> {
    let query = query_json(config)?;
    log::debug!("Inventory query: {}", query);

    // Browser-ish headers so the request doesn't get filtered
    let response = reqwest::Client::new()
        .get(base_url)
        .header("Accept", "application/json")
        .header(
            "User-Agent",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:135.0) Gecko/20100101 Firefox/135.0",
        )
        .query(&[("query", query.as_str())])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(WatchError::HttpStatus(response.status()));
    }

    let inventory: InventoryResponse = response.json().await?;
    log::info!("Fetched {} listing(s) from inventory", inventory.results.len());
    Ok(inventory.results)
}

#[cfg(test)]
#[path = "tesla_tests.rs"]
mod tests;
