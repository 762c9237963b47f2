//! Discord webhook notifier
//!
//! Renders one embed message per reconciled car and posts it to the
//! configured webhook, routed to a thread per classification: new
//! arrivals to one thread, changes and delistings to another.

use serde::Serialize;

use crate::config::WatchConfig;
use crate::error::{Result, WatchError};
use crate::reconcile::ReconciledCar;

/// Embed accent color used for all messages
const EMBED_COLOR: u32 = 5_814_783;

#[derive(Debug, Default, Serialize)]
pub struct DiscordMessage {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Default, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

fn field(name: &str, value: impl Into<String>, inline: bool) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value: value.into(),
        inline,
    }
}

/// Format a currency amount with thousands separators and two decimals
pub(crate) fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, cents % 100)
}

/// Format a price delta with an explicit `+` on increases
fn format_delta(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_amount(value))
    } else {
        format_amount(value)
    }
}

/// Build the full embed message for a new or changed car
pub fn car_message(car: &ReconciledCar) -> DiscordMessage {
    let listing = &car.listing;

    let mut embed = Embed {
        title: format!(
            "{} {} {} - £{}",
            listing.year,
            listing.model,
            listing.trim,
            format_amount(listing.price)
        ),
        url: listing.order_url(),
        color: Some(EMBED_COLOR),
        author: Some(EmbedAuthor {
            name: listing.location.clone(),
        }),
        ..Embed::default()
    };

    embed.fields.push(field("VIN", listing.vin.clone(), true));
    embed.fields.push(field(
        "Plate",
        listing.registration.license_plate.clone(),
        true,
    ));
    embed.fields.push(field(
        "Odometer",
        format!("{} {}", listing.odometer, listing.odometer_type),
        true,
    ));

    let options = listing
        .option_specs
        .c_opts
        .options
        .iter()
        .map(|opt| opt.name.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    embed.fields.push(field("Options", options, false));

    if !car.is_new {
        if car.price_changed {
            embed
                .fields
                .push(field("Price Change", format_delta(car.price_change), true));
        }
        if car.photos_added {
            embed.fields.push(field("Photos Added", "Yes", true));
        }
    }

    if let Some(first) = listing.photos.first() {
        embed.thumbnail = Some(EmbedImage {
            url: first.url.clone(),
        });
    }
    if let Some(second) = listing.photos.get(1) {
        embed.image = Some(EmbedImage {
            url: second.url.clone(),
        });
    }

    let mut message = DiscordMessage {
        embeds: vec![embed],
    };

    // Up to three more photos as bare image embeds on the same URL
    for photo in listing.photos.iter().skip(2).take(3) {
        message.embeds.push(Embed {
            url: listing.order_url(),
            image: Some(EmbedImage {
                url: photo.url.clone(),
            }),
            ..Embed::default()
        });
    }

    message
}

/// Build the reduced message for a delisted car
pub fn missing_message(car: &ReconciledCar) -> DiscordMessage {
    let embed = Embed {
        title: format!(
            "{} - £{}",
            car.listing.vin,
            format_amount(car.listing.price)
        ),
        color: Some(EMBED_COLOR),
        fields: vec![field(
            "Info",
            "Previously listed car is no longer available.",
            false,
        )],
        ..Embed::default()
    };

    DiscordMessage {
        embeds: vec![embed],
    }
}

/// Posts reconciled cars to the Discord webhook
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: String,
    new_thread_id: String,
    changed_thread_id: String,
}

impl Notifier {
    pub fn new(config: &WatchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: config.webhook_url.clone(),
            new_thread_id: config.new_thread_id.clone(),
            changed_thread_id: config.changed_thread_id.clone(),
        }
    }

    /// Send the notification for one reconciled car, if it warrants one
    ///
    /// Returns `Ok(false)` for unchanged cars, which get no message.
    pub async fn dispatch(&self, car: &ReconciledCar) -> Result<bool> {
        if car.is_new {
            self.post(&car_message(car), &self.new_thread_id).await?;
        } else if car.changed() {
            self.post(&car_message(car), &self.changed_thread_id)
                .await?;
        } else if car.missing {
            self.post(&missing_message(car), &self.changed_thread_id)
                .await?;
        } else {
            return Ok(false);
        }

        log::info!("Sent {} to Discord", car.listing.vin);
        Ok(true)
    }

    async fn post(&self, message: &DiscordMessage, thread_id: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .query(&[("thread_id", thread_id)])
            .json(message)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WatchError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "discord_tests.rs"]
mod tests;
