//! Store settings: identity, delivery policy, opening hours, theming.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opening window for one weekday. When `close < open` lexicographically the
/// closing time belongs to the next calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    /// Weekday name, "Domingo" through "Sábado".
    pub day: String,
    pub is_open: bool,
    /// "HH:MM"
    pub open: String,
    /// "HH:MM"
    pub close: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub store_name: String,
    pub document: String,
    pub address: String,
    pub phone: String,
    pub whatsapp_number: String,
    pub instagram_url: String,
    pub facebook_url: String,
    pub logo_url: String,
    pub banner_url: String,
    pub promo_banners: Vec<String>,
    pub min_delivery_time: u32,
    pub max_delivery_time: u32,
    pub min_order_value: Decimal,
    pub free_delivery_threshold: Decimal,
    pub greeting_message: String,
    pub is_temporarily_closed: bool,
    pub temporary_closure_message: String,
    /// Seven entries, Sunday first.
    pub opening_hours: Vec<OpeningHours>,
    pub fiado_surcharge_percentage: Decimal,
    pub primary_color: String,
    pub primary_color_hover: String,
    pub primary_color_light_tint: String,
    pub accent_color: String,
    pub text_color_on_primary: String,
    pub background_color_page: String,
    pub background_color_card: String,
    pub text_color_primary: String,
    pub text_color_secondary: String,
    pub border_color: String,
}

impl Settings {
    /// Opening hours row for a weekday name, if configured.
    pub fn hours_for_day(&self, day_name: &str) -> Option<&OpeningHours> {
        self.opening_hours.iter().find(|h| h.day == day_name)
    }
}
