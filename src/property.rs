//! Property listings as the admin screens see them: backend rows adapted into
//! `PropertyListing`, then into view-engine records.

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::{
        FieldKind,
        FieldValue,
        Record,
        RecordId,
        RecordSchema,
    },
    features::{
        FeatureSet,
        PropertyFeatures,
    },
    table::{
        SortDirection,
        SortState,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Published,
    Draft,
    Archived,
    Available,
    Sold,
    Reserved,
    Rent,
    #[serde(untagged)]
    Other(String),
}

impl PropertyStatus {
    /// Maps the backend's Turkish listing states; anything else is taken lowercased.
    pub fn from_backend(raw: &str) -> Self {
        match raw.trim() {
            "Satılık Emlak" => return PropertyStatus::Available,
            "Satıldı" => return PropertyStatus::Sold,
            "Rezerve" => return PropertyStatus::Reserved,
            "Kiralık" => return PropertyStatus::Rent,
            _ => {}
        }

        match raw.trim().to_lowercase().as_str() {
            "published" => PropertyStatus::Published,
            "draft" => PropertyStatus::Draft,
            "archived" => PropertyStatus::Archived,
            "available" => PropertyStatus::Available,
            "sold" => PropertyStatus::Sold,
            "reserved" => PropertyStatus::Reserved,
            "rent" => PropertyStatus::Rent,
            other => PropertyStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PropertyStatus::Published => "published",
            PropertyStatus::Draft => "draft",
            PropertyStatus::Archived => "archived",
            PropertyStatus::Available => "available",
            PropertyStatus::Sold => "sold",
            PropertyStatus::Reserved => "reserved",
            PropertyStatus::Rent => "rent",
            PropertyStatus::Other(other) => other,
        }
    }

    /// Admin badge text.
    pub fn label(&self) -> &str {
        match self {
            PropertyStatus::Published => "Yayında",
            PropertyStatus::Draft => "Taslak",
            PropertyStatus::Archived => "Arşiv",
            other => other.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "TL", alias = "TRY")]
    Try,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Gbp => "£",
            Currency::Try => "₺",
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// `£1.250.000`, `₺95.500,5`: Turkish grouping, at most two decimals.
pub fn format_price(price: f64, currency: Currency) -> String {
    let sign = if price < 0.0 { "-" } else { "" };
    let rounded = format!("{:.2}", price.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        format!("{}{}{}", sign, currency.symbol(), group_thousands(whole))
    } else {
        format!("{}{}{},{}", sign, currency.symbol(), group_thousands(whole), fraction)
    }
}

pub fn convert_to_try(price: f64, currency: Currency, gbp_to_try_rate: f64) -> f64 {
    match currency {
        Currency::Try => price,
        Currency::Gbp => price * gbp_to_try_rate,
    }
}

/// Row shape returned by the listings endpoint. Most columns are optional or loosely typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackendProperty {
    pub id: u64,
    pub title: Option<String>,
    pub region: Option<String>,
    pub location: Option<String>,
    pub reference: Option<String>,
    pub price: Option<FieldValue>,
    pub currency: Option<Currency>,
    pub status: Option<String>,
    pub is_featured: Option<FieldValue>,
    pub area: Option<FieldValue>,
    pub beds_room_count: Option<u32>,
    pub beds: Option<u32>,
    pub baths_count: Option<u32>,
    pub baths: Option<u32>,
    pub advisor_name: Option<String>,
    pub updated_at: Option<String>,
    pub ozellikler_ic: Option<String>,
    pub ozellikler_dis: Option<String>,
    pub ozellikler_konum: Option<String>,
}

fn number_of(value: Option<&FieldValue>) -> Option<f64> {
    match value? {
        FieldValue::Number(number) => Some(*number),
        FieldValue::Text(text) => text.trim().parse().ok(),
        FieldValue::Bool(_) => None,
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value.filter(|text| !text.is_empty()).unwrap_or_else(|| fallback.to_string())
}

fn truthy(value: Option<&FieldValue>) -> bool {
    match value {
        Some(FieldValue::Bool(flag)) => *flag,
        Some(FieldValue::Number(number)) => *number != 0.0,
        Some(FieldValue::Text(text)) => !text.is_empty() && text != "0" && text != "false",
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyListing {
    pub id: u64,
    pub title: String,
    pub region: String,
    pub location: String,
    pub code: String,
    pub price: f64,
    pub currency: Currency,
    pub status: PropertyStatus,
    pub featured: bool,
    pub sqm: u32,
    pub beds: u32,
    pub baths: u32,
    pub agent_name: String,
    pub updated_at: Option<String>,
    pub features: PropertyFeatures,
}

impl From<BackendProperty> for PropertyListing {
    fn from(row: BackendProperty) -> Self {
        Self {
            id: row.id,
            title: non_empty_or(row.title, "Untitled Property"),
            region: non_empty_or(row.region, "N/A"),
            location: non_empty_or(row.location, "N/A"),
            code: non_empty_or(row.reference, "N/A"),
            price: number_of(row.price.as_ref()).unwrap_or(0.0),
            currency: row.currency.unwrap_or_default(),
            status: PropertyStatus::from_backend(row.status.as_deref().unwrap_or("")),
            featured: truthy(row.is_featured.as_ref()),
            sqm: number_of(row.area.as_ref()).map(|area| area.max(0.0) as u32).unwrap_or(0),
            beds: row.beds_room_count.filter(|&n| n > 0).or(row.beds).unwrap_or(0),
            baths: row.baths_count.filter(|&n| n > 0).or(row.baths).unwrap_or(0),
            agent_name: non_empty_or(row.advisor_name, "Unassigned"),
            updated_at: row.updated_at,
            features: PropertyFeatures {
                interior: FeatureSet::from_payload(row.ozellikler_ic.as_deref()),
                exterior: FeatureSet::from_payload(row.ozellikler_dis.as_deref()),
                location: FeatureSet::from_payload(row.ozellikler_konum.as_deref()),
            },
        }
    }
}

impl PropertyListing {
    pub fn formatted_price(&self) -> String {
        format_price(self.price, self.currency)
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new(RecordId::Number(self.id))
            .with("title", self.title.as_str())
            .with("region", self.region.as_str())
            .with("location", self.location.as_str())
            .with("code", self.code.as_str())
            .with("price", self.price)
            .with("currency", self.currency.symbol())
            .with("status", self.status.as_str())
            .with("featured", self.featured)
            .with("sqm", self.sqm)
            .with("beds", self.beds)
            .with("baths", self.baths)
            .with("agentName", self.agent_name.as_str());
        if let Some(updated_at) = &self.updated_at {
            record.set("updatedAt", updated_at.as_str());
        }
        record
    }
}

/// Field kinds of a listing record. `updatedAt` is ISO-8601 text and sorts as text.
pub fn property_schema() -> RecordSchema {
    RecordSchema::default()
        .field("price", FieldKind::Number)
        .field("sqm", FieldKind::Number)
        .field("beds", FieldKind::Number)
        .field("baths", FieldKind::Number)
        .field("featured", FieldKind::Bool)
        .field("updatedAt", FieldKind::Text)
}

/// Listing tables open on the most recently updated rows.
pub fn default_property_sort() -> SortState {
    SortState::by("updatedAt", SortDirection::Descending)
}

pub fn to_records(listings: &[PropertyListing]) -> Vec<Record> {
    listings.iter().map(PropertyListing::to_record).collect()
}
