use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::json;

use crate::domain::{GenerationRequest, ListingInput};

/// Timestamp layout used in the first log column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A successfully generated listing, ready to render and to log.
///
/// Created only after the provider call succeeds and immutable afterwards.
#[derive(Debug, Clone)]
pub struct GeneratedListing {
    timestamp: DateTime<Local>,
    request: GenerationRequest,
    generated_text: String,
}

impl GeneratedListing {
    pub fn new(request: GenerationRequest, generated_text: String) -> Self {
        Self {
            timestamp: Local::now(),
            request,
            generated_text,
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn input(&self) -> &ListingInput {
        self.request.input()
    }

    pub fn generated_text(&self) -> &str {
        &self.generated_text
    }

    /// Flatten into the fixed 6-column log schema.
    ///
    /// Price and weaknesses are deliberately not logged.
    pub fn to_row(&self) -> LogRow {
        LogRow::new(
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.request.property_type(),
            self.request.city(),
            self.request.surface_area(),
            self.request.strengths(),
            &self.generated_text,
        )
    }
}

/// One row of the append-only spreadsheet log:
/// `[timestamp, property type, city, surface, strengths, generated text]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRow {
    timestamp: String,
    property_type: String,
    city: String,
    surface_area: u32,
    strengths: String,
    generated_text: String,
}

impl LogRow {
    pub fn new(
        timestamp: String,
        property_type: impl Into<String>,
        city: impl Into<String>,
        surface_area: u32,
        strengths: impl Into<String>,
        generated_text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            property_type: property_type.into(),
            city: city.into(),
            surface_area,
            strengths: strengths.into(),
            generated_text: generated_text.into(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn property_type(&self) -> &str {
        &self.property_type
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn surface_area(&self) -> u32 {
        self.surface_area
    }

    pub fn strengths(&self) -> &str {
        &self.strengths
    }

    pub fn generated_text(&self) -> &str {
        &self.generated_text
    }

    /// Cell values in column order, for the Sheets `values:append` payload.
    /// The surface stays numeric so the sheet gets a number, not a string.
    pub fn to_values(&self) -> Vec<serde_json::Value> {
        vec![
            json!(self.timestamp),
            json!(self.property_type),
            json!(self.city),
            json!(self.surface_area),
            json!(self.strengths),
            json!(self.generated_text),
        ]
    }
}
