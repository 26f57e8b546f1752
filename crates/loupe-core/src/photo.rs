#![forbid(unsafe_code)]

//! Photo records as the detail view consumes them.
//!
//! Storage lives outside this crate. The view asks a [`PhotoSource`] for a
//! record, and the panel content is built from it through
//! [`PanelDetails::from_record`]. The panel motion model never sees any of
//! this.

/// A GPS fix in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A stored photo and its capture metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "camelCase"))]
pub struct PhotoRecord {
    pub id: String,
    /// Location of the image file.
    pub uri: String,
    /// Capture time, milliseconds since the Unix epoch.
    #[cfg_attr(feature = "config", serde(rename = "timestamp"))]
    pub timestamp_ms: i64,
    pub location: Coordinate,
    pub filename: String,
}

/// Record lookup and deletion, implemented by the storage layer.
pub trait PhotoSource {
    type Error: std::error::Error;

    /// Fetch a record by id. `Ok(None)` when no such photo exists.
    fn photo(&self, id: &str) -> Result<Option<PhotoRecord>, Self::Error>;

    /// Delete a record and its file. Returns whether anything was removed.
    fn delete(&mut self, id: &str) -> Result<bool, Self::Error>;
}

/// Text shown in the detail panel for one photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDetails {
    pub timestamp_ms: i64,
    /// Signed latitude, six decimals.
    pub latitude: String,
    /// Signed longitude, six decimals.
    pub longitude: String,
}

impl PanelDetails {
    #[must_use]
    pub fn from_record(record: &PhotoRecord) -> Self {
        Self {
            timestamp_ms: record.timestamp_ms,
            latitude: format!("{:.6}", record.location.latitude),
            longitude: format!("{:.6}", record.location.longitude),
        }
    }
}

/// Unsigned coordinate with six decimals and a degree sign, as used in share
/// messages: `-12.3456789` becomes `12.345679°`.
#[must_use]
pub fn format_coordinate(value: f64) -> String {
    format!("{:.6}°", value.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PhotoRecord {
        PhotoRecord {
            id: "1".into(),
            uri: "file://photos/photo_1704103200000.jpg".into(),
            timestamp_ms: 1_704_103_200_000,
            location: Coordinate {
                latitude: -23.5505,
                longitude: -46.6333,
            },
            filename: "photo_1704103200000.jpg".into(),
        }
    }

    #[test]
    fn coordinate_formatting() {
        assert_eq!(format_coordinate(12.3456789), "12.345679°");
        assert_eq!(format_coordinate(-12.3456789), "12.345679°");
        assert_eq!(format_coordinate(45.0), "45.000000°");
        assert_eq!(format_coordinate(30.12), "30.120000°");
        assert_eq!(format_coordinate(0.0000012345), "0.000001°");
        assert_eq!(format_coordinate(-0.0), "0.000000°");
        assert_eq!(format_coordinate(-90.123456), "90.123456°");
    }

    #[test]
    fn panel_details_keep_sign() {
        let details = PanelDetails::from_record(&record());
        assert_eq!(details.latitude, "-23.550500");
        assert_eq!(details.longitude, "-46.633300");
        assert_eq!(details.timestamp_ms, 1_704_103_200_000);
    }

    #[cfg(feature = "config")]
    #[test]
    fn record_reads_metadata_json() {
        let json = r#"{
            "id": "1",
            "uri": "file://photos/photo_1704103200000.jpg",
            "timestamp": 1704103200000,
            "location": { "latitude": -23.5505, "longitude": -46.6333 },
            "filename": "photo_1704103200000.jpg"
        }"#;
        let parsed: PhotoRecord = serde_json::from_str(json).expect("parses");
        assert_eq!(parsed, record());
    }
}
