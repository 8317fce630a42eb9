use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The artist draft typed into the "create" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(rename = "artistName")]
    pub artist_name: String,
}

impl Artist {
    pub fn new(artist_name: &str) -> Self {
        Self {
            artist_name: artist_name.to_string(),
        }
    }
}

/// One release year known to the backend.
///
/// The backend sends `{"year": 2014}`, but depending on the database the year may come
/// back as `2014.0`, `"2014"` or `null`. A bare value is accepted as well. Anything that
/// is not a whole year is kept as `None` instead of failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawYear")]
pub struct YearEntry {
    pub year: Option<i32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Bare(Option<YearValue>),
    Object { year: Option<YearValue> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl YearValue {
    fn whole_year(self) -> Option<i32> {
        match self {
            YearValue::Int(year) => i32::try_from(year).ok(),
            YearValue::Float(year) => float_year(year),
            YearValue::Text(text) => {
                let text = text.trim();
                text.parse::<i32>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(float_year))
            }
        }
    }
}

fn float_year(year: f64) -> Option<i32> {
    let in_range = year >= f64::from(i32::MIN) && year <= f64::from(i32::MAX);
    (year.fract() == 0.0 && in_range).then_some(year as i32)
}

impl From<RawYear> for YearEntry {
    fn from(raw: RawYear) -> Self {
        let year = match raw {
            RawYear::Bare(value) | RawYear::Object { year: value } => {
                value.and_then(YearValue::whole_year)
            }
        };
        YearEntry { year }
    }
}

impl From<i32> for YearEntry {
    fn from(year: i32) -> Self {
        YearEntry { year: Some(year) }
    }
}

impl fmt::Display for YearEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{year}"),
            None => write!(f, "-"),
        }
    }
}

/// Response of `GET years`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearsSnapshot {
    pub years: Vec<YearEntry>,
    pub album_count: u64,
    pub track_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub artist_id: Option<i64>,
    pub collection_id: Option<i64>,
    pub collection_name: Option<String>,
    pub collection_price: Option<f64>,
    pub track_count: Option<i64>,
    pub release_date: Option<String>,
    pub primary_genre_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub wrapper_type: Option<String>,
    pub kind: Option<String>,
    pub artist_id: Option<i64>,
    pub collection_id: Option<i64>,
    pub track_id: Option<i64>,
    pub artist_name: Option<String>,
    pub track_name: Option<String>,
    pub collection_price: Option<f64>,
    pub track_price: Option<f64>,
    pub release_date: Option<String>,
    pub track_count: Option<i64>,
    pub track_number: Option<i64>,
    pub primary_genre_name: Option<String>,
    pub collection_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `GET content/<year>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    pub albums: Vec<Album>,
    pub tracks: Vec<Track>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_artist_uses_camel_case_on_the_wire() {
        let value = serde_json::to_value(Artist::new("Pink Floyd")).unwrap();
        assert_eq!(value, json!({"artistName": "Pink Floyd"}));
    }

    #[test]
    fn test_years_snapshot_accepts_objects_and_bare_numbers() {
        let objects: YearsSnapshot = serde_json::from_value(json!({
            "years": [{"year": 1973}, {"year": 1979}],
            "album_count": 2,
            "track_count": 19
        }))
        .unwrap();
        assert_eq!(objects.years, vec![YearEntry::from(1973), YearEntry::from(1979)]);

        let bare: YearsSnapshot = serde_json::from_value(json!({
            "years": [2020, 2021],
            "album_count": 5,
            "track_count": 42
        }))
        .unwrap();
        assert_eq!(bare.years, vec![YearEntry::from(2020), YearEntry::from(2021)]);
        assert_eq!(bare.album_count, 5);
        assert_eq!(bare.track_count, 42);
    }

    #[test]
    fn test_years_tolerate_database_encodings() {
        let snapshot: YearsSnapshot = serde_json::from_value(json!({
            "years": [{"year": 2014.0}, {"year": "2015"}, {"year": " 2016.0 "}, {"year": null}, null],
            "album_count": 3,
            "track_count": 27
        }))
        .unwrap();

        assert_eq!(
            snapshot.years,
            vec![
                YearEntry::from(2014),
                YearEntry::from(2015),
                YearEntry::from(2016),
                YearEntry { year: None },
                YearEntry { year: None },
            ]
        );
        assert_eq!(snapshot.album_count, 3);
    }

    #[test]
    fn test_fractional_or_garbled_year_is_unknown() {
        let years: Vec<YearEntry> =
            serde_json::from_value(json!([{"year": 2014.5}, {"year": "soon"}, 1e12])).unwrap();

        assert!(years.iter().all(|entry| entry.year.is_none()));
        assert_eq!(years[0].to_string(), "-");
        assert_eq!(YearEntry::from(1973).to_string(), "1973");
    }

    #[test]
    fn test_content_keeps_nulls_and_unknown_fields() {
        let content: ContentSnapshot = serde_json::from_value(json!({
            "albums": [{
                "artistId": 487143,
                "collectionId": 1065973699,
                "collectionName": "The Dark Side of the Moon",
                "collectionPrice": null,
                "trackCount": 10,
                "releaseDate": "Thu, 01 Mar 1973 08:00:00 GMT",
                "primaryGenreName": "Rock"
            }],
            "tracks": [{
                "wrapperType": "track",
                "kind": "song",
                "trackId": 1065973704,
                "trackName": "Money",
                "collectionId": null,
                "collectionName": null,
                "isStreamable": true
            }]
        }))
        .unwrap();

        let album = &content.albums[0];
        assert_eq!(album.collection_name.as_deref(), Some("The Dark Side of the Moon"));
        assert_eq!(album.collection_price, None);
        assert!(album.extra.is_empty());

        let track = &content.tracks[0];
        assert_eq!(track.track_name.as_deref(), Some("Money"));
        assert_eq!(track.collection_id, None);
        assert_eq!(track.extra.get("isStreamable"), Some(&json!(true)));
    }
}
