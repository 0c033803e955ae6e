//! One search hit and the ordering used to present a list of hits

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::ItemParseError;

/// A single item returned by the catalog search endpoint.
///
/// Fields are surfaced exactly as the remote sent them. An empty
/// `artist_name` is left for the renderer to replace with a placeholder.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogItem {
    name: String,
    artist_name: String,
    kind: String,
    genre: String,
    currency_code: String,
    price: Decimal,
    artwork_small_url: String,
    artwork_large_url: String,
    store_url: String,
}

/// Record shape shared by tracks, apps and e-books. Which of the
/// alternative fields is populated depends on the kind of item.
///
/// Only the name and price fields are typed strictly. Descriptive fields
/// holding an unexpected JSON type read as absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    track_name: Option<String>,
    collection_name: Option<String>,
    track_price: Option<serde_json::Number>,
    collection_price: Option<serde_json::Number>,
    price: Option<serde_json::Number>,
    #[serde(default, deserialize_with = "lenient")]
    artist_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    wrapper_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    primary_genre_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    genres: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    currency: Option<String>,
    #[serde(default, rename = "artworkUrl60", deserialize_with = "lenient")]
    artwork_url_60: Option<String>,
    #[serde(default, rename = "artworkUrl100", deserialize_with = "lenient")]
    artwork_url_100: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    track_view_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    collection_view_url: Option<String>,
}

/// `None` for a value of the wrong shape instead of an error.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl CatalogItem {
    /// Build an item from one decoded record of the response's `results` list.
    pub fn parse(record: serde_json::Value) -> Result<Self, ItemParseError> {
        let raw: RawRecord = serde_json::from_value(record).map_err(ItemParseError::Malformed)?;

        let name = raw
            .track_name
            .or(raw.collection_name)
            .ok_or(ItemParseError::MissingName)?;

        let price = raw
            .track_price
            .or(raw.collection_price)
            .or(raw.price)
            .ok_or(ItemParseError::MissingPrice)
            .and_then(|n| parse_price(&n))?;

        let genre = match (raw.primary_genre_name, raw.genres) {
            (Some(genre), _) => genre,
            (None, Some(genres)) => genres.join(", "),
            (None, None) => String::new(),
        };

        Ok(Self {
            name,
            artist_name: raw.artist_name.unwrap_or_default(),
            kind: raw.kind.or(raw.wrapper_type).unwrap_or_default(),
            genre,
            currency_code: raw.currency.unwrap_or_default(),
            price,
            artwork_small_url: raw.artwork_url_60.unwrap_or_default(),
            artwork_large_url: raw.artwork_url_100.unwrap_or_default(),
            store_url: raw
                .track_view_url
                .or(raw.collection_view_url)
                .unwrap_or_default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    /// Raw kind token from the remote, e.g. `song` or `software`
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Human-readable label for [`kind`](Self::kind)
    pub fn kind_display_name(&self) -> &str {
        match self.kind.as_str() {
            "album" => "Album",
            "audiobook" => "Audio Book",
            "book" => "Book",
            "ebook" => "E-Book",
            "feature-movie" => "Movie",
            "music-video" => "Music Video",
            "podcast" => "Podcast",
            "software" => "App",
            "song" => "Song",
            "tv-episode" => "TV Episode",
            other => other,
        }
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Never negative
    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn artwork_small_url(&self) -> &str {
        &self.artwork_small_url
    }

    pub fn artwork_large_url(&self) -> &str {
        &self.artwork_large_url
    }

    pub fn store_url(&self) -> &str {
        &self.store_url
    }
}

fn parse_price(number: &serde_json::Number) -> Result<Decimal, ItemParseError> {
    let text = number.to_string();
    let price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| ItemParseError::InvalidPrice(text))?;

    if price < Decimal::ZERO {
        return Err(ItemParseError::NegativePrice(price));
    }
    Ok(price)
}

/// Case-insensitive comparison on `name`, ignoring locale.
pub fn compare_by_name(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Sort with [`compare_by_name`]; equal names keep their response order.
pub fn sort_by_name(items: &mut [CatalogItem]) {
    items.sort_by(compare_by_name);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn track(name: &str) -> CatalogItem {
        CatalogItem::parse(json!({
            "kind": "song",
            "trackName": name,
            "trackPrice": 1.29,
            "currency": "USD",
        }))
        .unwrap()
    }

    #[test]
    fn parses_track_record() {
        let item = CatalogItem::parse(json!({
            "wrapperType": "track",
            "kind": "song",
            "artistName": "The Beatles",
            "trackName": "Let It Be",
            "collectionName": "Let It Be (Remastered)",
            "trackPrice": 1.29,
            "collectionPrice": 9.99,
            "currency": "USD",
            "primaryGenreName": "Rock",
            "artworkUrl60": "https://example.com/60.jpg",
            "artworkUrl100": "https://example.com/100.jpg",
            "trackViewUrl": "https://example.com/track",
            "collectionViewUrl": "https://example.com/album",
        }))
        .unwrap();

        assert_eq!(item.name(), "Let It Be");
        assert_eq!(item.artist_name(), "The Beatles");
        assert_eq!(item.kind(), "song");
        assert_eq!(item.kind_display_name(), "Song");
        assert_eq!(item.genre(), "Rock");
        assert_eq!(item.currency_code(), "USD");
        assert_eq!(item.price(), Decimal::from_str("1.29").unwrap());
        assert_eq!(item.artwork_small_url(), "https://example.com/60.jpg");
        assert_eq!(item.artwork_large_url(), "https://example.com/100.jpg");
        assert_eq!(item.store_url(), "https://example.com/track");
    }

    #[test]
    fn parses_ebook_record_with_fallback_fields() {
        let item = CatalogItem::parse(json!({
            "kind": "ebook",
            "trackName": "Moby Dick",
            "price": 0.0,
            "genres": ["Fiction", "Classics"],
            "trackViewUrl": "https://example.com/book",
        }))
        .unwrap();

        assert_eq!(item.kind_display_name(), "E-Book");
        assert_eq!(item.genre(), "Fiction, Classics");
        assert_eq!(item.price(), Decimal::ZERO);
        assert_eq!(item.artist_name(), "");
    }

    #[test]
    fn falls_back_to_collection_fields() {
        let item = CatalogItem::parse(json!({
            "wrapperType": "collection",
            "collectionName": "Abbey Road",
            "collectionPrice": 12.99,
            "collectionViewUrl": "https://example.com/album",
        }))
        .unwrap();

        assert_eq!(item.name(), "Abbey Road");
        assert_eq!(item.kind(), "collection");
        assert_eq!(item.store_url(), "https://example.com/album");
    }

    #[test]
    fn rejects_record_without_name() {
        let result = CatalogItem::parse(json!({ "kind": "song", "trackPrice": 1.0 }));
        assert!(matches!(result, Err(ItemParseError::MissingName)));
    }

    #[test]
    fn rejects_record_without_price() {
        let result = CatalogItem::parse(json!({ "kind": "song", "trackName": "Free?" }));
        assert!(matches!(result, Err(ItemParseError::MissingPrice)));
    }

    #[test]
    fn rejects_negative_price() {
        let result = CatalogItem::parse(json!({ "trackName": "Refund", "trackPrice": -1.0 }));
        assert!(matches!(result, Err(ItemParseError::NegativePrice(_))));
    }

    #[test]
    fn rejects_wrong_types_in_name_or_price() {
        let result = CatalogItem::parse(json!({ "trackName": 42, "trackPrice": 1.0 }));
        assert!(matches!(result, Err(ItemParseError::Malformed(_))));

        let result = CatalogItem::parse(json!({ "trackName": "Song", "trackPrice": "1.99" }));
        assert!(matches!(result, Err(ItemParseError::Malformed(_))));
    }

    #[test]
    fn tolerates_wrong_types_in_descriptive_fields() {
        let item = CatalogItem::parse(json!({
            "trackName": "Song",
            "trackPrice": 1.0,
            "genres": "Rock",
            "kind": 7,
            "artistName": ["Someone"],
            "currency": null,
            "artworkUrl60": { "url": "https://example.com/60.jpg" },
            "trackViewUrl": false,
        }))
        .unwrap();

        assert_eq!(item.name(), "Song");
        assert_eq!(item.price(), Decimal::ONE);
        assert_eq!(item.genre(), "");
        assert_eq!(item.kind(), "");
        assert_eq!(item.artist_name(), "");
        assert_eq!(item.currency_code(), "");
        assert_eq!(item.artwork_small_url(), "");
        assert_eq!(item.store_url(), "");
    }

    #[test]
    fn wrongly_typed_fallback_does_not_hide_the_next_one() {
        let item = CatalogItem::parse(json!({
            "collectionName": "Abbey Road",
            "collectionPrice": 12.99,
            "kind": 7,
            "wrapperType": "collection",
            "primaryGenreName": 3,
            "genres": ["Rock", "Pop"],
        }))
        .unwrap();

        assert_eq!(item.kind(), "collection");
        assert_eq!(item.genre(), "Rock, Pop");
    }

    #[test]
    fn unknown_kind_is_displayed_verbatim() {
        let item = CatalogItem::parse(json!({
            "kind": "interactive-booklet",
            "trackName": "Liner Notes",
            "trackPrice": 0,
        }))
        .unwrap();
        assert_eq!(item.kind_display_name(), "interactive-booklet");
    }

    #[test]
    fn sorts_case_insensitively() {
        let mut items = vec![track("zebra"), track("Apple"), track("mango")];
        sort_by_name(&mut items);
        let names: Vec<&str> = items.iter().map(CatalogItem::name).collect();
        assert_eq!(names, vec!["Apple", "mango", "zebra"]);
    }

    #[test]
    fn equal_names_keep_response_order() {
        let first = CatalogItem::parse(json!({
            "trackName": "Yesterday",
            "artistName": "The Beatles",
            "trackPrice": 1.29,
        }))
        .unwrap();
        let second = CatalogItem::parse(json!({
            "trackName": "YESTERDAY",
            "artistName": "Cover Band",
            "trackPrice": 0.99,
        }))
        .unwrap();

        let mut items = vec![track("zulu"), first.clone(), second.clone(), track("alpha")];
        sort_by_name(&mut items);

        assert_eq!(items[0].name(), "alpha");
        assert_eq!(items[1], first);
        assert_eq!(items[2], second);
        assert_eq!(items[3].name(), "zulu");
        assert_eq!(compare_by_name(&first, &second), Ordering::Equal);
    }
}
