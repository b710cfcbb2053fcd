//! Search, sort and price display for the browse pages.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};

use gatorslist_types::models::{Listing, ListingType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            other => Err(format!("unknown sort option '{}'", other)),
        }
    }
}

/// Case-insensitive match on title or owner. A blank query keeps everything.
pub fn filter_listings(listings: &[Listing], query: &str) -> Vec<Listing> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return listings.to_vec();
    }
    listings
        .iter()
        .filter(|l| {
            l.title.to_lowercase().contains(&query) || l.user.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Stable sort. `Newest` puts listings with an unreadable creation time last.
pub fn sort_listings(mut listings: Vec<Listing>, sort: SortOption) -> Vec<Listing> {
    match sort {
        SortOption::Newest => {
            listings.sort_by_key(|l| {
                std::cmp::Reverse(l.created_at.as_deref().and_then(parse_timestamp))
            });
        }
        SortOption::PriceLow => listings.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOption::PriceHigh => listings.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }
    listings
}

/// Filter then sort, as the browse pages do on every keystroke.
pub fn browse(listings: &[Listing], query: &str, sort: SortOption) -> Vec<Listing> {
    sort_listings(filter_listings(listings, query), sort)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // Rows written without an offset are UTC.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|ndt| ndt.and_utc())
        })
        .ok()
}

/// Price as shown on cards: zero or below is "Free" for items and
/// "Any price" for requests.
pub fn format_price(price: f64, kind: ListingType) -> String {
    if price <= 0.0 {
        return match kind {
            ListingType::Item => "Free".to_string(),
            ListingType::Request => "Any price".to_string(),
        };
    }
    format!("${:.2}", price)
}

/// Parses the price field of the create form. Anything unparsable is 0;
/// the sign is kept, so negative input still displays as free.
pub fn parse_price(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
}
