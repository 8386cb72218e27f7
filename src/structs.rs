use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub pwd_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price_per_night: f64,
    pub address: String,
    pub city: String,
    pub country: String,
    pub image_url: Option<String>,
    pub max_guests: i64,
    pub amenities: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Booking {
    pub id: i64,
    pub listing_id: i64,
    pub user_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: f64,
    pub number_of_guests: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Review {
    pub id: i64,
    pub listing_id: i64,
    pub user_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Listing as served over the API, with aggregates over its relations.
/// average_rating is null while the listing has no reviews.
#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct ListingDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price_per_night: f64,
    pub address: String,
    pub city: String,
    pub country: String,
    pub image_url: Option<String>,
    pub max_guests: i64,
    pub amenities: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub bookings_count: i64,
    pub reviews_count: i64,
    pub average_rating: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct BookingDetail {
    pub id: i64,
    pub listing_id: i64,
    pub listing_title: String,
    pub user_id: i64,
    pub username: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: f64,
    pub number_of_guests: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct ReviewDetail {
    pub id: i64,
    pub listing_id: i64,
    pub listing_title: String,
    pub user_id: i64,
    pub username: String,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, Debug, Clone, Validate)]
pub struct NewListing {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub price_per_night: f64,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(range(min = 1))]
    pub max_guests: i64,
    pub amenities: Option<String>,
}

/// total_price is intentionally absent: it is computed from the listing's
/// nightly price at creation time, never accepted from the client.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct NewBooking {
    pub listing_id: i64,
    pub user_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[validate(range(min = 1))]
    pub number_of_guests: i64,
}

#[derive(Deserialize, Debug, Clone, Validate)]
pub struct NewReview {
    pub listing_id: i64,
    pub user_id: i64,
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
    pub comment: Option<String>,
}
