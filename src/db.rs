use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::{
    errors::AppError,
    structs::{Booking, BookingDetail, Listing, ListingDetail, NewListing, Review, ReviewDetail, User},
};

const LISTING_DETAIL_SQL: &str = "
    SELECT l.*,
           (SELECT COUNT(*) FROM bookings b WHERE b.listing_id = l.id) AS bookings_count,
           (SELECT COUNT(*) FROM reviews r WHERE r.listing_id = l.id) AS reviews_count,
           (SELECT AVG(r.rating) FROM reviews r WHERE r.listing_id = l.id) AS average_rating
    FROM listings l";

const BOOKING_DETAIL_SQL: &str = "
    SELECT b.*, l.title AS listing_title, u.username
    FROM bookings b
    JOIN listings l ON l.id = b.listing_id
    JOIN users u ON u.id = b.user_id";

const REVIEW_DETAIL_SQL: &str = "
    SELECT r.*, l.title AS listing_title, u.username
    FROM reviews r
    JOIN listings l ON l.id = r.listing_id
    JOIN users u ON u.id = r.user_id";

pub async fn get_all_listings(pool: &SqlitePool) -> Result<Vec<ListingDetail>, sqlx::Error> {
    let query = format!("{} ORDER BY l.id", LISTING_DETAIL_SQL);
    let listings = sqlx::query_as::<_, ListingDetail>(&query)
        .fetch_all(pool)
        .await?;
    Ok(listings)
}

pub async fn get_listing_detail(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<ListingDetail>, sqlx::Error> {
    let query = format!("{} WHERE l.id = $1", LISTING_DETAIL_SQL);
    let listing = sqlx::query_as::<_, ListingDetail>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(listing)
}

pub async fn get_listing_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Listing>, sqlx::Error> {
    let listing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(listing)
}

pub async fn create_listing(pool: &SqlitePool, new: &NewListing) -> Result<Listing, sqlx::Error> {
    let listing = sqlx::query_as::<_, Listing>(
        "INSERT INTO listings (title, description, price_per_night, address, city, country, image_url, max_guests, amenities)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.price_per_night)
    .bind(&new.address)
    .bind(&new.city)
    .bind(&new.country)
    .bind(&new.image_url)
    .bind(new.max_guests)
    .bind(&new.amenities)
    .fetch_one(pool)
    .await?;
    log::info!("Listing created: {}", listing.title);
    Ok(listing)
}

pub async fn delete_listing(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM listings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    let deleted = result.rows_affected() > 0;
    if deleted {
        log::info!("Listing with id {} deleted", id);
    }
    Ok(deleted)
}

pub async fn get_all_bookings(pool: &SqlitePool) -> Result<Vec<BookingDetail>, sqlx::Error> {
    let query = format!("{} ORDER BY b.id", BOOKING_DETAIL_SQL);
    let bookings = sqlx::query_as::<_, BookingDetail>(&query)
        .fetch_all(pool)
        .await?;
    Ok(bookings)
}

pub async fn get_booking_detail(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<BookingDetail>, sqlx::Error> {
    let query = format!("{} WHERE b.id = $1", BOOKING_DETAIL_SQL);
    let booking = sqlx::query_as::<_, BookingDetail>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(booking)
}

pub async fn create_booking(
    pool: &SqlitePool,
    listing_id: i64,
    user_id: i64,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    total_price: f64,
    number_of_guests: i64,
) -> Result<Booking, sqlx::Error> {
    let booking = sqlx::query_as::<_, Booking>(
        "INSERT INTO bookings (listing_id, user_id, check_in_date, check_out_date, total_price, number_of_guests)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(listing_id)
    .bind(user_id)
    .bind(check_in_date)
    .bind(check_out_date)
    .bind(total_price)
    .bind(number_of_guests)
    .fetch_one(pool)
    .await?;
    log::info!("Booking created for listing {}", listing_id);
    Ok(booking)
}

pub async fn get_all_reviews(pool: &SqlitePool) -> Result<Vec<ReviewDetail>, sqlx::Error> {
    let query = format!("{} ORDER BY r.id", REVIEW_DETAIL_SQL);
    let reviews = sqlx::query_as::<_, ReviewDetail>(&query)
        .fetch_all(pool)
        .await?;
    Ok(reviews)
}

pub async fn create_review(
    pool: &SqlitePool,
    listing_id: i64,
    user_id: i64,
    rating: i64,
    comment: Option<&str>,
) -> Result<Review, sqlx::Error> {
    let review = sqlx::query_as::<_, Review>(
        "INSERT INTO reviews (listing_id, user_id, rating, comment)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(listing_id)
    .bind(user_id)
    .bind(rating)
    .bind(comment)
    .fetch_one(pool)
    .await?;
    log::info!("Review created for listing {}", listing_id);
    Ok(review)
}

pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let pwd_hash = Argon2::default()
        .hash_password(password.as_bytes(), &SaltString::generate(&mut OsRng))
        .map_err(|e| {
            log::error!("Failed to hash password: {}", e);
            AppError::PasswordError(e.to_string())
        })?
        .to_string();
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, pwd_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(username)
    .bind(email)
    .bind(pwd_hash)
    .fetch_one(pool)
    .await?;
    log::info!("User created: {}", user.username);
    Ok(user)
}
