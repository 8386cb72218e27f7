use actix_web::{
    delete, get, post,
    web::{self, Data},
    HttpResponse, Responder,
};
use validator::Validate;

use crate::{
    db,
    errors::{AppError, ErrorResponse},
    structs::{NewBooking, NewListing, NewReview},
    AppState,
};

#[get("/listings")]
pub async fn list_listings(state: Data<AppState>) -> Result<impl Responder, AppError> {
    let listings = db::get_all_listings(&state.db_pool).await.map_err(|e| {
        log::error!("Failed to fetch listings: {}", e);
        AppError::DatabaseError(e)
    })?;
    Ok(HttpResponse::Ok().json(listings))
}

#[get("/listings/{id}")]
pub async fn get_listing(
    state: Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    match db::get_listing_detail(&state.db_pool, id).await? {
        Some(listing) => Ok(HttpResponse::Ok().json(listing)),
        None => Err(AppError::NotFound),
    }
}

#[post("/listings")]
pub async fn create_listing(
    state: Data<AppState>,
    body: web::Json<NewListing>,
) -> Result<impl Responder, AppError> {
    if let Err(e) = body.validate() {
        return Ok(HttpResponse::BadRequest().json(e));
    }
    let listing = db::create_listing(&state.db_pool, &body).await?;
    Ok(HttpResponse::Created().json(listing))
}

#[delete("/listings/{id}")]
pub async fn delete_listing(
    state: Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    if db::delete_listing(&state.db_pool, id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound)
    }
}

#[get("/bookings")]
pub async fn list_bookings(state: Data<AppState>) -> Result<impl Responder, AppError> {
    let bookings = db::get_all_bookings(&state.db_pool).await?;
    Ok(HttpResponse::Ok().json(bookings))
}

#[get("/bookings/{id}")]
pub async fn get_booking(
    state: Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    match db::get_booking_detail(&state.db_pool, id).await? {
        Some(booking) => Ok(HttpResponse::Ok().json(booking)),
        None => Err(AppError::NotFound),
    }
}

#[post("/bookings")]
pub async fn create_booking(
    state: Data<AppState>,
    body: web::Json<NewBooking>,
) -> Result<impl Responder, AppError> {
    if let Err(e) = body.validate() {
        return Ok(HttpResponse::BadRequest().json(e));
    }
    if body.check_in_date >= body.check_out_date {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "check_out_date must be after check_in_date".to_string(),
        }));
    }

    let listing = match db::get_listing_by_id(&state.db_pool, body.listing_id).await? {
        Some(listing) => listing,
        None => {
            return Ok(HttpResponse::NotFound().json(ErrorResponse {
                error: "Listing not found".to_string(),
            }))
        }
    };
    if db::get_user_by_id(&state.db_pool, body.user_id).await?.is_none() {
        return Ok(HttpResponse::NotFound().json(ErrorResponse {
            error: "User not found".to_string(),
        }));
    }

    // total_price is derived from the listing, never taken from the request
    let nights = (body.check_out_date - body.check_in_date).num_days();
    let total_price = listing.price_per_night * nights as f64;

    let booking = db::create_booking(
        &state.db_pool,
        body.listing_id,
        body.user_id,
        body.check_in_date,
        body.check_out_date,
        total_price,
        body.number_of_guests,
    )
    .await?;
    Ok(HttpResponse::Created().json(booking))
}

#[get("/reviews")]
pub async fn list_reviews(state: Data<AppState>) -> Result<impl Responder, AppError> {
    let reviews = db::get_all_reviews(&state.db_pool).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

#[post("/reviews")]
pub async fn create_review(
    state: Data<AppState>,
    body: web::Json<NewReview>,
) -> Result<impl Responder, AppError> {
    if let Err(e) = body.validate() {
        return Ok(HttpResponse::BadRequest().json(e));
    }

    if db::get_listing_by_id(&state.db_pool, body.listing_id).await?.is_none() {
        return Ok(HttpResponse::NotFound().json(ErrorResponse {
            error: "Listing not found".to_string(),
        }));
    }
    if db::get_user_by_id(&state.db_pool, body.user_id).await?.is_none() {
        return Ok(HttpResponse::NotFound().json(ErrorResponse {
            error: "User not found".to_string(),
        }));
    }

    let review = db::create_review(
        &state.db_pool,
        body.listing_id,
        body.user_id,
        body.rating,
        body.comment.as_deref(),
    )
    .await?;
    Ok(HttpResponse::Created().json(review))
}
