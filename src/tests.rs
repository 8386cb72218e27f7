use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::web::Data;
use actix_web::App;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use validator::Validate;

use crate::structs::{Booking, NewListing, NewReview, User};
use crate::{db, routes, seed, AppState};

async fn test_pool() -> SqlitePool {
    // Single connection: every pooled sqlite connection would otherwise get
    // its own empty in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

fn listing_fixture(title: &str) -> NewListing {
    NewListing {
        title: title.to_string(),
        description: "A place to stay".to_string(),
        price_per_night: 100.0,
        address: "1 Test St".to_string(),
        city: "Nairobi".to_string(),
        country: "Kenya".to_string(),
        image_url: None,
        max_guests: 4,
        amenities: None,
    }
}

async fn user_fixture(pool: &SqlitePool, username: &str) -> User {
    db::create_user(
        pool,
        username,
        &format!("{}@example.com", username),
        "password123",
    )
    .await
    .unwrap()
}

#[actix_web::test]
async fn booking_with_equal_dates_is_rejected() {
    let pool = test_pool().await;
    let listing = db::create_listing(&pool, &listing_fixture("Equal Dates"))
        .await
        .unwrap();
    let user = user_fixture(&pool, "alice").await;

    let app = test::init_service(
        App::new()
            .app_data(Data::new(AppState {
                db_pool: pool.clone(),
            }))
            .service(routes::create_booking),
    )
    .await;

    let req = TestRequest::post()
        .uri("/bookings")
        .set_json(serde_json::json!({
            "listing_id": listing.id,
            "user_id": user.id,
            "check_in_date": "2026-09-01",
            "check_out_date": "2026-09-01",
            "number_of_guests": 2
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn booking_total_price_is_nights_times_nightly_rate() {
    let pool = test_pool().await;
    let listing = db::create_listing(&pool, &listing_fixture("Priced Stay"))
        .await
        .unwrap();
    let user = user_fixture(&pool, "alice").await;

    let app = test::init_service(
        App::new()
            .app_data(Data::new(AppState {
                db_pool: pool.clone(),
            }))
            .service(routes::create_booking),
    )
    .await;

    let req = TestRequest::post()
        .uri("/bookings")
        .set_json(serde_json::json!({
            "listing_id": listing.id,
            "user_id": user.id,
            "check_in_date": "2026-09-01",
            "check_out_date": "2026-09-04",
            "number_of_guests": 2,
            // read-only field, ignored by the handler
            "total_price": 1.0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let booking: Booking = test::read_body_json(resp).await;
    assert_eq!(booking.total_price, 300.0);
}

#[actix_web::test]
async fn booking_for_unknown_listing_is_404() {
    let pool = test_pool().await;
    let user = user_fixture(&pool, "alice").await;

    let app = test::init_service(
        App::new()
            .app_data(Data::new(AppState {
                db_pool: pool.clone(),
            }))
            .service(routes::create_booking),
    )
    .await;

    let req = TestRequest::post()
        .uri("/bookings")
        .set_json(serde_json::json!({
            "listing_id": 9999,
            "user_id": user.id,
            "check_in_date": "2026-09-01",
            "check_out_date": "2026-09-03",
            "number_of_guests": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[test]
fn review_rating_outside_range_fails_validation() {
    let review = NewReview {
        listing_id: 1,
        user_id: 1,
        rating: 4,
        comment: None,
    };
    assert!(review.validate().is_ok());

    for rating in [0, 6, -1] {
        let bad = NewReview {
            rating,
            ..review.clone()
        };
        assert!(bad.validate().is_err(), "rating {} should fail", rating);
    }
}

#[actix_web::test]
async fn second_review_per_listing_and_user_fails() {
    let pool = test_pool().await;
    let listing = db::create_listing(&pool, &listing_fixture("Reviewed Once"))
        .await
        .unwrap();
    let user = user_fixture(&pool, "alice").await;

    db::create_review(&pool, listing.id, user.id, 4, Some("Nice stay"))
        .await
        .unwrap();
    let duplicate = db::create_review(&pool, listing.id, user.id, 5, None).await;
    assert!(duplicate.is_err());
}

#[actix_web::test]
async fn duplicate_booking_tuple_fails() {
    let pool = test_pool().await;
    let listing = db::create_listing(&pool, &listing_fixture("Booked Twice"))
        .await
        .unwrap();
    let user = user_fixture(&pool, "alice").await;

    let check_in = chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let check_out = chrono::NaiveDate::from_ymd_opt(2026, 9, 5).unwrap();
    db::create_booking(&pool, listing.id, user.id, check_in, check_out, 400.0, 2)
        .await
        .unwrap();
    let duplicate =
        db::create_booking(&pool, listing.id, user.id, check_in, check_out, 400.0, 2).await;
    assert!(duplicate.is_err());

    // same listing and user with shifted dates is a different booking
    let shifted = check_out.succ_opt().unwrap();
    db::create_booking(&pool, listing.id, user.id, check_out, shifted, 100.0, 2)
        .await
        .unwrap();
}

#[actix_web::test]
async fn deleting_listing_removes_bookings_and_reviews() {
    let pool = test_pool().await;
    let listing = db::create_listing(&pool, &listing_fixture("Doomed"))
        .await
        .unwrap();
    let user = user_fixture(&pool, "alice").await;

    let check_in = chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let check_out = chrono::NaiveDate::from_ymd_opt(2026, 9, 3).unwrap();
    db::create_booking(&pool, listing.id, user.id, check_in, check_out, 200.0, 2)
        .await
        .unwrap();
    db::create_review(&pool, listing.id, user.id, 5, None)
        .await
        .unwrap();

    assert!(db::delete_listing(&pool, listing.id).await.unwrap());

    let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(&pool)
        .await
        .unwrap();
    let reviews: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(bookings, 0);
    assert_eq!(reviews, 0);
}

#[actix_web::test]
async fn average_rating_is_null_without_reviews_and_mean_with() {
    let pool = test_pool().await;
    let listing = db::create_listing(&pool, &listing_fixture("Rated"))
        .await
        .unwrap();

    let detail = db::get_listing_detail(&pool, listing.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.reviews_count, 0);
    assert_eq!(detail.average_rating, None);

    let alice = user_fixture(&pool, "alice").await;
    let bob = user_fixture(&pool, "bob").await;
    db::create_review(&pool, listing.id, alice.id, 3, None)
        .await
        .unwrap();
    db::create_review(&pool, listing.id, bob.id, 5, None)
        .await
        .unwrap();

    let detail = db::get_listing_detail(&pool, listing.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.reviews_count, 2);
    assert_eq!(detail.average_rating, Some(4.0));
}

#[actix_web::test]
async fn seeding_twice_leaves_five_listings_with_consistent_totals() {
    let pool = test_pool().await;
    seed::run(&pool).await.unwrap();
    seed::run(&pool).await.unwrap();

    let listings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM listings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(listings, 5);

    for booking in db::get_all_bookings(&pool).await.unwrap() {
        let listing = db::get_listing_by_id(&pool, booking.listing_id)
            .await
            .unwrap()
            .unwrap();
        let nights = (booking.check_out_date - booking.check_in_date).num_days();
        assert_eq!(
            booking.total_price,
            listing.price_per_night * nights as f64
        );
    }
}
