use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::SqlitePool;

use crate::{db, errors::AppError, structs::NewListing};

const SEED_USERNAME: &str = "seeder_user";

const REVIEW_COMMENTS: [&str; 5] = [
    "Absolutely fantastic stay! Highly recommend.",
    "Great place, clean and well-located.",
    "Had a wonderful time, very comfortable.",
    "Good value for money, but a bit noisy.",
    "Excellent host and beautiful property.",
];

/// Wipes all listings, bookings and reviews, then repopulates the database
/// with five sample listings plus randomized bookings and reviews. Runs as a
/// plain linear script: the first failed insert aborts the run and already
/// committed rows stay.
pub async fn run(pool: &SqlitePool) -> Result<(), AppError> {
    println!("Seeding database...");

    // Bookings and reviews go first, they reference listings.
    sqlx::query("DELETE FROM bookings").execute(pool).await?;
    sqlx::query("DELETE FROM reviews").execute(pool).await?;
    sqlx::query("DELETE FROM listings").execute(pool).await?;
    println!("Cleared existing listing, booking, and review data.");

    let user = match db::get_user_by_username(pool, SEED_USERNAME).await? {
        Some(user) => {
            println!("Using existing user: {}", user.username);
            user
        }
        None => {
            let user = db::create_user(
                pool,
                SEED_USERNAME,
                "seeder@example.com",
                "seederpassword123",
            )
            .await?;
            println!("Created user: {}", user.username);
            user
        }
    };

    let mut rng = rand::thread_rng();
    for data in sample_listings() {
        let listing = db::create_listing(pool, &data).await?;
        println!("Created listing: \"{}\"", listing.title);

        // 70% chance of a booking some weeks out
        if rng.gen_bool(0.7) {
            let check_in = Utc::now().date_naive() + Duration::days(rng.gen_range(7..=30));
            let check_out = check_in + Duration::days(rng.gen_range(2..=7));
            let nights = (check_out - check_in).num_days();
            let total_price = listing.price_per_night * nights as f64;
            let number_of_guests = rng.gen_range(1..=listing.max_guests);
            db::create_booking(
                pool,
                listing.id,
                user.id,
                check_in,
                check_out,
                total_price,
                number_of_guests,
            )
            .await?;
            println!("  - Created booking for \"{}\"", listing.title);
        }

        // 60% chance of a review
        if rng.gen_bool(0.6) {
            let rating = rng.gen_range(3..=5);
            let comment = REVIEW_COMMENTS.choose(&mut rng).copied();
            let review = db::create_review(pool, listing.id, user.id, rating, comment).await?;
            println!(
                "  - Created review for \"{}\" (rating: {})",
                listing.title, review.rating
            );
        }
    }

    println!("Database seeding complete!");
    Ok(())
}

fn sample_listings() -> Vec<NewListing> {
    vec![
        NewListing {
            title: "Cozy Apartment in City Center".to_string(),
            description: "A charming and comfortable apartment right in the heart of the city, perfect for tourists and business travelers.".to_string(),
            price_per_night: 85.0,
            address: "123 Main St".to_string(),
            city: "Nairobi".to_string(),
            country: "Kenya".to_string(),
            image_url: Some("https://example.com/images/nairobi_apt1.jpg".to_string()),
            max_guests: 4,
            amenities: Some("WiFi, Kitchen, AC, TV".to_string()),
        },
        NewListing {
            title: "Spacious Villa with Ocean View".to_string(),
            description: "Enjoy breathtaking ocean views from this luxurious and spacious villa. Ideal for family vacations.".to_string(),
            price_per_night: 350.0,
            address: "456 Ocean Dr".to_string(),
            city: "Mombasa".to_string(),
            country: "Kenya".to_string(),
            image_url: Some("https://example.com/images/mombasa_villa1.jpg".to_string()),
            max_guests: 8,
            amenities: Some("Pool, Beach Access, WiFi, BBQ".to_string()),
        },
        NewListing {
            title: "Rustic Cabin in the Forest".to_string(),
            description: "Escape to nature in this peaceful and rustic cabin. Perfect for a quiet getaway.".to_string(),
            price_per_night: 60.0,
            address: "789 Forest Rd".to_string(),
            city: "Naivasha".to_string(),
            country: "Kenya".to_string(),
            image_url: Some("https://example.com/images/naivasha_cabin1.jpg".to_string()),
            max_guests: 2,
            amenities: Some("Fireplace, Hiking Trails".to_string()),
        },
        NewListing {
            title: "Modern Loft in Tech Hub".to_string(),
            description: "Stylish loft apartment in a vibrant tech district. Close to co-working spaces and cafes.".to_string(),
            price_per_night: 120.0,
            address: "101 Innovation Blvd".to_string(),
            city: "Nairobi".to_string(),
            country: "Kenya".to_string(),
            image_url: Some("https://example.com/images/nairobi_loft1.jpg".to_string()),
            max_guests: 3,
            amenities: Some("High-speed WiFi, Workspace, Gym Access".to_string()),
        },
        NewListing {
            title: "Safari Tent in Maasai Mara".to_string(),
            description: "Experience the wild with a comfortable stay in a luxury safari tent. Daily game drives included.".to_string(),
            price_per_night: 500.0,
            address: "Maasai Mara Reserve".to_string(),
            city: "Narok".to_string(),
            country: "Kenya".to_string(),
            image_url: Some("https://example.com/images/mara_tent1.jpg".to_string()),
            max_guests: 2,
            amenities: Some("Game Drives, All-Inclusive Meals".to_string()),
        },
    ]
}
