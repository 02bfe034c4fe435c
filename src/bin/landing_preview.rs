//! Text preview of the landing view-model against a running API server.
//!
//! Fetches the course list, starts the hero carousel, and prints the
//! rendered view. Useful for eyeballing the skeleton/error/ready
//! projections without a browser.

use anyhow::Result;
use course_market::client::{
    carousel::Carousel,
    landing::{self, FetchState, HERO_IMAGES, LandingView},
};
use std::{env, time::Duration};

#[tokio::main]
async fn main() -> Result<()> {
    let base_url =
        env::var("COURSE_MARKET_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".into());

    let carousel = Carousel::start(HERO_IMAGES.len(), Duration::from_secs(5));
    let http = reqwest::Client::new();

    // Show the skeleton the way a first paint would.
    print_view(&LandingView::from_state(&FetchState::Loading, 0));
    println!();

    let state = match landing::fetch_courses(&http, &base_url).await {
        Ok(courses) => FetchState::Ready(courses),
        Err(err) => FetchState::Error(err.to_string()),
    };

    print_view(&LandingView::from_state(&state, carousel.current()));
    carousel.cancel();
    Ok(())
}

fn print_view(view: &LandingView) {
    match view {
        LandingView::Skeleton {
            tag_slots,
            card_slots,
        } => {
            println!("[skeleton] hero + {tag_slots} tag slots + {card_slots} card slots");
        }
        LandingView::Error { message } => println!("[error] {message}"),
        LandingView::Ready { hero, tags, cards } => {
            println!("{} — {}", hero.headline, hero.description);
            println!(
                "  carousel: image {}/{} active ({})",
                hero.active_image + 1,
                hero.images.len(),
                hero.images[hero.active_image]
            );
            println!("  cta: {} -> {}", hero.cta_label, hero.cta_href);
            println!("  tags: {}", tags.join(", "));
            for card in cards {
                println!(
                    "  card: {} [{}] -> {} (enter after {:?})",
                    card.title, card.category, card.href, card.entrance_delay
                );
            }
        }
    }
}
