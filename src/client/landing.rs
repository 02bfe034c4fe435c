//! Landing page view-model.
//!
//! The page is a state machine over the course-list fetch: while loading it
//! shows a skeleton whose placeholder counts are fixed (so the real layout
//! replaces it without shift), on failure a single static error message, and
//! on success the hero, category tags, and up to four featured course cards.

use crate::models::course::Course;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Hero carousel images; the active one is flagged for eager loading.
pub const HERO_IMAGES: [&str; 3] = ["/hero1.jpg", "/hero2.jpg", "/hero3.jpg"];

/// Static category tags shown under the featured heading.
pub const FEATURED_TAGS: [&str; 4] = ["Web Development", "Data Science", "Design", "Marketing"];

/// Skeleton placeholder counts. Fixed regardless of eventual data length.
pub const SKELETON_TAG_SLOTS: usize = 5;
pub const SKELETON_CARD_SLOTS: usize = 4;

/// At most this many fetched courses become featured cards.
pub const FEATURED_LIMIT: usize = 4;

/// Each successive card's entrance starts this much after the previous one.
pub const CARD_STAGGER: Duration = Duration::from_millis(200);

/// The single error message a failed fetch collapses to.
pub const ERROR_MESSAGE: &str = "Error loading courses";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("course fetch failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Fetch status for the course list. Two terminal states, no retry
/// transition.
#[derive(Debug, Clone)]
pub enum FetchState {
    Loading,
    Error(String),
    Ready(Vec<Course>),
}

/// Hero region: headline, copy, call-to-action, and the image carousel.
#[derive(Debug, Clone)]
pub struct Hero {
    pub headline: &'static str,
    pub description: &'static str,
    pub cta_label: &'static str,
    pub cta_href: &'static str,
    pub images: [&'static str; 3],
    /// Index of the visible image; also the one to load eagerly so the
    /// first paint does not flash.
    pub active_image: usize,
}

/// One featured course card.
#[derive(Debug, Clone)]
pub struct CourseCard {
    pub course_id: String,
    pub title: String,
    pub category: String,
    /// Navigation target; following it must not trigger a scroll jump.
    pub href: String,
    pub preserve_scroll: bool,
    /// Entrance delay once the region scrolls into view. The entrance plays
    /// at most once per page load.
    pub entrance_delay: Duration,
}

#[derive(Debug, Clone)]
pub enum LandingView {
    Skeleton {
        tag_slots: usize,
        card_slots: usize,
    },
    Error {
        message: &'static str,
    },
    Ready {
        hero: Hero,
        tags: [&'static str; 4],
        cards: Vec<CourseCard>,
    },
}

impl LandingView {
    /// Project the fetch state (plus the carousel's current index) into a
    /// renderable view.
    pub fn from_state(state: &FetchState, active_image: usize) -> Self {
        match state {
            FetchState::Loading => LandingView::Skeleton {
                tag_slots: SKELETON_TAG_SLOTS,
                card_slots: SKELETON_CARD_SLOTS,
            },
            FetchState::Error(_) => LandingView::Error {
                message: ERROR_MESSAGE,
            },
            FetchState::Ready(courses) => LandingView::Ready {
                hero: Hero {
                    headline: "Courses",
                    description: "Explore a wide range of courses to enhance your skills and \
                                  knowledge. Join our community of learners and start your \
                                  journey today!",
                    cta_label: "Explore Courses",
                    cta_href: "/search",
                    images: HERO_IMAGES,
                    active_image: active_image % HERO_IMAGES.len(),
                },
                tags: FEATURED_TAGS,
                cards: courses
                    .iter()
                    .take(FEATURED_LIMIT)
                    .enumerate()
                    .map(|(index, course)| CourseCard {
                        course_id: course.course_id.clone(),
                        title: course.title.clone(),
                        category: course.category.clone(),
                        href: format!("/courses/{}", course.course_id),
                        preserve_scroll: true,
                        entrance_delay: CARD_STAGGER * index as u32,
                    })
                    .collect(),
            },
        }
    }
}

/// Fetch the course list from the API. One outstanding request per page
/// load; there is no cancellation path — a discarded result is fine.
pub async fn fetch_courses(
    http: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<Course>, FetchError> {
    let url = format!("{base_url}/courses");
    debug!(%url, "fetching course list");
    let courses = http
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<Course>>()
        .await?;
    Ok(courses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::course::{CourseLevel, CourseStatus};
    use chrono::Utc;

    fn course(n: usize) -> Course {
        let now = Utc::now();
        Course {
            course_id: format!("course-{n}"),
            teacher_id: "t1".into(),
            teacher_name: "Teacher".into(),
            title: format!("Course {n}"),
            description: None,
            category: "Design".into(),
            image: None,
            price_cents: Some(1000),
            level: CourseLevel::Beginner,
            status: CourseStatus::Published,
            enrollments: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn skeleton_placeholder_counts_are_fixed() {
        let view = LandingView::from_state(&FetchState::Loading, 0);
        match view {
            LandingView::Skeleton {
                tag_slots,
                card_slots,
            } => {
                assert_eq!(tag_slots, 5);
                assert_eq!(card_slots, 4);
            }
            other => panic!("expected skeleton, got {other:?}"),
        }
    }

    #[test]
    fn error_state_is_a_single_static_message() {
        let view = LandingView::from_state(&FetchState::Error("timeout".into()), 0);
        match view {
            LandingView::Error { message } => assert_eq!(message, ERROR_MESSAGE),
            other => panic!("expected error view, got {other:?}"),
        }
    }

    #[test]
    fn renders_at_most_four_cards() {
        let courses: Vec<Course> = (0..7).map(course).collect();
        let view = LandingView::from_state(&FetchState::Ready(courses), 0);
        match view {
            LandingView::Ready { cards, .. } => assert_eq!(cards.len(), 4),
            other => panic!("expected ready view, got {other:?}"),
        }
    }

    #[test]
    fn short_lists_render_without_padding() {
        let courses: Vec<Course> = (0..2).map(course).collect();
        let view = LandingView::from_state(&FetchState::Ready(courses), 0);
        match view {
            LandingView::Ready { cards, .. } => {
                assert_eq!(cards.len(), 2);
                assert_eq!(cards[0].href, "/courses/course-0");
                assert!(cards[0].preserve_scroll);
            }
            other => panic!("expected ready view, got {other:?}"),
        }
    }

    #[test]
    fn card_entrances_are_staggered() {
        let courses: Vec<Course> = (0..4).map(course).collect();
        let view = LandingView::from_state(&FetchState::Ready(courses), 0);
        let LandingView::Ready { cards, .. } = view else {
            panic!("expected ready view");
        };
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.entrance_delay, CARD_STAGGER * i as u32);
        }
    }

    #[test]
    fn active_image_wraps_into_range() {
        let view = LandingView::from_state(&FetchState::Ready(vec![course(0)]), 5);
        let LandingView::Ready { hero, .. } = view else {
            panic!("expected ready view");
        };
        assert_eq!(hero.active_image, 2);
        assert_eq!(hero.cta_href, "/search");
    }
}
