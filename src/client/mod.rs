//! Headless client-side view-model for the public landing page: the course
//! fetch state machine, the skeleton/ready/error projections, and the
//! auto-advancing hero carousel.

pub mod carousel;
pub mod landing;
