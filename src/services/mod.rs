pub mod clerk_service;
pub mod course_service;

use clerk_service::ClerkClient;
use course_service::CourseService;

/// Shared state handed to every route handler. Both members are stateless
/// relays to external systems and safe for concurrent use, so the router can
/// clone this freely per request.
#[derive(Clone)]
pub struct AppState {
    pub courses: CourseService,
    pub clerk: ClerkClient,
}
