pub mod auth;
pub mod books;
pub mod recommendations;
pub mod reviews;

pub use auth::AuthService;
pub use books::BookService;
pub use recommendations::{RecommendationService, RecommendationSettings};
pub use reviews::ReviewService;
