pub mod footer;
pub mod navbar;

pub use footer::render_footer;
pub use navbar::render_navbar;
