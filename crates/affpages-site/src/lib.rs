pub mod error;
pub mod filename;
pub mod page;
pub mod sitemap;
pub mod writer;

pub use error::SiteError;
pub use filename::sanitize_filename;
pub use page::{render_product_page, PageContext, DISCLOSURE};
pub use sitemap::{page_url, Sitemap, SitemapEntry};
pub use writer::{write_page, WriteOutcome};
