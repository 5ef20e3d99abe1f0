pub mod client;
pub mod collect;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod signing;
pub mod types;

pub use client::PartnersClient;
pub use collect::{collect, CollectOutcome, CollectParams, ProductSearch};
pub use error::{ClientError, Disposition};
pub use types::{Deeplink, SearchPage};
