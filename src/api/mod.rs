pub mod client;
pub mod normalize;
pub mod traits;
pub mod types;

pub use client::ApiClient;
pub use normalize::{decode_records, normalize_list};
pub use traits::PropertyApi;
pub use types::ListQuery;
