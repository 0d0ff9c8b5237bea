pub mod assemble;
pub mod envelope;
pub mod filter;
pub mod patterns;
pub mod planner;
pub mod search;

mod error;
mod rfc3339;

pub use assemble::{DimensionRef, PatternResult, RelatedPattern, TagResult, TaxonomyRefs};
pub use envelope::{EnvelopeStatus, ErrorBody, SearchEnvelope};
pub use error::{Error, Result};
pub use filter::{PageParam, SearchRequest};
pub use search::SearchPage;

use atlas_config::Config;
use atlas_storage::db::Db;

/// Read-only query surface over the taxonomy store.
pub struct AtlasService {
	pub cfg: Config,
	pub db: Db,
}
impl AtlasService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}
}
