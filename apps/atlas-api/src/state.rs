use std::sync::Arc;

use atlas_service::AtlasService;
use atlas_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<AtlasService>,
}
impl AppState {
	pub async fn new(config: atlas_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(AtlasService::new(config, db)))
	}

	pub fn from_service(service: AtlasService) -> Self {
		Self { service: Arc::new(service) }
	}
}
