use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub ranking: Ranking,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	#[serde(default = "default_max_limit")]
	pub max_limit: u32,
	/// Compare categorical filters with `lower(column) = lower(value)` instead of exact equality.
	#[serde(default)]
	pub case_insensitive_filters: bool,
	/// Upper bound for the whole store interaction of one call.
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default = "default_max_query_terms")]
	pub max_query_terms: u32,
	#[serde(default)]
	pub related: SearchRelated,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			default_limit: default_limit(),
			max_limit: default_max_limit(),
			case_insensitive_filters: false,
			timeout_ms: default_timeout_ms(),
			max_query_terms: default_max_query_terms(),
			related: SearchRelated::default(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRelated {
	#[serde(default = "default_true")]
	pub enabled: bool,
	#[serde(default = "default_related_top_n")]
	pub top_n: u32,
}
impl Default for SearchRelated {
	fn default() -> Self {
		Self { enabled: true, top_n: default_related_top_n() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ranking {
	#[serde(default = "default_title_weight")]
	pub title_weight: f32,
	#[serde(default = "default_description_weight")]
	pub description_weight: f32,
}
impl Default for Ranking {
	fn default() -> Self {
		Self { title_weight: default_title_weight(), description_weight: default_description_weight() }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_limit() -> u32 {
	20
}

fn default_max_limit() -> u32 {
	100
}

fn default_timeout_ms() -> u64 {
	5_000
}

fn default_max_query_terms() -> u32 {
	16
}

fn default_true() -> bool {
	true
}

fn default_related_top_n() -> u32 {
	5
}

fn default_title_weight() -> f32 {
	2.0
}

fn default_description_weight() -> f32 {
	1.0
}
