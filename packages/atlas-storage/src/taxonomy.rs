use sqlx::PgExecutor;

use atlas_domain::taxonomy::DimensionKind;

use crate::{Error, Result, models::Dimension};

fn select_columns(kind: DimensionKind) -> String {
	let parent = kind.parent_column().unwrap_or("NULL::bigint");

	format!("id, name, description, {parent} AS parent_id")
}

pub async fn list_dimensions<'e, E>(executor: E, kind: DimensionKind) -> Result<Vec<Dimension>>
where
	E: PgExecutor<'e>,
{
	let sql = format!("SELECT {} FROM {} ORDER BY name", select_columns(kind), kind.table());
	let rows = sqlx::query_as::<_, Dimension>(&sql).fetch_all(executor).await?;

	Ok(rows)
}

/// Resolves the dimension rows named by the given patterns' labels. Labels without a row are
/// simply absent from the result.
pub async fn find_dimensions_for_patterns<'e, E>(
	executor: E,
	kind: DimensionKind,
	pattern_ids: &[i64],
) -> Result<Vec<Dimension>>
where
	E: PgExecutor<'e>,
{
	if pattern_ids.is_empty() {
		return Ok(Vec::new());
	}

	let sql = format!(
		"SELECT {columns} FROM {table} WHERE name IN (SELECT {label} FROM patterns WHERE id = ANY($1))",
		columns = select_columns(kind),
		table = kind.table(),
		label = kind.as_str(),
	);
	let rows = sqlx::query_as::<_, Dimension>(&sql).bind(pattern_ids).fetch_all(executor).await?;

	Ok(rows)
}

pub async fn upsert_dimension<'e, E>(
	executor: E,
	kind: DimensionKind,
	name: &str,
	description: Option<&str>,
	parent_id: Option<i64>,
) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let name = name.trim();

	if name.is_empty() {
		return Err(Error::InvalidArgument(format!("{kind} name must be non-empty.")));
	}

	let sql = match kind.parent_column() {
		Some(parent) => format!(
			"\
INSERT INTO {table} (name, description, {parent})
VALUES ($1, $2, $3)
ON CONFLICT (name) DO UPDATE
SET description = EXCLUDED.description, {parent} = EXCLUDED.{parent}
RETURNING id",
			table = kind.table(),
		),
		None => {
			if parent_id.is_some() {
				return Err(Error::InvalidArgument(format!("{kind} does not nest.")));
			}

			format!(
				"\
INSERT INTO {table} (name, description)
VALUES ($1, $2)
ON CONFLICT (name) DO UPDATE
SET description = EXCLUDED.description
RETURNING id",
				table = kind.table(),
			)
		},
	};
	let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(name).bind(description);

	if kind.parent_column().is_some() {
		query = query.bind(parent_id);
	}

	let id = query.fetch_one(executor).await?;

	Ok(id)
}
