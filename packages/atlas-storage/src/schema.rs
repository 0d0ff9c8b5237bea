pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_company_types.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_company_types.sql")),
				"tables/002_departments.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_departments.sql")),
				"tables/003_business_functions.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_business_functions.sql")),
				"tables/004_ai_categories.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_ai_categories.sql")),
				"tables/005_patterns.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_patterns.sql")),
				"tables/006_tags.sql" => out.push_str(include_str!("../../../sql/tables/006_tags.sql")),
				"tables/007_pattern_tags.sql" =>
					out.push_str(include_str!("../../../sql/tables/007_pattern_tags.sql")),
				"tables/008_pattern_similarities.sql" =>
					out.push_str(include_str!("../../../sql/tables/008_pattern_similarities.sql")),
				"tables/009_raw_items.sql" =>
					out.push_str(include_str!("../../../sql/tables/009_raw_items.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
