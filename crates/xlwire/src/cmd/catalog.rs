use serde::Serialize;
use xlwire::schema::{Direction, Family, TagRegistry, VariantSpec};

use crate::cmd::CatalogArgs;
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{new_table, print_json, OutputFormat};

#[derive(Serialize)]
struct VariantOutput {
    family: Family,
    tag: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    secondary: Option<u32>,
    name: &'static str,
    layout: &'static str,
    size: usize,
    direction: Direction,
}

impl From<&VariantSpec> for VariantOutput {
    fn from(spec: &VariantSpec) -> Self {
        Self {
            family: spec.key.family,
            tag: spec.key.tag,
            secondary: spec.key.secondary,
            name: spec.name,
            layout: spec.layout.name,
            size: spec.layout.size,
            direction: spec.direction,
        }
    }
}

pub fn run(args: CatalogArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = TagRegistry::global().map_err(|err| frame_error("registry", err.into()))?;
    let rows: Vec<VariantOutput> = registry
        .variants()
        .filter(|spec| args.family.is_none_or(|family| spec.key.family == family))
        .map(VariantOutput::from)
        .collect();

    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FAMILY", "TAG", "SECONDARY", "VARIANT", "LAYOUT", "SIZE", "DIR"]);
            for row in &rows {
                table.add_row(vec![
                    row.family.to_string(),
                    format!("{:#06x}", row.tag),
                    row.secondary.map(|s| s.to_string()).unwrap_or_default(),
                    row.name.to_string(),
                    row.layout.to_string(),
                    row.size.to_string(),
                    direction_name(row.direction).to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in &rows {
                let secondary = row
                    .secondary
                    .map(|s| format!("/{s}"))
                    .unwrap_or_default();
                println!(
                    "{}:{:#06x}{secondary} {} ({}, {} bytes, {})",
                    row.family,
                    row.tag,
                    row.name,
                    row.layout,
                    row.size,
                    direction_name(row.direction)
                );
            }
        }
    }
    Ok(SUCCESS)
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Receive => "rx",
        Direction::Transmit => "tx",
    }
}
