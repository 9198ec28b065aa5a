use serde::Serialize;
use xlwire::driver::{DescribeStatus, Status, StatusCatalog, StatusClass};

use crate::cmd::StatusArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{new_table, print_json, OutputFormat};

#[derive(Serialize)]
struct StatusOutput {
    code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'static str>,
    class: StatusClass,
    description: String,
}

pub fn run(args: StatusArgs, format: OutputFormat) -> CliResult<i32> {
    let status = Status(args.code);
    let out = StatusOutput {
        code: status.code(),
        name: status.name(),
        class: status.class(),
        description: StatusCatalog.describe(status),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["CODE", "NAME", "CLASS", "DESCRIPTION"]);
            table.add_row(vec![
                out.code.to_string(),
                out.name.unwrap_or("-").to_string(),
                class_name(out.class).to_string(),
                out.description.clone(),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{status} [{}]: {}", class_name(out.class), out.description);
        }
    }
    Ok(SUCCESS)
}

fn class_name(class: StatusClass) -> &'static str {
    match class {
        StatusClass::Success => "success",
        StatusClass::Pending => "pending",
        StatusClass::Error => "error",
    }
}
