use serde::Serialize;

use crate::cmd::VersionArgs;
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct VersionOutput {
    name: &'static str,
    version: &'static str,
    target: String,
    rustc: &'static str,
    variants: usize,
    features: Vec<&'static str>,
}

pub fn run(args: VersionArgs, format: OutputFormat) -> CliResult<i32> {
    if !args.extended {
        println!("xlwire {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    let registry =
        xlwire::schema::TagRegistry::global().map_err(|err| frame_error("registry", err.into()))?;
    let out = VersionOutput {
        name: "xlwire",
        version: env!("CARGO_PKG_VERSION"),
        target: target_triple(),
        rustc: option_env!("RUSTC_VERSION").unwrap_or("unknown"),
        variants: registry.len(),
        features: vec!["cli"],
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("name: {}", out.name);
            println!("version: {}", out.version);
            println!("target: {}", out.target);
            println!("rustc: {}", out.rustc);
            println!("variants: {}", out.variants);
            println!("features: {}", out.features.join(", "));
        }
    }
    Ok(SUCCESS)
}

fn target_triple() -> String {
    if let Some(target) = option_env!("XLWIRE_BUILD_TARGET") {
        return target.to_string();
    }
    format!("{}-unknown-{}", std::env::consts::ARCH, std::env::consts::OS)
}
