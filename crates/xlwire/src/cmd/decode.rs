use tracing::{info, warn};
use xlwire::frame::{BatchReader, DecodeConfig, UnknownVariantPolicy};

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_records, DecodedRecord, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = std::fs::read(&args.file)
        .map_err(|err| io_error(&format!("read {}", args.file.display()), err))?;
    let buf = bytes.get(args.offset..).ok_or_else(|| {
        CliError::new(
            USAGE,
            format!(
                "offset {} is past the end of {} ({} bytes)",
                args.offset,
                args.file.display(),
                bytes.len()
            ),
        )
    })?;

    let config = DecodeConfig {
        unknown_variants: if args.abort_on_unknown {
            UnknownVariantPolicy::Abort
        } else {
            UnknownVariantPolicy::Yield
        },
        max_event_size: args.max_event_size,
    };
    let mut reader = BatchReader::with_config(args.family, buf, args.count, config)
        .map_err(|err| frame_error("decoder", err))?;

    let mut records = Vec::new();
    let mut failure = None;
    let mut index = 0;
    loop {
        let offset = args.offset + reader.consumed();
        let Some(item) = reader.next() else {
            break;
        };
        match item {
            Ok(event) => records.push(DecodedRecord::Event {
                index,
                offset,
                event,
            }),
            Err(error) => {
                if !error.is_recoverable() || args.abort_on_unknown {
                    let context = format!("record {index} at offset {offset}");
                    failure = Some(frame_error(&context, error.clone()));
                }
                records.push(DecodedRecord::Error {
                    index,
                    offset,
                    error,
                });
            }
        }
        index += 1;
    }

    print_records(&records, format);

    let trailing = buf.len() - reader.consumed();
    if trailing > 0 && failure.is_none() {
        warn!(bytes = trailing, "trailing bytes after the last record");
    }
    info!(
        family = %args.family,
        records = records.len(),
        consumed = reader.consumed(),
        "decoded buffer"
    );

    match failure {
        Some(err) => Err(err),
        None => Ok(SUCCESS),
    }
}
