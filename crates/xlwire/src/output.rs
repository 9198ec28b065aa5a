use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use xlwire::frame::{ErrorKind, Event, FrameError};
use xlwire::schema::{Family, Field, FieldValue};

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON document per line.
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// One line of `decode` output: a record or the error in its place.
pub enum DecodedRecord {
    Event {
        index: usize,
        offset: usize,
        event: Event,
    },
    Error {
        index: usize,
        offset: usize,
        error: FrameError,
    },
}

#[derive(Serialize)]
struct EventOutput {
    index: usize,
    offset: usize,
    family: Family,
    tag: u16,
    name: &'static str,
    channel: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_stamp: Option<u64>,
    size: usize,
    header: Vec<Field>,
    fields: Vec<Field>,
}

#[derive(Serialize)]
struct ErrorOutput {
    index: usize,
    offset: usize,
    kind: &'static str,
    error: String,
}

fn kind_name(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Framing => "framing",
        ErrorKind::UnknownVariant => "unknown-variant",
        ErrorKind::Constraint => "constraint",
    }
}

fn summary(event: &Event) -> String {
    FieldValue::Record(event.payload.fields()).to_string()
}

pub fn print_records(records: &[DecodedRecord], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for record in records {
                match record {
                    DecodedRecord::Event {
                        index,
                        offset,
                        event,
                    } => print_json(&EventOutput {
                        index: *index,
                        offset: *offset,
                        family: event.family(),
                        tag: event.tag(),
                        name: event.name(),
                        channel: event.channel(),
                        time_stamp: event.time_stamp(),
                        size: event.wire_size(),
                        header: event.envelope.fields(),
                        fields: event.payload.fields(),
                    }),
                    DecodedRecord::Error {
                        index,
                        offset,
                        error,
                    } => print_json(&ErrorOutput {
                        index: *index,
                        offset: *offset,
                        kind: kind_name(error.kind()),
                        error: error.to_string(),
                    }),
                }
            }
        }
        OutputFormat::Table => {
            let mut table = new_table(vec!["#", "OFFSET", "CHANNEL", "TAG", "VARIANT", "FIELDS"]);
            for record in records {
                match record {
                    DecodedRecord::Event {
                        index,
                        offset,
                        event,
                    } => table.add_row(vec![
                        index.to_string(),
                        offset.to_string(),
                        event.channel().to_string(),
                        format!("{:#06x}", event.tag()),
                        event.name().to_string(),
                        summary(event),
                    ]),
                    DecodedRecord::Error {
                        index,
                        offset,
                        error,
                    } => table.add_row(vec![
                        index.to_string(),
                        offset.to_string(),
                        String::new(),
                        String::new(),
                        format!("<{}>", kind_name(error.kind())),
                        error.to_string(),
                    ]),
                };
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for record in records {
                match record {
                    DecodedRecord::Event {
                        index,
                        offset,
                        event,
                    } => println!(
                        "#{index} @{offset} ch={} {} {}",
                        event.channel(),
                        event.name(),
                        summary(event)
                    ),
                    DecodedRecord::Error {
                        index,
                        offset,
                        error,
                    } => println!("#{index} @{offset} {}: {error}", kind_name(error.kind())),
                }
            }
        }
    }
}
