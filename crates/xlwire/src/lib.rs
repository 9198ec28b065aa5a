//! Byte-exact codec for the event records of the XL automotive bus driver.
//!
//! The work is split across three crates, re-exported here:
//! - [`schema`]: wire layouts, the variant catalog and the tag registry
//! - [`frame`]: event decoding, batch framing and transmit encoding
//! - [`driver`]: status codes, access masks and the driver-facing traits
//!
//! [`receive_events`] ties them together for one receive call.
//!
//! ```no_run
//! use xlwire::driver::{AccessMask, EventSource, StatusCatalog};
//! use xlwire::schema::Family;
//!
//! fn drain(source: &mut dyn EventSource) -> Result<(), Box<dyn std::error::Error>> {
//!     let batch = xlwire::receive_events(source, Family::Classic, AccessMask(0b11), &StatusCatalog)?;
//!     for event in batch.reader()? {
//!         match event {
//!             Ok(event) => println!("{} on channel {}", event.name(), event.channel()),
//!             Err(err) => eprintln!("{err}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod receive;

pub use receive::{receive_events, receive_operation, ReceivedBatch};

pub use xlwire_driver as driver;
pub use xlwire_frame as frame;
pub use xlwire_schema as schema;
