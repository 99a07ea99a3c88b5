//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod caching_folder_resolver;
mod console_grant_executor;
mod csv_input_reader;
mod csv_report_writer;
mod static_folder_resolver;

pub use caching_folder_resolver::CachingWellKnownFolderResolver;
pub use console_grant_executor::ConsoleGrantExecutor;
pub use csv_input_reader::CsvInputReader;
pub use csv_report_writer::CsvReportWriter;
pub use static_folder_resolver::StaticWellKnownFolderResolver;
