pub mod actions;
pub mod collision;
pub mod config;
pub mod error;
pub mod ffprobe;
pub mod inspect;
pub mod naming;
pub mod pipeline;
pub mod playability;
pub mod report;
pub mod scan;
pub mod tags;

pub use config::RunOptions;
pub use error::TidyError;
pub use ffprobe::ExternalDecoder;
pub use inspect::FileRecord;
pub use report::Summary;
