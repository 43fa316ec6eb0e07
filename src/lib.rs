pub mod error;
pub mod record;
pub mod sink;
pub mod endpoint;
pub mod elastic;

pub mod env;
pub mod init;
pub mod noop_sink;
pub mod stage;

pub use elastic::EsWriter;
pub use error::SinkError;
pub use record::Item;
pub use sink::{ItemSink, Outcome};
