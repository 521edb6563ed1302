pub mod cli;
pub mod config;
pub mod error;
pub mod frame;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod source;
pub mod transform;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use error::EtlError;
pub use ui::{LogUi, Phase, SilentUi, Ui, UiApp};
