//! voxshift - terminal voice changer
//!
//! Run with: cargo run --release
//!
//! Set `RUST_LOG=voxshift=debug` to get engine logs on stderr (redirect it,
//! e.g. `2>voxshift.log`, or the TUI gets drawn over).

mod app;
mod ui;

use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use app::App;
use voxshift::EngineConfig;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut app = App::new(EngineConfig::default()).wrap_err("failed to set up audio engine")?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
