//! Binary entry point: resolve paths, start logging, make sure the catalog
//! table exists, and drive the Ratatui event loop until the user exits.
use personal_library::{logging, run_app, App, Config, Library};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    logging::init(&config.log_path)?;

    let library = Library::open(&config.db_path)?;
    info!(path = %library.path().display(), "starting personal library");

    let mut app = App::new(library);
    let result = run_app(&mut app);
    if let Err(err) = &result {
        error!("shell terminated: {err:#}");
    }
    result
}
