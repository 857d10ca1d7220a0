use std::process::ExitCode;

use clap::Parser;

use mapview::app::App;
use mapview::args::Args;
use mapview::lifecycle::Lifecycle;
use mapview::map::MapImage;
use mapview::view::PlayerView;
use mapview::{EXIT_GL_FAILED, EXIT_OK, NO_MAP_MESSAGE};

fn main() -> ExitCode {
    env_logger::init();

    let args = <Args as Parser>::parse();

    let mut lifecycle = Lifecycle::default();

    let map = match MapImage::load(&args.map) {
        Ok(map) => {
            lifecycle.map_loaded();
            map
        }
        Err(e) => {
            lifecycle.map_failed();
            log::error!("{e}");
            println!("{NO_MAP_MESSAGE}");
            return exit_code(&lifecycle);
        }
    };

    let app = match App::new(&map, PlayerView::default()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Could not initialize graphics: {e}");
            return ExitCode::from(EXIT_GL_FAILED);
        }
    };

    app.run(&mut lifecycle);

    exit_code(&lifecycle)
}

fn exit_code(lifecycle: &Lifecycle) -> ExitCode {
    ExitCode::from(lifecycle.exit_code().unwrap_or(EXIT_OK))
}
