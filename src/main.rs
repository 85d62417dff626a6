// lifeframe: cached Game of Life editor for the terminal

use std::fs::File;
use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Builder, Env, Target};
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};

use lifeframe::config::Settings;
use lifeframe::patterns;
use lifeframe::renders::controller::RenderController;
use lifeframe::renders::store::{load_chains, save_chains};
use lifeframe::ui::App;

fn init_logging(settings: &Settings) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(path) = &settings.log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("lifeframe");

    let settings = match Settings::from_args(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", Settings::usage(program_name));
            std::process::exit(1);
        }
    };

    if settings.show_help {
        println!("{}", Settings::usage(program_name));
        return Ok(());
    }

    init_logging(&settings)?;

    let Some(pattern) = patterns::find(&settings.pattern) else {
        eprintln!("Error: unknown pattern '{}'", settings.pattern);
        eprintln!("Patterns: {}", patterns::names().join(", "));
        std::process::exit(1);
    };

    let mut controller = RenderController::new(settings.rule);

    if let Some(path) = settings.chains.as_ref().filter(|p| p.exists()) {
        match load_chains(path).and_then(|file| {
            controller.import_chain_file(&file)?;
            Ok(file.chains.len())
        }) {
            Ok(count) => {
                info!(
                    "loaded {} chains ({} transitions) from {}",
                    count,
                    controller.graph().len(),
                    path.display()
                );
            }
            Err(e) => {
                eprintln!("Error: could not load chains from {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    let mut app = App::new(pattern.live_set(), controller, &settings)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    if let Some(path) = &settings.chains {
        let file = app.controller.export_chain_file();
        if let Err(e) = save_chains(path, &file) {
            warn!("could not save chains: {}", e);
            eprintln!("Error: could not save chains to {}: {}", path.display(), e);
        } else {
            info!("saved {} chains to {}", file.chains.len(), path.display());
        }
    }

    Ok(())
}
