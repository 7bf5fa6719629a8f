// regvm: register machine interpreter with a step debugger

use std::error::Error;
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use clap::Parser;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{prelude::*, EnvFilter};

use regvm::config::{Settings, MEMORY_FILE, SETTINGS_FILE};
use regvm::debugger::NoDebugger;
use regvm::interpreter::engine::Halt;
use regvm::memory::MachineState;
use regvm::parser::ast::Program;
use regvm::persist::MemoryStore;
use regvm::repl::run_set_mode;
use regvm::runner::{report, run_program};
use regvm::ui::{plain_debugger, terminal_debugger, Menu, MenuChoice, TerminalGuard};

const MISSING_FILE: &str = "Assembly file missing or invalid.";
const ABORTED: &str = "Exited from debug overview.";

/// Register machine interpreter with a step debugger
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Program to run; without it the main menu opens
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Stop before every line in the debugger
    #[arg(short, long)]
    debug: bool,

    /// Assign registers and memory interactively, then save memory
    #[arg(short, long)]
    set: bool,

    /// Path of the persisted memory store
    #[arg(long, default_value = MEMORY_FILE)]
    memory: PathBuf,

    /// Halt after this many lines (bounds programs that loop forever)
    #[arg(long)]
    max_steps: Option<u64>,

    /// Render the debugger as plain text instead of a full-screen view
    #[arg(long)]
    plain: bool,

    /// Raise log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy)]
struct RunOptions {
    debug: bool,
    plain: bool,
    max_steps: Option<u64>,
}

/// How a program run ended, from the binary's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunExit {
    Finished,
    Aborted,
    MissingFile,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let store = MemoryStore::new(&args.memory);

    if args.set {
        return set_mode(&store);
    }

    let settings = Settings::load(Path::new(SETTINGS_FILE)).unwrap_or_else(|err| {
        tracing::warn!("{}; using default settings", err);
        Settings::default()
    });

    if let Some(file) = &args.file {
        let options = RunOptions {
            debug: args.debug,
            plain: args.plain,
            max_steps: args.max_steps,
        };
        match run_file(file, options, &store)? {
            RunExit::Finished => return Ok(()),
            RunExit::Aborted => println!("{}", ABORTED),
            RunExit::MissingFile => eprintln!("{}", MISSING_FILE),
        }
        std::process::exit(1);
    }

    main_menu(settings, &args, &store)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let stderr_format = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_format)
        .init();
}

fn set_mode(store: &MemoryStore) -> Result<(), Box<dyn Error>> {
    let mut state = MachineState::with_memory(store.load()?);
    run_set_mode(&mut state, io::stdin().lock(), io::stdout())?;
    store.save(&state.memory)?;
    println!("Memory saved to {}.", store.path().display());
    Ok(())
}

/// Load, execute and report one program
fn run_file(path: &Path, options: RunOptions, store: &MemoryStore) -> Result<RunExit, Box<dyn Error>> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            tracing::warn!(path = %path.display(), "cannot read program: {}", err);
            return Ok(RunExit::MissingFile);
        }
    };

    let program = Program::parse(&source);
    tracing::info!(path = %path.display(), lines = program.len(), "loaded program");

    let outcome = if !options.debug {
        run_program(&program, store, &mut NoDebugger, options.max_steps)?
    } else if options.plain {
        let _guard = TerminalGuard::raw()?;
        run_program(&program, store, &mut plain_debugger(), options.max_steps)?
    } else {
        let _guard = TerminalGuard::enter()?;
        run_program(&program, store, &mut terminal_debugger()?, options.max_steps)?
    };

    if outcome.halt == Halt::Aborted {
        return Ok(RunExit::Aborted);
    }

    println!();
    for line in report(&outcome) {
        println!("{}", line);
    }

    Ok(RunExit::Finished)
}

fn main_menu(settings: Settings, args: &Args, store: &MemoryStore) -> Result<(), Box<dyn Error>> {
    let mut menu = Menu::new(settings, ".");

    loop {
        let choice = {
            let _guard = TerminalGuard::enter()?;
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            menu.run(&mut terminal)?
        };

        match choice {
            MenuChoice::Exit => break,
            MenuChoice::Run => {
                let Some(file) = menu.settings().file.clone() else {
                    continue;
                };
                let options = RunOptions {
                    debug: menu.settings().debug,
                    plain: args.plain,
                    max_steps: args.max_steps,
                };
                match run_file(&file, options, store)? {
                    RunExit::Finished => {}
                    RunExit::Aborted => println!("{}", ABORTED),
                    RunExit::MissingFile => {
                        println!("{}", MISSING_FILE);
                        menu.set_notice(MISSING_FILE);
                    }
                }
                wait_for_enter()?;
            }
        }
    }

    if menu.settings().save {
        menu.settings().save(Path::new(SETTINGS_FILE))?;
        tracing::info!("saved settings to {}", SETTINGS_FILE);
    }
    Ok(())
}

fn wait_for_enter() -> io::Result<()> {
    println!();
    println!("Press Enter to return to the menu...");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
