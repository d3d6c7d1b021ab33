use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, sync::atomic::Ordering, sync::Arc};
use tokio::sync::mpsc;

mod app;
mod handlers;
mod ui;

use filepick::config::Config;
use filepick::logic::mount::{StatVfsProbe, StorageRoots};
use filepick::model::{Model, NavTarget, PickerOutcome, PickerSession, SelectMode};
use filepick::services::{CommandPicker, ListingResponse, ListingWorker};
use filepick::settings::{SettingsDb, SettingsStore};
use filepick::storage::{DirectorySource, StdStorage};
use filepick::{log_debug, DEBUG_MODE};
use ui::icons::{IconMode, IconRenderer, IconTheme};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Open,
    Save,
    Folder,
}

impl From<ModeArg> for SelectMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Open => SelectMode::OpenFile,
            ModeArg::Save => SelectMode::SaveFile,
            ModeArg::Folder => SelectMode::ChooseFolder,
        }
    }
}

/// Terminal file and folder picker. Prints the chosen location on stdout.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to the temp dir (filepick-debug.log)
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl, ^D/U, gg/G)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// What to pick
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Allowed file name suffix (repeatable), e.g. --filter .csv
    #[arg(short, long = "filter")]
    filters: Vec<String>,

    /// Suggested file name for save mode
    #[arg(short, long)]
    name: Option<String>,

    /// Directory to start in (overrides the stored base folder)
    #[arg(long)]
    start_dir: Option<PathBuf>,

    /// Show size and modification date
    #[arg(long)]
    metadata: bool,

    /// Do not descend into sub-directories
    #[arg(long)]
    no_explore: bool,

    /// Refuse folders that are not writable
    #[arg(long)]
    require_writable: bool,

    /// Skip the built-in browser and open the system picker directly
    #[arg(long)]
    native: bool,

    /// Print file:// URIs instead of plain paths
    #[arg(long)]
    uri: bool,
}

pub struct App {
    pub model: Model,
    pub config: Config,

    pub session: PickerSession,
    pub worker: ListingWorker,
    listing_rx: mpsc::UnboundedReceiver<ListingResponse>,

    pub settings: Box<dyn SettingsStore>,
    pub picker: CommandPicker,
    pub icon_renderer: IconRenderer,

    /// Row to highlight once the pending listing arrives
    pub focus_after_listing: Option<String>,
}

impl App {
    fn new(config: Config, args: &Args) -> Result<Self> {
        let source: Arc<dyn DirectorySource> = Arc::new(StdStorage);

        let roots = StorageRoots::discover(&config.mounts, &StatVfsProbe);
        log_debug(&format!("App::new: {} storage roots", roots.roots().len()));

        let settings = open_settings(&config)?;
        let session = PickerSession::new(
            config.session_options(args.name.clone()),
            Arc::clone(&source),
            roots,
        );
        let (worker, listing_rx) = ListingWorker::new(source);

        let mut model = Model::new(config.vim_mode);
        model.ui.sort_mode = config.sort_mode;
        model.ui.sort_reverse = config.sort_reverse;

        let icon_renderer = IconRenderer::new(IconMode::from_config(&config.icon_mode), IconTheme::default());
        let picker = CommandPicker::new(config.picker_command.clone());

        let mut app = App {
            model,
            config,
            session,
            worker,
            listing_rx,
            settings,
            picker,
            icon_renderer,
            focus_after_listing: None,
        };
        app.open_initial_location(args.start_dir.clone());
        Ok(app)
    }

    /// Start directory: CLI flag, then the stored trail or base folder,
    /// else the storage roots
    fn open_initial_location(&mut self, start_dir: Option<PathBuf>) {
        if let Some(dir) = start_dir {
            if let Err(e) = self.session.navigate_to(NavTarget::Dir(dir)) {
                self.show_error(e.into());
            }
            self.model.navigation.reset_for_listing(self.session.entries().len());
            return;
        }

        let source = self.session.source();
        let base = match self.settings.restore_base_dir(source.as_ref()) {
            Ok(base) => base,
            Err(e) => {
                self.show_error(e);
                None
            }
        };

        if let Some(base) = base {
            let restored = match self.settings.breadcrumb_state() {
                Ok(Some(json)) => self.session.restore_trail(&json).is_ok() && !self.session.is_at_root(),
                _ => false,
            };
            if !restored {
                if let Err(e) = self.session.navigate_to(NavTarget::Dir(base)) {
                    self.show_error(e.into());
                }
            }
        }
        self.model.navigation.reset_for_listing(self.session.entries().len());
    }

    /// Show an error as a toast
    pub fn show_error(&mut self, error: anyhow::Error) {
        let message = filepick::logic::errors::format_error_message(&error);
        log_debug(&format!("error: {:#}", error));
        self.model
            .show_toast(format!("{}{}", ui::toast::ERROR_PREFIX, message));
    }

    fn drain_listing_responses(&mut self) {
        // Checked first: a finished task has already sent its response
        let idle = !self.worker.is_busy();
        while let Ok(response) = self.listing_rx.try_recv() {
            self.handle_listing_response(response);
        }
        if idle && self.model.ui.loading {
            // The request ended without a current response (aborted)
            self.model.ui.loading = false;
        }
    }
}

fn open_settings(config: &Config) -> Result<Box<dyn SettingsStore>> {
    let db = match &config.settings_db {
        Some(path) => SettingsDb::open(path),
        None => SettingsDb::new(),
    };
    match db {
        Ok(db) => Ok(Box::new(db)),
        Err(e) => {
            // Settings are a convenience; run without persistence
            log_debug(&format!("open_settings: {:#}, using in-memory store", e));
            Ok(Box::new(SettingsDb::new_in_memory()?))
        }
    }
}

fn apply_args(config: &mut Config, args: &Args) {
    if args.vim {
        config.vim_mode = true;
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if !args.filters.is_empty() {
        config.extension_filter = args.filters.clone();
    }
    if args.metadata {
        config.show_metadata = true;
    }
    if args.no_explore {
        config.explore = false;
    }
    if args.require_writable {
        config.require_writable = true;
    }
}

/// Print the outcome and return the process exit code
fn report(outcome: &PickerOutcome, as_uri: bool) -> i32 {
    let render = |locator: &filepick::storage::Locator| {
        if as_uri {
            locator.to_uri()
        } else {
            locator.to_string()
        }
    };

    match outcome {
        PickerOutcome::Picked(locator) | PickerOutcome::PickedWithName(locator, _) => {
            println!("{}", render(locator));
            0
        }
        PickerOutcome::Cancelled => 1,
        PickerOutcome::Failed(message) => {
            eprintln!("filepick: {}", message);
            2
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    DEBUG_MODE.store(args.debug, Ordering::Relaxed);
    if args.debug {
        log_debug("Debug mode enabled");
    }

    let (mut config, config_path) = Config::load(args.config.as_deref())?;
    if let Some(path) = &config_path {
        log_debug(&format!("Loaded config from: {:?}", path));
    }
    apply_args(&mut config, &args);

    let mut app = App::new(config, &args).context("Failed to start picker")?;

    if args.native {
        let outcome = app.pick_with_system_picker().await;
        app.persist_state(&outcome);
        std::process::exit(report(&outcome, args.uri));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    let outcome = app.model.ui.outcome.take().unwrap_or(PickerOutcome::Cancelled);
    app.persist_state(&outcome);
    std::process::exit(report(&outcome, args.uri));
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit() {
            break;
        }

        app.drain_listing_responses();

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handlers::keyboard::handle_key(app, key).await?;
            }
        }
    }

    Ok(())
}
