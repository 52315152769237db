mod ui;

use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use cardsharp::build_info;
use cardsharp::catalog::{load_catalog, CatalogHandle};
use cardsharp::core::logging::{init_file_logging, init_stderr_logging, parse_level};
use cardsharp::core::{EconomyConfig, EconomyError};
use cardsharp::economy::{Economy, OpenOutcome};
use cardsharp::leaderboard::RankedPlayer;
use cardsharp::player::PlayerRecord;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::ThreadRng;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::{info, warn};
use ui::common::Status;
use ui::describe_error;
use ui::lootbox_menu::LootboxMenuScreen;
use ui::main_menu::{MainMenuScreen, MenuChoice};
use ui::open_result::OpenResultScreen;
use ui::player_create::PlayerCreateScreen;
use ui::player_select::PlayerSelectScreen;
use ui::profile::ProfileScreen;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Interactive,
    Boxes,
    Players,
    Create(String),
    Show(String),
    Open { player: String, lootbox: String },
    Version,
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Cli {
    config_path: Option<PathBuf>,
    command: Command,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_cli(&args) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Run 'cardsharp --help' for usage.");
            process::exit(2);
        }
    };

    match cli.command {
        Command::Version => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Command::Help => {
            print_help();
            return Ok(());
        }
        _ => {}
    }

    let config = match EconomyConfig::load(cli.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let level = parse_level(&config.log_level);

    if cli.command == Command::Interactive {
        if let Some(path) = config.log_path() {
            if let Err(e) = init_file_logging(&path, level) {
                eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
            }
        }
        return run_interactive(&config);
    }

    init_stderr_logging(level);
    let economy = Economy::from_config(&config)?;
    if let Err(e) = run_command(cli.command, &economy, &config) {
        eprintln!("Error: {}", describe_error(&e));
        process::exit(1);
    }
    Ok(())
}

fn parse_cli(args: &[String]) -> Result<Cli, String> {
    let mut config_path = None;
    let mut rest = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let Some(path) = args.get(i + 1) else {
                    return Err("--config needs a file path".to_string());
                };
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--version" | "-V" => rest.insert(0, "--version"),
            "--help" | "-h" => rest.insert(0, "--help"),
            other => rest.push(other),
        }
        i += 1;
    }

    let command = match rest.as_slice() {
        [] => Command::Interactive,
        ["--help", ..] => Command::Help,
        ["--version", ..] => Command::Version,
        ["boxes"] => Command::Boxes,
        ["players"] => Command::Players,
        ["create", name] => Command::Create(name.to_string()),
        ["show", name] => Command::Show(name.to_string()),
        ["open", player, lootbox] => Command::Open {
            player: player.to_string(),
            lootbox: lootbox.to_string(),
        },
        [cmd @ ("create" | "show" | "open" | "boxes" | "players"), ..] => {
            return Err(format!("Wrong number of arguments for '{}'", cmd));
        }
        [other, ..] => return Err(format!("Unknown command: {}", other)),
    };

    Ok(Cli {
        config_path,
        command,
    })
}

fn print_help() {
    println!("CardSharp - Terminal Lootbox Shop\n");
    println!("Usage: cardsharp [--config <file>] [command]\n");
    println!("Without a command, starts the interactive shop.\n");
    println!("Commands:");
    println!("  boxes                   List lootboxes and their contents");
    println!("  players                 Show the spend leaderboard");
    println!("  create <name>           Create a player");
    println!("  show <name>             Print a player's record");
    println!("  open <player> <box>     Buy and open a lootbox");
    println!("  --version               Show version information");
    println!("  --help                  Show this help message");
}

fn run_command(
    command: Command,
    economy: &Economy,
    config: &EconomyConfig,
) -> Result<(), EconomyError> {
    match command {
        Command::Boxes => {
            let catalog = load_catalog(&config.data_dir);
            if catalog.is_empty() {
                println!("No lootboxes found in {}", config.data_dir.display());
            }
            for def in catalog.values() {
                println!("{} - Cost: {}", def.name, def.cost);
                for entry in &def.items {
                    println!(
                        "    {:<24} {:>6.2}%",
                        entry.item.as_deref().unwrap_or("(nothing)"),
                        entry.chance * 100.0
                    );
                }
            }
        }
        Command::Players => {
            let lines = economy.leaderboard()?;
            if lines.is_empty() {
                println!("No players found.");
            }
            for line in lines {
                println!("{}", line);
            }
        }
        Command::Create(name) => {
            economy.create_player(&name)?;
            println!(
                "Created player '{}' with {} coins.",
                name,
                economy.starting_balance()
            );
        }
        Command::Show(name) => {
            let record = economy.require_player(&name)?;
            match serde_json::to_string_pretty(&record) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error: cannot render record: {}", e),
            }
        }
        Command::Open { player, lootbox } => {
            let catalog = load_catalog(&config.data_dir);
            let mut rng = rand::thread_rng();
            let outcome = economy.open_lootbox(&catalog, &player, &lootbox, &mut rng)?;
            print_outcome(&outcome);
        }
        Command::Interactive | Command::Version | Command::Help => {}
    }
    Ok(())
}

fn print_outcome(outcome: &OpenOutcome) {
    match &outcome.prize {
        Some(item) => println!("You opened a {} lootbox and won: {}", outcome.lootbox, item),
        None => println!("You opened a {} lootbox. It was empty.", outcome.lootbox),
    }
    println!("Remaining balance: {} coins", outcome.new_balance);
}

enum Screen {
    MainMenu,
    Players,
    CreatePlayer,
    Profile,
    Lootboxes,
    OpenResult,
}

/// Interactive session state. Records are re-read after every action, never
/// edited in place.
struct App {
    economy: Economy,
    catalog: CatalogHandle,
    rng: ThreadRng,
    screen: Screen,
    current_player: Option<String>,
    session: Option<PlayerRecord>,
    standings: Vec<RankedPlayer>,
    inspected: Option<PlayerRecord>,
    last_outcome: Option<OpenOutcome>,
    status: Option<Status>,
    menu_screen: MainMenuScreen,
    select_screen: PlayerSelectScreen,
    creation_screen: PlayerCreateScreen,
    lootbox_screen: LootboxMenuScreen,
}

fn run_interactive(config: &EconomyConfig) -> io::Result<()> {
    let economy = Economy::from_config(config)?;
    let mut app = App::new(economy, CatalogHandle::new(&config.data_dir));
    info!(
        data_dir = %config.data_dir.display(),
        players_dir = %config.players_dir.display(),
        "starting interactive session"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(key_event.code) {
                    info!("session ended");
                    return Ok(());
                }
            }
        }
    }
}

impl App {
    fn new(economy: Economy, catalog: CatalogHandle) -> Self {
        let mut app = Self {
            economy,
            catalog,
            rng: rand::thread_rng(),
            screen: Screen::MainMenu,
            current_player: None,
            session: None,
            standings: Vec::new(),
            inspected: None,
            last_outcome: None,
            status: None,
            menu_screen: MainMenuScreen::new(),
            select_screen: PlayerSelectScreen::new(),
            creation_screen: PlayerCreateScreen::new(),
            lootbox_screen: LootboxMenuScreen::new(),
        };
        app.refresh_standings();
        if app.standings.is_empty() {
            app.screen = Screen::CreatePlayer;
        }
        app
    }

    fn fail(&mut self, err: &EconomyError) {
        if !err.is_rejection() {
            warn!(error = %err, "storage failure");
        }
        self.status = Some(Status::Error(describe_error(err)));
    }

    fn refresh_standings(&mut self) {
        match self.economy.standings() {
            Ok(rows) => {
                self.standings = rows;
                self.select_screen.clamp(self.standings.len());
            }
            Err(e) => self.fail(&e),
        }
    }

    fn refresh_session(&mut self) {
        let Some(name) = self.current_player.clone() else {
            self.session = None;
            return;
        };
        match self.economy.player(&name) {
            Ok(Some(record)) => self.session = Some(record),
            Ok(None) => {
                self.logout();
                self.fail(&EconomyError::UnknownPlayer(name));
            }
            Err(e) => self.fail(&e),
        }
    }

    fn login(&mut self, name: String) {
        info!(player = %name, "player selected");
        self.status = Some(Status::Info(format!("Now playing as {}.", name)));
        self.current_player = Some(name);
        self.refresh_session();
    }

    fn logout(&mut self) {
        self.current_player = None;
        self.session = None;
    }

    fn draw(&mut self, f: &mut Frame) {
        let area = f.size();
        let status = self.status.as_ref();
        match self.screen {
            Screen::MainMenu => {
                let count = self.catalog.catalog().len();
                self.menu_screen
                    .draw(f, area, self.session.as_ref(), count, status);
            }
            Screen::Players => {
                self.select_screen.draw(
                    f,
                    area,
                    &self.standings,
                    self.current_player.as_deref(),
                    status,
                );
            }
            Screen::CreatePlayer => {
                self.creation_screen
                    .draw(f, area, self.economy.starting_balance());
            }
            Screen::Profile => {
                if let Some(record) = &self.inspected {
                    ProfileScreen.draw(f, area, record);
                }
            }
            Screen::Lootboxes => {
                let balance = self.session.as_ref().map_or(0, |r| r.balance);
                self.lootbox_screen
                    .draw(f, area, self.catalog.catalog(), balance, status);
            }
            Screen::OpenResult => {
                if let Some(outcome) = &self.last_outcome {
                    OpenResultScreen.draw(f, area, outcome);
                }
            }
        }
    }

    /// Returns true when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.screen {
            Screen::MainMenu => return self.handle_main_menu(code),
            Screen::Players => self.handle_players(code),
            Screen::CreatePlayer => self.handle_create(code),
            Screen::Profile => {
                if matches!(code, KeyCode::Esc | KeyCode::Enter) {
                    self.screen = Screen::Players;
                }
            }
            Screen::Lootboxes => self.handle_lootboxes(code),
            Screen::OpenResult => match code {
                KeyCode::Enter => {
                    self.lootbox_screen.confirming = true;
                    self.screen = Screen::Lootboxes;
                }
                KeyCode::Esc => self.screen = Screen::Lootboxes,
                _ => {}
            },
        }
        false
    }

    fn handle_main_menu(&mut self, code: KeyCode) -> bool {
        let choice = match code {
            KeyCode::Up => {
                self.menu_screen.move_up();
                return false;
            }
            KeyCode::Down => {
                self.menu_screen.move_down();
                return false;
            }
            KeyCode::Enter => self.menu_screen.selected(),
            KeyCode::Char(c) => match MenuChoice::from_key(c) {
                Some(choice) => choice,
                None => return false,
            },
            _ => return false,
        };

        self.status = None;
        match choice {
            MenuChoice::Lootboxes => {
                if self.current_player.is_none() {
                    self.status = Some(Status::Error("Select a player first.".to_string()));
                    self.refresh_standings();
                    self.screen = Screen::Players;
                } else {
                    self.refresh_session();
                    self.lootbox_screen.confirming = false;
                    self.screen = Screen::Lootboxes;
                }
            }
            MenuChoice::Players => {
                self.refresh_standings();
                self.screen = Screen::Players;
            }
            MenuChoice::Quit => return true,
        }
        false
    }

    fn handle_players(&mut self, code: KeyCode) {
        let len = self.standings.len();
        match code {
            KeyCode::Up => self.select_screen.move_up(len),
            KeyCode::Down => self.select_screen.move_down(len),
            KeyCode::Enter => {
                if let Some(row) = self.select_screen.selected(&self.standings) {
                    let name = row.name.clone();
                    self.login(name);
                    self.screen = Screen::MainMenu;
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.creation_screen.reset();
                self.screen = Screen::CreatePlayer;
            }
            KeyCode::Char('i') | KeyCode::Char('I') => {
                let Some(name) = self
                    .select_screen
                    .selected(&self.standings)
                    .map(|row| row.name.clone())
                else {
                    return;
                };
                match self.economy.require_player(&name) {
                    Ok(record) => {
                        self.inspected = Some(record);
                        self.screen = Screen::Profile;
                    }
                    Err(e) => self.fail(&e),
                }
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                if let Some(name) = self.current_player.take() {
                    info!(player = %name, "logged out");
                    self.logout();
                    self.status = Some(Status::Info(format!("Logged out {}.", name)));
                }
            }
            KeyCode::Esc => {
                self.status = None;
                self.screen = Screen::MainMenu;
            }
            _ => {}
        }
    }

    fn handle_create(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.creation_screen.handle_char_input(c),
            KeyCode::Backspace => self.creation_screen.handle_backspace(),
            KeyCode::Enter => {
                if !self.creation_screen.is_valid() {
                    return;
                }
                let name = self.creation_screen.name().to_string();
                match self.economy.create_player(&name) {
                    Ok(()) => {
                        self.creation_screen.reset();
                        self.refresh_standings();
                        self.login(name);
                        self.screen = Screen::MainMenu;
                    }
                    Err(e) => {
                        self.creation_screen.validation_error = Some(describe_error(&e));
                    }
                }
            }
            KeyCode::Esc => {
                self.creation_screen.reset();
                self.refresh_standings();
                self.screen = Screen::Players;
            }
            _ => {}
        }
    }

    fn handle_lootboxes(&mut self, code: KeyCode) {
        let len = self.catalog.catalog().len();

        if self.lootbox_screen.confirming {
            match code {
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.lootbox_screen.confirming = false;
                    self.purchase();
                }
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.lootbox_screen.confirming = false;
                }
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Up => self.lootbox_screen.move_up(len),
            KeyCode::Down => self.lootbox_screen.move_down(len),
            KeyCode::Enter => {
                if len > 0 {
                    self.status = None;
                    self.lootbox_screen.confirming = true;
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let count = self.catalog.reload().len();
                if self.lootbox_screen.selected_index >= count {
                    self.lootbox_screen.selected_index = 0;
                }
                self.status = Some(Status::Info(format!(
                    "Catalog reloaded: {} lootboxes.",
                    count
                )));
            }
            KeyCode::Esc => {
                self.status = None;
                self.screen = Screen::MainMenu;
            }
            _ => {}
        }
    }

    fn purchase(&mut self) {
        let Some(player) = self.current_player.clone() else {
            self.screen = Screen::MainMenu;
            return;
        };
        let catalog = self.catalog.catalog();
        let Some(lootbox) = self
            .lootbox_screen
            .selected(catalog)
            .map(|def| def.name.clone())
        else {
            return;
        };

        let result = self
            .economy
            .open_lootbox(catalog, &player, &lootbox, &mut self.rng);
        match result {
            Ok(outcome) => {
                self.last_outcome = Some(outcome);
                self.status = None;
                self.refresh_session();
                self.screen = Screen::OpenResult;
            }
            Err(EconomyError::UnknownPlayer(name)) => {
                self.logout();
                self.fail(&EconomyError::UnknownPlayer(name));
                self.screen = Screen::MainMenu;
            }
            Err(e) => {
                self.fail(&e);
                self.refresh_session();
            }
        }
    }
}
