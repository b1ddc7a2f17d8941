use checkers_ai::core::{Board, Color};
use checkers_ai::game::record::{list_records, RECORD_DIR};
use checkers_ai::game::replay::ReplayViewer;
use checkers_ai::game::{Game, PerspectiveMode};
use checkers_ai::player::ai::{AIConfig, AIStrength};
use checkers_ai::player::{MinimaxAI, PlayerController, TuiController};
use checkers_ai::selfplay::{run_selfplay, SelfPlayConfig};
use crossterm::event::{self, Event, KeyCode};
use crossterm::{cursor, execute, terminal};
use std::io;
use std::time::Duration;

const LOG_PATH: &str = "checkers.log";

fn main() -> anyhow::Result<()> {
    checkers_ai::logging::init_file(LOG_PATH)?;

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    execute!(io::stdout(), terminal::EnterAlternateScreen)?;

    let res = run();

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Err(e) = &res {
        tracing::error!(error = %e, "exiting with error");
    }
    res
}

fn read_choice(valid: &[char]) -> anyhow::Result<Option<char>> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                    KeyCode::Char(c) if valid.contains(&c) => return Ok(Some(c)),
                    _ => {}
                }
            }
        }
    }
}

fn wait_for_key() -> anyhow::Result<()> {
    print!("\r\nPress any key to return to menu...\r\n");
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }
}

fn clear_screen() -> anyhow::Result<()> {
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let config = AIConfig::load_or_default();

    loop {
        clear_screen()?;
        print!("=== Checkers ===\r\n");
        print!("\r\nSelect mode:\r\n");
        print!("1. Human vs Human\r\n");
        print!("2. Human vs AI (light)\r\n");
        print!("3. Human vs AI (strong)\r\n");
        print!("4. AI vs AI\r\n");
        print!("5. Self-play batch\r\n");
        print!("6. Replay latest record\r\n");
        print!("q. Quit\r\n");

        let Some(choice) = read_choice(&['1', '2', '3', '4', '5', '6'])? else {
            return Ok(());
        };

        match choice {
            '5' => run_batch(&config)?,
            '6' => run_latest_replay()?,
            _ => run_local(choice, &config)?,
        }
    }
}

fn run_local(choice: char, config: &AIConfig) -> anyhow::Result<()> {
    let ai = |color: Color, name: &str, strength: AIStrength| -> Box<dyn PlayerController> {
        Box::new(MinimaxAI::from_config(color, name, strength, config))
    };

    let (red, white, perspective): (
        Box<dyn PlayerController>,
        Box<dyn PlayerController>,
        PerspectiveMode,
    ) = match choice {
        '1' => (
            Box::new(TuiController::new(Color::Red, "Red")),
            Box::new(TuiController::new(Color::White, "White")),
            PerspectiveMode::AutoFlip,
        ),
        '2' => (
            Box::new(TuiController::new(Color::Red, "Human")),
            ai(Color::White, "AI (light)", AIStrength::Light),
            PerspectiveMode::Fixed(Color::Red),
        ),
        '3' => (
            Box::new(TuiController::new(Color::Red, "Human")),
            ai(Color::White, "AI (strong)", AIStrength::Strong),
            PerspectiveMode::Fixed(Color::Red),
        ),
        _ => (
            ai(Color::Red, "Red AI", AIStrength::Light),
            ai(Color::White, "White AI", AIStrength::Strong),
            PerspectiveMode::Fixed(Color::Red),
        ),
    };

    let mut game = Game::new(Board::new()).with_rules(config.rules.rules());
    game.max_moves = config.rules.max_moves;
    game.perspective_mode = perspective;

    let outcome = game.play(red.as_ref(), white.as_ref())?;
    let path = game
        .to_record(outcome.winner)
        .save(RECORD_DIR, &format!("{}_vs_{}", red.name(), white.name()).replace(' ', "_"))?;
    print!("\r\n{}\r\nSaved to {}\r\n", outcome.describe(), path.display());
    wait_for_key()
}

fn run_batch(config: &AIConfig) -> anyhow::Result<()> {
    clear_screen()?;
    print!("=== Self-Play ===\r\n\r\n");
    print!("Select number of games:\r\n");
    print!("1. 10 games\r\n");
    print!("2. 50 games\r\n");
    print!("3. 100 games\r\n");

    let Some(choice) = read_choice(&['1', '2', '3'])? else {
        return Ok(());
    };
    let num_games = match choice {
        '1' => 10,
        '2' => 50,
        _ => 100,
    };

    let selfplay = SelfPlayConfig {
        num_games,
        seed: chrono::Local::now().timestamp() as u64,
        save_records: true,
        ai: config.clone(),
        ..SelfPlayConfig::default()
    };

    print!("\r\nPlaying {} games...\r\n", num_games);
    let stats = run_selfplay(&selfplay)?;
    print!("\r\n{}\r\n", stats.summary());
    wait_for_key()
}

fn run_latest_replay() -> anyhow::Result<()> {
    let records = list_records(RECORD_DIR)?;
    let Some(latest) = records.last() else {
        clear_screen()?;
        print!("No records found in {}/\r\n", RECORD_DIR);
        print!("Play a game first to generate one\r\n");
        return wait_for_key();
    };

    match ReplayViewer::from_path(latest) {
        Ok(mut viewer) => viewer.run(),
        Err(e) => {
            tracing::warn!(path = %latest.display(), error = %e, "cannot replay record");
            clear_screen()?;
            print!("Cannot replay {}: {}\r\n", latest.display(), e);
            wait_for_key()
        }
    }
}
