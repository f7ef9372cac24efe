use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use quizr::{
    app::App,
    bank::Topic,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    question::{BankError, QuestionBank},
    quiz::Quiz,
    runtime::{CrosstermEventSource, FixedTicker, Runner, StepOutcome},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

/// multiple-choice quiz tui with shuffled sessions and a per-question review
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A multiple-choice quiz in the terminal: pick how many questions to play, answer them one at a time (peeking at the answer if you must), and review every question once you finish."
)]
pub struct Cli {
    /// built-in topic to quiz on
    #[clap(short = 't', long, value_enum)]
    topic: Option<Topic>,

    /// load questions from a JSON file instead of a built-in topic
    #[clap(short = 'f', long, conflicts_with = "topic")]
    file: Option<PathBuf>,

    /// number of questions per session (clamped to the bank size)
    #[clap(short = 'n', long)]
    number_of_questions: Option<usize>,

    /// allow moving on without answering the current question
    #[clap(long)]
    allow_skip: bool,

    /// print the built-in topics and exit
    #[clap(long)]
    list_topics: bool,

    /// more log output (repeatable), written to the quizr log file
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// only log errors
    #[clap(short, long)]
    quiet: bool,
}

/// CLI flags layered over the stored config
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub topic: Topic,
    pub number_of_questions: usize,
    pub allow_skip: bool,
}

impl Cli {
    fn resolve(&self, config: &Config) -> Settings {
        Settings {
            topic: self.topic.unwrap_or_else(|| config.topic()),
            number_of_questions: self
                .number_of_questions
                .unwrap_or(config.number_of_questions),
            allow_skip: self.allow_skip || config.allow_skip,
        }
    }

    fn load_bank(&self, settings: &Settings) -> Result<QuestionBank, BankError> {
        match &self.file {
            Some(path) => QuestionBank::from_path(path),
            None => settings.topic.load(),
        }
    }
}

fn list_topics() -> Result<(), Box<dyn Error>> {
    for topic in Topic::all() {
        let bank = topic.load()?;
        println!("{:<22}{} ({} questions)", topic, bank.title, bank.len());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    if cli.list_topics {
        return list_topics();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    let settings = cli.resolve(&config);

    let bank = match cli.load_bank(&settings) {
        Ok(bank) => bank,
        Err(e) => {
            log::error!("{}", e);
            Cli::command().error(ErrorKind::InvalidValue, e).exit()
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let quiz = Quiz::with_requested_count(bank, settings.number_of_questions);
    let mut app = App::new(quiz, settings.allow_skip);
    let outcome = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    config.number_of_questions = app.quiz.num_questions();
    if cli.file.is_none() {
        config.topic = settings.topic.to_string();
    }
    if let Err(e) = store.save(&config) {
        log::warn!("unable to save config to {}: {}", store.path().display(), e);
    }

    outcome
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.advance(app) {
            StepOutcome::Quit => break,
            StepOutcome::Redraw => {
                terminal.draw(|f| ui(app, f))?;
            }
            StepOutcome::Idle => {}
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
