use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use readlingo::{
    core::{
        LanguagePair,
        ReaderError,
    },
    reading::{
        Highlight,
        ReadingSession,
        RenderedSentence,
        TriageDecision,
    },
    ApiClient,
    BookService,
    Settings,
    Vocabulary,
    WordService,
};
use tokio::io::{
    AsyncBufReadExt,
    BufReader,
};

#[derive(Debug, Parser)]
#[command(name = "readlingo")]
#[command(about = "Read books page by page with progressively revealed translations")]
struct Cli {
    /// Backend base url (overrides settings.json and READLINGO_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Login {
        email: String,
        password: String,
    },
    Signup {
        email: String,
        password: String,
        username: String,
    },
    Logout,
    /// List your books
    Books,
    /// Read a book interactively; resumes at the last page when none is given
    Read {
        book_id: String,
        page: Option<u32>,
    },
    /// Manage known words for a language pair
    Words {
        #[command(subcommand)]
        action: WordsCommand,
    },
}

#[derive(Debug, Subcommand)]
enum WordsCommand {
    List {
        original: String,
        translated: String,
    },
    Add {
        original: String,
        translated: String,
        original_word: String,
        translated_word: String,
        /// Substitute the word while reading
        #[arg(long)]
        translate: bool,
    },
    Delete {
        original: String,
        translated: String,
        id: String,
    },
    Toggle {
        original: String,
        translated: String,
        id: String,
    },
}

const READ_HELP: &str = "commands: c S W (click) | t (translate) | n | p | g N | \
                         tr/dt/ig WORD | tra/dta/iga | h | q";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ReaderError> {
    let data_dir = Settings::data_dir();
    let settings = Settings::load_from(&data_dir).with_api_url(cli.api_url);
    log::info!("Using backend {}", settings.api_url);
    let mut client = ApiClient::new(&settings, settings.credential_store(&data_dir))?;

    match cli.command {
        Command::Login { email, password } => {
            client.login(&email, &password).await?;
            println!("Logged in.");
        }
        Command::Signup { email, password, username } => {
            client.signup(&email, &password, &username).await?;
            println!("Account created. You can log in now.");
        }
        Command::Logout => {
            client.logout()?;
            println!("Logged out.");
        }
        Command::Books => {
            let books =
                client.list_books().await.map_err(|e| ReaderError::fetch("books", e))?;
            for book in books {
                println!(
                    "{}  {} [{} -> {}]{}",
                    book.id,
                    book.title,
                    book.languages.original,
                    book.languages.translated,
                    book.author.map(|a| format!(" by {a}")).unwrap_or_default()
                );
            }
        }
        Command::Read { book_id, page } => read(client, book_id, page).await?,
        Command::Words { action } => words(client, action).await?,
    }
    Ok(())
}

async fn words(client: ApiClient, action: WordsCommand) -> Result<(), ReaderError> {
    let (original, translated) = match &action {
        WordsCommand::List { original, translated }
        | WordsCommand::Add { original, translated, .. }
        | WordsCommand::Delete { original, translated, .. }
        | WordsCommand::Toggle { original, translated, .. } => (original, translated),
    };
    let mut vocabulary = Vocabulary::load(client, LanguagePair::new(original, translated)).await?;

    match action {
        WordsCommand::List { .. } => {}
        WordsCommand::Add { original_word, translated_word, translate, .. } => {
            vocabulary.add_word(&original_word, &translated_word, translate).await?;
        }
        WordsCommand::Delete { id, .. } => vocabulary.remove_word(&id).await?,
        WordsCommand::Toggle { id, .. } => {
            let translate = vocabulary.toggle_translate(&id).await?;
            println!("translate is now {}", if translate { "on" } else { "off" });
        }
    }

    for word in vocabulary.words() {
        println!(
            "{:<26} {} -> {}{}",
            word.id.as_deref().unwrap_or("-"),
            word.original_word,
            word.translated_word,
            if word.translate { "" } else { "  (not translated)" }
        );
    }
    Ok(())
}

async fn read(client: ApiClient, book_id: String, page: Option<u32>) -> Result<(), ReaderError> {
    let page = match page {
        Some(page) => page,
        None => client
            .book_details(&book_id)
            .await
            .map_err(|e| ReaderError::fetch("book details", e))?
            .page_number
            .unwrap_or(1),
    };

    let mut session = ReadingSession::new(client, book_id);
    report(session.go_to(page).await);
    print_session(&mut session);
    println!("{READ_HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => continue,
            ["q"] => break,
            ["h"] => println!("{READ_HELP}"),
            ["c", s, w] => match (s.parse(), w.parse()) {
                (Ok(s), Ok(w)) => {
                    session.click(s, w);
                }
                _ => println!("usage: c SENTENCE WORD"),
            },
            ["t"] => report(session.toggle_translate().await),
            ["n"] => report(session.next().await),
            ["p"] => report(session.previous().await),
            ["g", n] => match n.parse() {
                Ok(n) => report(session.go_to(n).await),
                Err(_) => println!("usage: g PAGE"),
            },
            [cmd @ ("tr" | "dt" | "ig"), word] => {
                let decision = match *cmd {
                    "tr" => TriageDecision::Translate,
                    "dt" => TriageDecision::DontTranslate,
                    _ => TriageDecision::Ignore,
                };
                report(session.triage(word, decision).await);
            }
            ["tra"] => {
                session.triage_all(TriageDecision::Translate).await;
            }
            ["dta"] => {
                session.triage_all(TriageDecision::DontTranslate).await;
            }
            ["iga"] => {
                session.triage_all(TriageDecision::Ignore).await;
            }
            _ => println!("{READ_HELP}"),
        }
        print_session(&mut session);
    }
    Ok(())
}

/// Errors worth showing are already stored on the session; validation
/// failures stay silent.
fn report<T>(result: Result<T, ReaderError>) {
    if let Err(e) = result {
        log::debug!("{e}");
    }
}

fn print_session<S: BookService + WordService>(session: &mut ReadingSession<S>) {
    println!();
    if let Some(error) = session.error() {
        println!("{error}");
        return;
    }
    println!("{}", session.navigator().header());

    if let Some(view) = session.view() {
        if view.triage.is_open() {
            println!("Common words on this page:");
            for word in view.triage.pending() {
                println!("  {} -> {}  (frequency: {})", word.translation, word.word, word.frequency);
            }
        }
    }

    for (i, sentence) in session.render().unwrap_or_default().iter().enumerate() {
        let text = match sentence {
            RenderedSentence::Original { text, highlight } => match highlight {
                Highlight::SentenceRevealed => format!("> {text}"),
                _ => text.clone(),
            },
            RenderedSentence::Tokens(tokens) => tokens
                .iter()
                .map(|t| match t.highlight {
                    Highlight::Selected => format!("[{}]", t.display_text),
                    Highlight::Known => format!("*{}*", t.display_text),
                    Highlight::SentenceRevealed | Highlight::None => t.display_text.clone(),
                })
                .collect::<Vec<_>>()
                .join(" "),
        };
        println!("{i:>3}  {text}");
    }

    if let Some(notice) = session.take_notice() {
        println!("! {notice}");
    }
}
