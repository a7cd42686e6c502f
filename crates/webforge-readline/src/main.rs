use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use webforge_application::IdeSession;
use webforge_core::chat::{ExchangeOutcome, MessageRole};
use webforge_core::file_tree::FileTree;
use webforge_core::observer::WorkspaceObserver;
use webforge_core::secret::SecretService;
use webforge_infrastructure::{ConfigService, SecretServiceImpl, TempFileDocumentHost, WebforgePaths};
use webforge_interaction::GeminiApiClient;

mod command;

use command::{COMMANDS, HELP, ReplCommand};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else if line.starts_with('$') {
            Owned(line.bright_yellow().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Prints core notifications as dim status lines.
struct ConsoleObserver;

impl WorkspaceObserver for ConsoleObserver {
    fn on_code_generated(&self, code: &str, file_name: Option<&str>) {
        let target = file_name.unwrap_or("active file");
        println!(
            "{}",
            format!("[applied {} lines to {target}]", code.lines().count()).bright_black()
        );
    }

    fn on_code_analysis_requested(&self, code: &str) {
        println!(
            "{}",
            format!("[analysis requested for {} bytes of code]", code.len()).bright_black()
        );
    }

    fn on_file_structure_change(&self, tree: &FileTree) {
        println!(
            "{}",
            format!("[tree now holds {} files]", tree.file_names().len()).bright_black()
        );
    }
}

type Session = IdeSession<TempFileDocumentHost>;

async fn build_session() -> Result<Session> {
    let secret_path = WebforgePaths::new(None).ensure_secret_file()?;
    let secrets = SecretServiceImpl::new(None)?.load_secrets().await?;
    let config = ConfigService::new(None)?.get_config();
    if secrets.api_key().is_none() {
        tracing::warn!("[Readline] No Gemini API key in {}", secret_path.display());
        println!(
            "{}",
            format!(
                "No Gemini API key configured: set GEMINI_API_KEY or edit {}.",
                secret_path.display()
            )
            .yellow()
        );
    }

    let model = secrets
        .model_name()
        .map(str::to_string)
        .unwrap_or(config.model.name);
    tracing::info!("[Readline] Using model {}", model);
    let client = GeminiApiClient::from_secrets(&secrets)
        .with_model(model)
        .with_generation(config.generation);

    Ok(IdeSession::new(
        Arc::new(client),
        TempFileDocumentHost::new()?,
        Arc::new(ConsoleObserver),
    )?)
}

async fn chat(session: &mut Session, utterance: &str) -> Result<()> {
    let pending = match session.begin_send(utterance) {
        Ok(pending) => pending,
        Err(err) => {
            println!("{}", err.to_string().yellow());
            return Ok(());
        }
    };
    println!("{}", "…".bright_black());

    let reply = session.request(&pending).await;
    let outcome = session.finish_send(pending, reply)?;

    let history = session.chat().history();
    let reply_index = history
        .iter()
        .rposition(|message| message.role == MessageRole::User)
        .map_or(0, |index| index + 1);
    for message in &history[reply_index..] {
        for line in message.content.lines() {
            println!("{}", line.bright_blue());
        }
    }
    if let Some(ExchangeOutcome::Failure { .. }) = outcome {
        if let Some(error) = session.chat().error() {
            println!("{}", format!("⚠ {error}").red());
        }
    }
    Ok(())
}

fn read_buffer(rl: &mut Editor<CliHelper, DefaultHistory>) -> Result<Option<String>> {
    let mut lines = Vec::new();
    loop {
        match rl.readline(".. ") {
            Ok(line) if line == "." => return Ok(Some(lines.join("\n"))),
            Ok(line) => lines.push(line),
            Err(rustyline::error::ReadlineError::Interrupted) => return Ok(None),
            Err(err) => return Err(err.into()),
        }
    }
}

fn print_preview(session: &mut Session) -> Result<()> {
    let handle = session.refresh_preview()?;
    session.mark_preview_loaded(&handle);
    println!("{}", format!("Preview: {handle}").green());
    Ok(())
}

/// Handles one line. Returns `false` when the REPL should stop.
async fn dispatch(
    session: &mut Session,
    rl: &mut Editor<CliHelper, DefaultHistory>,
    line: &str,
) -> Result<bool> {
    match command::parse(line) {
        ReplCommand::Quit => return Ok(false),
        ReplCommand::Help => println!("{}", HELP.bright_black()),
        ReplCommand::Open(name) => {
            session.open(name)?;
            println!("{}", format!("Opened {name}").green());
        }
        ReplCommand::Show => {
            let editor = session.editor();
            println!(
                "{}",
                format!(
                    "{} ({})",
                    editor.active_file().unwrap_or("no file"),
                    editor.editor_language()
                )
                .bright_magenta()
            );
            for (number, line) in editor.buffer().lines().enumerate() {
                println!("{} {line}", format!("{:>4}", number + 1).bright_black());
            }
        }
        ReplCommand::Edit => {
            if let Some(text) = read_buffer(rl)? {
                session.edit(&text)?;
            }
        }
        ReplCommand::Save => {
            if !session.save() {
                println!("{}", "Nothing to save".yellow());
            }
        }
        ReplCommand::Tree => {
            for (depth, node) in session.editor().tree().walk() {
                println!("{}{}", "  ".repeat(depth), node.listing_label());
            }
        }
        ReplCommand::Create { name, kind, path } => {
            session.create_entry(name, kind, path)?;
        }
        ReplCommand::Remove { name, path } => {
            if !session.delete_entry(name, path)? {
                println!("{}", format!("Not found: {name}").yellow());
            }
        }
        ReplCommand::Preview => print_preview(session)?,
        ReplCommand::Window => {
            session.open_preview_in_new_window()?;
            if let Some(path) = session.preview().host().last_external() {
                println!("{}", format!("Opened {}", path.display()).green());
            }
        }
        ReplCommand::Snippets => {
            for (index, message) in session.chat().history().iter().enumerate() {
                for (block, snippet) in message.snippets.iter().enumerate() {
                    println!(
                        "{} {} ({})",
                        format!("[{index} {block}]").bright_black(),
                        snippet.file_name.as_deref().unwrap_or("-"),
                        snippet.language
                    );
                }
            }
        }
        ReplCommand::Apply { message, snippet } => {
            if !session.apply_snippet(message, snippet)? {
                println!("{}", "No such code block".yellow());
            }
        }
        ReplCommand::Dismiss => session.dismiss_error(),
        ReplCommand::Reset => {
            session.reset_chat();
            println!("{}", session.chat().history()[0].content.bright_blue());
        }
        ReplCommand::Export { token, repository } => {
            session.export_to_github(token, repository);
            print_terminal_tail(session, 6);
        }
        ReplCommand::Download => {
            session.download_project();
            print_terminal_tail(session, 3);
        }
        ReplCommand::Terminal(input) => {
            for output in session.run_command(input) {
                println!("{}", output.yellow());
            }
        }
        ReplCommand::Chat(utterance) => chat(session, utterance).await?,
        ReplCommand::Usage(usage) => println!("{}", format!("Usage: {usage}").yellow()),
        ReplCommand::Unknown(head) => {
            println!("{}", format!("Unknown command {head}. Type /help.").bright_black())
        }
    }
    Ok(true)
}

fn print_terminal_tail(session: &Session, count: usize) {
    let log = session.terminal().log();
    for line in &log[log.len().saturating_sub(count)..] {
        println!("{}", line.yellow());
    }
}

/// The main entry point for the webforge readline REPL.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("WEBFORGE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut session = build_session().await?;

    let mut rl = Editor::<CliHelper, DefaultHistory>::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Webforge REPL ===".bright_magenta().bold());
    println!("{}", "Type /help for commands, or 'quit' to exit.".bright_black());
    println!("{}", session.chat().history()[0].content.bright_blue());
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match dispatch(&mut session, &mut rl, trimmed).await {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Err(err) => eprintln!("{}", format!("Error: {err}").red()),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
