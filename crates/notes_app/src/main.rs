mod command;
mod render;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use command::Command;
use notes_config::{AppConfig, ConfigStore, LoggingConfig};
use notes_listing::ListEvent;
use notes_services::{DynNoteServices, NoteServicesBuilder, Notice, Screen, Session};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match ConfigStore::from_default_location().and_then(|store| store.load_or_init())
    {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("failed to load config, using defaults: {err:#}");
            AppConfig::default()
        }
    };

    let data_dir = match config.storage.resolve_data_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("failed to resolve data dir: {err:#}");
            std::path::PathBuf::from(".")
        }
    };
    if let Err(err) = fs::create_dir_all(&data_dir) {
        eprintln!("failed to prepare data dir: {err}");
    }
    let _log_guard = init_local_logger(&data_dir.join("logs"), &config.logging);

    let services = match NoteServicesBuilder::new(&data_dir, config.storage.backend).build() {
        Ok(services) => services,
        Err(err) => {
            error!("failed to open note storage: {err:#}");
            eprintln!("failed to open note storage: {err:#}");
            return;
        }
    };

    info!(notes = services.get_notes().len(), "step notes started");
    let session = Session::with_default_filter(config.listing.default_filter);
    if let Err(err) = run(&services, session, io::stdin().lock(), io::stdout().lock()) {
        error!("terminal session failed: {err:#}");
        eprintln!("{err:#}");
    }
}

fn run(
    services: &DynNoteServices,
    mut session: Session,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    write_screen(&mut output, services, &session)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let command = match command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(output, "{}", command::HELP)?,
            command => {
                if let Some(notice) = apply(services, &mut session, command, &mut output)? {
                    writeln!(output, "** {}: {}", notice.title, notice.description)?;
                }
                write_screen(&mut output, services, &session)?;
            }
        }
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Mode {
    List,
    Detail,
    Creating,
}

fn apply(
    services: &DynNoteServices,
    session: &mut Session,
    command: Command,
    output: &mut impl Write,
) -> Result<Option<Notice>> {
    let mode = match session.screen() {
        Screen::List => Mode::List,
        Screen::Detail(_) => Mode::Detail,
        Screen::Creating(_) => Mode::Creating,
    };

    match (mode, command) {
        (_, Command::Show) => {}
        (Mode::List, Command::Tab(filter)) => session.select_filter(filter),
        (Mode::List, Command::New) => {
            session.handle_list_event(services, ListEvent::CreateClicked)
        }
        (Mode::List, Command::Open(number)) => {
            let visible = session.visible_notes(services);
            match visible.get(number - 1) {
                Some(note) => {
                    let event = ListEvent::NoteClicked(note.id.clone());
                    session.handle_list_event(services, event);
                }
                None => writeln!(output, "no note #{number} in this view")?,
            }
        }
        (Mode::Detail, Command::Close) => session.close_detail(),
        (Mode::Detail, Command::Delete) => return session.delete_selected(services),
        (Mode::Creating, Command::Next) => {
            return session.drive_wizard(services, |wizard| wizard.advance_now().into_event());
        }
        (Mode::Creating, Command::Back) => {
            session.drive_wizard(services, |wizard| Err(wizard.retreat()))?;
        }
        (Mode::Creating, Command::Cancel) => {
            return session.drive_wizard(services, |wizard| Ok(wizard.cancel()));
        }
        (Mode::Creating, edit) => {
            if let Some(wizard) = session.wizard_mut() {
                match edit {
                    Command::Title(title) => wizard.set_title(title),
                    Command::Category(category) => wizard.set_category(category),
                    Command::Content(slot, text) => wizard.set_content(slot, text),
                    _ => writeln!(output, "not available while creating a note")?,
                }
            }
        }
        _ => writeln!(output, "not available here, try `help`")?,
    }
    Ok(None)
}

fn write_screen(
    output: &mut impl Write,
    services: &DynNoteServices,
    session: &Session,
) -> Result<()> {
    let text = match session.screen() {
        Screen::List => render::list(
            &session.visible_notes(services),
            session.filter(),
            Utc::now(),
        ),
        Screen::Detail(note) => render::detail(note),
        Screen::Creating(wizard) => render::wizard(wizard),
    };
    writeln!(output, "\n{text}")?;
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}

fn init_local_logger(
    log_dir: &Path,
    logging: &LoggingConfig,
) -> tracing_appender::non_blocking::WorkerGuard {
    if let Err(err) = fs::create_dir_all(log_dir) {
        eprintln!("failed to create log dir `{}`: {err}", log_dir.display());
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, "step-notes.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer);
    if logging.json {
        builder.json().init();
    } else {
        builder.with_ansi(false).init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use notes_core::Category;
    use notes_listing::CategoryFilter;
    use notes_services::NoteServices;
    use notes_store::{MemoryBackend, NoteStore, StorageBackend};

    use super::*;

    fn memory_services() -> DynNoteServices {
        let backend: Box<dyn StorageBackend> = Box::new(MemoryBackend::new());
        NoteServices::new(NoteStore::new(backend))
    }

    fn drive(services: &DynNoteServices, script: &str) -> String {
        drive_from(services, CategoryFilter::All, script)
    }

    fn drive_from(services: &DynNoteServices, tab: CategoryFilter, script: &str) -> String {
        let mut output = Vec::new();
        let session = Session::with_default_filter(tab);
        run(services, session, script.as_bytes(), &mut output).expect("run session");
        String::from_utf8(output).expect("utf8 output")
    }

    #[test]
    fn scripted_session_creates_and_deletes_a_note() {
        let services = memory_services();
        let transcript = drive(
            &services,
            "new\nnext\ntitle Groceries\ncategory work\nnext\nmain Buy milk\nnext\nnext\n",
        );
        assert!(transcript.contains("** Note created"));
        assert!(transcript.contains("Groceries  <Work>"));

        let notes = services.get_notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, vec!["Buy milk".to_string()]);

        let transcript = drive(&services, "tab work\nopen 1\ndelete\nquit\n");
        assert!(transcript.contains("** Note deleted"));
        assert!(services.get_notes().is_empty());
    }

    #[test]
    fn session_opens_on_the_configured_tab() {
        let services = memory_services();
        let transcript = drive_from(&services, CategoryFilter::Only(Category::Study), "");
        assert!(transcript.contains("[Study]"));
        assert!(!transcript.contains("[All]"));
    }

    #[test]
    fn commands_outside_their_screen_are_rejected() {
        let services = memory_services();
        let transcript = drive(&services, "delete\nopen 3\nbogus\n");
        assert!(transcript.contains("not available here"));
        assert!(transcript.contains("no note #3 in this view"));
        assert!(transcript.contains("unknown command `bogus`"));
    }
}
