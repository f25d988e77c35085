use notes_core::Category;
use notes_listing::CategoryFilter;
use notes_workflow::ContentSlot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Show,
    Tab(CategoryFilter),
    New,
    Open(usize),
    Close,
    Delete,
    Title(String),
    Category(Category),
    Content(ContentSlot, String),
    Next,
    Back,
    Cancel,
}

pub const HELP: &str = "\
list view:    show | tab <all|personal|work|study|other> | new | open <n> | quit
note detail:  delete | close
new note:     title <text> | category <name> | main <text> | detail1 <text> | detail2 <text>
              next | back | cancel";

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" | "show" | "list" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "tab" => Command::Tab(rest.parse().map_err(|err| format!("{err}"))?),
        "new" => Command::New,
        "open" => {
            let index: usize = rest
                .parse()
                .map_err(|_| format!("expected a note number, got `{rest}`"))?;
            if index == 0 {
                return Err("note numbers start at 1".to_string());
            }
            Command::Open(index)
        }
        "close" => Command::Close,
        "delete" => Command::Delete,
        "title" => Command::Title(rest.to_string()),
        "category" => Command::Category(rest.parse().map_err(|err| format!("{err}"))?),
        "main" => Command::Content(ContentSlot::Main, rest.to_string()),
        "detail1" => Command::Content(ContentSlot::DetailA, rest.to_string()),
        "detail2" => Command::Content(ContentSlot::DetailB, rest.to_string()),
        "next" | "save" => Command::Next,
        "back" => Command::Back,
        "cancel" => Command::Cancel,
        other => return Err(format!("unknown command `{other}`, try `help`")),
    };
    Ok(command)
}
