//! Parsing of REPL input lines.

use webforge_core::file_tree::NodeKind;

/// Slash commands offered for completion.
pub const COMMANDS: [&str; 17] = [
    "/apply", "/download", "/edit", "/export", "/help", "/mkdir", "/new", "/open", "/preview",
    "/reset", "/rm", "/save", "/show", "/snippets", "/tree", "/window", "/dismiss",
];

pub const HELP: &str = "\
/open <file>            open a file in the editor
/show                   print the buffer
/edit                   replace the buffer (end input with a single '.')
/save                   write the buffer back
/tree                   print the project tree
/new <file> [folder]    create a file and open it
/mkdir <name> [folder]  create a folder
/rm <name> [folder]     delete a file or folder
/preview                regenerate the preview document
/window                 open the preview in a separate file
/snippets               list code blocks from the chat
/apply <msg> <block>    apply a code block from the chat
/dismiss                hide the last error
/reset                  start a new chat
/export <token> <repo>  export to GitHub
/download               download the project
$ <command>             run a terminal command
anything else           send a message to the assistant
quit | exit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Quit,
    Help,
    Open(&'a str),
    Show,
    Edit,
    Save,
    Tree,
    Create {
        name: &'a str,
        kind: NodeKind,
        path: Option<&'a str>,
    },
    Remove {
        name: &'a str,
        path: Option<&'a str>,
    },
    Preview,
    Window,
    Snippets,
    Apply {
        message: usize,
        snippet: usize,
    },
    Dismiss,
    Reset,
    Export {
        token: &'a str,
        repository: &'a str,
    },
    Download,
    Terminal(&'a str),
    Chat(&'a str),
    /// A slash command with missing or malformed arguments.
    Usage(&'static str),
    Unknown(&'a str),
}

/// Parses one trimmed, non-empty input line.
pub fn parse(line: &str) -> ReplCommand<'_> {
    if line == "quit" || line == "exit" {
        return ReplCommand::Quit;
    }
    if let Some(command) = line.strip_prefix('$') {
        return ReplCommand::Terminal(command.trim());
    }
    if !line.starts_with('/') {
        return ReplCommand::Chat(line);
    }

    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    match (head, args.as_slice()) {
        ("/help", _) => ReplCommand::Help,
        ("/open", [name]) => ReplCommand::Open(*name),
        ("/open", _) => ReplCommand::Usage("/open <file>"),
        ("/show", _) => ReplCommand::Show,
        ("/edit", _) => ReplCommand::Edit,
        ("/save", _) => ReplCommand::Save,
        ("/tree", _) => ReplCommand::Tree,
        ("/new", [name, rest @ ..]) if rest.len() <= 1 => ReplCommand::Create {
            name: *name,
            kind: NodeKind::File,
            path: rest.first().copied(),
        },
        ("/new", _) => ReplCommand::Usage("/new <file> [folder]"),
        ("/mkdir", [name, rest @ ..]) if rest.len() <= 1 => ReplCommand::Create {
            name: *name,
            kind: NodeKind::Folder,
            path: rest.first().copied(),
        },
        ("/mkdir", _) => ReplCommand::Usage("/mkdir <name> [folder]"),
        ("/rm", [name, rest @ ..]) if rest.len() <= 1 => ReplCommand::Remove {
            name: *name,
            path: rest.first().copied(),
        },
        ("/rm", _) => ReplCommand::Usage("/rm <name> [folder]"),
        ("/preview", _) => ReplCommand::Preview,
        ("/window", _) => ReplCommand::Window,
        ("/snippets", _) => ReplCommand::Snippets,
        ("/apply", [message, snippet]) => match (message.parse(), snippet.parse()) {
            (Ok(message), Ok(snippet)) => ReplCommand::Apply { message, snippet },
            _ => ReplCommand::Usage("/apply <msg> <block>"),
        },
        ("/apply", _) => ReplCommand::Usage("/apply <msg> <block>"),
        ("/dismiss", _) => ReplCommand::Dismiss,
        ("/reset", _) => ReplCommand::Reset,
        ("/export", [token, repository]) => ReplCommand::Export {
            token: *token,
            repository: *repository,
        },
        ("/export", _) => ReplCommand::Usage("/export <token> <repo>"),
        ("/download", _) => ReplCommand::Download,
        _ => ReplCommand::Unknown(head),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_chat() {
        assert_eq!(parse("сделай кнопку"), ReplCommand::Chat("сделай кнопку"));
    }

    #[test]
    fn test_terminal_prefix() {
        assert_eq!(parse("$ npm install"), ReplCommand::Terminal("npm install"));
        assert_eq!(parse("$ls"), ReplCommand::Terminal("ls"));
    }

    #[test]
    fn test_create_with_optional_folder() {
        assert_eq!(
            parse("/new Hero.jsx src"),
            ReplCommand::Create {
                name: "Hero.jsx",
                kind: NodeKind::File,
                path: Some("src")
            }
        );
        assert_eq!(
            parse("/mkdir assets"),
            ReplCommand::Create {
                name: "assets",
                kind: NodeKind::Folder,
                path: None
            }
        );
        assert_eq!(parse("/new"), ReplCommand::Usage("/new <file> [folder]"));
    }

    #[test]
    fn test_apply_requires_numbers() {
        assert_eq!(
            parse("/apply 2 1"),
            ReplCommand::Apply {
                message: 2,
                snippet: 1
            }
        );
        assert_eq!(parse("/apply two 1"), ReplCommand::Usage("/apply <msg> <block>"));
    }

    #[test]
    fn test_unknown_and_quit() {
        assert_eq!(parse("/frobnicate"), ReplCommand::Unknown("/frobnicate"));
        assert_eq!(parse("exit"), ReplCommand::Quit);
    }

    #[test]
    fn test_every_listed_command_parses() {
        for command in COMMANDS {
            assert!(!matches!(parse(command), ReplCommand::Unknown(_)), "{command}");
        }
    }
}
