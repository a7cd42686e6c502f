//! Scripted terminal.
//!
//! Nothing here executes a process. Every recognised command prints canned
//! output; only `mkdir` and `touch`/`new` touch the file tree, always at the
//! root level.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::editor::Editor;
use crate::file_tree::{FileNode, NodeKind};

pub const READY_BANNER: &str = "Терминал готов к использованию...";
pub const CLEARED_BANNER: &str = "Терминал очищен";

const HELP: [&str; 9] = [
    "Available commands:",
    "  npm/yarn/pnpm commands - Package management",
    "  ls/dir - List files",
    "  cd <dir> - Change directory",
    "  mkdir <dir> - Create directory",
    "  touch/new <file> - Create file",
    "  git <command> - Git operations",
    "  clear/cls - Clear terminal",
    "  help - Show this help",
];

static SCRIPT_SHORTHAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(npm|yarn|pnpm) (start|dev|build|test)").expect("valid regex"));

/// Append-only terminal log plus the command interpreter.
#[derive(Debug, Clone)]
pub struct Terminal {
    log: Vec<String>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            log: vec![READY_BANNER.to_string()],
        }
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Runs one command line and returns the lines it printed.
    ///
    /// The echoed `$ <input>` line is part of the log but not of the return
    /// value. Blank input is ignored. `clear` resets the log.
    pub fn execute(&mut self, input: &str, editor: &mut Editor) -> Vec<String> {
        let command = input.trim();
        if command.is_empty() {
            return Vec::new();
        }
        self.log.push(format!("$ {input}"));
        tracing::debug!("[Terminal] execute('{}')", command);

        let lower = command.to_lowercase();
        if lower == "clear" || lower == "cls" {
            self.log = vec![CLEARED_BANNER.to_string()];
            return Vec::new();
        }

        let output = interpret(command, &lower, editor);
        self.log.extend(output.iter().cloned());
        output
    }

    /// Records the scripted GitHub export. Ignored unless both fields are set.
    pub fn export_to_github(&mut self, token: &str, repository: &str) -> bool {
        if token.is_empty() || repository.is_empty() {
            return false;
        }
        self.log.extend(
            [
                "Exporting to GitHub...".to_string(),
                format!("Repository: {repository}"),
                "Preparing files...".to_string(),
                "Committing changes...".to_string(),
                "Push successful!".to_string(),
                format!("Your project is now available at: https://github.com/{repository}"),
            ]
            .into_iter(),
        );
        true
    }

    /// Records the scripted project download.
    pub fn download_project(&mut self) {
        self.log.extend(
            [
                "Preparing project for download...",
                "Creating zip archive...",
                "Download started!",
            ]
            .map(str::to_string),
        );
    }
}

fn word(command: &str, index: usize) -> Option<&str> {
    command.split(' ').nth(index).filter(|w| !w.is_empty())
}

fn lines<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn interpret(command: &str, lower: &str, editor: &mut Editor) -> Vec<String> {
    if lower.starts_with("npm install") || lower.starts_with("yarn add") || lower.starts_with("pnpm add") {
        let packages = command.split(' ').skip(2).collect::<Vec<_>>().join(" ");
        let packages = if packages.is_empty() { "packages" } else { packages.as_str() };
        return vec![
            format!("Installing {packages}..."),
            "Resolving dependencies...".to_string(),
            "Added packages in 2.3s".to_string(),
            "Successfully installed packages".to_string(),
        ];
    }

    if lower.starts_with("npm run") || lower.starts_with("yarn") || SCRIPT_SHORTHAND.is_match(lower) {
        let script = if word(command, 1) == Some("run") {
            word(command, 2)
        } else {
            word(command, 1)
        };
        if script == Some("build") || lower.contains("build") {
            return lines([
                "Building project...",
                "Compiling...",
                "Optimizing assets...",
                "Build completed in 3.2s",
                "Output directory: ./dist",
            ]);
        }
        return vec![
            format!("Running script: {}...", script.unwrap_or("start")),
            "Compiled successfully!".to_string(),
            "Server running at http://localhost:3000".to_string(),
            "Ready for connections".to_string(),
        ];
    }

    if lower == "ls" || lower == "dir" {
        return editor
            .tree()
            .roots()
            .iter()
            .map(FileNode::listing_label)
            .collect();
    }

    if lower.starts_with("cd ") {
        let dir = word(command, 1).unwrap_or_default();
        let exists = editor
            .tree()
            .roots()
            .iter()
            .any(|node| node.is_folder() && node.name() == dir);
        return if exists {
            vec![format!("Changed directory to {dir}")]
        } else {
            vec![format!("Directory not found: {dir}")]
        };
    }

    if lower.starts_with("mkdir ") {
        return match word(command, 1) {
            Some(dir) => {
                editor.insert_node(FileNode::new_entry(dir, NodeKind::Folder), None);
                vec![format!("Created directory: {dir}")]
            }
            None => lines(["Error: Directory name required"]),
        };
    }

    if lower.starts_with("touch ") || lower.starts_with("new ") {
        return match word(command, 1) {
            Some(file) => {
                editor.insert_node(FileNode::empty_file(file), None);
                vec![format!("Created file: {file}")]
            }
            None => lines(["Error: File name required"]),
        };
    }

    if lower.starts_with("git ") {
        let sub = word(command, 1).unwrap_or_default();
        return match sub {
            "init" => lines(["Initialized empty Git repository"]),
            "status" => lines([
                "On branch main",
                "Changes not staged for commit:",
                "  modified: src/App.jsx",
                "  modified: src/index.css",
            ]),
            "add" => lines(["Added files to staging area"]),
            "commit" => lines(["Created commit: Initial commit"]),
            "push" => lines(["Pushed changes to remote repository"]),
            other => vec![format!("Git command executed: {other}")],
        };
    }

    if lower == "help" {
        return lines(HELP);
    }

    vec![format!(
        "Command not found: {command}. Type 'help' for available commands."
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn run(terminal: &mut Terminal, editor: &mut Editor, input: &str) -> Vec<String> {
        terminal.execute(input, editor)
    }

    #[test]
    fn test_ls_lists_root() {
        let (mut terminal, mut editor) = (Terminal::new(), Editor::default());
        assert_eq!(
            run(&mut terminal, &mut editor, "ls"),
            vec!["📁 src/", "📁 public/", "📄 package.json"]
        );
        assert_eq!(run(&mut terminal, &mut editor, "DIR").len(), 3);
    }

    #[test]
    fn test_mkdir_and_touch_mutate_root() {
        let (mut terminal, mut editor) = (Terminal::new(), Editor::default());
        assert_eq!(
            run(&mut terminal, &mut editor, "mkdir assets"),
            vec!["Created directory: assets"]
        );
        assert_eq!(
            run(&mut terminal, &mut editor, "touch Hero.tsx"),
            vec!["Created file: Hero.tsx"]
        );
        let roots = editor.tree().roots();
        assert!(roots[3].is_folder());
        assert_eq!(roots[4].language(), Some(Language::Tsx));
        assert_eq!(editor.active_file(), Some("App.jsx"), "touch does not open");
    }

    #[test]
    fn test_missing_names_report_errors() {
        let (mut terminal, mut editor) = (Terminal::new(), Editor::default());
        assert_eq!(
            run(&mut terminal, &mut editor, "mkdir  "),
            vec!["Command not found: mkdir. Type 'help' for available commands."]
        );
        assert_eq!(
            run(&mut terminal, &mut editor, "new  x"),
            vec!["Error: File name required"]
        );
    }

    #[test]
    fn test_unknown_command() {
        let (mut terminal, mut editor) = (Terminal::new(), Editor::default());
        assert_eq!(
            run(&mut terminal, &mut editor, "rm -rf /"),
            vec!["Command not found: rm -rf /. Type 'help' for available commands."]
        );
    }

    #[test]
    fn test_log_echoes_and_clear_resets() {
        let (mut terminal, mut editor) = (Terminal::new(), Editor::default());
        run(&mut terminal, &mut editor, "help");
        assert_eq!(terminal.log()[0], READY_BANNER);
        assert_eq!(terminal.log()[1], "$ help");
        assert_eq!(terminal.log().len(), 2 + HELP.len());

        assert!(run(&mut terminal, &mut editor, "cls").is_empty());
        assert_eq!(terminal.log(), &[CLEARED_BANNER.to_string()]);
        assert!(run(&mut terminal, &mut editor, "   ").is_empty());
        assert_eq!(terminal.log().len(), 1);
    }

    #[test]
    fn test_package_and_script_commands() {
        let (mut terminal, mut editor) = (Terminal::new(), Editor::default());
        assert_eq!(
            run(&mut terminal, &mut editor, "npm install axios lodash")[0],
            "Installing axios lodash..."
        );
        assert_eq!(run(&mut terminal, &mut editor, "yarn add")[0], "Installing packages...");
        assert_eq!(
            run(&mut terminal, &mut editor, "npm run build")[0],
            "Building project..."
        );
        assert_eq!(
            run(&mut terminal, &mut editor, "npm run dev")[0],
            "Running script: dev..."
        );
        assert_eq!(run(&mut terminal, &mut editor, "yarn")[0], "Running script: start...");
        assert_eq!(
            run(&mut terminal, &mut editor, "pnpm test")[0],
            "Running script: test..."
        );
    }

    #[test]
    fn test_cd_only_reports() {
        let (mut terminal, mut editor) = (Terminal::new(), Editor::default());
        assert_eq!(
            run(&mut terminal, &mut editor, "cd src"),
            vec!["Changed directory to src"]
        );
        assert_eq!(
            run(&mut terminal, &mut editor, "cd package.json"),
            vec!["Directory not found: package.json"]
        );
    }

    #[test]
    fn test_git_commands() {
        let (mut terminal, mut editor) = (Terminal::new(), Editor::default());
        assert_eq!(run(&mut terminal, &mut editor, "git status").len(), 4);
        assert_eq!(
            run(&mut terminal, &mut editor, "git rebase"),
            vec!["Git command executed: rebase"]
        );
    }

    #[test]
    fn test_export_log_lines() {
        let mut terminal = Terminal::new();
        assert!(!terminal.export_to_github("", "me/site"));
        assert!(terminal.export_to_github("tok", "me/site"));
        assert_eq!(
            terminal.log().last().unwrap(),
            "Your project is now available at: https://github.com/me/site"
        );
        terminal.download_project();
        assert_eq!(terminal.log().last().unwrap(), "Download started!");
    }
}
