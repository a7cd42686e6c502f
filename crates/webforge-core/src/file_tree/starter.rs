//! The canonical starter project every session begins with.

use super::node::FileNode;
use crate::language::Language;

pub const APP_JSX: &str = r#"import React from 'react';
import './App.css';

function App() {
  return (
    <div className="app">
      <h1>Добро пожаловать!</h1>
      <p>Начните создавать ваш сайт с помощью ИИ.</p>
    </div>
  );
}

export default App;"#;

pub const APP_CSS: &str = r#".app {
  text-align: center;
  padding: 2rem;
  max-width: 1200px;
  margin: 0 auto;
}"#;

pub const INDEX_JS: &str = r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import './index.css';
import App from './App';

const root = ReactDOM.createRoot(document.getElementById('root'));
root.render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);"#;

pub const INDEX_CSS: &str = r#"body {
  margin: 0;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Oxygen',
    'Ubuntu', 'Cantarell', 'Fira Sans', 'Droid Sans', 'Helvetica Neue',
    sans-serif;
  -webkit-font-smoothing: antialiased;
  -moz-osx-font-smoothing: grayscale;
}

code {
  font-family: source-code-pro, Menlo, Monaco, Consolas, 'Courier New',
    monospace;
}"#;

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ru">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Мой Сайт</title>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>"#;

pub const PACKAGE_JSON: &str = r#"{
  "name": "my-website",
  "version": "0.1.0",
  "private": true,
  "dependencies": {
    "react": "^18.2.0",
    "react-dom": "^18.2.0",
    "react-scripts": "5.0.1"
  },
  "scripts": {
    "start": "react-scripts start",
    "build": "react-scripts build",
    "test": "react-scripts test",
    "eject": "react-scripts eject"
  }
}"#;

/// Name of the entry component, opened when a session starts.
pub const ENTRY_FILE: &str = "App.jsx";

/// Builds the starter tree. `entry_source` replaces the entry component's
/// content when given and non-empty.
pub fn starter_nodes(entry_source: Option<&str>) -> Vec<FileNode> {
    let entry = entry_source.filter(|s| !s.is_empty()).unwrap_or(APP_JSX);
    vec![
        FileNode::folder(
            "src",
            vec![
                FileNode::file(ENTRY_FILE, entry, Language::Jsx),
                FileNode::file("App.css", APP_CSS, Language::Css),
                FileNode::file("index.js", INDEX_JS, Language::Js),
                FileNode::file("index.css", INDEX_CSS, Language::Css),
            ],
        ),
        FileNode::folder(
            "public",
            vec![FileNode::file("index.html", INDEX_HTML, Language::Html)],
        ),
        FileNode::file("package.json", PACKAGE_JSON, Language::Json),
    ]
}
