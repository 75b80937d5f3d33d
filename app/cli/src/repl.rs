//! Interactive chat REPL.

use crate::config::AppConfig;
use crate::surface::{ReplSurface, SurfaceEvent};
use anyhow::Result;
use rustyline::error::ReadlineError;
use sage_core::Document;
use sage_dispatch::{Dispatcher, Request, SearchMode, Session};
use sage_provider::{Client, Provider};
use sage_search::WebSearcher;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

const HELP: &str = "\
commands:
  /provider <none|ollama|openai|gemini>   switch the AI backend
  /key <openai|gemini> <key>              store an API key
  /ollama <host> <port> <model>           local server settings
  /mode <ai|web|both>                     routing for plain queries
  /open <path>                            load a document and analyze it
  /recent                                 list recently opened files
  /clear                                  drop the loaded document
  /help                                   show this message
  /quit                                   exit";

/// Interactive chat loop over the dispatcher.
pub struct Repl {
    dispatcher: Dispatcher<Provider, WebSearcher>,
    events: mpsc::UnboundedReceiver<SurfaceEvent>,
    editor: rustyline::DefaultEditor,
    client: Client,
    config: AppConfig,
    config_path: PathBuf,
    mode: SearchMode,
    document: Option<Document>,
}

impl Repl {
    /// Build the session, dispatcher, and editor from configuration.
    pub fn new(config: AppConfig, config_path: PathBuf, mode: SearchMode) -> Result<Self> {
        let client = Client::new();
        let session = Session::from_config(&config.provider_config(), client.clone());
        let (surface, events) = ReplSurface::channel();
        let dispatcher = Dispatcher::new(session, WebSearcher::new(client.clone()), Arc::new(surface));
        let mut editor = rustyline::DefaultEditor::new()?;
        if let Some(path) = history_path(&config_path) {
            let _ = editor.load_history(&path);
        }

        Ok(Self {
            dispatcher,
            events,
            editor,
            client,
            config,
            config_path,
            mode,
            document: None,
        })
    }

    /// Run the interactive loop until EOF or `/quit`.
    pub async fn run(&mut self) -> Result<()> {
        println!("Sage chat (/help for commands, Ctrl+D to exit)");
        println!("provider: {}", self.config.ai_provider);

        loop {
            match self.editor.readline("> ") {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(&line);

                    if let Some(command) = line.strip_prefix('/') {
                        if !self.handle_command(command).await {
                            break;
                        }
                    } else {
                        self.submit(line, None);
                        self.drain_events().await;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }

        self.save_history();
        Ok(())
    }

    /// Handle a slash command; returns `false` to exit the loop.
    async fn handle_command(&mut self, command: &str) -> bool {
        let mut parts = command.split_whitespace();
        match parts.next().unwrap_or_default() {
            "help" => println!("{HELP}"),
            "quit" | "exit" => return false,
            "provider" => match parts.next() {
                Some(kind @ ("none" | "ollama" | "openai" | "gemini")) => {
                    self.config.ai_provider = kind.to_owned();
                    self.persist();
                    self.reconfigure();
                    println!("provider set to {kind}");
                }
                _ => println!("usage: /provider <none|ollama|openai|gemini>"),
            },
            "key" => match (parts.next(), parts.next()) {
                (Some(provider), Some(key)) => {
                    if self.config.set_api_key(provider, key) {
                        self.persist();
                        self.reconfigure();
                        println!("{provider} key stored");
                    } else {
                        println!("usage: /key <openai|gemini> <key>");
                    }
                }
                _ => println!("usage: /key <openai|gemini> <key>"),
            },
            "ollama" => {
                let (host, port, model) = (parts.next(), parts.next(), parts.next());
                match (host, port.and_then(|p| p.parse().ok()), model) {
                    (Some(host), Some(port), Some(model)) => {
                        self.config.ollama.host = host.to_owned();
                        self.config.ollama.port = port;
                        self.config.ollama.model = model.into();
                        self.persist();
                        self.reconfigure();
                        println!("ollama settings saved");
                    }
                    _ => println!("usage: /ollama <host> <port> <model>"),
                }
            }
            "mode" => match parts.next().map(|mode| mode.parse::<SearchMode>()) {
                Some(Ok(mode)) => {
                    self.mode = mode;
                    println!("mode set");
                }
                _ => println!("usage: /mode <ai|web|both>"),
            },
            "open" => {
                let path = parts.collect::<Vec<_>>().join(" ");
                if path.is_empty() {
                    println!("usage: /open <path>");
                } else {
                    self.open_document(Path::new(&path)).await;
                }
            }
            "recent" => {
                if self.config.recent_files.is_empty() {
                    println!("no recent files");
                }
                for path in &self.config.recent_files {
                    println!("{}", path.display());
                }
            }
            "clear" => {
                self.document = None;
                println!("document cleared");
            }
            other => println!("unknown command: /{other} (try /help)"),
        }
        true
    }

    /// Load a document and submit an analysis request for it.
    async fn open_document(&mut self, path: &Path) {
        match Document::from_path(path) {
            Ok(document) => {
                self.config.add_recent_file(path);
                self.persist();

                let query = format!("Analyzing {} file: {}", document.file_type, path.display());
                self.document = Some(document.clone());
                self.submit(query, Some(document));
                self.drain_events().await;
            }
            Err(e) => println!("failed to read file: {e}"),
        }
    }

    fn submit(&self, query: String, document: Option<Document>) {
        self.dispatcher.submit(Request {
            query,
            mode: self.mode,
            document: document.or_else(|| self.document.clone()),
        });
    }

    /// Print surface events until the pending batch completes.
    async fn drain_events(&mut self) {
        while let Some(event) = self.events.recv().await {
            match event {
                SurfaceEvent::Message {
                    text,
                    from_assistant: true,
                } => println!("{text}"),
                // The user's own line is already on screen.
                SurfaceEvent::Message { .. } => {}
                SurfaceEvent::Loading(true) => println!("..."),
                SurfaceEvent::Loading(false) => break,
            }
        }
    }

    fn reconfigure(&self) {
        let provider_config = self.config.provider_config();
        if let Err(e) = provider_config.validate() {
            println!("warning: {e}");
        }
        self.dispatcher
            .session()
            .reconfigure(&provider_config, self.client.clone());
    }

    fn persist(&self) {
        if let Err(e) = self.config.save(&self.config_path) {
            tracing::warn!("failed to save config: {e}");
        }
    }

    fn save_history(&mut self) {
        if let Some(path) = history_path(&self.config_path) {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = self.editor.save_history(&path);
        }
    }
}

/// History file next to the configuration file.
fn history_path(config_path: &Path) -> Option<PathBuf> {
    config_path.parent().map(|dir| dir.join("history"))
}
