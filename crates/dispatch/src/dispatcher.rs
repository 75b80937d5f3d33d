//! FIFO single-flight dispatcher.

use crate::{Session, Surface};
use sage_core::Document;
use sage_provider::AiProvider;
use sage_search::Searcher;
use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// How a submitted query routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// AI provider only.
    Ai,
    /// Web search only.
    Web,
    /// AI provider followed by web search.
    #[default]
    Both,
}

impl SearchMode {
    fn wants_ai(self) -> bool {
        matches!(self, Self::Ai | Self::Both)
    }

    fn wants_web(self) -> bool {
        matches!(self, Self::Web | Self::Both)
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai" => Ok(Self::Ai),
            "web" => Ok(Self::Web),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown search mode: {other}")),
        }
    }
}

/// A pending user query.
#[derive(Debug, Clone)]
pub struct Request {
    pub query: String,
    pub mode: SearchMode,
    /// Loaded document; its presence routes the AI leg through
    /// `analyze_file` instead of `generate_response`.
    pub document: Option<Document>,
}

impl Request {
    /// A plain query with the default mode and no document.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            mode: SearchMode::default(),
            document: None,
        }
    }
}

struct State {
    queue: VecDeque<Request>,
    busy: bool,
}

struct Inner<P, S> {
    session: Session<P>,
    searcher: S,
    surface: Arc<dyn Surface>,
    state: Mutex<State>,
}

/// Serializes submitted requests into a single background drain task.
///
/// At most one provider call is in flight at any instant; completions are
/// delivered in exact submission order because a new dispatch cannot start
/// until the previous one's completion has run.
pub struct Dispatcher<P, S> {
    inner: Arc<Inner<P, S>>,
}

impl<P, S> Clone for Dispatcher<P, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: AiProvider, S: Searcher> Dispatcher<P, S> {
    /// Create a dispatcher owning the session slot.
    pub fn new(session: Session<P>, searcher: S, surface: Arc<dyn Surface>) -> Self {
        Self {
            inner: Arc::new(Inner {
                session,
                searcher,
                surface,
                state: Mutex::new(State {
                    queue: VecDeque::new(),
                    busy: false,
                }),
            }),
        }
    }

    /// The active-provider slot.
    pub fn session(&self) -> &Session<P> {
        &self.inner.session
    }

    /// Queue a request, starting the drain task if the dispatcher is idle.
    ///
    /// The query is echoed to the surface immediately, on the submitting
    /// context.
    pub fn submit(&self, request: Request) {
        self.inner.surface.message(&request.query, false);

        let spawn_drain = {
            let mut state = self.inner.state.lock().expect("dispatch lock poisoned");
            state.queue.push_back(request);
            if state.busy {
                false
            } else {
                state.busy = true;
                // Emitted under the state lock so loading transitions
                // strictly alternate with the drain task's.
                self.inner.surface.loading(true);
                true
            }
        };

        if spawn_drain {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                Inner::drain(inner).await;
            });
        }
    }

    /// Whether a request is currently executing.
    pub fn is_busy(&self) -> bool {
        self.inner.state.lock().expect("dispatch lock poisoned").busy
    }

    /// Number of requests waiting behind the in-flight one.
    pub fn pending(&self) -> usize {
        self.inner
            .state
            .lock()
            .expect("dispatch lock poisoned")
            .queue
            .len()
    }
}

impl<P: AiProvider, S: Searcher> Inner<P, S> {
    async fn drain(inner: Arc<Self>) {
        loop {
            let request = {
                let mut state = inner.state.lock().expect("dispatch lock poisoned");
                match state.queue.pop_front() {
                    Some(request) => request,
                    None => {
                        state.busy = false;
                        inner.surface.loading(false);
                        return;
                    }
                }
            };

            tracing::debug!("dispatching query: {}", request.query);
            let response = inner.execute(&request).await;
            inner.surface.message(&response, true);
        }
    }

    async fn execute(&self, request: &Request) -> String {
        let mut sections = Vec::new();

        if request.mode.wants_ai() {
            let provider = self.session.active();
            let answer = match &request.document {
                Some(document) => {
                    provider
                        .analyze_file(&document.content, document.file_type)
                        .await
                }
                None => provider.generate_response(&request.query).await,
            };
            sections.push(format!("AI Response:\n{answer}\n"));
        }

        if request.mode.wants_web() {
            let results = self.searcher.search(&request.query).await;
            sections.push(format!("\nWeb Search Results:\n{results}"));
        }

        sections.join("\n")
    }
}
