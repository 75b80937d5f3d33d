//! Tests for single-flight dispatch, ordering, and routing.

use sage_core::{CapabilitySet, Document, FileType};
use sage_dispatch::{Dispatcher, Request, SearchMode, Session, Surface};
use sage_provider::AiProvider;
use sage_search::Searcher;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::timeout;

#[derive(Default)]
struct FakeState {
    concurrent: AtomicUsize,
    max_concurrent: AtomicUsize,
    calls: Mutex<Vec<String>>,
    delays: Mutex<HashMap<String, Duration>>,
}

/// Provider that records prompts and sleeps a per-prompt delay.
#[derive(Clone, Default)]
struct FakeProvider {
    state: Arc<FakeState>,
}

impl FakeProvider {
    fn with_delays(delays: &[(&str, u64)]) -> Self {
        let provider = Self::default();
        let mut map = provider.state.delays.lock().unwrap();
        for (prompt, millis) in delays {
            map.insert((*prompt).to_owned(), Duration::from_millis(*millis));
        }
        drop(map);
        provider
    }

    fn calls(&self) -> Vec<String> {
        self.state.calls.lock().unwrap().clone()
    }
}

impl AiProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "Fake"
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::NONE
    }

    async fn generate_response(&self, prompt: &str) -> String {
        let live = self.state.concurrent.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_concurrent.fetch_max(live, Ordering::SeqCst);
        self.state.calls.lock().unwrap().push(prompt.to_owned());

        let delay = self
            .state
            .delays
            .lock()
            .unwrap()
            .get(prompt)
            .copied()
            .unwrap_or(Duration::from_millis(1));
        tokio::time::sleep(delay).await;

        self.state.concurrent.fetch_sub(1, Ordering::SeqCst);
        format!("echo:{prompt}")
    }
}

#[derive(Clone, Default)]
struct FakeSearcher {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Searcher for FakeSearcher {
    async fn search(&self, query: &str) -> String {
        self.calls.lock().unwrap().push(query.to_owned());
        format!("results for {query}")
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Message { text: String, from_assistant: bool },
    Loading(bool),
}

#[derive(Default)]
struct RecordingSurface {
    events: Mutex<Vec<Event>>,
    idle: Notify,
}

impl RecordingSurface {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn assistant_messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Message {
                    text,
                    from_assistant: true,
                } => Some(text),
                _ => None,
            })
            .collect()
    }

    async fn wait_idle(&self) {
        timeout(Duration::from_secs(5), self.idle.notified())
            .await
            .expect("dispatcher never went idle");
    }
}

impl Surface for RecordingSurface {
    fn message(&self, text: &str, from_assistant: bool) {
        self.events.lock().unwrap().push(Event::Message {
            text: text.to_owned(),
            from_assistant,
        });
    }

    fn loading(&self, active: bool) {
        self.events.lock().unwrap().push(Event::Loading(active));
        if !active {
            self.idle.notify_one();
        }
    }
}

fn setup(
    provider: FakeProvider,
) -> (
    Dispatcher<FakeProvider, FakeSearcher>,
    FakeSearcher,
    Arc<RecordingSurface>,
) {
    let searcher = FakeSearcher::default();
    let surface = Arc::new(RecordingSurface::default());
    let dispatcher = Dispatcher::new(
        Session::new(provider),
        searcher.clone(),
        surface.clone() as Arc<dyn Surface>,
    );
    (dispatcher, searcher, surface)
}

fn ai_request(query: &str) -> Request {
    Request {
        query: query.to_owned(),
        mode: SearchMode::Ai,
        document: None,
    }
}

#[tokio::test]
async fn test_completions_arrive_in_submission_order() {
    // The first request is the slowest; order must still hold.
    let provider = FakeProvider::with_delays(&[("A", 40), ("B", 10), ("C", 1)]);
    let (dispatcher, _, surface) = setup(provider.clone());

    dispatcher.submit(ai_request("A"));
    dispatcher.submit(ai_request("B"));
    dispatcher.submit(ai_request("C"));
    surface.wait_idle().await;

    let responses = surface.assistant_messages();
    assert_eq!(responses.len(), 3);
    assert!(responses[0].contains("echo:A"));
    assert!(responses[1].contains("echo:B"));
    assert!(responses[2].contains("echo:C"));
}

#[tokio::test]
async fn test_single_flight() {
    let provider = FakeProvider::with_delays(&[("A", 20), ("B", 20), ("C", 20)]);
    let (dispatcher, _, surface) = setup(provider.clone());

    dispatcher.submit(ai_request("A"));
    dispatcher.submit(ai_request("B"));
    dispatcher.submit(ai_request("C"));
    surface.wait_idle().await;

    assert_eq!(provider.state.max_concurrent.load(Ordering::SeqCst), 1);
    assert_eq!(provider.calls(), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_loading_toggles_once_per_batch() {
    let (dispatcher, _, surface) = setup(FakeProvider::default());

    dispatcher.submit(ai_request("A"));
    dispatcher.submit(ai_request("B"));
    surface.wait_idle().await;

    let loading: Vec<bool> = surface
        .events()
        .into_iter()
        .filter_map(|event| match event {
            Event::Loading(active) => Some(active),
            _ => None,
        })
        .collect();
    assert_eq!(loading, vec![true, false]);
}

#[tokio::test]
async fn test_query_is_echoed_before_loading() {
    let (dispatcher, _, surface) = setup(FakeProvider::default());

    dispatcher.submit(ai_request("hello"));
    surface.wait_idle().await;

    let events = surface.events();
    assert_eq!(
        events[0],
        Event::Message {
            text: "hello".to_owned(),
            from_assistant: false,
        }
    );
    assert_eq!(events[1], Event::Loading(true));
}

#[tokio::test]
async fn test_web_mode_skips_provider() {
    let provider = FakeProvider::default();
    let (dispatcher, searcher, surface) = setup(provider.clone());

    dispatcher.submit(Request {
        query: "weather".to_owned(),
        mode: SearchMode::Web,
        document: None,
    });
    surface.wait_idle().await;

    assert!(provider.calls().is_empty());
    assert_eq!(*searcher.calls.lock().unwrap(), ["weather"]);

    let responses = surface.assistant_messages();
    assert!(responses[0].contains("Web Search Results:\nresults for weather"));
    assert!(!responses[0].contains("AI Response"));
}

#[tokio::test]
async fn test_both_mode_combines_sections() {
    let provider = FakeProvider::default();
    let (dispatcher, searcher, surface) = setup(provider.clone());

    dispatcher.submit(Request::query("rust"));
    surface.wait_idle().await;

    let response = &surface.assistant_messages()[0];
    assert!(response.contains("AI Response:\necho:rust"));
    assert!(response.contains("Web Search Results:\nresults for rust"));
    assert_eq!(provider.calls(), vec!["rust"]);
    assert_eq!(*searcher.calls.lock().unwrap(), ["rust"]);
}

#[tokio::test]
async fn test_document_routes_through_analysis() {
    let provider = FakeProvider::default();
    let (dispatcher, _, surface) = setup(provider.clone());

    dispatcher.submit(Request {
        query: "Analyzing text file: notes.txt".to_owned(),
        mode: SearchMode::Ai,
        document: Some(Document::new("doc body", FileType::Text)),
    });
    surface.wait_idle().await;

    assert_eq!(
        provider.calls(),
        vec!["Please analyze this text content:\n\ndoc body"]
    );
}

#[tokio::test]
async fn test_replacing_provider_switches_subsequent_calls() {
    let first = FakeProvider::default();
    let (dispatcher, _, surface) = setup(first.clone());

    dispatcher.submit(ai_request("one"));
    surface.wait_idle().await;

    let second = FakeProvider::default();
    dispatcher.session().replace(second.clone());

    dispatcher.submit(ai_request("two"));
    surface.wait_idle().await;

    assert_eq!(first.calls(), vec!["one"]);
    assert_eq!(second.calls(), vec!["two"]);
}

#[test]
fn test_search_mode_parse() {
    assert_eq!("ai".parse::<SearchMode>().unwrap(), SearchMode::Ai);
    assert_eq!("web".parse::<SearchMode>().unwrap(), SearchMode::Web);
    assert_eq!("both".parse::<SearchMode>().unwrap(), SearchMode::Both);
    assert!("everything".parse::<SearchMode>().is_err());
}
