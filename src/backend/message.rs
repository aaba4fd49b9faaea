//! Log messages, immediate or lazily produced.

use std::fmt;

type Producer = Box<dyn FnOnce() -> String + Send>;

/// A message handed to a level handler.
///
/// Lazy messages are only rendered when a handler actually forwards them to
/// the backend, and at most once.
pub enum Message {
    Text(String),
    Lazy(Producer),
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Message::Text(text.into())
    }

    pub fn lazy<F>(producer: F) -> Self
    where
        F: FnOnce() -> String + Send + 'static,
    {
        Message::Lazy(Box::new(producer))
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Message::Lazy(_))
    }

    /// Produce the final string, running the producer if needed.
    pub fn render(self) -> String {
        match self {
            Message::Text(text) => text,
            Message::Lazy(producer) => producer(),
        }
    }

    /// Transform the rendered text without forcing a lazy producer.
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnOnce(String) -> String + Send + 'static,
    {
        match self {
            Message::Text(text) => Message::Text(f(text)),
            Message::Lazy(producer) => Message::Lazy(Box::new(move || f(producer()))),
        }
    }

    /// Prepend `head` followed by a space.
    pub fn prepend(self, head: String) -> Self {
        self.map(move |body| format!("{head} {body}"))
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Message::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_map_does_not_force_producer() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let msg = Message::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "built".to_string()
        })
        .prepend("[TAG]".to_string());

        assert!(msg.is_lazy());
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(msg.render(), "[TAG] built");
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_both_forms_render_identically() {
        let eager = Message::from("x").prepend("[A]".into());
        let lazy = Message::lazy(|| "x".into()).prepend("[A]".into());
        assert_eq!(eager.render(), lazy.render());
    }
}
