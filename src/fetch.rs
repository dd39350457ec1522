use std::fmt::Display;
use std::future::Future;

use log::error;

/// Loading/error/result triple for one async call site. Each consumer owns
/// its own instance; nothing is shared between call sites, so a stale error
/// in one view can never leak into another.
#[derive(Debug)]
pub struct FetchState<T> {
    is_loading: bool,
    err_msg: Option<String>,
    elems: Option<T>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchState<T> {
    /// Idle state: not loading, no error, no result yet.
    pub fn new() -> Self {
        Self {
            is_loading: false,
            err_msg: None,
            elems: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn err_msg(&self) -> Option<&str> {
        self.err_msg.as_deref()
    }

    pub fn elems(&self) -> Option<&T> {
        self.elems.as_ref()
    }

    pub fn take_elems(&mut self) -> Option<T> {
        self.elems.take()
    }

    /// Runs one fetch. On success the result replaces `elems` and any
    /// previous error is cleared; on failure `err_msg` becomes
    /// `"{context}: {message}"` and the previous result is kept. The loading
    /// flag is cleared on every exit path.
    pub async fn run<F, Fut, E>(&mut self, context: &str, producer: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.is_loading = true;
        match producer().await {
            Ok(value) => {
                self.elems = Some(value);
                self.err_msg = None;
            }
            Err(err) => {
                error!("{}: {}", context, err);
                self.err_msg = Some(format!("{}: {}", context, err));
            }
        }
        self.is_loading = false;
    }
}
