//! Marshalling work onto the UI thread.
//!
//! The component tree, the decoder's buffer, and the focus pointer are
//! owned by one logical thread of control. Other threads never touch
//! widget state directly: they enqueue an action through a [`UiHandle`]
//! and the UI thread drains the queue between input-processing cycles.
//! This single-producer-per-handle/single-consumer channel is the only
//! concurrency primitive the core requires.

use std::sync::mpsc;

use tracing::trace;

use crate::window::Window;

/// A deferred mutation run on the UI thread.
pub type Action = Box<dyn FnOnce(&mut Window) + Send>;

/// The UI thread's end of the action channel.
pub struct ActionQueue {
    /// Producer kept so new handles can be minted.
    tx: mpsc::Sender<Action>,
    /// Consumer drained between input cycles.
    rx: mpsc::Receiver<Action>,
}

impl Default for ActionQueue {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl ActionQueue {
    /// Construct an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a handle for producers on other threads.
    pub fn handle(&self) -> UiHandle {
        UiHandle {
            tx: self.tx.clone(),
        }
    }

    /// Run every queued action against the window, in order. Returns the
    /// number of actions run. Queued actions always run to completion.
    pub fn drain(&mut self, window: &mut Window) -> usize {
        let mut count = 0;
        while let Ok(action) = self.rx.try_recv() {
            action(window);
            count += 1;
        }
        count
    }
}

/// A cloneable handle that marshals actions onto the UI thread.
#[derive(Clone)]
pub struct UiHandle {
    /// Sender half of the action channel.
    tx: mpsc::Sender<Action>,
}

impl UiHandle {
    /// Enqueue an action for the UI thread.
    ///
    /// If the queue no longer exists the action is silently dropped: a
    /// widget whose window has no owner yet is not visible, and this is a
    /// documented no-op rather than a failure.
    pub fn submit(&self, action: impl FnOnce(&mut Window) + Send + 'static) {
        if self.tx.send(Box::new(action)).is_err() {
            trace!("action dropped: queue disconnected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutils::TestPane;

    #[test]
    fn actions_run_in_order() {
        let mut queue = ActionQueue::new();
        let handle = queue.handle();
        let mut window = Window::new(TestPane::new());

        let root = window.root();
        handle.submit(move |w| {
            let _ = w.add_child(root, TestPane::new());
        });
        handle.submit(move |w| {
            let _ = w.add_child(root, TestPane::new());
        });
        assert_eq!(queue.drain(&mut window), 2);
        assert_eq!(window.children(root).unwrap().len(), 2);
        assert_eq!(queue.drain(&mut window), 0);
    }

    #[test]
    fn submit_after_queue_dropped_is_a_noop() {
        let queue = ActionQueue::new();
        let handle = queue.handle();
        drop(queue);
        handle.submit(|_| panic!("must not run"));
    }

    #[test]
    fn cross_thread_submit() {
        let mut queue = ActionQueue::new();
        let handle = queue.handle();
        let mut window = Window::new(TestPane::new());
        let root = window.root();

        let worker = std::thread::spawn(move || {
            handle.submit(move |w| {
                let _ = w.add_child(root, TestPane::new());
            });
        });
        worker.join().unwrap();
        assert_eq!(queue.drain(&mut window), 1);
        assert_eq!(window.children(root).unwrap().len(), 1);
    }
}
