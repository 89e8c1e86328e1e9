//! Observable stores and action dispatch.
//!
//! A [`Store`] keeps its current value inside a `watch` channel, so every
//! publish is an atomic swap that all subscribers observe consistently.
//! State transitions are funnelled through a per-store single-consumer
//! action queue: a worker task pops one job at a time, reads the live value,
//! runs the transition (awaiting it if asynchronous) and publishes the
//! result. This makes the publish order equal to the dispatch order even
//! when asynchronous handlers complete out of order, and it means at most
//! one handler future is in flight per store.
//!
//! There is no cancellation of superseded work: a job that became stale
//! while queued still runs to completion and publishes; whatever was
//! dispatched after it is applied after it.

use std::{fmt, future::Future, pin::Pin, sync::Arc};

use tokio::sync::{mpsc, watch};
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};

use crate::lens::{Lens, Then};

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A queued state transition. Receives the live value at apply time and
/// yields the value to publish, or `None` to leave the store unchanged.
type Job<T> = Box<dyn FnOnce(T) -> BoxFuture<Option<T>> + Send>;

/// Error dispatching an action.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The store's worker task is gone (its runtime shut down).
    #[error("store action queue is closed")]
    StoreClosed,
}

//--------------------------------------------------------------------------------------------------

/// An observable holder of a single current value of type `T`.
///
/// Cloning a `Store` yields another handle to the same state; the value
/// itself lives behind the handles and is torn down when the last one is
/// dropped.
///
/// Must be created from within a tokio runtime: the store spawns the worker
/// task that drains its action queue.
pub struct Store<T> {
    value: Arc<watch::Sender<T>>,
    jobs: mpsc::UnboundedSender<Job<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Store {
            value: self.value.clone(),
            jobs: self.jobs.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Store").field("value", &*self.value.borrow()).finish()
    }
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Creates a store holding `initial`.
    pub fn new(initial: T) -> Store<T> {
        let (value_tx, _) = watch::channel(initial);
        let value = Arc::new(value_tx);
        let (jobs, mut job_rx) = mpsc::unbounded_channel::<Job<T>>();

        let worker = value.clone();
        tokio::spawn(async move {
            while let Some(job) = job_rx.recv().await {
                let current = worker.borrow().clone();
                if let Some(next) = job(current).await {
                    worker.send_replace(next);
                }
            }
        });

        Store { value, jobs }
    }

    /// Returns a snapshot of the current value.
    pub fn current(&self) -> T {
        self.value.borrow().clone()
    }

    /// Subscribes to value changes.
    ///
    /// The receiver sees the value as of the call and every later publish.
    /// Subscribing or dropping receivers during a publish is safe; the
    /// channel snapshots its subscriber set internally.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.value.subscribe()
    }

    /// The store's value-change stream: yields the current value
    /// immediately, then every published update.
    ///
    /// This is the rendering boundary; a view subscribes here and re-renders
    /// per item.
    pub fn stream(&self) -> impl Stream<Item = T> + Send {
        WatchStream::new(self.value.subscribe())
    }

    /// Replaces the current value and publishes it to all subscribers.
    ///
    /// Goes through the action queue like any other update, so it is ordered
    /// with respect to concurrently dispatched actions.
    pub fn update(&self, new_value: T) -> Result<(), DispatchError> {
        self.enqueue(Box::new(move |_| Box::pin(async move { Some(new_value) })))
    }

    /// Registers a synchronous action handler.
    ///
    /// Dispatching an action applies `f(current, action)` and publishes the
    /// result.
    pub fn handle<A, F>(&self, f: F) -> Handler<A>
    where
        A: Send + 'static,
        F: Fn(T, A) -> T + Send + Sync + 'static,
    {
        let jobs = self.jobs.clone();
        let f = Arc::new(f);
        Handler::new(move |action: A| {
            let f = f.clone();
            let job: Job<T> = Box::new(move |current| {
                let next = f(current, action);
                Box::pin(async move { Some(next) })
            });
            jobs.send(job).map_err(|_| DispatchError::StoreClosed)
        })
    }

    /// Registers an asynchronous action handler.
    ///
    /// The handler's future runs on the store's queue; the next queued
    /// action starts only after it resolves, so results are published in
    /// dispatch order regardless of I/O completion order.
    ///
    /// On failure the value is left unchanged and the error is logged at
    /// `warn` level. Absent any other handling, a failed dispatch therefore
    /// does not update the rendered view; this is the intended default, not
    /// an accident. Use [`Store::handle_async_or`] to substitute a fallback
    /// value instead.
    pub fn handle_async<A, E, F, Fut>(&self, f: F) -> Handler<A>
    where
        A: Send + 'static,
        E: fmt::Display + Send + 'static,
        F: Fn(T, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let jobs = self.jobs.clone();
        let f = Arc::new(f);
        Handler::new(move |action: A| {
            let f = f.clone();
            let job: Job<T> = Box::new(move |current| {
                let fut = f(current, action);
                Box::pin(async move {
                    match fut.await {
                        Ok(next) => Some(next),
                        Err(err) => {
                            tracing::warn!(error = %err, "action failed, value unchanged");
                            None
                        }
                    }
                })
            });
            jobs.send(job).map_err(|_| DispatchError::StoreClosed)
        })
    }

    /// Like [`Store::handle_async`], but on failure publishes
    /// `fallback(current, error)` instead of leaving the value unchanged.
    pub fn handle_async_or<A, E, F, Fut, FB>(&self, f: F, fallback: FB) -> Handler<A>
    where
        A: Send + 'static,
        E: fmt::Display + Send + 'static,
        F: Fn(T, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        FB: Fn(T, E) -> T + Send + Sync + 'static,
    {
        let jobs = self.jobs.clone();
        let f = Arc::new(f);
        let fallback = Arc::new(fallback);
        Handler::new(move |action: A| {
            let f = f.clone();
            let fallback = fallback.clone();
            let job: Job<T> = Box::new(move |current| {
                let fut = f(current.clone(), action);
                Box::pin(async move {
                    match fut.await {
                        Ok(next) => Some(next),
                        Err(err) => {
                            tracing::warn!(error = %err, "action failed, applying fallback");
                            Some(fallback(current, err))
                        }
                    }
                })
            });
            jobs.send(job).map_err(|_| DispatchError::StoreClosed)
        })
    }

    /// Derives a sub-store that projects reads and writes through `lens`.
    pub fn sub<C>(&self, lens: impl Lens<T, C> + 'static) -> SubStore<T, C>
    where
        C: Clone + Send + Sync + 'static,
    {
        SubStore {
            value: self.value.clone(),
            jobs: self.jobs.clone(),
            lens: Arc::new(lens),
        }
    }

    fn enqueue(&self, job: Job<T>) -> Result<(), DispatchError> {
        self.jobs.send(job).map_err(|_| DispatchError::StoreClosed)
    }
}

//--------------------------------------------------------------------------------------------------

/// Dispatch entry point for actions of type `A`.
///
/// Cheap to clone; typically handed to UI event callbacks.
pub struct Handler<A> {
    submit: Arc<dyn Fn(A) -> Result<(), DispatchError> + Send + Sync>,
}

impl<A> Clone for Handler<A> {
    fn clone(&self) -> Self {
        Handler {
            submit: self.submit.clone(),
        }
    }
}

impl<A> Handler<A> {
    fn new(submit: impl Fn(A) -> Result<(), DispatchError> + Send + Sync + 'static) -> Handler<A> {
        Handler {
            submit: Arc::new(submit),
        }
    }

    /// Submits an action payload to the handler's store.
    ///
    /// Returns as soon as the action is queued; the state transition itself
    /// runs on the store's worker.
    pub fn dispatch(&self, action: A) -> Result<(), DispatchError> {
        (self.submit)(action)
    }
}

//--------------------------------------------------------------------------------------------------

/// A store derived from a parent [`Store`] through a [`Lens`].
///
/// Owns no value of its own: reads project the parent's live value through
/// the lens, and writes are queued on the parent as read-modify-write jobs
/// that re-read the parent value immediately before constructing the
/// updated one. Two sibling sub-stores over disjoint fields therefore never
/// lose each other's writes.
pub struct SubStore<P, C> {
    value: Arc<watch::Sender<P>>,
    jobs: mpsc::UnboundedSender<Job<P>>,
    lens: Arc<dyn Lens<P, C>>,
}

impl<P, C> Clone for SubStore<P, C> {
    fn clone(&self) -> Self {
        SubStore {
            value: self.value.clone(),
            jobs: self.jobs.clone(),
            lens: self.lens.clone(),
        }
    }
}

impl<P, C> SubStore<P, C>
where
    P: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Returns a snapshot of the projected value.
    pub fn current(&self) -> C {
        self.lens.get(&self.value.borrow())
    }

    /// The projected value-change stream: re-derives on every parent
    /// publish, including publishes that did not touch the projected part.
    pub fn stream(&self) -> impl Stream<Item = C> + Send {
        let lens = self.lens.clone();
        WatchStream::new(self.value.subscribe()).map(move |p| lens.get(&p))
    }

    /// Like [`SubStore::stream`], but skips items equal to the previously
    /// yielded projection.
    pub fn changes(&self) -> impl Stream<Item = C> + Send
    where
        C: PartialEq,
    {
        let mut last: Option<C> = None;
        self.stream().filter(move |c| {
            if last.as_ref() == Some(c) {
                false
            } else {
                last = Some(c.clone());
                true
            }
        })
    }

    /// Replaces the projected part, writing back through the lens against
    /// the parent's value at apply time.
    pub fn update(&self, child: C) -> Result<(), DispatchError> {
        let lens = self.lens.clone();
        let job: Job<P> = Box::new(move |parent| {
            let next = lens.set(parent, child);
            Box::pin(async move { Some(next) })
        });
        self.jobs.send(job).map_err(|_| DispatchError::StoreClosed)
    }

    /// Registers a synchronous action handler over the projected value.
    pub fn handle<A, F>(&self, f: F) -> Handler<A>
    where
        A: Send + 'static,
        F: Fn(C, A) -> C + Send + Sync + 'static,
    {
        let jobs = self.jobs.clone();
        let lens = self.lens.clone();
        let f = Arc::new(f);
        Handler::new(move |action: A| {
            let lens = lens.clone();
            let f = f.clone();
            let job: Job<P> = Box::new(move |parent| {
                let child = f(lens.get(&parent), action);
                let next = lens.set(parent, child);
                Box::pin(async move { Some(next) })
            });
            jobs.send(job).map_err(|_| DispatchError::StoreClosed)
        })
    }

    /// Registers an asynchronous action handler over the projected value.
    ///
    /// Ordering and failure semantics match [`Store::handle_async`]; the
    /// write-back through the lens happens after the future resolves, using
    /// the parent value the job started from (nothing else can touch the
    /// parent while the job holds the queue).
    pub fn handle_async<A, E, F, Fut>(&self, f: F) -> Handler<A>
    where
        A: Send + 'static,
        E: fmt::Display + Send + 'static,
        F: Fn(C, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<C, E>> + Send + 'static,
    {
        let jobs = self.jobs.clone();
        let lens = self.lens.clone();
        let f = Arc::new(f);
        Handler::new(move |action: A| {
            let lens = lens.clone();
            let f = f.clone();
            let job: Job<P> = Box::new(move |parent| {
                let fut = f(lens.get(&parent), action);
                Box::pin(async move {
                    match fut.await {
                        Ok(child) => Some(lens.set(parent, child)),
                        Err(err) => {
                            tracing::warn!(error = %err, "action failed, value unchanged");
                            None
                        }
                    }
                })
            });
            jobs.send(job).map_err(|_| DispatchError::StoreClosed)
        })
    }

    /// Derives a nested sub-store by composing lenses.
    pub fn sub<G>(&self, lens: impl Lens<C, G> + 'static) -> SubStore<P, G>
    where
        G: Clone + Send + Sync + 'static,
    {
        SubStore {
            value: self.value.clone(),
            jobs: self.jobs.clone(),
            lens: Arc::new(Then(self.lens.clone(), lens, std::marker::PhantomData)),
        }
    }
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens::field_lens;
    use std::{convert::Infallible, time::Duration};
    use tokio::time::{sleep, timeout};

    #[derive(Clone, PartialEq, Debug)]
    struct Person {
        name: String,
        age: u32,
    }

    fn person() -> Person {
        Person {
            name: "A".to_owned(),
            age: 1,
        }
    }

    fn name_lens() -> impl Lens<Person, String> + 'static {
        field_lens(|p: &Person| p.name.clone(), |p, name| Person { name, ..p })
    }

    fn age_lens() -> impl Lens<Person, u32> + 'static {
        field_lens(|p: &Person| p.age, |p, age| Person { age, ..p })
    }

    /// Waits until the store's value satisfies `pred`, returning it.
    async fn settled<T, F>(store: &Store<T>, pred: F) -> T
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&T) -> bool,
    {
        let mut rx = store.subscribe();
        timeout(Duration::from_secs(5), async {
            loop {
                let value = rx.borrow_and_update().clone();
                if pred(&value) {
                    return value;
                }
                rx.changed().await.expect("store worker gone");
            }
        })
        .await
        .expect("store did not settle")
    }

    #[tokio::test]
    async fn update_publishes_to_subscribers() {
        let store = Store::new(0u32);
        let mut rx = store.subscribe();
        store.update(7).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 7);
        assert_eq!(store.current(), 7);
    }

    #[tokio::test]
    async fn handler_applies_current_and_action() {
        let store = Store::new(10u32);
        let add = store.handle(|n, delta: u32| n + delta);
        add.dispatch(5).unwrap();
        add.dispatch(1).unwrap();
        assert_eq!(settled(&store, |n| *n == 16).await, 16);
    }

    #[tokio::test(start_paused = true)]
    async fn async_results_publish_in_dispatch_order() {
        // The first action is slow, the second fast; appending to a Vec makes
        // any out-of-order publish visible in the final value.
        let store = Store::new(Vec::<u32>::new());
        let slow = store.handle_async(|mut acc: Vec<u32>, n: u32| async move {
            sleep(Duration::from_millis(50)).await;
            acc.push(n);
            Ok::<_, Infallible>(acc)
        });
        let fast = store.handle_async(|mut acc: Vec<u32>, n: u32| async move {
            acc.push(n);
            Ok::<_, Infallible>(acc)
        });

        slow.dispatch(1).unwrap();
        fast.dispatch(2).unwrap();

        let result = settled(&store, |acc| acc.len() == 2).await;
        assert_eq!(result, vec![1, 2]);
    }

    #[tokio::test]
    async fn failed_async_action_leaves_value_unchanged() {
        let _ = tracing_subscriber::fmt::try_init();
        let store = Store::new(1u32);
        let fail = store.handle_async(|_, ()| async { Err::<u32, _>("boom") });
        let bump = store.handle(|n, ()| n + 1);
        fail.dispatch(()).unwrap();
        bump.dispatch(()).unwrap();
        // The failed action publishes nothing; the bump still lands after it.
        assert_eq!(settled(&store, |n| *n == 2).await, 2);
    }

    #[tokio::test]
    async fn failed_async_action_applies_fallback() {
        let store = Store::new(1u32);
        let fail = store.handle_async_or(
            |_, ()| async { Err::<u32, _>("boom") },
            |current, _err| current + 100,
        );
        fail.dispatch(()).unwrap();
        assert_eq!(settled(&store, |n| *n == 101).await, 101);
    }

    #[tokio::test]
    async fn sibling_sub_stores_do_not_lose_writes() {
        let store = Store::new(person());
        let age = store.sub(age_lens());
        let name = store.sub(name_lens());

        // Dispatch order: age, then name. Both writes re-read the live
        // parent, so neither can clobber the other.
        age.update(2).unwrap();
        name.update("B".to_owned()).unwrap();

        let final_value = settled(&store, |p| p.name == "B" && p.age == 2).await;
        assert_eq!(
            final_value,
            Person {
                name: "B".to_owned(),
                age: 2
            }
        );
    }

    #[tokio::test]
    async fn sub_store_stream_rederives_on_parent_change() {
        let store = Store::new(person());
        let age = store.sub(age_lens());
        let mut ages = Box::pin(age.stream());

        assert_eq!(ages.next().await, Some(1));
        age.update(3).unwrap();
        assert_eq!(ages.next().await, Some(3));
    }

    #[tokio::test]
    async fn nested_sub_store_composes_lenses() {
        #[derive(Clone, PartialEq, Debug)]
        struct App {
            selected: Person,
        }

        let store = Store::new(App { selected: person() });
        let selected = store.sub(field_lens(
            |a: &App| a.selected.clone(),
            |_a, selected| App { selected },
        ));
        let age = selected.sub(age_lens());

        age.update(9).unwrap();
        let final_value = settled(&store, |a| a.selected.age == 9).await;
        assert_eq!(final_value.selected.name, "A");
    }

    #[tokio::test]
    async fn changes_skips_equal_projections() {
        let store = Store::new(person());
        let age = store.sub(age_lens());
        let name = store.sub(name_lens());
        let mut ages = Box::pin(age.changes());

        assert_eq!(ages.next().await, Some(1));
        // A name write publishes the parent but leaves the age projection
        // untouched; `changes` must not re-emit 1.
        name.update("B".to_owned()).unwrap();
        age.update(4).unwrap();
        assert_eq!(ages.next().await, Some(4));
    }
}
