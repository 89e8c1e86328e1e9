//! Reactive state primitives: observable stores, lenses and action dispatch.
//!
//! A [`Store`] holds the single authoritative value of some state type and
//! broadcasts every published update to its subscribers. State is never
//! mutated in place: each update constructs a new value which is swapped in
//! atomically from the subscribers' point of view.
//!
//! Updates enter a store exclusively through its action queue. Handlers
//! registered with [`Store::handle`] (or the asynchronous
//! [`Store::handle_async`]) turn dispatched action payloads into queued
//! state transitions, which the store applies strictly in dispatch order.
//!
//! A [`Lens`] projects a part out of a larger value and writes it back
//! immutably; [`Store::sub`] uses one to derive a [`SubStore`] whose reads
//! and writes go through the parent.

pub mod lens;
pub mod store;

pub use lens::{field_lens, FieldLens, IdentityLens, Lens, LensExt, Then};
pub use store::{DispatchError, Handler, Store, SubStore};
