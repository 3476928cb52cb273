//! Handler trait and type erasure.
//!
//! The router keeps handlers of different concrete types in one table, so
//! each is boxed behind `dyn ErasedHandler`:
//!
//! ```text
//! with_state(store, api::get_item)                    ← state-carrying fn
//!        ↓ router.get("/items/{id}", …)
//! Arc::new(FnHandler(closure))                        ← Handler blanket impl
//!        ↓  stored as BoxedHandler = Arc<dyn ErasedHandler>
//! handler.call(req)  at request time                  ← one vtable dispatch
//!        ↓
//! Box::pin(async { fut.await.into_response() })       ← BoxFuture
//! ```
//!
//! Handlers that need shared state, such as the item store, are written as
//! `async fn(Arc<S>, Request)` and registered through [`with_state`], which
//! owns the `Arc` and hands a clone to each call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Satisfied automatically by any `async fn` or closure of the shape
///
/// ```text
/// Fn(Request) -> impl Future<Output = impl IntoResponse>
/// ```
///
/// Sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

/// Binds shared state to a handler that takes it as its first argument.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use tally::{ItemStore, Json, Request, Router, handler::with_state};
///
/// async fn count(store: Arc<ItemStore>, _req: Request) -> Json<usize> {
///     Json(store.len())
/// }
///
/// let store = Arc::new(ItemStore::seeded());
/// let app = Router::new().get("/count", with_state(store, count));
/// ```
pub fn with_state<S, F, Fut, R>(state: Arc<S>, handler: F) -> impl Handler
where
    S: Send + Sync + 'static,
    F: Fn(Arc<S>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    move |req: Request| handler(Arc::clone(&state), req)
}

/// Bridges a concrete handler `F` to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
