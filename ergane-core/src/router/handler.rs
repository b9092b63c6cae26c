//! Leaf handlers bound at the ends of a decision tree
//!
//! A handler receives the full original argument bag, not just the keys
//! consumed during routing, since leaves commonly need sibling data keys.
//! Returning `Err` signals a handler failure; the tool boundary converts it
//! into an error outcome, so handlers stay free of transport concerns.

use crate::bag::ArgumentBag;
use crate::error::Result;
use crate::tool::Outcome;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Terminal operation a decision tree routes to
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Execute the operation with the full invocation arguments
    async fn run(&self, args: ArgumentBag) -> Result<Outcome>;
}

impl std::fmt::Debug for dyn ActionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ActionHandler")
    }
}

/// Type alias for shared handlers stored in tree leaves
pub type BoxedHandler = Arc<dyn ActionHandler>;

/// Adapter turning an async closure into an [`ActionHandler`]
///
/// ```rust,ignore
/// let handler = handler_fn(|args| async move {
///     Ok(Outcome::success("done", Value::Null))
/// });
/// ```
#[derive(Clone)]
pub struct FnHandler<F> {
    f: F,
}

/// Wrap an async closure as a handler
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(ArgumentBag) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Outcome>> + Send + 'static,
{
    FnHandler { f }
}

#[async_trait]
impl<F, Fut> ActionHandler for FnHandler<F>
where
    F: Fn(ArgumentBag) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Outcome>> + Send + 'static,
{
    async fn run(&self, args: ArgumentBag) -> Result<Outcome> {
        (self.f)(args).await
    }
}
