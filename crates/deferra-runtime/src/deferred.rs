//! Deferred values.
//!
//! A [`Deferred<T>`] is a boxed future producing a `T` together with its
//! [`ValueMeta`]. Every combinator consumes its inputs and returns a new
//! deferred value; nothing is mutated in place. Values that are already known
//! resolve on the first poll, so chains of combinators over literals never
//! suspend.

use std::fmt;
use std::future::{Future, IntoFuture};

use futures::future::{self, BoxFuture, FutureExt};

use crate::error::InvokeError;
use crate::meta::ValueMeta;

/// A resolved value and its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
  pub value: T,
  pub meta: ValueMeta,
}

impl<T> Resolved<T> {
  pub fn new(value: T, meta: ValueMeta) -> Self {
    Self { value, meta }
  }
}

type ResolvedFuture<T> = BoxFuture<'static, Result<Resolved<T>, InvokeError>>;

/// A value that may not be known yet.
#[must_use = "deferred values do nothing unless resolved"]
pub struct Deferred<T> {
  inner: ResolvedFuture<T>,
}

impl<T: Send + 'static> Deferred<T> {
  /// Wrap an already known value with explicit metadata.
  pub fn create(value: T, meta: ValueMeta) -> Self {
    Self::from_resolved(future::ready(Ok(Resolved::new(value, meta))))
  }

  /// Wrap an already known, non-secret value.
  pub fn new(value: T) -> Self {
    Self::create(value, ValueMeta::KNOWN)
  }

  /// Wrap an already known secret value.
  pub fn secret(value: T) -> Self {
    Self::create(value, ValueMeta::SECRET)
  }

  /// A preview placeholder: the value is carried but flagged as not known.
  pub fn unknown(value: T) -> Self {
    Self::create(value, ValueMeta::UNKNOWN)
  }

  /// A deferred value that fails with `error`.
  pub fn failed(error: InvokeError) -> Self {
    Self::from_resolved(future::ready(Err(error)))
  }

  /// Defer a computation producing a known, non-secret value.
  pub fn from_future<F>(fut: F) -> Self
  where
    F: Future<Output = Result<T, InvokeError>> + Send + 'static,
  {
    Self::from_resolved(fut.map(|result| result.map(|value| Resolved::new(value, ValueMeta::KNOWN))))
  }

  /// Defer a computation that reports its own metadata.
  pub fn from_resolved<F>(fut: F) -> Self
  where
    F: Future<Output = Result<Resolved<T>, InvokeError>> + Send + 'static,
  {
    Self { inner: fut.boxed() }
  }

  /// Apply `f` to the value once it is available. Metadata is carried over
  /// and a failure of `self` is passed through unchanged.
  pub fn map<U, F>(self, f: F) -> Deferred<U>
  where
    U: Send + 'static,
    F: FnOnce(T) -> U + Send + 'static,
  {
    Deferred::from_resolved(
      self
        .inner
        .map(move |result| result.map(|resolved| Resolved::new(f(resolved.value), resolved.meta))),
    )
  }

  /// Like [`map`](Self::map), but `f` may fail the chain.
  pub fn try_map<U, F>(self, f: F) -> Deferred<U>
  where
    U: Send + 'static,
    F: FnOnce(T) -> Result<U, InvokeError> + Send + 'static,
  {
    Deferred::from_resolved(self.inner.map(move |result| {
      let resolved = result?;
      Ok(Resolved::new(f(resolved.value)?, resolved.meta))
    }))
  }

  /// Continue with another deferred computation built from the value.
  ///
  /// The result carries the metadata of both stages.
  pub fn apply<U, F>(self, f: F) -> Deferred<U>
  where
    U: Send + 'static,
    F: FnOnce(T) -> Deferred<U> + Send + 'static,
  {
    Deferred::from_resolved(async move {
      let outer = self.inner.await?;
      let inner = f(outer.value).inner.await?;
      Ok(Resolved::new(inner.value, outer.meta.combine(inner.meta)))
    })
  }

  /// Pair two deferred values of different types.
  pub fn zip<U: Send + 'static>(self, other: Deferred<U>) -> Deferred<(T, U)> {
    Deferred::from_resolved(future::try_join(self.inner, other.inner).map(|result| {
      result.map(|(left, right)| {
        Resolved::new((left.value, right.value), left.meta.combine(right.meta))
      })
    }))
  }

  /// Wait for every value and resolve to them in input order.
  ///
  /// The inputs are polled concurrently. The first failure observed fails the
  /// combination immediately and the remaining inputs are dropped.
  pub fn combine_all<I>(values: I) -> Deferred<Vec<T>>
  where
    I: IntoIterator<Item = Deferred<T>>,
  {
    let pending: Vec<ResolvedFuture<T>> = values.into_iter().map(|d| d.inner).collect();

    Deferred::from_resolved(future::try_join_all(pending).map(|result| {
      result.map(|all| {
        let meta = ValueMeta::combine_all(all.iter().map(|r| r.meta));
        Resolved::new(all.into_iter().map(|r| r.value).collect(), meta)
      })
    }))
  }

  /// Mark the value as secret when `secret` is set.
  pub fn with_secret(self, secret: bool) -> Self {
    Self::from_resolved(self.inner.map(move |result| {
      result.map(|resolved| {
        let meta = resolved.meta.combine(ValueMeta {
          secret,
          known: true,
        });
        Resolved::new(resolved.value, meta)
      })
    }))
  }

  /// Wait for the value and its metadata.
  pub async fn resolve(self) -> Result<Resolved<T>, InvokeError> {
    self.inner.await
  }
}

impl<T: Send + 'static> IntoFuture for Deferred<T> {
  type Output = Result<T, InvokeError>;
  type IntoFuture = BoxFuture<'static, Self::Output>;

  fn into_future(self) -> Self::IntoFuture {
    self
      .inner
      .map(|result| result.map(|resolved| resolved.value))
      .boxed()
  }
}

impl<T> fmt::Debug for Deferred<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Deferred").finish_non_exhaustive()
  }
}
