//! Remote-with-fallback
//!
//! Tries the remote backend first and substitutes fixture data when the call
//! fails for any reason. The failure is logged and never reaches the caller.

use std::future::Future;

use serde::Serialize;

use crate::backend::BackendError;

/// Where a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Remote,
    Fixture,
}

/// A value together with its source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fetched<T> {
    pub source: Source,
    pub data: T,
}

impl<T> Fetched<T> {
    pub fn remote(data: T) -> Self {
        Self {
            source: Source::Remote,
            data,
        }
    }

    pub fn fixture(data: T) -> Self {
        Self {
            source: Source::Fixture,
            data,
        }
    }

    pub fn is_fixture(&self) -> bool {
        self.source == Source::Fixture
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            source: self.source,
            data: f(self.data),
        }
    }
}

/// Await `remote`; on error log it and return `fixture()` instead.
///
/// A remote call that succeeds with an empty result is returned as is.
pub async fn with_fallback<T, Fut, F>(resource: &str, remote: Fut, fixture: F) -> Fetched<T>
where
    Fut: Future<Output = Result<T, BackendError>>,
    F: FnOnce() -> T,
{
    match remote.await {
        Ok(data) => Fetched::remote(data),
        Err(BackendError::Unconfigured) => {
            tracing::debug!(resource, "No backend configured, serving fixtures");
            Fetched::fixture(fixture())
        }
        Err(e) => {
            tracing::warn!(resource, error = %e, "Backend call failed, serving fixtures");
            Fetched::fixture(fixture())
        }
    }
}

/// Await a remote write; on error log it and run `local()` instead.
///
/// The caller always sees success. The returned source says which side took
/// the write.
pub async fn write_or_local<Fut, F>(action: &str, remote: Fut, local: F) -> Source
where
    Fut: Future<Output = Result<(), BackendError>>,
    F: FnOnce(),
{
    with_fallback(action, remote, local).await.source
}
