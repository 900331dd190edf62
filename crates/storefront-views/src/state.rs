//! Fetch lifecycle shared by every view controller.
//!
//! A controller owns one [`FetchSlot`]. Starting a fetch bumps the slot's
//! generation and hands out a [`FetchTicket`] stamped with it. When the ticket
//! comes back as a [`FetchOutcome`], the slot only applies it if no newer fetch
//! (or an unmount) happened in between. Late responses are dropped.

use std::future::Future;

use serde::Serialize;
use storefront_provider::{ContentProvider, ProviderError};

/// Lifecycle of one remote fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum FetchState<T> {
    /// Not mounted, or unmounted.
    Idle,
    Loading,
    Loaded(T),
    /// The provider call failed. Holds a human-readable message.
    Failed(String),
}

impl<T> FetchState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// One provider call plus the normalization of its result.
pub trait FetchRequest: Send + Sync {
    type Output: Send;

    /// Short label used in log fields.
    fn describe(&self) -> String;

    fn run<P: ContentProvider>(
        &self,
        provider: &P,
    ) -> impl Future<Output = Result<Self::Output, ProviderError>> + Send;
}

/// Permission to run one fetch on behalf of a controller.
///
/// Created by a controller's `mount`/`navigate`; consumed by
/// [`FetchTicket::fetch`]. The resulting outcome must be handed back to the
/// same controller's `resolve`.
#[derive(Debug, Clone)]
pub struct FetchTicket<R> {
    generation: u64,
    request: R,
}

impl<R: FetchRequest> FetchTicket<R> {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn request(&self) -> &R {
        &self.request
    }

    /// Runs the provider call and normalization. This is the only suspension
    /// point in a controller's lifecycle.
    pub async fn fetch<P: ContentProvider>(self, provider: &P) -> FetchOutcome<R::Output> {
        let result = self.request.run(provider).await;
        FetchOutcome {
            generation: self.generation,
            label: self.request.describe(),
            result,
        }
    }
}

/// Result of a [`FetchTicket`], tagged with the generation it was issued for.
#[derive(Debug)]
pub struct FetchOutcome<T> {
    generation: u64,
    label: String,
    result: Result<T, ProviderError>,
}

impl<T> FetchOutcome<T> {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Fetch state plus the generation counter that guards it.
#[derive(Debug)]
pub(crate) struct FetchSlot<T> {
    state: FetchState<T>,
    generation: u64,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            generation: 0,
        }
    }
}

impl<T> FetchSlot<T> {
    pub(crate) fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Starts a fetch unless one is already in flight.
    pub(crate) fn begin<R>(&mut self, request: R) -> Option<FetchTicket<R>> {
        if self.state.is_loading() {
            return None;
        }
        Some(self.restart(request))
    }

    /// Starts a fetch, superseding any in-flight one.
    pub(crate) fn restart<R>(&mut self, request: R) -> FetchTicket<R> {
        self.generation += 1;
        self.state = FetchState::Loading;
        FetchTicket {
            generation: self.generation,
            request,
        }
    }

    /// Supersedes any in-flight fetch and returns to [`FetchState::Idle`].
    pub(crate) fn reset(&mut self) {
        self.generation += 1;
        self.state = FetchState::Idle;
    }

    /// Applies `outcome` if it belongs to the current generation.
    pub(crate) fn resolve(&mut self, outcome: FetchOutcome<T>) -> bool {
        if outcome.generation != self.generation || !self.state.is_loading() {
            tracing::debug!(
                fetch = %outcome.label,
                generation = outcome.generation,
                current = self.generation,
                "discarding stale fetch outcome"
            );
            return false;
        }

        self.state = match outcome.result {
            Ok(value) => FetchState::Loaded(value),
            Err(e) => {
                tracing::error!(fetch = %outcome.label, error = %e, "fetch failed");
                FetchState::Failed(e.to_string())
            }
        };
        true
    }
}
