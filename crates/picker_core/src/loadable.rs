/// Reason an asynchronous fetch failed, kept as plain data for the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub message: String,
}

impl LoadFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of an asynchronous fetch: pending, loaded, or failed.
///
/// `Success` and `Failure` stay put until a reload moves the value back to
/// `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loadable<T> {
    Loading,
    Success(T),
    Failure(LoadFailure),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Loadable::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Loadable::Failure(_))
    }

    pub fn as_success(&self) -> Option<&T> {
        match self {
            Loadable::Success(value) => Some(value),
            Loadable::Loading | Loadable::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            Loadable::Failure(failure) => Some(failure),
            Loadable::Loading | Loadable::Success(_) => None,
        }
    }

    /// Transform the payload, carrying `Loading`/`Failure` through unchanged.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Success(value) => Loadable::Success(f(value)),
            Loadable::Failure(failure) => Loadable::Failure(failure),
        }
    }
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Loading
    }
}

impl<T> From<Result<T, LoadFailure>> for Loadable<T> {
    fn from(result: Result<T, LoadFailure>) -> Self {
        match result {
            Ok(value) => Loadable::Success(value),
            Err(failure) => Loadable::Failure(failure),
        }
    }
}
