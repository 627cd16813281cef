/// Whether a payload has been loaded at least once.
///
/// Distinguishes "never fetched" from "fetched but empty" (an empty list is
/// still `Fetched`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState<T> {
    #[default]
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            Self::NotFetched => FetchState::NotFetched,
            Self::Fetched(data) => FetchState::Fetched(f(data)),
        }
    }
}

/// The state of a request slot. Exactly one variant holds at a time.
///
/// ```text
/// Idle | Succeeded | Failed --begin--> Pending
/// Pending --Ok--> Succeeded
/// Pending --Err--> Failed
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome<T, E> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(E),
}

impl<T, E> RequestOutcome<T, E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    pub fn succeeded(&self) -> Option<&T> {
        match self {
            Self::Succeeded(data) => Some(data),
            _ => None,
        }
    }

    pub fn failed(&self) -> Option<&E> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetched_empty_is_still_fetched() {
        let state: FetchState<Vec<u8>> = FetchState::Fetched(vec![]);
        assert!(state.is_fetched());
        assert_eq!(state.as_ref(), Some(&vec![]));
        assert!(!FetchState::<u8>::default().is_fetched());
    }

    #[test]
    fn outcome_accessors() {
        let ok: RequestOutcome<u8, String> = RequestOutcome::Succeeded(1);
        assert!(ok.is_settled());
        assert_eq!(ok.succeeded(), Some(&1));
        assert_eq!(ok.failed(), None);
        assert!(RequestOutcome::<u8, String>::Pending.is_pending());
        assert!(!RequestOutcome::<u8, String>::Idle.is_settled());
    }
}
