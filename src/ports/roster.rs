use crate::error::FetchError;
use crate::types::RosterSnapshot;

pub trait RosterSource: Clone + Send + Sync + 'static {
    type Fut<'a>: Future<Output = Result<RosterSnapshot, FetchError>> + Send + 'a
    where
        Self: 'a;

    fn fetch<'a>(&'a self) -> Self::Fut<'a>;
}
