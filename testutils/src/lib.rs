//! googletest matchers for [anyhow::Error] values, shared between the workspace crates.

use std::{
    fmt::{Debug, Display},
    marker::PhantomData,
};

use googletest::{
    description::Description,
    matcher::{Matcher, MatcherBase, MatcherResult},
};

/// Creates a matcher against an `anyhow::Error` that downcasts to the given
/// type and matches the inner matcher.
///
/// Downcasting looks through any context added to the error.
pub fn anyhow_downcasts_to<E, M>(inner: M) -> AnyhowDowncastTo<E, M> {
    AnyhowDowncastTo::<E, M> {
        inner,
        phantom_e: Default::default(),
    }
}

pub struct AnyhowDowncastTo<E, M> {
    inner: M,
    phantom_e: PhantomData<E>,
}

impl<E, M> AnyhowDowncastTo<E, M> {
    fn type_name() -> &'static str {
        std::any::type_name::<E>()
    }
}

impl<E, M> MatcherBase for AnyhowDowncastTo<E, M> {}

impl<E, M> Matcher<&anyhow::Error> for AnyhowDowncastTo<E, M>
where
    E: Copy + Display + Debug + Send + Sync + 'static,
    M: Matcher<E>,
{
    fn matches(&self, actual: &anyhow::Error) -> MatcherResult {
        actual
            .downcast_ref::<E>()
            .map(|v| self.inner.matches(*v))
            .unwrap_or(MatcherResult::NoMatch)
    }

    fn explain_match(&self, actual: &anyhow::Error) -> Description {
        match actual.downcast_ref::<E>() {
            Some(e) => Description::new()
                .text(format!("which downcasts to {}", Self::type_name()))
                .text("with value")
                .nested(self.inner.explain_match(*e)),
            None => Description::new().text(format!(
                "which does not downcast to {}",
                Self::type_name()
            )),
        }
    }

    fn describe(&self, matcher_result: MatcherResult) -> Description {
        match matcher_result {
            MatcherResult::Match => format!(
                "downcasts to {} with value which {}",
                Self::type_name(),
                self.inner.describe(MatcherResult::Match)
            )
            .into(),
            MatcherResult::NoMatch => format!(
                "does not downcast to {}, or has a value which {}",
                Self::type_name(),
                self.inner.describe(MatcherResult::NoMatch)
            )
            .into(),
        }
    }
}

/// Creates a matcher against an `anyhow::Error` whose single line rendering (`{:#}`, which
/// includes every context message) matches the inner string matcher.
pub fn anyhow_message<M>(inner: M) -> AnyhowMessage<M> {
    AnyhowMessage { inner }
}

pub struct AnyhowMessage<M> {
    inner: M,
}

impl<M> MatcherBase for AnyhowMessage<M> {}

impl<M> Matcher<&anyhow::Error> for AnyhowMessage<M>
where
    M: for<'a> Matcher<&'a str>,
{
    fn matches(&self, actual: &anyhow::Error) -> MatcherResult {
        self.inner.matches(format!("{actual:#}").as_str())
    }

    fn explain_match(&self, actual: &anyhow::Error) -> Description {
        let message = format!("{actual:#}");
        Description::new()
            .text(format!("which has message {message:?}"))
            .nested(self.inner.explain_match(message.as_str()))
    }

    fn describe(&self, matcher_result: MatcherResult) -> Description {
        format!(
            "has a message which {}",
            self.inner.describe(matcher_result)
        )
        .into()
    }
}
