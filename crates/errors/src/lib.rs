//! Shared error vocabulary for the catalog and planner crates.
//!
//! [`ErrorMetadata`] can be attached to an `anyhow` error chain via
//! `.context(e /* ErrorMetadata */)`. It tags errors with a stable,
//! machine-matchable `short_msg` (for tests and client-side matching) and a
//! human-readable `msg`, classified by a coarse [`ErrorCode`].

use std::borrow::Cow;

/// Tags an error with a stable short code clients can match on, plus a
/// developer-facing message. Implements `std::error::Error` via `thiserror`
/// so it composes naturally with `anyhow::Error::context`.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("{msg}")]
pub struct ErrorMetadata {
    /// Coarse classification used to decide retryability / user-facingness.
    pub code: ErrorCode,
    /// Stable, CapitalCamelCase code usable in tests for string matching.
    /// E.g. `TableNotFound`.
    pub short_msg: Cow<'static, str>,
    /// Descriptive message targeted at the developer calling the API.
    pub msg: Cow<'static, str>,
}

#[cfg_attr(any(test, feature = "testing"), derive(proptest_derive::Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A requested schema object was not found (table, index, view, trigger).
    NotFound,
    /// Creating a schema object that already exists under that name.
    AlreadyExists,
    /// A constraint was violated (not-null, unique, check, foreign key, ...).
    ConstraintViolation,
    /// The plan builder or optimizer could not translate the input.
    InvalidQuery,
}

impl ErrorMetadata {
    /// A schema object could not be found by name. Maps to the
    /// `*-not-found` family of schema existence errors.
    pub fn not_found(
        short_msg: impl Into<Cow<'static, str>>,
        msg: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            code: ErrorCode::NotFound,
            short_msg: short_msg.into(),
            msg: msg.into(),
        }
    }

    /// A schema object of that name already exists. Maps to the
    /// `*-exists` family.
    pub fn already_exists(
        short_msg: impl Into<Cow<'static, str>>,
        msg: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            code: ErrorCode::AlreadyExists,
            short_msg: short_msg.into(),
            msg: msg.into(),
        }
    }

    /// A constraint (not-null, unique, primary-key, check, foreign-key)
    /// was violated. Defined here for symmetry with the executor/inserter,
    /// even though the planner itself never raises these.
    pub fn constraint_violation(
        short_msg: impl Into<Cow<'static, str>>,
        msg: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            code: ErrorCode::ConstraintViolation,
            short_msg: short_msg.into(),
            msg: msg.into(),
        }
    }

    /// The plan builder encountered a query it cannot translate, e.g. an
    /// unsupported table-reference variant.
    pub fn invalid_query(
        short_msg: impl Into<Cow<'static, str>>,
        msg: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidQuery,
            short_msg: short_msg.into(),
            msg: msg.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    pub fn is_already_exists(&self) -> bool {
        self.code == ErrorCode::AlreadyExists
    }
}

/// Convenience accessors for pulling [`ErrorMetadata`] back out of an
/// `anyhow::Error` chain, mirroring how call sites classify errors without
/// needing to match on a concrete error enum.
pub trait ErrorMetadataAnyhowExt {
    fn is_not_found(&self) -> bool;
    fn is_already_exists(&self) -> bool;
    fn short_msg(&self) -> &str;
}

impl ErrorMetadataAnyhowExt for anyhow::Error {
    fn is_not_found(&self) -> bool {
        self.downcast_ref::<ErrorMetadata>()
            .is_some_and(ErrorMetadata::is_not_found)
    }

    fn is_already_exists(&self) -> bool {
        self.downcast_ref::<ErrorMetadata>()
            .is_some_and(ErrorMetadata::is_already_exists)
    }

    fn short_msg(&self) -> &str {
        match self.downcast_ref::<ErrorMetadata>() {
            Some(e) => &e.short_msg,
            None => "InternalError",
        }
    }
}

#[cfg(any(test, feature = "testing"))]
mod proptest_impls {
    use proptest::prelude::*;

    use super::{
        ErrorCode,
        ErrorMetadata,
    };

    impl Arbitrary for ErrorMetadata {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            any::<ErrorCode>()
                .prop_map(|code| match code {
                    ErrorCode::NotFound => ErrorMetadata::not_found("NotFound", "not found"),
                    ErrorCode::AlreadyExists => {
                        ErrorMetadata::already_exists("AlreadyExists", "already exists")
                    },
                    ErrorCode::ConstraintViolation => {
                        ErrorMetadata::constraint_violation("ConstraintViolation", "violated")
                    },
                    ErrorCode::InvalidQuery => {
                        ErrorMetadata::invalid_query("InvalidQuery", "invalid query")
                    },
                })
                .boxed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ErrorMetadata,
        ErrorMetadataAnyhowExt,
    };

    #[test]
    fn downcast_through_anyhow() {
        let err: anyhow::Error =
            anyhow::Error::msg("boom").context(ErrorMetadata::not_found("TableNotFound", "nope"));
        assert!(err.is_not_found());
        assert!(!err.is_already_exists());
        assert_eq!(err.short_msg(), "TableNotFound");
    }

    #[test]
    fn plain_anyhow_is_not_classified() {
        let err = anyhow::Error::msg("boom");
        assert!(!err.is_not_found());
        assert_eq!(err.short_msg(), "InternalError");
    }
}
