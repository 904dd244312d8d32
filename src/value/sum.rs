//! Binary tagged union and its zero-information arm.

use serde::{Deserialize, Serialize};

use super::{Label, ValueError};

/// Zero-sized placeholder, used as the "no payload" arm of a sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit;

/// Tagged union: exactly one arm is live and the discriminant always matches it.
///
/// Prefer `match` or [`Sum::fold`]; the checked `into_*` accessors exist for call sites that
/// expect one arm and want a loud [`ValueError::WrongArm`] otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sum<A, B> {
    Left(A),
    Right(B),
}

impl<A, B> Sum<A, B> {
    pub fn left(a: A) -> Self {
        Sum::Left(a)
    }

    pub fn right(b: B) -> Self {
        Sum::Right(b)
    }

    pub fn label(&self) -> Label {
        match self {
            Sum::Left(_) => Label::Left,
            Sum::Right(_) => Label::Right,
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Sum::Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Sum::Right(_))
    }

    pub fn as_left(&self) -> Option<&A> {
        match self {
            Sum::Left(a) => Some(a),
            Sum::Right(_) => None,
        }
    }

    pub fn as_right(&self) -> Option<&B> {
        match self {
            Sum::Left(_) => None,
            Sum::Right(b) => Some(b),
        }
    }

    pub fn into_left(self) -> Result<A, ValueError> {
        match self {
            Sum::Left(a) => Ok(a),
            Sum::Right(_) => Err(ValueError::WrongArm {
                expected: Label::Left,
                actual: Label::Right,
            }),
        }
    }

    pub fn into_right(self) -> Result<B, ValueError> {
        match self {
            Sum::Left(_) => Err(ValueError::WrongArm {
                expected: Label::Right,
                actual: Label::Left,
            }),
            Sum::Right(b) => Ok(b),
        }
    }

    /// Exhaustive elimination: exactly one of the two closures runs.
    pub fn fold<R>(self, on_left: impl FnOnce(A) -> R, on_right: impl FnOnce(B) -> R) -> R {
        match self {
            Sum::Left(a) => on_left(a),
            Sum::Right(b) => on_right(b),
        }
    }

    pub fn map_left<C>(self, f: impl FnOnce(A) -> C) -> Sum<C, B> {
        match self {
            Sum::Left(a) => Sum::Left(f(a)),
            Sum::Right(b) => Sum::Right(b),
        }
    }

    pub fn map_right<C>(self, f: impl FnOnce(B) -> C) -> Sum<A, C> {
        match self {
            Sum::Left(a) => Sum::Left(a),
            Sum::Right(b) => Sum::Right(f(b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_tracks_constructor() {
        assert_eq!(Sum::<Unit, i32>::left(Unit).label(), Label::Left);
        assert_eq!(Sum::<Unit, i32>::right(4).label(), Label::Right);
    }

    #[test]
    fn test_wrong_arm_fails_loudly() {
        let s: Sum<Unit, i32> = Sum::right(7);
        assert_eq!(
            s.into_left(),
            Err(ValueError::WrongArm {
                expected: Label::Left,
                actual: Label::Right
            })
        );
        assert_eq!(s.as_left(), None);
        assert_eq!(s.into_right(), Ok(7));
    }

    #[test]
    fn test_fold_runs_only_active_arm() {
        let s: Sum<i32, &str> = Sum::left(2);
        let out = s.fold(|n| n * 10, |_| panic!("right arm is not live"));
        assert_eq!(out, 20);
    }
}
