use serde::{Deserialize, Serialize};

/// Fixed-arity product: both fields are always valid, no discriminant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prod<A, B> {
    pub fst: A,
    pub snd: B,
}

impl<A, B> Prod<A, B> {
    pub fn new(fst: A, snd: B) -> Self {
        Self { fst, snd }
    }

    pub fn into_parts(self) -> (A, B) {
        (self.fst, self.snd)
    }

    pub fn map_fst<C>(self, f: impl FnOnce(A) -> C) -> Prod<C, B> {
        Prod {
            fst: f(self.fst),
            snd: self.snd,
        }
    }

    pub fn map_snd<C>(self, f: impl FnOnce(B) -> C) -> Prod<A, C> {
        Prod {
            fst: self.fst,
            snd: f(self.snd),
        }
    }
}

impl<A, B> From<(A, B)> for Prod<A, B> {
    fn from((fst, snd): (A, B)) -> Self {
        Self { fst, snd }
    }
}
