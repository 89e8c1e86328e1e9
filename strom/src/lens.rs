//! Lenses: reified accessors for a part of a larger value.
//!
//! A lens pairs a getter with an immutable update. The two must agree:
//! `set(p, get(p)) == p` and `get(set(p, c)) == c`.

use std::marker::PhantomData;
use std::sync::Arc;

/// A bidirectional accessor for a child part `C` of a parent value `P`.
///
/// Lenses are stateless and shared; implementations must be cheap to call
/// since every projected read and write of a [`SubStore`](crate::SubStore)
/// goes through them.
pub trait Lens<P, C>: Send + Sync {
    /// Extracts the child value from the parent.
    fn get(&self, parent: &P) -> C;

    /// Returns a new parent with the child part replaced.
    fn set(&self, parent: P, child: C) -> P;
}

impl<P, C, L: Lens<P, C> + ?Sized> Lens<P, C> for Arc<L> {
    fn get(&self, parent: &P) -> C {
        (**self).get(parent)
    }

    fn set(&self, parent: P, child: C) -> P {
        (**self).set(parent, child)
    }
}

/// A lens built from a getter/setter closure pair.
///
/// ```
/// # use strom::lens::{field_lens, Lens};
/// #[derive(Clone, PartialEq, Debug)]
/// struct Person { name: String, age: u32 }
///
/// let age = field_lens(|p: &Person| p.age, |p, age| Person { age, ..p });
/// let p = Person { name: "A".into(), age: 1 };
/// assert_eq!(age.get(&age.set(p, 2)), 2);
/// ```
pub struct FieldLens<G, S> {
    get: G,
    set: S,
}

/// Builds a lens from a getter and an immutable-update function.
pub fn field_lens<P, C, G, S>(get: G, set: S) -> FieldLens<G, S>
where
    G: Fn(&P) -> C + Send + Sync,
    S: Fn(P, C) -> P + Send + Sync,
{
    FieldLens { get, set }
}

impl<G: Clone, S: Clone> Clone for FieldLens<G, S> {
    fn clone(&self) -> Self {
        FieldLens {
            get: self.get.clone(),
            set: self.set.clone(),
        }
    }
}

impl<P, C, G, S> Lens<P, C> for FieldLens<G, S>
where
    G: Fn(&P) -> C + Send + Sync,
    S: Fn(P, C) -> P + Send + Sync,
{
    fn get(&self, parent: &P) -> C {
        (self.get)(parent)
    }

    fn set(&self, parent: P, child: C) -> P {
        (self.set)(parent, child)
    }
}

/// Identity lens.
#[derive(Copy, Clone, Debug)]
pub struct IdentityLens;

impl<P: Clone + Send + Sync> Lens<P, P> for IdentityLens {
    fn get(&self, parent: &P) -> P {
        parent.clone()
    }

    fn set(&self, _parent: P, child: P) -> P {
        child
    }
}

/// Lens composition: combines `Lens<P, C>` and `Lens<C, G>` into `Lens<P, G>`.
///
/// Equivalent to applying the two lenses in succession.
pub struct Then<L1, L2, C>(pub L1, pub L2, pub PhantomData<fn() -> C>);

// #26925
impl<L1: Clone, L2: Clone, C> Clone for Then<L1, L2, C> {
    fn clone(&self) -> Self {
        Then(self.0.clone(), self.1.clone(), PhantomData)
    }
}

impl<P, C, G, L1, L2> Lens<P, G> for Then<L1, L2, C>
where
    L1: Lens<P, C>,
    L2: Lens<C, G>,
{
    fn get(&self, parent: &P) -> G {
        self.1.get(&self.0.get(parent))
    }

    fn set(&self, parent: P, child: G) -> P {
        let mid = self.0.get(&parent);
        let mid = self.1.set(mid, child);
        self.0.set(parent, mid)
    }
}

pub trait LensExt<P, C>: Lens<P, C> {
    /// Chains another lens onto this one.
    fn then<G, L>(self, rhs: L) -> Then<Self, L, C>
    where
        Self: Sized,
        L: Lens<C, G>,
    {
        Then(self, rhs, PhantomData)
    }
}

impl<P, C, L: Lens<P, C>> LensExt<P, C> for L {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    struct Person {
        name: String,
        age: u32,
    }

    #[derive(Clone, PartialEq, Debug)]
    struct Outer {
        person: Person,
    }

    fn age_lens() -> impl Lens<Person, u32> + Clone {
        field_lens(|p: &Person| p.age, |p, age| Person { age, ..p })
    }

    fn name_lens() -> impl Lens<Person, String> + Clone {
        field_lens(|p: &Person| p.name.clone(), |p, name| Person { name, ..p })
    }

    #[test]
    fn round_trip_laws() {
        let p = Person {
            name: "A".to_owned(),
            age: 1,
        };
        let age = age_lens();
        let name = name_lens();

        // set(p, get(p)) == p
        assert_eq!(age.set(p.clone(), age.get(&p)), p);
        assert_eq!(name.set(p.clone(), name.get(&p)), p);

        // get(set(p, c)) == c
        assert_eq!(age.get(&age.set(p.clone(), 42)), 42);
        assert_eq!(name.get(&name.set(p, "B".to_owned())), "B");
    }

    #[test]
    fn composed_lens_laws() {
        let person = field_lens(
            |o: &Outer| o.person.clone(),
            |_o, person| Outer { person },
        );
        let inner_age = person.then(age_lens());

        let o = Outer {
            person: Person {
                name: "A".to_owned(),
                age: 7,
            },
        };
        assert_eq!(inner_age.get(&o), 7);
        let o2 = inner_age.set(o.clone(), 8);
        assert_eq!(o2.person.age, 8);
        assert_eq!(o2.person.name, "A");
        assert_eq!(inner_age.set(o.clone(), inner_age.get(&o)), o);
    }

    #[test]
    fn identity_lens() {
        let p = Person {
            name: "A".to_owned(),
            age: 1,
        };
        assert_eq!(IdentityLens.get(&p), p);
        let q = Person {
            name: "B".to_owned(),
            age: 2,
        };
        assert_eq!(IdentityLens.set(p, q.clone()), q);
    }
}
