use std::fmt::{self, Display, Formatter};

use crate::{Atom, Count, Element, Mass, Massive};

impl<'a> Atom<'a> {
    pub(crate) const fn new(element: Element<'a>, count: Count) -> Self {
        Self { element, count }
    }

    pub const fn element(&self) -> Element<'a> {
        self.element
    }

    pub const fn count(&self) -> Count {
        self.count
    }

    pub(crate) fn checked_mass(&self) -> Option<Mass> {
        self.element.mass().checked_mul(self.count)
    }
}

impl Display for Atom<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.element, self.count)
    }
}
