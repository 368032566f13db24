use std::fmt::{self, Display, Formatter};

use crate::{Element, Mass, Massive};

impl<'a> Element<'a> {
    pub const fn symbol(&self) -> &'a str {
        self.symbol
    }
}

impl Display for Element<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

impl Massive for Element<'_> {
    fn mass(&self) -> Mass {
        *self.mass
    }
}
