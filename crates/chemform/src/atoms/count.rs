use std::{
    fmt::{self, Display, Formatter},
    num::ParseIntError,
};

use crate::Count;

impl Count {
    pub const fn new(n: u32) -> Self {
        Self(n)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// An empty run of digits is an implicit count of one
    pub(crate) fn from_digits(digits: &str) -> Result<Self, ParseIntError> {
        if digits.is_empty() {
            Ok(Self::default())
        } else {
            digits.parse().map(Self)
        }
    }
}

impl Display for Count {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let count = self.0;
        if count != 1 {
            write!(f, "{count}")?;
        }
        Ok(())
    }
}

impl Default for Count {
    fn default() -> Self {
        Self(1)
    }
}
