use rust_decimal::Decimal;

use crate::{Count, Mass};

impl Mass {
    pub(crate) fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub(crate) fn checked_mul(self, count: Count) -> Option<Self> {
        self.0.checked_mul(Decimal::from(count.get())).map(Self)
    }
}
