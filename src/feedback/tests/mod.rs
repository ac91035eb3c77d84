//! Unit tests for the feedback module.


use crate::task::domain::PeriodId;

pub(crate) fn period(raw: &str) -> PeriodId {
    PeriodId::new(raw).expect("valid period id")
}
