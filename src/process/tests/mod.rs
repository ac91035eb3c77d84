//! Unit tests for the process module.


use crate::process::domain::StepId;

pub(crate) fn step(raw: &str) -> StepId {
    StepId::new(raw).expect("valid step identifier")
}
