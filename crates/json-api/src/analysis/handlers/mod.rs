//! Analysis Handlers

pub(crate) mod bought_with;
pub(crate) mod pairs;
pub(crate) mod report;
