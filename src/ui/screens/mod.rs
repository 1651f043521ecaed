pub(crate) mod dashboard;
pub(crate) mod entries;
