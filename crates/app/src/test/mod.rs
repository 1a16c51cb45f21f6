//! Test infrastructure shared by service and repository tests.


pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
