//! Fixed test credentials
//!
//! These match the development seed the gateway loads when
//! `GATEWAY_SEED_USERS` is unset.

/// A seeded login pair plus the role name it should resolve to.
#[derive(Debug, Clone, Copy)]
pub struct TestUser {
    pub username: &'static str,
    pub password: &'static str,
    pub role: &'static str,
}

pub const ADMIN: TestUser = TestUser {
    username: "admin",
    password: "1234",
    role: "Administrator",
};

pub const ORCHESTRATOR: TestUser = TestUser {
    username: "orchestrator",
    password: "abcd",
    role: "Orchestrator",
};

pub const STANDARD_USER: TestUser = TestUser {
    username: "user",
    password: "xyz",
    role: "StandardUser",
};

pub const ALL_TEST_USERS: [TestUser; 3] = [ADMIN, ORCHESTRATOR, STANDARD_USER];

// Service descriptors
pub const TEST_SERVICE_BILLING: &str = "billing";
pub const TEST_SERVICE_INVENTORY: &str = "inventory";
