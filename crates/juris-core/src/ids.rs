//! ID prefix constants.
//!
//! Every entity ID is `{prefix}-{8 hex chars}`, generated by the database
//! (see `juris-db`). The prefix makes IDs self-describing in logs and CLI output.

pub const PREFIX_ACCOUNT: &str = "acc";
pub const PREFIX_SPACE: &str = "spc";
pub const PREFIX_MEMBER: &str = "mbr";
pub const PREFIX_CLIENT: &str = "cli";
pub const PREFIX_PROCESS: &str = "prc";
pub const PREFIX_DEADLINE: &str = "ddl";
pub const PREFIX_SESSION: &str = "ses";

/// All prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_ACCOUNT,
    PREFIX_SPACE,
    PREFIX_MEMBER,
    PREFIX_CLIENT,
    PREFIX_PROCESS,
    PREFIX_DEADLINE,
    PREFIX_SESSION,
];

/// Check whether `id` carries the given prefix followed by a dash.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('-') && rest.len() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for prefix in ALL_PREFIXES {
            assert!(seen.insert(*prefix), "duplicate prefix {prefix}");
        }
    }

    #[test]
    fn has_prefix_requires_dash_and_body() {
        assert!(has_prefix("cli-a3f8b2c1", PREFIX_CLIENT));
        assert!(!has_prefix("cli-", PREFIX_CLIENT));
        assert!(!has_prefix("client-1", PREFIX_CLIENT));
        assert!(!has_prefix("prc-a3f8b2c1", PREFIX_CLIENT));
    }
}
