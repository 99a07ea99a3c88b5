//! Mailbox addresses are compared without regard to ASCII case, the way mail
//! systems treat the local part in practice.

/// Returns whether two identities name the same mailbox or principal.
///
/// Blank identities never match anything, including each other.
#[must_use]
pub fn same_identity(left: &str, right: &str) -> bool {
    let left = left.trim();
    let right = right.trim();
    !left.is_empty() && left.eq_ignore_ascii_case(right)
}

/// Returns a normalized key suitable for case-insensitive maps and sets.
#[must_use]
pub fn identity_key(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{identity_key, same_identity};

    #[test]
    fn same_identity_ignores_case_and_padding() {
        assert!(same_identity("Shared@Example.com", " shared@example.COM "));
    }

    #[test]
    fn blank_identities_never_match() {
        assert!(!same_identity("", ""));
        assert!(!same_identity("  ", "  "));
        assert!(!same_identity("", "user@example.com"));
    }

    #[test]
    fn identity_key_lowercases() {
        assert_eq!(identity_key(" Room.101@Example.COM"), "room.101@example.com");
    }
}
