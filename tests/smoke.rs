//! Integration smoke tests for `streakboard`

use streakboard::core::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}
