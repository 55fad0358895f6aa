//! The shared registry is process-wide, so everything touching it lives in
//! one test to keep the harness's threads from interleaving.

use qmui_theme::ThemeRegistry;
use std::sync::Arc;

#[test]
fn shared_registry_is_reused_until_reset() {
    ThemeRegistry::reset_shared();

    let first = ThemeRegistry::shared();
    let again = ThemeRegistry::shared();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(first.current_theme_identifier(), "default");

    assert!(first.set_current_theme("grapefruit"));
    assert_eq!(ThemeRegistry::shared().current_theme_identifier(), "grapefruit");

    ThemeRegistry::reset_shared();
    let fresh = ThemeRegistry::shared();
    assert!(!Arc::ptr_eq(&first, &fresh));
    assert_eq!(fresh.current_theme_identifier(), "default");
    assert_eq!(first.current_theme_identifier(), "grapefruit");
}
