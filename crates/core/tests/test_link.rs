//! Tests for badge link resolution

use serde_json::json;
use vdr_badge_core::link::encode_path_segment;
use vdr_badge_core::resolve_href;

#[test]
fn test_explicit_href_wins() {
    let vdr = json!({"metadata": {"component": {"name": "app", "version": "1.0.0"}}});
    assert_eq!(
        resolve_href(&vdr, Some("https://example.com/x"), Some("https://dt")),
        Some("https://example.com/x".to_string())
    );
}

#[test]
fn test_blank_explicit_href_is_ignored() {
    let vdr = json!({"metadata": {"component": {"name": "app", "version": "1.0.0"}}});
    assert_eq!(
        resolve_href(&vdr, Some("  "), Some("http://localhost:8080")),
        Some("http://localhost:8080/app/1.0.0".to_string())
    );
}

#[test]
fn test_base_url_trailing_slashes_are_trimmed() {
    let vdr = json!({"metadata": {"component": {"name": "my app", "version": "1.0+build"}}});
    assert_eq!(
        resolve_href(&vdr, None, Some(" https://dt.example/projects// ")),
        Some("https://dt.example/projects/my%20app/1.0%2Bbuild".to_string())
    );
}

#[test]
fn test_no_href_without_base_url() {
    let vdr = json!({"metadata": {"component": {"name": "app", "version": "1.0.0"}}});
    assert_eq!(resolve_href(&vdr, None, None), None);
    assert_eq!(resolve_href(&vdr, None, Some("   ")), None);
}

#[test]
fn test_no_href_without_component_coordinates() {
    let base = Some("https://dt");
    assert_eq!(resolve_href(&json!({}), None, base), None);
    assert_eq!(
        resolve_href(&json!({"metadata": {"component": {"name": "app"}}}), None, base),
        None
    );
    assert_eq!(
        resolve_href(
            &json!({"metadata": {"component": {"name": "app", "version": null}}}),
            None,
            base
        ),
        None
    );
    assert_eq!(
        resolve_href(
            &json!({"metadata": {"component": {"name": "", "version": "1"}}}),
            None,
            base
        ),
        None
    );
}

#[test]
fn test_numeric_version_uses_text_view() {
    let vdr = json!({"metadata": {"component": {"name": "app", "version": 2}}});
    assert_eq!(
        resolve_href(&vdr, None, Some("https://dt")),
        Some("https://dt/app/2".to_string())
    );
}

#[test]
fn test_encode_path_segment() {
    assert_eq!(encode_path_segment("a-b_c.d*e"), "a-b_c.d*e");
    assert_eq!(encode_path_segment("@scope/pkg"), "%40scope%2Fpkg");
    assert_eq!(encode_path_segment("a b"), "a%20b");
    assert_eq!(encode_path_segment("é"), "%C3%A9");
}
