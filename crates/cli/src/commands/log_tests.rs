use super::*;

fn event(service: &str, data: &str) -> OutputEvent {
    OutputEvent { service: service.to_string(), data: data.to_string() }
}

#[test]
fn unfiltered_lines_are_prefixed_with_the_service_name() {
    let line = format_line(&None, &event("web", "booting\n"));
    assert_eq!(line, Some("[web]booting\n".to_string()));
}

#[test]
fn filtered_lines_drop_the_prefix_for_a_matching_service() {
    let line = format_line(&Some("web".to_string()), &event("web", "booting\n"));
    assert_eq!(line, Some("web: booting\n".to_string()));
}

#[test]
fn filtered_lines_are_suppressed_for_a_non_matching_service() {
    let line = format_line(&Some("web".to_string()), &event("worker", "booting\n"));
    assert_eq!(line, None);
}
