use super::*;

struct FixedLoader(Vec<String>);

impl SourceLoader for FixedLoader {
    fn load(&self, _path: &Path) -> std::io::Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

fn ten_lines() -> FixedLoader {
    FixedLoader((1..=10).map(|n| format!("line {n}")).collect())
}

#[test]
fn window_centers_on_current_line() {
    let loader = ten_lines();
    let window = build_window(&loader, Path::new("/tmp/a.c"), 4, 20).unwrap();
    assert!(window.lines.len() > 0);
    let current = &window.lines[window.current_idx];
    assert_eq!(current.line_num, 4);
    assert_eq!(current.text, "line 4");
    assert!(current.is_current);
}

#[test]
fn non_absolute_path_yields_no_window() {
    let loader = ten_lines();
    assert!(build_window(&loader, Path::new("a.c"), 4, 20).is_none());
}

#[test]
fn window_clamps_to_file_bounds_near_start() {
    let loader = ten_lines();
    let window = build_window(&loader, Path::new("/tmp/a.c"), 1, 20).unwrap();
    assert_eq!(window.lines.first().unwrap().line_num, 1);
    assert_eq!(window.lines[window.current_idx].line_num, 1);
}

#[test]
fn recenter_clamps_against_small_viewport() {
    let loader = ten_lines();
    let mut window = build_window(&loader, Path::new("/tmp/a.c"), 5, 3).unwrap();
    window.recenter(3);
    let max = window.lines.len().saturating_sub(3);
    assert!(window.scroll <= max);
}

#[test]
fn load_failure_yields_no_window() {
    struct Failing;
    impl SourceLoader for Failing {
        fn load(&self, _path: &Path) -> std::io::Result<Vec<String>> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "nope"))
        }
    }
    assert!(build_window(&Failing, Path::new("/tmp/missing.c"), 1, 20).is_none());
}

#[test]
fn long_line_is_truncated() {
    let long = "x".repeat(SOURCE_LINE_MAX_BYTES * 2);
    let loader = FixedLoader(vec![long.clone()]);
    let window = build_window(&loader, Path::new("/tmp/a.c"), 1, 20).unwrap();
    assert_eq!(window.lines[0].text.len(), SOURCE_LINE_MAX_BYTES);
}
