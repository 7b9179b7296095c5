//! Integration test for the headless demo host.

use sgui::render::SoftwareRenderer;
use sgui::ui::{Color, InputEvent, MouseButton};
use sgui::{run_headless, tour, HeadlessOptions, InputScript};

fn temp_ppm_path() -> std::path::PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("test_sgui_demo_{id}.ppm"))
}

#[test]
fn test_tour_fills_in_the_form() {
    let report = run_headless(HeadlessOptions {
        frames: 40,
        ..HeadlessOptions::default()
    })
    .unwrap();

    let state = &report.state;
    assert_eq!(report.frames, 40);
    assert_eq!(state.user, "admin");
    assert_eq!(state.password, "hunter2");
    // Tab away from the user field commits it.
    assert_eq!(state.committed_user.as_deref(), Some("admin"));
    assert!(state.toggled);
    assert_eq!(state.fruit, Some(2));
    assert_eq!(state.button_clicks, 1);
    assert!(!state.quit_requested);
    // Dragged past the right edge of the red slider.
    assert_eq!(state.background.r, 1.0);
}

#[test]
fn test_random_background_follows_seed() {
    let run = |seed| {
        run_headless(HeadlessOptions {
            frames: 6,
            seed,
            ..HeadlessOptions::default()
        })
        .unwrap()
        .state
        .background
    };

    assert_eq!(run(3), run(3));
    assert_ne!(run(3), Color::BLACK);
    assert_ne!(run(3), run(4));
}

#[test]
fn test_background_is_cleared_to_the_eased_color() {
    let report = run_headless(HeadlessOptions {
        frames: 30,
        ..HeadlessOptions::default()
    })
    .unwrap();

    let (x, y) = (600, 400);
    let at = (y * 640 + x) * 4;
    assert_eq!(
        report.pixels[at..at + 4],
        report.state.shown_background.to_bytes()
    );
    assert_ne!(report.state.shown_background, report.state.background);
}

#[test]
fn test_file_exit_stops_the_run() {
    let script = InputScript::new()
        .move_to(1, 24.0, 11.0)
        .click(2)
        // New, separator, Open, Save, separator, Exit at 100..120.
        .move_to(3, 20.0, 110.0)
        .click(4);

    let report = run_headless(HeadlessOptions {
        frames: 100,
        script,
        ..HeadlessOptions::default()
    })
    .unwrap();

    assert!(report.state.quit_requested);
    assert_eq!(report.frames, 5);
}

#[test]
fn test_clicking_a_separator_does_nothing() {
    let script = InputScript::new()
        .move_to(1, 24.0, 11.0)
        .click(2)
        .move_to(3, 20.0, 46.0)
        .click(4)
        .at(5, [InputEvent::ButtonDown(MouseButton::Left)])
        .at(6, [InputEvent::ButtonUp(MouseButton::Left)]);

    let report = run_headless(HeadlessOptions {
        frames: 10,
        script,
        ..HeadlessOptions::default()
    })
    .unwrap();

    assert!(!report.state.quit_requested);
    assert_eq!(report.frames, 10);
}

#[test]
fn test_ppm_is_written() {
    let path = temp_ppm_path();
    let report = run_headless(HeadlessOptions {
        width: 320,
        height: 240,
        frames: 3,
        script: InputScript::new(),
        ppm: Some(path.clone()),
        ..HeadlessOptions::default()
    })
    .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let header = b"P6\n320 240\n255\n";
    assert_eq!(&bytes[..header.len()], header);
    assert_eq!(bytes.len(), header.len() + 320 * 240 * 3);
    assert_eq!(report.pixels.len(), 320 * 240 * 4);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_tour_parses_from_toml() {
    let script = InputScript::from_toml_str(
        r#"
        [[step]]
        frame = 1
        events = [{ pointer_moved = { x = 20.0, y = 206.0 } }]

        [[step]]
        frame = 2
        events = [{ button_down = "left" }, { button_up = "left" }]
        "#,
    )
    .unwrap();

    let report = run_headless(HeadlessOptions {
        frames: 4,
        script,
        ..HeadlessOptions::default()
    })
    .unwrap();
    assert!(report.state.toggled);
    assert!(tour().last_frame().unwrap() < 40);
}

#[test]
fn test_software_renderer_counts_frames() {
    let mut renderer = SoftwareRenderer::new(4, 4);
    sgui::ui::Renderer::render(&mut renderer, &[], 4.0, 4.0);
    assert_eq!(renderer.frames(), 1);
}
