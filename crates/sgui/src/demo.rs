//! The reference form UI and a headless host that drives it.
//!
//! ```text
//! ┌ File  Edit ───────────────────────────┐  menu bar, 22px
//! │ ┌────────────────────┐                │
//! │ │ wrapped greeting   │  64px docked   │
//! │ │ R ━━━━━━━━━━━━━━━━ │  sliders       │
//! │ │ G ━━━━━━━━━━━━━━━━ │                │
//! │ │ B ━━━━━━━━━━━━━━━━ │                │
//! │ │ User     [       ] │  edits         │
//! │ │ Password [*******] │                │
//! │ │ [x] Toggle         │                │
//! │ │ [Oranges        v] │  dropdown      │
//! │ │ [    Button      ] │                │
//! │ └────────────────────┘                │
//! └───────────────────────────────────────┘
//! ```
//!
//! The window background eases towards the color the sliders pick.

use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sgui_render::SoftwareRenderer;
use sgui_ui::font::GRID;
use sgui_ui::{
    gen_id, BufferedInput, Color, Dock, FontAtlas, Gui, GuiConfig, InputEvent, InputSource, Key,
    ManualClock, MouseButton, Overflow, Renderer, UiResult,
};

use crate::script::InputScript;

/// Items of the File menu.
pub const FILE_MENU: [&str; 6] = ["New", "-", "Open", "Save", "-", "Exit"];
/// Index of "Exit" in [`FILE_MENU`].
pub const FILE_EXIT: usize = 5;
/// Items of the Edit menu.
pub const EDIT_MENU: [&str; 4] = ["Undo", "Redo", "-", "Random Background"];
/// Index of "Random Background" in [`EDIT_MENU`].
pub const EDIT_RANDOM_BACKGROUND: usize = 3;
/// Dropdown items. The last one is wider than the dropdown on purpose.
pub const FRUIT: [&str; 4] = [
    "Apples",
    "Oranges",
    "Grapes",
    "Really freakin' long text that gets hidden",
];

/// Greeting shown in the docked text panel.
pub const GREETING: &str = "Hello World! This is a simple test.";

/// Fraction of the remaining distance the background covers per frame.
const BACKGROUND_EASING: f32 = 0.1;

/// Application state the demo UI edits.
#[derive(Debug, Clone)]
pub struct DemoState {
    /// Background color picked by the sliders.
    pub background: Color,
    /// Background color currently shown, easing towards `background`.
    pub shown_background: Color,
    /// User name field.
    pub user: String,
    /// Password field.
    pub password: String,
    /// Last committed user name.
    pub committed_user: Option<String>,
    /// Toggle value.
    pub toggled: bool,
    /// Dropdown selection.
    pub fruit: Option<usize>,
    /// Times the button was clicked.
    pub button_clicks: u32,
    /// Set when File > Exit was chosen.
    pub quit_requested: bool,
    rng: ChaCha8Rng,
}

impl DemoState {
    /// Creates the initial state. `seed` drives Edit > Random Background.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            background: Color::BLACK,
            shown_background: Color::BLACK,
            user: String::new(),
            password: String::new(),
            committed_user: None,
            toggled: false,
            fruit: Some(1),
            button_clicks: 0,
            quit_requested: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Picks a new random target background.
    pub fn randomize_background(&mut self) {
        self.background = Color::rgb(self.rng.gen(), self.rng.gen(), self.rng.gen());
        tracing::debug!(background = ?self.background, "background randomized");
    }

    /// Moves the shown background one step towards the target.
    pub fn ease_background(&mut self) {
        self.shown_background = self
            .shown_background
            .lerp(self.background, BACKGROUND_EASING)
            .with_alpha(1.0);
    }
}

impl Default for DemoState {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Declares one frame of the demo UI. Call between `prepare` and `finish`.
pub fn declare_ui<I: InputSource, R: Renderer>(gui: &mut Gui<I, R>, state: &mut DemoState, width: f32) {
    gui.push_container(0.0, 0.0, width, 22.0);
    let file_width = gui.text_width("File") + 16.0;
    gui.push_layout(0.0, 0.0, file_width, 0.0, Dock::Left, 0.0);
    if gui.menu(gen_id!(), "File", &FILE_MENU).value == Some(FILE_EXIT) {
        tracing::info!("exit requested from the file menu");
        state.quit_requested = true;
    }
    gui.pop_layout();

    let edit_width = gui.text_width("Edit") + 16.0;
    gui.push_layout(0.0, 0.0, edit_width, 0.0, Dock::Left, 0.0);
    if gui.menu(gen_id!(), "Edit", &EDIT_MENU).value == Some(EDIT_RANDOM_BACKGROUND) {
        state.randomize_background();
    }
    gui.pop_layout();
    gui.pop_container();

    gui.push_container(10.0, 25.0, 240.0, 420.0);
    gui.push_container_docked(0.0, 64.0, Dock::Top);
    gui.text(0.0, 0.0, GREETING, Overflow::Wrap);
    gui.pop_container();

    for (channel, label) in ["R", "G", "B"].into_iter().enumerate() {
        gui.push_layout(0.0, 0.0, 0.0, 22.0, Dock::Top, 0.0);
        let value = match channel {
            0 => &mut state.background.r,
            1 => &mut state.background.g,
            _ => &mut state.background.b,
        };
        *value = gui.slider(gen_id!(channel), *value, 0.0, 1.0, label).value;
        gui.pop_layout();
    }

    gui.push_layout(0.0, 0.0, 0.0, 20.0, Dock::Top, 0.0);
    labelled_row(gui, "User");
    let response = gui.edit(gen_id!(), &mut state.user, false);
    if response.committed {
        state.committed_user = Some(state.user.clone());
    }
    gui.pop_layout();
    gui.pop_layout();

    gui.push_layout(0.0, 0.0, 0.0, 20.0, Dock::Top, 0.0);
    labelled_row(gui, "Password");
    gui.edit(gen_id!(), &mut state.password, true);
    gui.pop_layout();
    gui.pop_layout();

    gui.push_layout(0.0, 0.0, 0.0, 22.0, Dock::Top, 0.0);
    state.toggled = gui.toggle(gen_id!(), "Toggle", state.toggled).value;
    gui.pop_layout();

    gui.push_layout(0.0, 0.0, 0.0, 22.0, Dock::Top, 0.0);
    state.fruit = gui.dropdown(gen_id!(), &FRUIT, state.fruit).value;
    gui.pop_layout();

    gui.push_layout(0.0, 0.0, 0.0, 22.0, Dock::Top, 0.0);
    if gui.button(gen_id!(), "Button").clicked {
        state.button_clicks += 1;
    }
    gui.pop_layout();
    gui.pop_container();
}

/// Draws a 64px caption and leaves a fill layout open for the field.
fn labelled_row<I: InputSource, R: Renderer>(gui: &mut Gui<I, R>, caption: &str) {
    gui.push_layout(0.0, 0.0, 64.0, 0.0, Dock::Left, 0.0);
    gui.text(0.0, 4.0, caption, Overflow::Clip);
    gui.pop_layout();
    gui.push_layout(0.0, 0.0, 0.0, 0.0, Dock::Fill, 0.0);
}

/// A font atlas whose printable glyphs are hollow boxes, so text is visible
/// without shipping a font.
#[must_use]
pub fn placeholder_font(cell_width: u32, cell_height: u32) -> FontAtlas {
    let (width, height) = (cell_width * GRID, cell_height * GRID);
    let mut pixels = vec![0u8; width as usize * height as usize * 4];
    for code in 0x21..0x7F_u32 {
        let (cx, cy) = ((code % GRID) * cell_width, (code / GRID) * cell_height);
        for y in 2..cell_height.saturating_sub(2) {
            for x in 1..cell_width.saturating_sub(1) {
                let edge = y == 2 || y + 3 == cell_height || x == 1 || x + 2 == cell_width;
                if edge {
                    let at = (((cy + y) * width + cx + x) * 4) as usize;
                    pixels[at..at + 4].copy_from_slice(&[255, 255, 255, 255]);
                }
            }
        }
    }
    FontAtlas::new(pixels, width, height).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "placeholder font rejected, using a blank atlas");
        FontAtlas::blank(cell_width, cell_height)
    })
}

/// Options for [`run_headless`].
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    /// Viewport width.
    pub width: u32,
    /// Viewport height.
    pub height: u32,
    /// Frames to run. The run also stops when File > Exit is chosen.
    pub frames: u64,
    /// Seed for the random background.
    pub seed: u64,
    /// Engine configuration.
    pub config: GuiConfig,
    /// Input timeline.
    pub script: InputScript,
    /// Where to write the last frame, if anywhere.
    pub ppm: Option<PathBuf>,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frames: 120,
            seed: 0,
            config: GuiConfig::default(),
            script: tour(),
            ppm: None,
        }
    }
}

/// Outcome of a headless run.
#[derive(Debug, Clone)]
pub struct DemoReport {
    /// Frames actually run.
    pub frames: u64,
    /// Final application state.
    pub state: DemoState,
    /// Commands in the last frame.
    pub commands: usize,
    /// Last frame's RGBA8 pixels.
    pub pixels: Vec<u8>,
}

/// Milliseconds the manual clock advances per frame.
const FRAME_MS: u64 = 16;

/// Runs the demo UI with scripted input and a software renderer.
///
/// # Errors
///
/// Returns an error if the final frame cannot be written.
#[allow(clippy::cast_precision_loss)]
pub fn run_headless(options: HeadlessOptions) -> UiResult<DemoReport> {
    let clock = ManualClock::new();
    let input = BufferedInput::new().with_clock(clock.clone());
    let events = input.sender();
    let renderer = SoftwareRenderer::new(options.width, options.height);
    let mut gui = Gui::with_config(input, renderer, placeholder_font(8, 12), options.config);
    let mut state = DemoState::new(options.seed);
    let (width, height) = (options.width as f32, options.height as f32);

    tracing::info!(frames = options.frames, width, height, "headless run starting");
    let mut frames = 0;
    while frames < options.frames && !state.quit_requested {
        options.script.deliver(frames, &events);
        gui.prepare();
        declare_ui(&mut gui, &mut state, width);
        state.ease_background();
        gui.renderer_mut().set_clear_color(state.shown_background);
        gui.finish(width, height);
        clock.advance(FRAME_MS);
        frames += 1;
    }

    if let Some(path) = &options.ppm {
        gui.renderer().write_ppm(path)?;
    }
    tracing::info!(frames, clicks = state.button_clicks, "headless run finished");

    Ok(DemoReport {
        frames,
        commands: gui.last_commands().len(),
        pixels: gui.renderer().pixels().to_vec(),
        state,
    })
}

/// Scripted tour of the demo UI at the default 640×480 size and 8×12 font.
///
/// Randomizes the background, drags the red slider to full, fills in both
/// fields, flips the toggle, picks "Grapes" and clicks the button.
#[must_use]
pub fn tour() -> InputScript {
    InputScript::new()
        // Edit > Random Background.
        .move_to(1, 72.0, 11.0)
        .click(2)
        .move_to(3, 100.0, 80.0)
        .click(4)
        // Red slider from the left edge to past the right edge.
        .move_to(6, 12.0, 100.0)
        .at(7, [InputEvent::ButtonDown(MouseButton::Left)])
        .move_to(8, 400.0, 100.0)
        .at(9, [InputEvent::ButtonUp(MouseButton::Left)])
        // User field, then Tab into the password field.
        .move_to(11, 150.0, 165.0)
        .click(12)
        .type_text(13, "admin")
        .tap(14, Key::Tab)
        .type_text(15, "hunter2")
        .tap(16, Key::Enter)
        // Toggle.
        .move_to(18, 20.0, 206.0)
        .click(19)
        // Dropdown > Grapes.
        .move_to(21, 100.0, 228.0)
        .click(22)
        .move_to(23, 100.0, 289.0)
        .click(24)
        // Button.
        .move_to(26, 100.0, 250.0)
        .click(27)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_eases_towards_target() {
        let mut state = DemoState::new(1);
        state.background = Color::WHITE;
        state.ease_background();
        assert!((state.shown_background.r - 0.1).abs() < 1e-6);
        for _ in 0..200 {
            state.ease_background();
        }
        assert!((state.shown_background.r - 1.0).abs() < 1e-3);
        assert_eq!(state.shown_background.a, 1.0);
    }

    #[test]
    fn test_random_background_is_seeded() {
        let mut a = DemoState::new(7);
        let mut b = DemoState::new(7);
        a.randomize_background();
        b.randomize_background();
        assert_eq!(a.background, b.background);
        assert_ne!(a.background, Color::BLACK);
    }

    #[test]
    fn test_placeholder_font_has_visible_glyphs() {
        let font = placeholder_font(8, 12);
        let source = font.glyph_source('A').unwrap();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (x, y) = (source.x as usize + 1, source.y as usize + 2);
        let at = (y * font.width() as usize + x) * 4;
        assert_eq!(font.pixels()[at + 3], 255);

        let space = font.glyph_source(' ').unwrap();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let at = ((space.y as usize + 2) * font.width() as usize + space.x as usize + 1) * 4;
        assert_eq!(font.pixels()[at + 3], 0);
    }
}
