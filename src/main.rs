//! MathQuest entry point
//!
//! Browser driver on wasm32: fills and toggles the static DOM, wires the
//! menu/board inputs and runs the 1 Hz countdown. Natively it prints a
//! short generator demo; the playable build is `trunk serve`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, KeyboardEvent, MouseEvent};

    use math_quest::audio::{AudioManager, SoundEffect};
    use math_quest::consts::*;
    use math_quest::game::{Judgement, Mode, PuzzleKind, SessionState, daily_seed};
    use math_quest::leaderboard::{self, Leaderboard, ScoreMode};
    use math_quest::platform;

    /// Game instance holding all state
    struct App {
        session: SessionState,
        leaderboard: Leaderboard,
        audio: AudioManager,
        /// Best score ever on this device, kept warm for the footer
        best: u64,
    }

    impl App {
        fn new() -> Self {
            Self {
                session: SessionState::new(),
                leaderboard: Leaderboard::load(),
                audio: AudioManager::new(),
                best: leaderboard::best_score(),
            }
        }

        /// Record a finished run and refresh the stored best
        fn record_game_over(&mut self, final_score: u64) {
            let mode = if self.session.is_daily() {
                ScoreMode::Daily
            } else {
                ScoreMode::Arcade
            };
            self.leaderboard.record(final_score, mode, platform::now_ms());
            self.leaderboard.save();
            self.best = leaderboard::record_best(final_score);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("MathQuest starting...");

        let document = document();

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let app = Rc::new(RefCell::new(App::new()));

        setup_menu_buttons(app.clone());
        setup_board_inputs(app.clone());
        setup_run_buttons(app.clone());
        setup_countdown(app.clone());

        render(&app.borrow(), &document);

        log::info!("MathQuest running!");
    }

    // === DOM helpers ===

    fn document() -> Document {
        web_sys::window()
            .expect("no window")
            .document()
            .expect("no document")
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_enabled(document: &Document, id: &str, enabled: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            if enabled {
                let _ = el.remove_attribute("disabled");
            } else {
                let _ = el.set_attribute("disabled", "");
            }
        }
    }

    fn answer_input(document: &Document) -> Option<HtmlInputElement> {
        document
            .get_element_by_id("answer-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    // === Rendering ===

    /// Sync the whole DOM from the session. Cheap enough to run after
    /// every event and every tick.
    fn render(app: &App, document: &Document) {
        let session = &app.session;

        set_visible(document, "main-menu", session.mode == Mode::Menu);
        set_visible(document, "game-area", session.is_active());
        set_visible(document, "game-over", session.mode == Mode::GameOver);

        if session.is_active() {
            render_hud(session, document);
            render_board(session, document);
        }
        if session.mode == Mode::GameOver {
            set_text(document, "final-score", &session.score.to_string());
        }
        set_text(document, "best-score", &app.best.to_string());
    }

    fn render_hud(session: &SessionState, document: &Document) {
        set_text(document, "hud-level", &format!("Level {}", session.level));
        set_text(document, "hud-streak", &format!("Streak: {}", session.streak));
        set_text(document, "hud-lives", &format!("x{}", session.lives));
        set_text(document, "hud-score", &format!("Score: {}", session.score));
        set_text(
            document,
            "hud-difficulty",
            &format!("Difficulty: {}", session.difficulty()),
        );

        let pct = if session.time_total > 0 {
            (f64::from(session.time_left) / f64::from(session.time_total) * 100.0)
                .clamp(0.0, 100.0)
        } else {
            0.0
        };
        if let Some(bar) = document.get_element_by_id("timer-bar") {
            let _ = bar.set_attribute("style", &format!("width: {pct}%"));
        }
    }

    fn render_board(session: &SessionState, document: &Document) {
        let Some(puzzle) = &session.puzzle else { return };
        set_text(document, "puzzle-prompt", &puzzle.prompt);

        let multiple_choice = puzzle.kind == PuzzleKind::MultipleChoice;
        set_visible(document, "choice-grid", multiple_choice);
        set_visible(document, "input-row", !multiple_choice);

        if multiple_choice {
            for (i, choice) in puzzle.choices.iter().enumerate() {
                set_text(document, &format!("choice-{i}"), choice);
            }
        }

        match &puzzle.explanation {
            Some(explain) => {
                set_text(document, "hint-line", &format!("Hint: {explain}"));
                set_visible(document, "hint-line", true);
            }
            None => set_visible(document, "hint-line", false),
        }

        // Freeze the board between judging and the next serve
        let open = !session.judged();
        for i in 0..CHOICE_COUNT {
            set_enabled(document, &format!("choice-{i}"), open);
        }
        set_enabled(document, "answer-input", open);
        set_enabled(document, "submit-btn", open);
    }

    fn render_leaderboard_modal(board: &Leaderboard, document: &Document) {
        let top = board.top(leaderboard::DISPLAY_ROWS);
        set_visible(document, "leaderboard-empty", top.is_empty());
        for i in 0..leaderboard::DISPLAY_ROWS {
            if let Some(el) = document.get_element_by_id(&format!("lb-row-{i}")) {
                let _ = el.set_attribute(
                    "class",
                    if i < top.len() { "lb-row" } else { "lb-row hidden" },
                );
            }
            if let Some(entry) = top.get(i) {
                set_text(document, &format!("lb-rank-{i}"), &format!("#{}", i + 1));
                set_text(document, &format!("lb-mode-{i}"), entry.mode.as_str());
                set_text(
                    document,
                    &format!("lb-score-{i}"),
                    &format!("{} pts", entry.score),
                );
            }
        }
    }

    // === Game flow ===

    fn submit_answer(app: &Rc<RefCell<App>>, value: &str) {
        let judgement = app.borrow_mut().session.submit(value);
        if let Some(judgement) = judgement {
            handle_judgement(app, judgement);
        }
    }

    fn handle_judgement(app: &Rc<RefCell<App>>, judgement: Judgement) {
        let document = document();
        match judgement {
            Judgement::Correct { .. } => {
                app.borrow().audio.play(SoundEffect::Success);
                schedule_advance(app.clone(), true);
            }
            Judgement::Incorrect { lives_left } => {
                app.borrow().audio.play(SoundEffect::Error);
                log::info!("Missed it, {lives_left} lives left");
                schedule_advance(app.clone(), false);
            }
            Judgement::GameOver { final_score } => {
                {
                    let mut a = app.borrow_mut();
                    a.audio.play(SoundEffect::Error);
                    a.record_game_over(final_score);
                }
                log::info!("Game over, final score {final_score}");
            }
        }
        render(&app.borrow(), &document);
    }

    /// Serve the next puzzle after the reveal pause. The level-up cue
    /// plays here, when the new puzzle lands, not at judging time.
    fn schedule_advance(app: Rc<RefCell<App>>, level_up: bool) {
        let window = web_sys::window().expect("no window");
        let cb = Closure::once_into_js(move || {
            let document = document();
            {
                let mut a = app.borrow_mut();
                // The player may have quit during the pause
                if !a.session.advance() {
                    return;
                }
                if level_up {
                    a.audio.play(SoundEffect::LevelAdvance);
                }
            }
            if let Some(input) = answer_input(&document) {
                input.set_value("");
            }
            render(&app.borrow(), &document);
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            REVEAL_DELAY_MS,
        );
    }

    fn start_run(app: &Rc<RefCell<App>>, daily: bool) {
        let document = document();
        {
            let mut a = app.borrow_mut();
            a.audio.resume();
            if daily {
                let (year, month, day) = platform::today_ymd();
                let seed = daily_seed(year, month, day);
                log::info!("Daily challenge seed: {seed}");
                a.session.start_daily(seed);
            } else {
                a.session.start_arcade();
            }
        }
        if let Some(input) = answer_input(&document) {
            input.set_value("");
        }
        render(&app.borrow(), &document);
    }

    // === Wiring ===

    fn setup_menu_buttons(app: Rc<RefCell<App>>) {
        let document = document();

        {
            let app = app.clone();
            on_click(&document, "start-arcade-btn", move |_| {
                start_run(&app, false);
            });
        }
        {
            let app = app.clone();
            on_click(&document, "start-daily-btn", move |_| {
                start_run(&app, true);
            });
        }

        {
            let document_clone = document.clone();
            on_click(&document, "instructions-btn", move |_| {
                set_visible(&document_clone, "instructions-modal", true);
            });
        }
        {
            let document_clone = document.clone();
            on_click(&document, "instructions-close-btn", move |_| {
                set_visible(&document_clone, "instructions-modal", false);
            });
        }

        {
            let app = app.clone();
            let document_clone = document.clone();
            on_click(&document, "leaderboard-btn", move |_| {
                render_leaderboard_modal(&app.borrow().leaderboard, &document_clone);
                set_visible(&document_clone, "leaderboard-modal", true);
            });
        }
        {
            let document_clone = document.clone();
            on_click(&document, "leaderboard-close-btn", move |_| {
                set_visible(&document_clone, "leaderboard-modal", false);
            });
        }
    }

    fn setup_board_inputs(app: Rc<RefCell<App>>) {
        let document = document();

        // One handler per static choice button; the label is read back at
        // click time, after render has filled it
        for i in 0..CHOICE_COUNT {
            let id = format!("choice-{i}");
            if let Some(btn) = document.get_element_by_id(&id) {
                let app = app.clone();
                let label_source = btn.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let value = label_source.text_content().unwrap_or_default();
                    submit_answer(&app, &value);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        {
            let app = app.clone();
            let input = answer_input(&document);
            on_click(&document, "submit-btn", move |_| {
                if let Some(input) = &input {
                    submit_answer(&app, &input.value());
                }
            });
        }

        // Enter submits from the text input
        if let Some(input) = answer_input(&document) {
            let app = app.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    submit_answer(&app, &input_clone.value());
                }
            });
            let _ =
                input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_run_buttons(app: Rc<RefCell<App>>) {
        let document = document();

        {
            let app = app.clone();
            let document_clone = document.clone();
            on_click(&document, "quit-btn", move |_| {
                app.borrow_mut().session.quit();
                render(&app.borrow(), &document_clone);
            });
        }
        {
            let app = app.clone();
            on_click(&document, "play-again-btn", move |_| {
                start_run(&app, false);
            });
        }
        {
            let document_clone = document.clone();
            on_click(&document, "menu-btn", move |_| {
                app.borrow_mut().session.quit();
                render(&app.borrow(), &document_clone);
            });
        }
    }

    /// One persistent 1 Hz interval for the whole page life. The session
    /// ignores ticks that do not apply, so nothing is ever torn down.
    fn setup_countdown(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut()>::new(move || {
            let judgement = app.borrow_mut().session.on_tick();
            match judgement {
                Some(judgement) => handle_judgement(&app, judgement),
                None => {
                    if app.borrow().session.is_active() {
                        render(&app.borrow(), &document());
                    }
                }
            }
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            1000,
        );
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use math_quest::game::{Mulberry32, generate};
    use math_quest::{daily_seed, platform};

    env_logger::init();
    log::info!("MathQuest (native) starting...");
    log::info!("Run with `trunk serve` for the playable web version");

    let (year, month, day) = platform::today_ymd();
    let seed = daily_seed(year, month, day);
    println!("Daily seed for {year:04}-{month:02}-{day:02}: {seed}");
    println!();

    let mut rng = Mulberry32::new(seed);
    for tier in [1, 3, 5, 7, 10] {
        let puzzle = generate(&mut rng, tier);
        println!("[tier {tier:>2}] {}", puzzle.prompt);
        println!("          answer: {}", puzzle.answer);
        if !puzzle.choices.is_empty() {
            println!("          choices: {}", puzzle.choices.join("  "));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
