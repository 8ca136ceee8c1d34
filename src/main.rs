//! Lucky Reels entry point
//!
//! Handles platform-specific initialization. On the web this wires the spin
//! engine to the page; natively it plays a few instant spins in the console.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlButtonElement, HtmlSelectElement};

    use lucky_reels::platform::time::{now_ms, sleep_ms};
    use lucky_reels::sim::SpinOutcome;
    use lucky_reels::{BetPerLine, Settings, SlotMachine, SpinError, SpinRequest};

    /// Game instance holding the machine and the last shown result
    struct Game {
        machine: SlotMachine,
        last_outcome: Option<SpinOutcome>,
    }

    fn page_document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn select(document: &Document, id: &str) -> Option<HtmlSelectElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_html(document: &Document, id: &str, html: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_inner_html(html);
        }
    }

    impl Game {
        /// Enable/disable the trigger and inputs while a spin is in flight
        fn set_controls_enabled(&self, document: &Document, enabled: bool) {
            if let Some(btn) = document
                .get_element_by_id("spin-btn")
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            {
                btn.set_disabled(!enabled);
                btn.set_text_content(Some(if enabled { "Spin" } else { "Spinning..." }));
            }
            for id in ["payline-select", "bet-select"] {
                if let Some(sel) = select(document, id) {
                    sel.set_disabled(!enabled);
                }
            }
        }

        /// Render reels, result, history and leaderboard
        fn render(&self, document: &Document) {
            let settings = self.machine.settings();

            if let Some(outcome) = &self.last_outcome {
                let winning_cells = outcome.winning_cells(&settings.paylines);
                let mut html = String::new();
                for (r, reel) in outcome.grid.reels().iter().enumerate() {
                    html.push_str("<div class=\"reel\">");
                    for (row, symbol) in reel.iter().enumerate() {
                        let flat = r * outcome.grid.row_count() + row;
                        let class = if winning_cells.contains(&flat) { "cell win" } else { "cell" };
                        html.push_str(&format!("<div class=\"{class}\">{symbol}</div>"));
                    }
                    html.push_str("</div>");
                }
                set_html(document, "reels", &html);
                set_text(document, "result", &outcome.message());
            }

            let state = self.machine.state();
            let history: String = state
                .history
                .page(0, 20)
                .iter()
                .map(|o| format!("<li>#{} {}</li>", o.id, o.message()))
                .collect();
            set_html(document, "history", &history);

            let board: String = state
                .leaderboard
                .entries()
                .iter()
                .enumerate()
                .map(|(i, e)| format!("<li>{}. {} coins (spin #{})</li>", i + 1, e.payout, e.spin_id))
                .collect();
            set_html(document, "leaderboard", &board);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Lucky Reels starting...");

        let Some(document) = page_document() else {
            log::error!("No document to mount on");
            return;
        };

        let seed = now_ms();
        let machine = match SlotMachine::new(Settings::default(), seed) {
            Ok(m) => m,
            Err(e) => {
                log::error!("Invalid default settings: {}", e);
                return;
            }
        };
        log::info!("Machine initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            machine,
            last_outcome: None,
        }));

        populate_selects(&document, &game.borrow().machine);
        setup_spin_button(&document, game.clone());
        setup_payline_select(&document, game.clone());
        setup_bet_select(&document, game.clone());

        game.borrow().render(&document);
        log::info!("Lucky Reels running!");
    }

    fn populate_selects(document: &Document, machine: &SlotMachine) {
        let settings = machine.settings();
        let lines: String = (1..=settings.defined_paylines())
            .map(|n| format!("<option value=\"{n}\">{n}</option>"))
            .collect();
        set_html(document, "payline-select", &lines);

        let bets: String = BetPerLine::ALL
            .iter()
            .map(|b| format!("<option value=\"{0}\">{0}</option>", b.as_str()))
            .collect();
        set_html(document, "bet-select", &bets);

        if let Some(sel) = select(document, "payline-select") {
            sel.set_value(&settings.active_paylines.to_string());
        }
        if let Some(sel) = select(document, "bet-select") {
            sel.set_value(settings.bet_per_line.as_str());
        }
    }

    fn setup_spin_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("spin-btn") else {
            log::warn!("No #spin-btn on page");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let Some(document) = page_document() else { return };
            let request = game.borrow_mut().machine.request_spin(now_ms());
            match request {
                Ok(SpinRequest::Settled(outcome)) => {
                    let mut g = game.borrow_mut();
                    g.last_outcome = Some(outcome);
                    g.render(&document);
                }
                Ok(SpinRequest::Pending {
                    ticket, ready_at_ms, ..
                }) => {
                    game.borrow().set_controls_enabled(&document, false);
                    let delay = ready_at_ms.saturating_sub(now_ms()) as u32;
                    let game = game.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        sleep_ms(delay).await;
                        let mut g = game.borrow_mut();
                        if let Some(outcome) = g.machine.complete(ticket) {
                            g.last_outcome = Some(outcome);
                        }
                        g.set_controls_enabled(&document, true);
                        g.render(&document);
                    });
                }
                Err(SpinError::Busy) => {}
                Err(e) => log::warn!("Spin rejected: {}", e),
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_payline_select(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(sel) = select(document, "payline-select") else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(document) = page_document() else { return };
            let Some(sel) = select(&document, "payline-select") else { return };
            let mut g = game.borrow_mut();
            let applied = sel
                .value()
                .parse::<usize>()
                .map_err(|_| log::warn!("Not a payline count: {}", sel.value()))
                .and_then(|n| {
                    g.machine
                        .set_active_paylines(n)
                        .map_err(|e| log::warn!("Payline edit rejected: {}", e))
                });
            if applied.is_err() {
                sel.set_value(&g.machine.settings().active_paylines.to_string());
            }
        });
        let _ = sel.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_bet_select(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(sel) = select(document, "bet-select") else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(document) = page_document() else { return };
            let Some(sel) = select(&document, "bet-select") else { return };
            let mut g = game.borrow_mut();
            let applied = sel
                .value()
                .parse::<u32>()
                .map_err(|_| log::warn!("Not a bet value: {}", sel.value()))
                .and_then(|v| {
                    g.machine
                        .set_bet_value(v)
                        .map_err(|e| log::warn!("Bet edit rejected: {}", e))
                });
            if applied.is_err() {
                sel.set_value(g.machine.settings().bet_per_line.as_str());
            }
        });
        let _ = sel.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Console demo arguments: `lucky-reels [seed] [spins] [paylines] [bet]`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, PartialEq, Eq)]
struct DemoArgs {
    seed: Option<u64>,
    spins: Option<u64>,
    paylines: Option<usize>,
    bet: Option<u32>,
}

#[cfg(not(target_arch = "wasm32"))]
impl DemoArgs {
    fn parse(args: &[String]) -> Result<Self, String> {
        fn field<T: std::str::FromStr>(
            args: &[String],
            i: usize,
            name: &str,
        ) -> Result<Option<T>, String> {
            args.get(i)
                .map(|a| a.parse::<T>().map_err(|_| format!("invalid {name}: {a}")))
                .transpose()
        }

        if args.len() > 4 {
            return Err(format!("unexpected argument: {}", args[4]));
        }
        Ok(Self {
            seed: field(args, 0, "seed")?,
            spins: field(args, 1, "spin count")?,
            paylines: field(args, 2, "payline count")?,
            bet: field(args, 3, "bet per line")?,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lucky_reels::{Presentation, Settings, SlotMachine, SpinRequest, platform};

    env_logger::init();
    log::info!("Lucky Reels (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match DemoArgs::parse(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: lucky-reels [seed] [spins] [paylines] [bet]");
            std::process::exit(2);
        }
    };
    let seed = args.seed.unwrap_or_else(platform::now_ms);
    let spins = args.spins.unwrap_or(10);

    let base = Settings {
        presentation: Presentation::Instant,
        ..Default::default()
    };
    let settings = base
        .with_active_paylines(args.paylines.unwrap_or(base.defined_paylines()))
        .and_then(|s| s.with_bet_value(args.bet.unwrap_or(1)));
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let mut machine = match SlotMachine::new(settings, seed) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };
    log::info!("Machine initialized with seed: {}", seed);

    for _ in 0..spins {
        let outcome = match machine.request_spin(platform::now_ms()) {
            Ok(SpinRequest::Settled(outcome)) => Some(outcome),
            Ok(SpinRequest::Pending { ticket, .. }) => machine.complete(ticket),
            Err(e) => {
                eprintln!("Spin failed: {e}");
                std::process::exit(1);
            }
        };
        if let Some(outcome) = outcome {
            println!("Spin #{}\n{}\n{}\n", outcome.id, outcome.grid, outcome.message());
        }
    }

    let state = machine.state();
    println!("Won {} coins over {} spins", state.total_won(), state.history.len());
    println!("Leaderboard:");
    for (i, entry) in state.leaderboard.entries().iter().enumerate() {
        println!("{:>2}. {:>5} coins (spin #{})", i + 1, entry.payout, entry.spin_id);
    }
}
