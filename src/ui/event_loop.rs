//! Pumps user input and rendering for the calculator page

use crossterm::event::{self, Event, KeyEventKind};
use tokio::time::{self, Duration};

use crate::api::source::CreatureSource;
use crate::calc::formula::DamageCalculator;
use crate::core::error::Result;
use crate::core::types::Role;
use crate::session::controller::Controller;
use crate::session::state::{RegionView, Session};
use crate::ui::state::{LogCategory, PageUI, UiCommand};
use crate::ui::terminal::Tui;
use crate::ui::widgets;

const FRAME_INTERVAL_MS: u64 = 16;

/// Run the page until the user quits
pub async fn run<S, C>(terminal: &mut Tui, controller: &Controller<S, C>) -> Result<()>
where
    S: CreatureSource + 'static,
    C: DamageCalculator + 'static,
{
    let mut ui = PageUI::new();
    ui.log(
        "Type an attacker and a defender, then pick a move".into(),
        LogCategory::System,
    );
    let mut previous = controller.snapshot();

    loop {
        let session = controller.snapshot();
        log_changes(&mut ui, &previous, &session);
        ui.sync_moves(&previous, &session);
        terminal.draw(|frame| widgets::render(frame, &ui, &session))?;
        previous = session;

        time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)).await;

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let command = ui.handle_key(key, &previous);
            if dispatch(controller, command) {
                tracing::info!("Quit requested");
                return Ok(());
            }
        }
    }
}

/// Forward a command to the controller. Returns true on quit.
fn dispatch<S, C>(controller: &Controller<S, C>, command: UiCommand) -> bool
where
    S: CreatureSource + 'static,
    C: DamageCalculator + 'static,
{
    match command {
        UiCommand::None => {}
        UiCommand::Quit => return true,
        UiCommand::InputChanged(role, text) => controller.on_input(role, &text),
        UiCommand::SelectMove(choice) => controller.select_move(choice.as_deref()),
        UiCommand::DismissAlert => controller.dismiss_alert(),
    }
    false
}

fn log_changes(ui: &mut PageUI, previous: &Session, current: &Session) {
    for role in Role::ALL {
        let view = current.view(role);
        if view == previous.view(role) {
            continue;
        }
        match view {
            RegionView::Details(summary) => {
                ui.log(format!("{}: {}", role, summary.name), LogCategory::Input)
            }
            RegionView::Error(message) => {
                ui.log(format!("{}: {}", role, message), LogCategory::Input)
            }
            RegionView::Empty => {}
        }
    }

    if current.damage_line != previous.damage_line {
        if let Some(line) = &current.damage_line {
            ui.log(line.clone(), LogCategory::Calculation);
        }
    }
    if current.alert.is_some() && previous.alert.is_none() {
        if let Some(alert) = &current.alert {
            ui.log(alert.clone(), LogCategory::System);
        }
    }
}
