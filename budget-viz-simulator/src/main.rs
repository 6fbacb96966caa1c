use budget_viz::{
    AnimatorConfig, BudgetArcAnimator, BudgetLedger, LoanDirection, PacManRenderer, Transaction,
    TransactionKind, Trigger,
};
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PrimitiveStyleBuilder, Rectangle},
    text::Text,
};
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use std::{
    thread,
    time::{Duration, Instant},
};

// Constants for visualization parameters
pub const WIDTH: u32 = 320;
pub const HEIGHT: u32 = 200;
pub const FRAME_DELAY_MS: u64 = 16;
pub const ARC_SCALE: f32 = 0.5;

const WHITE: Rgb888 = Rgb888::new(255, 255, 255);
const BLACK: Rgb888 = Rgb888::new(0, 0, 0);
const GREY: Rgb888 = Rgb888::new(90, 90, 90);

const INCOME_STEP: f32 = 100.0;
const EXPENSE_STEP: f32 = 50.0;
const LOAN_STEP: f32 = 200.0;

fn demo_history() -> [Transaction; 4] {
    [
        Transaction::new(TransactionKind::Income, 800.0),
        Transaction::new(TransactionKind::LoanTaken, 200.0),
        Transaction::new(TransactionKind::Debit, 250.0),
        Transaction::new(TransactionKind::LoanRepayment, 50.0),
    ]
}

fn draw_summary<D>(display: &mut D, ledger: &BudgetLedger) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let summary = ledger.summary();
    let style = MonoTextStyle::new(&FONT_6X10, WHITE);
    let lines = [
        format!("Income    ${:.2}", summary.total_income),
        format!("Expenses  ${:.2}", summary.total_expense),
        format!("Remaining ${:.2}", summary.remaining),
        format!("Left      {:.1}%", summary.remaining_percent),
    ];
    for (row, line) in lines.iter().enumerate() {
        Text::new(line, Point::new(200, 20 + row as i32 * 14), style).draw(display)?;
    }
    Text::new(
        "[I]ncome [E]xpense\n[L]oan [R]epay",
        Point::new(200, 170),
        MonoTextStyle::new(&FONT_6X10, GREY),
    )
    .draw(display)?;
    Ok(())
}

/// Records a keyboard action in the ledger and forwards it to the animator,
/// the way the dashboard forwards a submitted form.
fn handle_key(
    keycode: Keycode,
    ledger: &mut BudgetLedger,
    animator: &mut BudgetArcAnimator,
    at_ms: u64,
) {
    let trigger: Option<Trigger> = match keycode {
        Keycode::I => ledger.record_income(INCOME_STEP, at_ms),
        Keycode::E => ledger.record_expense(EXPENSE_STEP, at_ms),
        Keycode::L => {
            ledger.record_loan(LoanDirection::Taken, LOAN_STEP);
            None
        }
        Keycode::R => {
            ledger.record_loan(LoanDirection::Repaid, LOAN_STEP / 2.0);
            None
        }
        _ => return,
    };
    animator.update_totals(ledger.totals());
    if let Some(trigger) = trigger {
        let outcome = animator.submit_trigger(trigger);
        println!("{:?} {} -> {:?}", trigger.kind, trigger.amount, outcome);
    }
}

fn main() -> Result<(), std::convert::Infallible> {
    // Create a display with the specified width and height
    let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(Size::new(WIDTH, HEIGHT));

    let mut window = Window::new(
        "Budget Arc Simulator",
        &OutputSettingsBuilder::new().scale(2).build(),
    );

    let mut ledger = BudgetLedger::from_transactions(&demo_history());
    let config = AnimatorConfig::default();
    let renderer = PacManRenderer::new(Point::new(100, HEIGHT as i32 / 2), ARC_SCALE, &config);
    let mut animator = match BudgetArcAnimator::new(config, ledger.totals()) {
        Ok(animator) => animator,
        Err(err) => {
            eprintln!("invalid animator config: {}", err);
            return Ok(());
        }
    };

    let started = Instant::now();
    let mut last_frame = Instant::now();

    // Main loop
    'running: loop {
        display.clear(BLACK)?;

        let now = Instant::now();
        let dt = now - last_frame;
        last_frame = now;

        if let Some(status) = animator.update(&mut display, &renderer, dt)? {
            println!(
                "animating: {}, eating: {}",
                status.is_animating, status.is_eating
            );
        }
        draw_summary(&mut display, &ledger)?;

        Rectangle::with_corners(Point::zero(), Point::new(WIDTH as i32 - 1, HEIGHT as i32 - 1))
            .into_styled(
                PrimitiveStyleBuilder::new()
                    .stroke_color(GREY)
                    .stroke_width(1)
                    .build(),
            )
            .draw(&mut display)?;

        window.update(&display);

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown {
                    keycode,
                    repeat: false,
                    ..
                } => {
                    let at_ms = started.elapsed().as_millis() as u64;
                    handle_key(keycode, &mut ledger, &mut animator, at_ms);
                }
                _ => {}
            }
        }

        thread::sleep(Duration::from_millis(FRAME_DELAY_MS));
    }

    animator.dispose();
    Ok(())
}
