//! Counts down to the instant given as the first argument, or to 90 seconds
//! from now. Press `r` to add a minute, `q` to quit.

use bubbletea_countdown::prelude::*;
use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, Program};
use chrono::{DateTime, Duration, Utc};
use crossterm::event::KeyCode;

struct App {
    countdown: Countdown,
    until: DateTime<Utc>,
    error: Option<String>,
}

impl App {
    fn target() -> DateTime<Utc> {
        std::env::args()
            .nth(1)
            .and_then(|raw| parse_instant(&raw))
            .unwrap_or_else(|| Utc::now() + Duration::seconds(90))
    }

    fn extend(&mut self) -> Option<Cmd> {
        self.until += Duration::minutes(1);
        match self.countdown.set_until(self.until.to_rfc3339()) {
            Ok(cmd) => cmd,
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let until = Self::target();
        let config = CountdownConfig::new(until.to_rfc3339())
            .with_slot(Unit::Days)
            .with_padded_slot(Unit::Hours, 2)
            .with_padded_slot(Unit::Minutes, 2)
            .with_padded_slot(Unit::Seconds, 2);

        let mut app = App {
            countdown: countdown_new(config),
            until,
            error: None,
        };
        let cmd = match app.countdown.activate() {
            Ok(cmd) => cmd,
            Err(err) => {
                app.error = Some(err.to_string());
                None
            }
        };
        (app, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return match key.key {
                KeyCode::Char('q') | KeyCode::Esc => Some(quit()),
                KeyCode::Char('r') => self.extend(),
                _ => None,
            };
        }
        self.countdown.update(msg)
    }

    fn view(&self) -> String {
        if let Some(err) = &self.error {
            return format!("error: {err}\n");
        }
        let status = if self.countdown.finished() {
            "Done!"
        } else {
            "Counting down"
        };
        format!(
            "{status}\n\n  {}\n\n  until {}\n\n[r] +1 minute  [q] quit\n",
            self.countdown.view(),
            self.until.to_rfc3339()
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::<App>::builder().build()?;
    program.run().await?;
    Ok(())
}
