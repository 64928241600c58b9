use crate::browser::{self, html};
use crate::state::DisplayState;
use anyhow::{anyhow, Result};
use web_sys::HtmlElement;

const HIDDEN_CLASS: &str = "hidden";

/// Page elements around the canvas: running timer, result panel and the
/// values captured into it
pub struct Hud {
    canvas: HtmlElement,
    elapsed_time: HtmlElement,
    timer_box: HtmlElement,
    message: HtmlElement,
    win_message: HtmlElement,
    lose_message: HtmlElement,
    game_time: HtmlElement,
    treasure_count: HtmlElement,
}

impl Hud {
    pub fn new() -> Result<Self> {
        Ok(Hud {
            canvas: browser::element(html::CANVAS_ID)?,
            elapsed_time: browser::element(html::ELAPSED_TIME_ID)?,
            timer_box: browser::element(html::TIMER_BOX_ID)?,
            message: browser::element(html::MESSAGE_ID)?,
            win_message: browser::element(html::WIN_MESSAGE_ID)?,
            lose_message: browser::element(html::LOSE_MESSAGE_ID)?,
            game_time: browser::element(html::GAME_TIME_ID)?,
            treasure_count: browser::element(html::TREASURE_COUNT_ID)?,
        })
    }

    pub fn set_elapsed(&self, seconds: f64) {
        self.elapsed_time.set_inner_text(&format_seconds(seconds));
    }

    pub fn show(&self, display: DisplayState) -> Result<()> {
        match display {
            DisplayState::None => set_display(&self.message, "none")?,
            DisplayState::Win { elapsed, treasures } => {
                self.game_time.set_inner_text(&format_seconds(elapsed));
                self.treasure_count.set_inner_text(&treasures.to_string());
                self.open_panel(&self.win_message, &self.lose_message)?;
            }
            DisplayState::Lose => self.open_panel(&self.lose_message, &self.win_message)?,
        }
        self.set_timer_hidden(hides_timer(display))
    }

    fn open_panel(&self, shown: &HtmlElement, hidden: &HtmlElement) -> Result<()> {
        self.message
            .style()
            .set_property("left", &format!("{}px", self.canvas.offset_left()))
            .map_err(|err| anyhow!("Could not place message : {:#?}", err))?;
        set_display(shown, "flex")?;
        set_display(hidden, "none")?;
        set_display(&self.message, "flex")
    }

    fn set_timer_hidden(&self, hidden: bool) -> Result<()> {
        let classes = self.timer_box.class_list();
        let result = if hidden {
            classes.add_1(HIDDEN_CLASS)
        } else {
            classes.remove_1(HIDDEN_CLASS)
        };
        result.map_err(|err| anyhow!("Could not toggle timer : {:#?}", err))
    }
}

/// The running timer goes away only once the player has won; after a loss
/// the board is already reset and the timer stays under the message
pub fn hides_timer(display: DisplayState) -> bool {
    matches!(display, DisplayState::Win { .. })
}

fn set_display(element: &HtmlElement, value: &str) -> Result<()> {
    element
        .style()
        .set_property("display", value)
        .map_err(|err| anyhow!("Could not set display to {} : {:#?}", value, err))
}

/// Seconds with one decimal, the way the timer shows them
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.1}", seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_have_one_decimal() {
        assert_eq!(format_seconds(0.0), "0.0");
        assert_eq!(format_seconds(12.345), "12.3");
        assert_eq!(format_seconds(59.96), "60.0");
    }

    #[test]
    fn timer_hidden_only_after_a_win() {
        assert!(hides_timer(DisplayState::Win {
            elapsed: 4.2,
            treasures: 3,
        }));
        assert!(!hides_timer(DisplayState::Lose));
        assert!(!hides_timer(DisplayState::None));
    }
}
