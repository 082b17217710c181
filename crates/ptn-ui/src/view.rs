//! View seam between the controller and the page
//!
//! The controller only talks to [`View`]. In the browser it is backed by
//! `DomView` (web-sys); tests use an in-memory recorder.

/// Page regions whose visibility the controller toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Interactive section holding stats, charts and table
    Results,
    Loading,
    Charts,
    Stats,
}

/// CSS `display` values the controller uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Display {
    #[default]
    None,
    Block,
    Flex,
    Grid,
}

impl Display {
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::None => "none",
            Display::Block => "block",
            Display::Flex => "flex",
            Display::Grid => "grid",
        }
    }
}

/// Average-statistic slots in the summary block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatSlot {
    AvgCapacity,
    AvgFee,
}

/// Number of cells in a table row: programme, capacity, fee
pub const TABLE_COLUMNS: usize = 3;

pub type TableRow = [String; TABLE_COLUMNS];

/// Page operations the selection controller needs.
pub trait View {
    /// Remove the active marker from every PTN card
    fn clear_active_cards(&mut self);

    /// Mark the card for `ptn` active. Returns false when no card matches.
    fn activate_card(&mut self, ptn: &str) -> bool;

    fn set_selected_label(&mut self, text: &str);

    fn set_display(&mut self, region: Region, display: Display);

    /// Smooth-scroll the results section to the top of the viewport
    fn scroll_to_results(&mut self);

    fn set_stat(&mut self, slot: StatSlot, text: &str);

    fn clear_table(&mut self);

    fn append_row(&mut self, row: &TableRow);

    /// Blocking user notification
    fn notify(&mut self, message: &str);
}

/// CSS attribute selector `[attr="value"]` with the value escaped.
///
/// Quotes and backslashes get a backslash; control characters become hex
/// escapes (`\a ` for a newline) since a raw newline ends the string token.
pub fn attribute_selector(attribute: &str, value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\0' => escaped.push('\u{FFFD}'),
            c if c.is_control() => {
                escaped.push_str(&format!("\\{:x} ", c as u32));
            }
            c => escaped.push(c),
        }
    }
    format!("[{}=\"{}\"]", attribute, escaped)
}
