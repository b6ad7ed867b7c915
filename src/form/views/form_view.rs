//! # Form Layout
//!
//! Turns form state into styled lines. This is a pure function of the model
//! and the focused control; it holds no state and makes no decisions beyond
//! what to show.

use crate::form::events::FormFocus;
use crate::form::models::{FormModel, LOCATION_PLACEHOLDER};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const CHECKING_TEXT: &str = "Checking name...";
pub const DUPLICATE_TEXT: &str = "This name has been chosen before";
pub const HELP_TEXT: &str = "Tab: next  Shift+Tab: previous  ←/→: location  Enter: add  Esc: quit";

/// Widest an input box gets, borders excluded
const MAX_INPUT_WIDTH: usize = 40;

/// Semantic style of a span; the renderer maps it to terminal attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    Label,
    Input { focused: bool },
    Placeholder { focused: bool },
    Error,
    Checking,
    Duplicate,
    Button { focused: bool, enabled: bool },
    TableHeader,
    Hint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn new<S: Into<String>>(text: S, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One screen row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewLine {
    pub spans: Vec<Span>,
}

impl ViewLine {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn single<S: Into<String>>(text: S, style: SpanStyle) -> Self {
        Self {
            spans: vec![Span::new(text, style)],
        }
    }

    pub fn push<S: Into<String>>(&mut self, text: S, style: SpanStyle) {
        self.spans.push(Span::new(text, style));
    }

    /// Unstyled text of the row
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

pub struct FormView;

impl FormView {
    /// Lay out the whole form for a terminal `width` columns wide
    pub fn compose(form: &FormModel, focus: FormFocus, width: u16) -> Vec<ViewLine> {
        let input_width = (width as usize).saturating_sub(4).clamp(8, MAX_INPUT_WIDTH);
        let mut lines = Vec::new();

        Self::compose_name(form, focus, input_width, &mut lines);
        lines.push(ViewLine::blank());
        Self::compose_location(form, focus, input_width, &mut lines);
        lines.push(ViewLine::blank());
        lines.push(Self::compose_buttons(form, focus, input_width));
        lines.push(ViewLine::blank());
        Self::compose_table(form, &mut lines);
        lines.push(ViewLine::blank());
        lines.push(ViewLine::single(HELP_TEXT, SpanStyle::Hint));

        lines
    }

    fn compose_name(form: &FormModel, focus: FormFocus, width: usize, lines: &mut Vec<ViewLine>) {
        let focused = focus == FormFocus::Name;
        let validation = form.validation();

        lines.push(ViewLine::single("Name", SpanStyle::Label));

        let mut value = form.fields().name().to_string();
        if focused {
            value.push('_');
        }
        lines.push(boxed(&value, width, SpanStyle::Input { focused }, focused));

        if let Some(error) = form.visible_errors().name {
            lines.push(ViewLine::single(error.message(), SpanStyle::Error));
        }
        if validation.is_checking {
            lines.push(ViewLine::single(CHECKING_TEXT, SpanStyle::Checking));
        }
        if validation.is_duplicate {
            lines.push(ViewLine::single(DUPLICATE_TEXT, SpanStyle::Duplicate));
        }
    }

    fn compose_location(
        form: &FormModel,
        focus: FormFocus,
        width: usize,
        lines: &mut Vec<ViewLine>,
    ) {
        let focused = focus == FormFocus::Location;
        let location = form.fields().location();

        lines.push(ViewLine::single("Location", SpanStyle::Label));

        let mut row = if location.is_empty() {
            boxed(LOCATION_PLACEHOLDER, width, SpanStyle::Placeholder { focused }, focused)
        } else {
            boxed(location, width, SpanStyle::Input { focused }, focused)
        };
        let count = form.locations().len();
        if focused {
            row.push(format!(" ({count} options)"), SpanStyle::Hint);
        }
        lines.push(row);

        if focused && count > 0 {
            let options = form.locations().as_slice().join(" · ");
            lines.push(ViewLine::single(format!("  {options}"), SpanStyle::Hint));
        }

        if let Some(error) = form.visible_errors().location {
            lines.push(ViewLine::single(error.message(), SpanStyle::Error));
        }
    }

    fn compose_buttons(form: &FormModel, focus: FormFocus, width: usize) -> ViewLine {
        let clear = "[ Clear ]";
        let add = "[ Add ]";
        let used = clear.width() + 1 + add.width();
        let indent = (width + 4).saturating_sub(used);

        let mut row = ViewLine::single(" ".repeat(indent), SpanStyle::Plain);
        row.push(
            clear,
            SpanStyle::Button {
                focused: focus == FormFocus::Clear,
                enabled: true,
            },
        );
        row.push(" ", SpanStyle::Plain);
        row.push(
            add,
            SpanStyle::Button {
                focused: focus == FormFocus::Add,
                enabled: form.can_submit(),
            },
        );
        row
    }

    fn compose_table(form: &FormModel, lines: &mut Vec<ViewLine>) {
        let entries = form.entries();
        let name_width = entries
            .iter()
            .map(|e| e.name().width())
            .chain(std::iter::once("Name".width()))
            .max()
            .unwrap_or(0);
        let location_width = entries
            .iter()
            .map(|e| e.location().width())
            .chain(std::iter::once("Location".width()))
            .max()
            .unwrap_or(0);

        lines.push(ViewLine::single(
            format!(
                " {} | {} ",
                pad("Name", name_width),
                pad("Location", location_width)
            ),
            SpanStyle::TableHeader,
        ));
        for entry in entries.iter() {
            lines.push(ViewLine::single(
                format!(
                    " {} | {}",
                    pad(entry.name(), name_width),
                    entry.location()
                ),
                SpanStyle::Plain,
            ));
        }
    }
}

/// A bordered input box `[ value ]`, with a `>` marker when focused
fn boxed(value: &str, width: usize, style: SpanStyle, focused: bool) -> ViewLine {
    let marker = if focused { ">" } else { " " };
    let mut row = ViewLine::single(format!("{marker}["), SpanStyle::Plain);
    row.push(pad(&tail_fit(value, width), width), style);
    row.push("]", SpanStyle::Plain);
    row
}

/// Pad with spaces to `width` display columns
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Keep the end of `text` so it fits in `width` columns (the caret stays visible)
fn tail_fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut used = 0;
    let mut kept: Vec<char> = Vec::new();
    for ch in text.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        kept.push(ch);
    }
    kept.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::models::LocationList;

    fn texts(lines: &[ViewLine]) -> Vec<String> {
        lines.iter().map(ViewLine::text).collect()
    }

    fn contains(lines: &[ViewLine], needle: &str) -> bool {
        texts(lines).iter().any(|line| line.contains(needle))
    }

    fn ready_model() -> FormModel {
        let mut model = FormModel::new();
        model.set_locations(LocationList::new(vec!["NY".into(), "LA".into()]));
        model
    }

    #[test]
    fn pristine_form_should_show_placeholder_and_no_errors() {
        let lines = FormView::compose(&ready_model(), FormFocus::Name, 80);

        assert!(contains(&lines, LOCATION_PLACEHOLDER));
        assert!(!contains(&lines, "Please"));
        assert!(!contains(&lines, CHECKING_TEXT));
        assert!(contains(&lines, " Name | Location "));
    }

    #[test]
    fn checking_and_duplicate_indicators_should_render() {
        let mut model = ready_model();
        model.set_name("Alice");
        model.set_location("NY");
        model.begin_name_check("Alice");
        model.apply_name_verdict("Alice", true);
        assert!(model.submit().is_accepted());

        model.set_name("Alice");
        model.begin_name_check("Alice");
        model.apply_name_verdict("Alice", true);
        model.begin_name_check("Alice");

        let lines = FormView::compose(&model, FormFocus::Name, 80);
        assert!(contains(&lines, CHECKING_TEXT));
        assert!(contains(&lines, DUPLICATE_TEXT));
    }

    #[test]
    fn add_button_should_reflect_can_submit() {
        let model = ready_model();
        let lines = FormView::compose(&model, FormFocus::Add, 80);
        let button_row = lines
            .iter()
            .find(|line| line.text().contains("[ Add ]"))
            .unwrap();
        let add = button_row.spans.last().unwrap();
        assert_eq!(
            add.style,
            SpanStyle::Button {
                focused: true,
                enabled: false
            }
        );
    }

    #[test]
    fn table_should_list_entries_in_order_with_aligned_columns() {
        let mut model = ready_model();
        for (name, location) in [("Alice", "NY"), ("Bo", "LA")] {
            model.set_name(name);
            model.set_location(location);
            model.begin_name_check(name);
            model.apply_name_verdict(name, true);
            assert!(model.submit().is_accepted());
        }

        let lines = texts(&FormView::compose(&model, FormFocus::Name, 80));
        let header = lines.iter().position(|l| l.starts_with(" Name ")).unwrap();
        assert_eq!(lines[header], " Name  | Location ");
        assert_eq!(lines[header + 1], " Alice | NY");
        assert_eq!(lines[header + 2], " Bo    | LA");
    }

    #[test]
    fn location_error_should_show_after_submit_attempt() {
        let mut model = ready_model();
        model.set_name("Alice");
        model.begin_name_check("Alice");
        model.apply_name_verdict("Alice", true);
        assert!(!model.submit().is_accepted());

        let lines = FormView::compose(&model, FormFocus::Add, 80);
        assert!(contains(&lines, "Please select a location"));
    }

    #[test]
    fn long_names_should_keep_their_tail_visible() {
        assert_eq!(tail_fit("abcdefgh", 3), "fgh");
        assert_eq!(tail_fit("abc", 5), "abc");
        assert_eq!(pad("ab", 4), "ab  ");
    }
}
