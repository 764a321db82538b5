use picker_core::{ColorPickerViewState, Loadable, PickerViewModel};

const BAR_WIDTH: usize = 20;

pub(crate) fn render(view: &PickerViewModel) -> Vec<String> {
    let mut lines = vec![format!("== {} ==", view.screen_title)];
    match &view.content {
        Loadable::Loading => lines.push("   loading colors...".to_string()),
        Loadable::Failure(failure) => {
            lines.push(format!("   could not load colors: {}", failure.message));
            lines.push("   [Retry]".to_string());
        }
        Loadable::Success(state) => render_state(state, &mut lines),
    }
    lines
}

fn render_state(state: &ColorPickerViewState, lines: &mut Vec<String>) {
    for row in &state.colors_list {
        let (r, g, b) = row.item.rgb();
        let marker = if row.selected { 'x' } else { ' ' };
        lines.push(format!(
            " [{marker}] {:<10} #{r:02X}{g:02X}{b:02X}",
            row.item.name
        ));
    }

    if state.show_save_progress_bar {
        let filled = usize::from(state.save_progress_percentage) * BAR_WIDTH / 100;
        lines.push(format!(
            "   saving [{}{}] {}",
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            state.save_progress_percentage_message
        ));
    }

    let mut buttons = Vec::new();
    if state.show_save_button {
        buttons.push("[Save]");
    }
    if state.show_cancel_button {
        buttons.push("[Cancel]");
    }
    if !buttons.is_empty() {
        lines.push(format!("   {}", buttons.join(" ")));
    }
}
