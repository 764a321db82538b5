use crate::{Effect, Loadable, Msg, PickerState, Progress, SaveOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PickerState, msg: Msg) -> (PickerState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadRequested => {
            state.set_available_colors(Loadable::Loading);
            vec![Effect::LoadColors {
                generation: state.next_load_generation(),
            }]
        }
        Msg::ColorsLoaded { generation, result } => {
            // Superseded by a newer request.
            if generation != state.load_generation() {
                return (state, Vec::new());
            }
            state.set_available_colors(Loadable::from(result));
            Vec::new()
        }
        Msg::ColorSelected(item) => {
            // Gated on the sampled flag so a save blocks selection without
            // reacting to every raw tick.
            if state.sampled_progress().is_in_progress() {
                return (state, Vec::new());
            }
            state.set_selected_id(item.id);
            vec![Effect::PersistSelection(item.id)]
        }
        Msg::SaveClicked => {
            state.set_instant_progress(Progress::percentage(0));
            state.set_sampled_progress(Progress::percentage(0));
            vec![Effect::StartSave {
                color_id: state.selected_id(),
            }]
        }
        Msg::CancelClicked => vec![Effect::NavigateBack(None)],
        Msg::InstantProgress(progress) => {
            state.set_instant_progress(progress);
            Vec::new()
        }
        Msg::SampledProgress(progress) => {
            state.set_sampled_progress(progress);
            Vec::new()
        }
        Msg::SaveFinished(outcome) => {
            state.set_instant_progress(Progress::EMPTY);
            state.set_sampled_progress(Progress::EMPTY);
            match outcome {
                SaveOutcome::Saved(item) => vec![Effect::NavigateBack(Some(item))],
                SaveOutcome::Failed { .. } => vec![Effect::ShowGenericError],
                SaveOutcome::Cancelled => Vec::new(),
            }
        }
    };

    (state, effects)
}
