use debris_flow::{
    ClassifierConfig, ClassifierState, SelectedImage, Selection, derive_stats, extract_location,
};
use debris_io::{ClassifierClient, FileUpload, ImagePreview, PredictionPanel, StatsPanel};
use dioxus::core::Task;
use dioxus::prelude::*;
use tracing::debug;

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the [`ClassifierState`] signal and wires the upload component,
/// the local derivations and the remote submission into it.
fn app() -> Element {
    // --- Configuration ---
    let client = use_hook(|| {
        let config =
            ClassifierConfig::from_env_value(option_env!("DEBRIS_CLASSIFIER_ENDPOINT"));
        ClassifierClient::new(config.endpoint)
    });

    // --- Application state ---
    let mut state = use_signal(ClassifierState::new);
    let mut derivations = use_signal(Vec::<Task>::new);

    // --- File selection handler ---
    // Resets all derived state, then starts the two derivations for the
    // new selection. Derivations still running for the previous file
    // are cancelled; anything that slips through is rejected by its
    // generation.
    let on_select = move |(bytes, name): (Vec<u8>, String)| {
        for task in derivations.write().drain(..) {
            task.cancel();
        }
        let selection = state.write().select(SelectedImage::new(bytes, name));
        let tasks = vec![
            spawn_stats(state, selection.clone()),
            spawn_location(state, selection),
        ];
        derivations.set(tasks);
    };

    // --- Submission handler ---
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let ticket = match state.write().begin_submit() {
            Ok(ticket) => ticket,
            Err(e) => {
                debug!(error = %e, "submission not started");
                return;
            }
        };
        let client = client.clone();
        spawn(async move {
            let result = client.classify(&ticket.image).await;
            state.write().finish_submit(&ticket, result);
        });
    };

    // --- Layout ---
    let current = state.read();
    let submitting = current.is_submitting();
    let file_name = current
        .image()
        .map(|image| image.file_name.clone())
        .unwrap_or_default();

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "app",
            header { class: "app__header",
                h1 { "Space Debris Classifier" }
                p { class: "app__subtitle",
                    "Upload a PNG or JPEG image to check it for space debris"
                }
            }

            main { class: "app__main",
                form { onsubmit: on_submit,
                    FileUpload { on_select: on_select }
                    div { class: "submit-row",
                        button {
                            class: "button",
                            r#type: "submit",
                            disabled: submitting,
                            if submitting { "Predicting..." } else { "Predict" }
                        }
                    }
                }

                if let Some(src) = current.preview() {
                    ImagePreview { src: src.to_owned(), file_name: file_name.clone() }
                }

                // Error display
                if let Some(err) = current.error() {
                    div { class: "error", role: "alert",
                        p { "{err}" }
                    }
                }

                if let Some(prediction) = current.prediction() {
                    PredictionPanel { prediction: prediction.clone() }
                    StatsPanel {
                        stats: current.stats().cloned(),
                        location: current.location().copied(),
                    }
                }
            }
        }
    }
}

/// Decode the selected image for its dimensions and record the stats.
fn spawn_stats(mut state: Signal<ClassifierState>, selection: Selection) -> Task {
    spawn(async move {
        // Yield so the reset state (and the preview) paints before the
        // synchronous decode blocks the thread.
        gloo_timers::future::TimeoutFuture::new(0).await;

        let stats = derive_stats(&selection.image)
            .inspect_err(|e| debug!(error = %e, "image stats unavailable"))
            .ok();
        state.write().apply_stats(selection.generation, stats);
    })
}

/// Parse the selected image's EXIF GPS tags and record the location.
fn spawn_location(mut state: Signal<ClassifierState>, selection: Selection) -> Task {
    spawn(async move {
        gloo_timers::future::TimeoutFuture::new(0).await;

        let location = extract_location(&selection.image.bytes)
            .inspect_err(|e| debug!(error = %e, "location unavailable"))
            .ok()
            .flatten();
        state.write().apply_location(selection.generation, location);
    })
}
