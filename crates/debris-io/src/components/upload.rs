//! File upload component with drag-and-drop and file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;

/// Picker hint. Not enforced: whatever the user picks is forwarded and
/// the classification service has the final say.
const ACCEPT: &str = "image/png, image/jpeg";

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Called with the raw file bytes and filename once a file is read.
    on_select: EventHandler<(Vec<u8>, String)>,
}

/// A drag-and-drop zone with a file picker button.
///
/// When a file is chosen (via the picker or drag-and-drop), reads its
/// bytes and fires `on_select` with `(bytes, filename)`. An empty
/// selection does nothing. Stays usable while an upload is running.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut filename = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<String>::None);

    // Read and forward the first file from a list.
    //
    // Shared by the file-picker (`handle_files`) and drag-and-drop
    // (`handle_drop`) paths.
    let process_files = move |files: Vec<FileData>| async move {
        let Some(file) = files.first() else {
            return;
        };
        let name = file.name();
        match file.read_bytes().await {
            Ok(bytes) => {
                filename.set(Some(name.clone()));
                error.set(None);
                props.on_select.call((bytes.to_vec(), name));
            }
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "failed to read selected file");
                error.set(Some(format!("Failed to read file: {e}")));
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let zone_class = if dragging() {
        "upload-zone upload-zone--active"
    } else {
        "upload-zone"
    };

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            if let Some(ref name) = filename() {
                p { class: "upload-zone__loaded", "Selected: {name}" }
            }

            if let Some(ref err) = error() {
                p { class: "upload-zone__error", "{err}" }
            }

            p { class: "upload-zone__hint", "Drop an image here or " }

            label { class: "button button--secondary",
                input {
                    r#type: "file",
                    accept: ACCEPT,
                    class: "hidden",
                    onchange: handle_files,
                }
                "Choose File"
            }

            p { class: "upload-zone__formats", "PNG or JPEG, up to 10 MB" }
        }
    }
}
