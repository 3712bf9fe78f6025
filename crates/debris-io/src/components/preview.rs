//! Preview of the selected image.

use dioxus::prelude::*;

/// Props for the [`ImagePreview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImagePreviewProps {
    /// `data:` URI of the selected image.
    src: String,
    /// File name, used as alt text.
    file_name: String,
}

/// Shows the selected image, scaled to fit its container.
#[component]
pub fn ImagePreview(props: ImagePreviewProps) -> Element {
    rsx! {
        figure { class: "preview",
            img {
                src: "{props.src}",
                alt: "{props.file_name}",
                class: "preview__image",
            }
            figcaption { class: "preview__caption", "{props.file_name}" }
        }
    }
}
