//! Reading files picked in an `<input type="file">`.

use booking_types::UploadedFile;

/// Reads every selected file into memory. Files that fail to read are
/// skipped with a console warning.
#[cfg(feature = "hydrate")]
pub async fn read_selected_files(files: &web_sys::FileList) -> Vec<UploadedFile> {
    use wasm_bindgen_futures::JsFuture;

    let mut out = Vec::new();
    for index in 0..files.length() {
        let Some(file) = files.get(index) else {
            continue;
        };
        match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => {
                let content_type = file.type_();
                out.push(UploadedFile {
                    file_name: file.name(),
                    content_type: (!content_type.is_empty()).then_some(content_type),
                    bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
                });
            }
            Err(e) => leptos::logging::warn!("failed to read {}: {:?}", file.name(), e),
        }
    }
    out
}

/// Human readable size for the attachment list.
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Triggers a browser download of `contents`.
#[cfg(feature = "hydrate")]
pub fn download_text(file_name: &str, mime: &str, contents: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_use_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2 KB");
        assert_eq!(format_size(3 * 1024 * 1024 / 2), "1.5 MB");
    }
}
