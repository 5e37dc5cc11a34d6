use dioxus::prelude::*;

use crate::charts::scene::{Rect, Styled};
use crate::charts::Scene;
#[cfg(target_arch = "wasm32")]
use crate::core::platform;
use crate::core::{platform::Platform, OtuRecord, SubjectId};
use crate::t;

use super::model::SubjectView;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working,
    Done(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Bubble,
}

impl ChartKind {
    fn slug(self) -> &'static str {
        match self {
            ChartKind::Bar => "top-otus",
            ChartKind::Bubble => "otu-bubbles",
        }
    }
}

#[component]
pub fn ExportPanel(view: SubjectView) -> Element {
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working => Some(("dashboard-card__meta".to_string(), format!("{}…", t!("export-working")))),
        ExportStatus::Done(message) => Some((
            "dashboard-card__meta dashboard-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "dashboard-card__meta dashboard-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let subject = view.subject_id.clone();
    let bar = view.bar_chart.clone();
    let bubble = view.bubble_chart.clone();
    let records = view.records.clone();

    let svg_handler = |kind: ChartKind, scene: Scene| {
        let subject = subject.clone();
        move |_: MouseEvent| run_export(status, busy, perform_svg_export(subject.clone(), kind, scene.clone()))
    };
    let png_handler = |kind: ChartKind, scene: Scene| {
        let subject = subject.clone();
        move |_: MouseEvent| run_export(status, busy, perform_png_export(subject.clone(), kind, scene.clone()))
    };
    let csv_handler = {
        let subject = subject.clone();
        move |_: MouseEvent| run_export(status, busy, perform_csv_export(subject.clone(), records.clone()))
    };

    rsx! {
        section { class: "dashboard-card export-card",
            div { class: "dashboard-card__header",
                h2 { {t!("export-title")} }
            }
            p { {t!("export-intro")} }

            div { class: "export-card__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy(),
                    onclick: svg_handler(ChartKind::Bar, bar.clone()),
                    {t!("export-bar-svg")}
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy(),
                    onclick: png_handler(ChartKind::Bar, bar.clone()),
                    {t!("export-bar-png")}
                }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy(),
                    onclick: svg_handler(ChartKind::Bubble, bubble.clone()),
                    {t!("export-bubble-svg")}
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy(),
                    onclick: png_handler(ChartKind::Bubble, bubble.clone()),
                    {t!("export-bubble-png")}
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: busy(),
                    onclick: csv_handler,
                    {t!("export-csv")}
                }
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

fn run_export<F>(mut status: Signal<ExportStatus>, mut busy: Signal<bool>, job: F)
where
    F: std::future::Future<Output = Result<String, String>> + 'static,
{
    if busy() {
        return;
    }
    busy.set(true);
    status.set(ExportStatus::Working);

    #[cfg(target_arch = "wasm32")]
    {
        platform::spawn_future(async move {
            finish_export(status, busy, job.await);
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        finish_export(status, busy, futures::executor::block_on(job));
    }
}

fn finish_export(
    mut status: Signal<ExportStatus>,
    mut busy: Signal<bool>,
    outcome: Result<String, String>,
) {
    match outcome {
        Ok(message) => status.set(ExportStatus::Done(message)),
        Err(err) => {
            tracing::warn!(platform = Platform::current().label(), error = %err, "export failed");
            status.set(ExportStatus::Error(err))
        }
    }
    busy.set(false);
}

async fn perform_svg_export(subject: SubjectId, kind: ChartKind, scene: Scene) -> Result<String, String> {
    let markup = scene.to_svg_markup();
    let filename = export_filename(&subject, kind.slug(), "svg");
    let delivery = download_bytes(&filename, "image/svg+xml", markup.into_bytes()).await?;
    Ok(delivery_message(delivery))
}

async fn perform_png_export(subject: SubjectId, kind: ChartKind, scene: Scene) -> Result<String, String> {
    let png = rasterize(&with_background(&scene, "white")).await?;
    let filename = export_filename(&subject, kind.slug(), "png");
    let delivery = download_bytes(&filename, "image/png", png).await?;
    Ok(delivery_message(delivery))
}

async fn perform_csv_export(subject: SubjectId, records: Vec<OtuRecord>) -> Result<String, String> {
    let csv = build_csv(&subject, &records);
    copy_to_clipboard(csv.clone()).await?;
    let filename = export_filename(&subject, "otus", "csv");
    let delivery = download_bytes(&filename, "text/csv", csv.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => t!("export-copied-saved", path = path),
        None => t!("export-copied-downloaded"),
    })
}

fn delivery_message(delivery: Option<String>) -> String {
    match delivery {
        Some(path) => t!("export-saved", path = path),
        None => t!("export-downloaded"),
    }
}

/// One row per OTU in dataset order.
pub fn build_csv(subject: &SubjectId, records: &[OtuRecord]) -> String {
    let mut csv = String::from("subject_id,otu_id,sample_value\n");
    for record in records {
        let row = [
            subject.to_string(),
            record.otu_id.to_string(),
            crate::core::format::format_plain(record.sample_value),
        ]
        .iter()
        .map(|field| escape_csv(field))
        .collect::<Vec<_>>()
        .join(",");
        csv.push_str(&row);
        csv.push('\n');
    }
    csv
}

fn escape_csv(value: &str) -> String {
    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Copy of `scene` with an opaque rectangle under the whole view box.
/// Raster formats have no transparent "page" to fall back on.
pub fn with_background(scene: &Scene, color: &str) -> Scene {
    let vb = scene.view_box;
    let mut filled = scene.clone();
    filled.children.insert(
        0,
        Rect {
            x: vb.min_x,
            y: vb.min_y,
            width: vb.width,
            height: vb.height,
            ..Rect::default()
        }
        .class("background")
        .fill(color)
        .into(),
    );
    filled
}

fn export_filename(subject: &SubjectId, what: &str, ext: &str) -> String {
    format!("otuview-{subject}-{what}-{}.{ext}", timestamp_slug())
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

#[cfg(target_arch = "wasm32")]
async fn copy_to_clipboard(payload: String) -> Result<(), String> {
    let document = web::document()?;
    let textarea: web_sys::HtmlTextAreaElement = web::mount_hidden(&document, "textarea")?;
    textarea.set_value(&payload);
    textarea.select();
    let copied = document.exec_command("copy").unwrap_or(false);
    textarea.remove();
    copied
        .then_some(())
        .ok_or_else(|| "clipboard copy was blocked by the browser".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
async fn copy_to_clipboard(payload: String) -> Result<(), String> {
    arboard::Clipboard::new()
        .and_then(|mut clipboard| clipboard.set_text(payload))
        .map_err(|err| format!("clipboard unavailable: {err}"))
}

/// Hand `bytes` to the browser as a download. Nothing is stored, so there is
/// no path to report.
#[cfg(target_arch = "wasm32")]
async fn download_bytes(filename: &str, mime: &str, bytes: Vec<u8>) -> Result<Option<String>, String> {
    let url = web::object_url(&bytes, mime)?;
    let document = web::document()?;
    let anchor: web_sys::HtmlAnchorElement = web::mount_hidden(&document, "a")?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();
    anchor.remove();
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(None)
}

/// Write `bytes` into the export directory and return the saved path.
#[cfg(not(target_arch = "wasm32"))]
async fn download_bytes(filename: &str, _mime: &str, bytes: Vec<u8>) -> Result<Option<String>, String> {
    let path = write_export(&desktop_export_dir()?, filename, &bytes)?;
    Ok(Some(path.display().to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn write_export(dir: &std::path::Path, filename: &str, bytes: &[u8]) -> Result<std::path::PathBuf, String> {
    std::fs::create_dir_all(dir).map_err(|err| format!("{}: {err}", dir.display()))?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes).map_err(|err| format!("{}: {err}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "export written");
    Ok(path)
}

/// Small DOM helpers shared by the browser export paths.
#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, Document, HtmlElement, Url};

    pub(super) fn document() -> Result<Document, String> {
        web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| "document unavailable".to_string())
    }

    /// Create `<tag>`, make it invisible and attach it to `<body>`. The
    /// caller removes it again.
    pub(super) fn mount_hidden<E: JsCast>(document: &Document, tag: &str) -> Result<E, String> {
        let element: HtmlElement = document
            .create_element(tag)
            .ok()
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| format!("cannot create <{tag}>"))?;
        let style = element.style();
        for (name, value) in [("position", "fixed"), ("opacity", "0"), ("pointer-events", "none")] {
            let _ = style.set_property(name, value);
        }
        document
            .body()
            .ok_or("document has no body")?
            .append_child(&element)
            .map_err(|_| format!("cannot attach <{tag}>"))?;
        element
            .dyn_into::<E>()
            .map_err(|_| format!("<{tag}> has an unexpected type"))
    }

    /// Object URL over `bytes`; revoke it once consumed.
    pub(super) fn object_url(bytes: &[u8], mime: &str) -> Result<String, String> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let mut options = BlobPropertyBag::new();
        options.type_(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|_| format!("cannot build {mime} blob"))?;
        Url::create_object_url_with_blob(&blob).map_err(|_| "cannot create object URL".to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("org", "OtuView", "OtuView")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}

/// Pixel scale applied when rasterizing so exported PNGs stay sharp.
const PNG_SCALE: f32 = 2.0;

async fn rasterize(scene: &Scene) -> Result<Vec<u8>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        rasterize_web(scene).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        rasterize_native(scene)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn rasterize_native(scene: &Scene) -> Result<Vec<u8>, String> {
    let markup = scene.to_svg_markup();
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&markup, &opt).map_err(|err| err.to_string())?;

    let size = tree.size();
    let width = (size.width() * PNG_SCALE).ceil() as u32;
    let height = (size.height() * PNG_SCALE).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| format!("Invalid raster size {width}x{height}"))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(PNG_SCALE, PNG_SCALE),
        &mut pixmap.as_mut(),
    );
    pixmap.encode_png().map_err(|err| err.to_string())
}

#[cfg(target_arch = "wasm32")]
async fn rasterize_web(scene: &Scene) -> Result<Vec<u8>, String> {
    use base64::Engine as _;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url};

    let width = scene.width * f64::from(PNG_SCALE);
    let height = scene.height * f64::from(PNG_SCALE);

    let canvas: HtmlCanvasElement = web::document()?
        .create_element("canvas")
        .ok()
        .and_then(|el| el.dyn_into().ok())
        .ok_or("cannot create <canvas>")?;
    canvas.set_width(width.ceil() as u32);
    canvas.set_height(height.ceil() as u32);
    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into().ok())
        .ok_or("2d canvas context unavailable")?;

    let svg_url = web::object_url(scene.to_svg_markup().as_bytes(), "image/svg+xml")?;
    let image = HtmlImageElement::new().map_err(|_| "cannot create image")?;
    image.set_src(&svg_url);
    let decoded = JsFuture::from(image.decode()).await;
    let _ = Url::revoke_object_url(&svg_url);
    decoded.map_err(|_| "browser could not decode the chart SVG")?;

    context
        .draw_image_with_html_image_element_and_dw_and_dh(&image, 0.0, 0.0, width, height)
        .map_err(|_| "cannot draw chart onto canvas")?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| "cannot read canvas pixels")?;
    let (_, payload) = data_url
        .split_once(',')
        .ok_or("canvas returned a malformed data URL")?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|err| format!("canvas PNG payload: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::bubble_chart;
    use crate::charts::scene::Node;

    fn records() -> Vec<OtuRecord> {
        vec![
            OtuRecord {
                sample_value: 163.0,
                otu_id: 1167,
            },
            OtuRecord {
                sample_value: 2.5,
                otu_id: 482,
            },
        ]
    }

    #[test]
    fn csv_lists_every_record() {
        let csv = build_csv(&SubjectId::from("940"), &records());
        assert_eq!(
            csv,
            "subject_id,otu_id,sample_value\n940,1167,163\n940,482,2.5\n"
        );
    }

    #[test]
    fn csv_fields_are_quoted_when_needed() {
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("plain"), "plain");
    }

    #[test]
    fn background_covers_view_box() {
        let scene = bubble_chart(&records());
        let filled = with_background(&scene, "white");
        assert_eq!(filled.children.len(), scene.children.len() + 1);
        match &filled.children[0] {
            Node::Rect(rect) => {
                assert_eq!(rect.x, -50.0);
                assert_eq!(rect.width, 1200.0);
                assert_eq!(rect.height, 400.0);
                assert_eq!(rect.style.fill.as_deref(), Some("white"));
            }
            other => panic!("expected background rect, got {other:?}"),
        }
    }

    #[test]
    fn filenames_carry_subject_and_extension() {
        let name = export_filename(&SubjectId::from("940"), ChartKind::Bar.slug(), "svg");
        assert!(name.starts_with("otuview-940-top-otus-"));
        assert!(name.ends_with(".svg"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_rasterizer_produces_png() {
        let png = rasterize_native(&with_background(&bubble_chart(&records()), "white")).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn exports_are_written_into_a_fresh_directory() {
        let dir = std::env::temp_dir().join(format!("otuview-export-test-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let csv = build_csv(&SubjectId::from("940"), &records());

        let path = write_export(&dir.join("exports"), "otus.csv", csv.as_bytes()).unwrap();
        assert_eq!(path, dir.join("exports").join("otus.csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), csv);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
