//! Side-by-side comparison viewer.
//!
//! Shows one image and one looping video from the input folder next to
//! each other, with the image's results-log fields overlaid as text.
//! Frames are pulled from ffmpeg one at a time; closing the window is
//! the only interaction.

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use media_squeeze::constants::{
    DEFAULT_INPUT_DIR, DEFAULT_LOG_FILE, VIEWER_FRAME_INTERVAL_MS, VIEWER_PANE_SIZE,
};
use media_squeeze::frames::FrameStream;
use media_squeeze::results::load_log;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(
    name = "media-squeeze-compare",
    about = "Compare an image and a video side by side with their logged compression metrics",
    version,
    after_help = "EXAMPLES:\n  \
    media-squeeze-compare photo.jpg clip.mp4\n  \
    media-squeeze-compare -i photos -l results.txt photo.png clip.mkv"
)]
struct Args {
    /// Image filename to display, relative to the input directory
    image: String,

    /// Video filename to animate, relative to the input directory
    video: String,

    #[arg(
        short = 'i',
        long,
        default_value = DEFAULT_INPUT_DIR,
        help = "Directory holding the media files"
    )]
    input_dir: PathBuf,

    #[arg(
        short = 'l',
        long,
        default_value = DEFAULT_LOG_FILE,
        help = "Results log to overlay"
    )]
    log_file: PathBuf,
}

struct CompareApp {
    image_name: String,
    video_name: String,
    image_texture: egui::TextureHandle,
    video_texture: Option<egui::TextureHandle>,
    frames: FrameStream,
    log_fields: Vec<String>,
    last_advance: Instant,
    frame_interval: Duration,
    decode_failed: bool,
}

impl CompareApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        args: &Args,
        image: egui::ColorImage,
        frames: FrameStream,
        log_fields: Vec<String>,
    ) -> Self {
        let image_texture =
            cc.egui_ctx
                .load_texture("original-image", image, egui::TextureOptions::LINEAR);
        Self {
            image_name: args.image.clone(),
            video_name: args.video.clone(),
            image_texture,
            video_texture: None,
            frames,
            log_fields,
            last_advance: Instant::now(),
            frame_interval: Duration::from_millis(VIEWER_FRAME_INTERVAL_MS),
            decode_failed: false,
        }
    }

    fn advance_video(&mut self, ctx: &egui::Context) {
        match self.frames.next_frame() {
            Ok(Some(frame)) => {
                let size = [self.frames.width() as usize, self.frames.height() as usize];
                let color = egui::ColorImage::from_rgb(size, &frame);
                if let Some(texture) = &mut self.video_texture {
                    texture.set(color, egui::TextureOptions::LINEAR);
                } else {
                    self.video_texture = Some(ctx.load_texture(
                        "video-frame",
                        color,
                        egui::TextureOptions::LINEAR,
                    ));
                }
            }
            // A video with no decodable frames; nothing to animate.
            Ok(None) => self.decode_failed = true,
            Err(e) => {
                media_squeeze::error!("Video decoding stopped: {}", e);
                self.decode_failed = true;
            }
        }
    }

    fn pane_size(&self) -> egui::Vec2 {
        egui::vec2(VIEWER_PANE_SIZE, VIEWER_PANE_SIZE)
    }
}

impl eframe::App for CompareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let due = self.video_texture.is_none() || self.last_advance.elapsed() >= self.frame_interval;
        if !self.decode_failed && due {
            self.advance_video(ctx);
            self.last_advance = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(format!("Image: {}", self.image_name));
                        ui.add(egui::Image::new((self.image_texture.id(), self.pane_size())));
                    });
                    ui.vertical(|ui| {
                        ui.label(format!("Video: {}", self.video_name));
                        match &self.video_texture {
                            Some(texture) => {
                                ui.add(egui::Image::new((texture.id(), self.pane_size())));
                            }
                            None => {
                                ui.label("(no frames decoded)");
                            }
                        }
                    });
                });

                if !self.log_fields.is_empty() {
                    ui.separator();
                    for field in &self.log_fields {
                        ui.label(field);
                    }
                }
            });
        });

        ctx.request_repaint_after(self.frame_interval);
    }
}

fn load_image(path: &Path) -> Result<egui::ColorImage> {
    let img = image::ImageReader::open(path)
        .with_context(|| format!("failed to open image {:?}", path))?
        .decode()
        .with_context(|| format!("failed to decode image {:?}", path))?;
    let rgb = img.to_rgb8();
    let size = [rgb.width() as usize, rgb.height() as usize];
    Ok(egui::ColorImage::from_rgb(size, rgb.as_raw()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_data = load_log(&args.log_file).context("failed to read the results log")?;
    let log_fields = log_data.get(&args.image).cloned().unwrap_or_default();

    let image = load_image(&args.input_dir.join(&args.image))?;
    let video_path = args.input_dir.join(&args.video);
    let frames = FrameStream::open(&video_path)
        .with_context(|| format!("failed to open video {:?}", video_path))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([660.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Visual Comparison",
        options,
        Box::new(move |cc| Box::new(CompareApp::new(cc, &args, image, frames, log_fields))),
    )
    .map_err(|e| anyhow::anyhow!("viewer window failed: {e}"))
}
