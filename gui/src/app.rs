use eframe::egui;
use glyphtone::{
    AsciiConfig, AsciiConversion, ConversionRequest, FontSpec, FontdueRasterizer,
    GlyphRasterizer, JobEvent, Recomputer,
};
use image::RgbImage;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Main application state for the glyphtone GUI
pub struct GlyphtoneApp {
    /// Source photograph, shared with in-flight requests
    source: Option<Arc<RgbImage>>,
    /// Loaded font face
    face: Option<Arc<dyn GlyphRasterizer>>,
    /// Characters, font size and font path
    config: AsciiConfig,

    /// Background conversions; only the newest result is shown
    jobs: Recomputer,
    /// Latest delivered conversion
    output: Option<AsciiConversion>,
    /// Texture handle for output image display
    output_texture: Option<egui::TextureHandle>,

    /// Last processing time in milliseconds
    last_process_time_ms: f64,
    /// Error message to display (if any)
    error_message: Option<String>,
}

impl GlyphtoneApp {
    /// Create a new application, loading the configured or a system font
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AsciiConfig) -> Self {
        let mut app = Self {
            source: None,
            face: None,
            config,
            jobs: Recomputer::new(),
            output: None,
            output_texture: None,
            last_process_time_ms: 0.0,
            error_message: None,
        };

        match app.config.resolve_font_path() {
            Some(path) => app.load_font(&path),
            None => {
                app.error_message = Some(
                    "No monospace font found. Use File > Open Font... or set GLYPHTONE_FONT"
                        .to_string(),
                );
            }
        }
        app
    }

    /// Load an image from file path
    pub fn load_image(&mut self, path: &Path) {
        match image::open(path) {
            Ok(img) => {
                log::info!("Loaded image {}", path.display());
                self.source = Some(Arc::new(img.to_rgb8()));
                self.error_message = None;
                self.recompute();
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to load image: {}", e));
            }
        }
    }

    /// Load a font face from file path
    pub fn load_font(&mut self, path: &Path) {
        match FontdueRasterizer::from_path(path) {
            Ok(face) => {
                log::info!("Loaded font '{}' from {}", face.family(), path.display());
                self.face = Some(Arc::new(face));
                self.config.font_path = Some(path.to_path_buf());
                self.recompute();
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to load font {}: {}", path.display(), e));
            }
        }
    }

    /// Save the output image to file
    pub fn save_output(&self, path: &Path) -> Result<(), String> {
        match &self.output {
            Some(conversion) => conversion
                .image
                .save(path)
                .map_err(|e| format!("Failed to save: {}", e)),
            None => Err("No output image to save".to_string()),
        }
    }

    /// Submit a fresh request built from the current inputs
    fn recompute(&mut self) {
        let (Some(source), Some(face)) = (&self.source, &self.face) else {
            return;
        };
        if let Err(e) = self.config.validate() {
            self.error_message = Some(e.to_string());
            return;
        }

        let request = FontSpec::new(Arc::clone(face), self.config.font_size).map(|font| {
            ConversionRequest::new(self.config.characters.as_str(), font, Arc::clone(source))
        });
        if let Err(e) = request.and_then(|request| self.jobs.submit(request)) {
            self.error_message = Some(format!("Failed to start conversion: {}", e));
        }
    }

    /// Pick up the newest finished conversion, if any
    fn poll_jobs(&mut self) {
        match self.jobs.poll() {
            Some(JobEvent::Finished {
                conversion,
                elapsed,
                ..
            }) => {
                self.last_process_time_ms = elapsed.as_secs_f64() * 1000.0;
                self.output = Some(conversion);
                self.output_texture = None; // Clear old texture
                self.error_message = None;
            }
            Some(JobEvent::Failed { error, .. }) => {
                self.error_message = Some(format!("Conversion failed: {}", error));
            }
            None => {}
        }
    }

    /// Render the control bar; returns true when an input changed
    fn render_controls(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        ui.horizontal(|ui| {
            changed |= ui
                .add(
                    egui::Slider::new(&mut self.config.font_size, AsciiConfig::FONT_SIZE_RANGE_GUI)
                        .text("Font size"),
                )
                .on_hover_text("Point size of the output font; also sets the cell size")
                .changed();

            ui.separator();

            ui.label("Allowed characters:");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut self.config.characters)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY),
                )
                .on_hover_text("Order breaks ties: the earlier of two close matches wins")
                .changed();
        });

        ui.horizontal(|ui| {
            if self.jobs.is_busy() {
                ui.spinner();
                ui.label("Converting...");
            } else if self.last_process_time_ms > 0.0 {
                ui.label(format!("Last process: {:.1} ms", self.last_process_time_ms));
            }

            if let Some(face) = &self.face {
                ui.separator();
                ui.label(format!("Font: {}", face.family()));
            }

            if let Some(conversion) = &self.output
                && !conversion.warnings.is_empty()
            {
                ui.separator();
                ui.colored_label(
                    egui::Color32::YELLOW,
                    format!("Warnings: {:?}", conversion.warnings),
                );
            }
        });

        changed
    }

    /// Display the latest output at 1:1 scale
    fn display_output(
        ui: &mut egui::Ui,
        output: Option<&AsciiConversion>,
        texture: &mut Option<egui::TextureHandle>,
    ) {
        let Some(conversion) = output else {
            ui.label("Open an image to start");
            return;
        };

        // Update texture if needed
        if texture.is_none() {
            let (width, height) = conversion.image.dimensions();
            let color_image = egui::ColorImage::from_gray(
                [width as usize, height as usize],
                conversion.image.as_raw(),
            );
            *texture = Some(ui.ctx().load_texture(
                "ascii-output",
                color_image,
                egui::TextureOptions::NEAREST,
            ));
        }

        if let Some(tex) = texture {
            ui.label(format!(
                "{}x{} px, {}x{} cells of {}x{}",
                conversion.image.width(),
                conversion.image.height(),
                conversion.columns,
                conversion.rows,
                conversion.geometry.width,
                conversion.geometry.height
            ));
            egui::ScrollArea::both().show(ui, |ui| {
                ui.image((tex.id(), tex.size_vec2()));
            });
        }
    }
}

impl eframe::App for GlyphtoneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_jobs();
        if self.jobs.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(30));
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "bmp"])
                            .pick_file()
                        {
                            self.load_image(&path);
                        }
                        ui.close();
                    }

                    if ui.button("Open Font...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Fonts", &["ttf", "otf", "ttc"])
                            .pick_file()
                        {
                            self.load_font(&path);
                        }
                        ui.close();
                    }

                    if ui.button("Save Output...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("PNG", &["png"])
                            .save_file()
                            && let Err(e) = self.save_output(&path)
                        {
                            self.error_message = Some(e);
                        }
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Controls under the menu
        egui::TopBottomPanel::top("control_panel").show(ctx, |ui| {
            if self.render_controls(ui) {
                self.recompute();
            }
        });

        // Central panel: Image display
        egui::CentralPanel::default().show(ctx, |ui| {
            // Show error message if any
            if let Some(ref msg) = self.error_message {
                ui.colored_label(egui::Color32::RED, msg);
                if ui.button("Clear Error").clicked() {
                    self.error_message = None;
                }
                ui.separator();
            }

            Self::display_output(ui, self.output.as_ref(), &mut self.output_texture);
        });
    }
}
