use crate::filter::Direction;
use crate::record::{self, Field, FieldKind};
use crate::settings::{Settings, WindowGeometry};
use crate::{Session, statics};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::path::{Path, PathBuf};

pub fn run_gui() -> eframe::Result {
    let settings_path = Settings::default_path();
    let app = ParamsEditorApp::new(settings_path);
    let options = native_options(&app.settings);

    eframe::run_native(
        statics::EN_APP_TITLE,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if app.settings.dark_theme {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(app))
        }),
    )
}

/// Window geometry comes from our own settings file; eframe storage only
/// carries egui memory, which is where the table keeps its column widths.
fn native_options(settings: &Settings) -> eframe::NativeOptions {
    let mut viewport =
        egui::ViewportBuilder::default().with_inner_size(statics::DEFAULT_WINDOW_SIZE);
    viewport = match settings.window {
        Some(g) => viewport
            .with_inner_size([g.width, g.height])
            .with_position([g.x, g.y])
            .with_maximized(g.maximized),
        None => viewport.with_maximized(true),
    };
    eframe::NativeOptions {
        viewport,
        persist_window: false,
        ..Default::default()
    }
}

/// The main application state. Record data lives in the `Session`; this struct
/// only holds what the widgets need between frames.
#[derive(Default)]
struct ParamsEditorApp {
    session: Session,
    settings: Settings,
    settings_path: PathBuf,

    filter_input: String,
    scroll_to_current: bool,

    editor: Option<CellEditor>,

    status: String,
    last_error: Option<String>,

    // Last seen geometry; written to settings on close.
    window_geometry: Option<WindowGeometry>,
    shown_title: String,
}

/// An open edit dialog for one cell.
struct CellEditor {
    row: usize,
    field: Field,
    buffer: String,
    request_focus: bool,
}

enum CellAction {
    Toggle(usize, Field),
    Edit(usize, Field),
}

fn window_title(path: Option<&Path>) -> String {
    match path {
        Some(p) => format!("{} - {}", statics::EN_APP_TITLE, p.display()),
        None => statics::EN_APP_TITLE.to_string(),
    }
}

fn editor_title(field: Field) -> String {
    match field.kind() {
        FieldKind::List => format!("{} {}", statics::EN_PREFIX_EDIT, field.key()),
        _ => statics::EN_WINDOW_EDIT_VALUE.to_string(),
    }
}

impl ParamsEditorApp {
    fn new(settings_path: PathBuf) -> Self {
        let mut settings = Settings::load_or_default(&settings_path);
        let had_last_file = settings.last_file_path.is_some();
        let last_file = settings.take_existing_last_file();

        let mut app = Self {
            settings,
            settings_path,
            ..Default::default()
        };

        match last_file {
            Some(path) => app.load_path(&path),
            None if had_last_file => app.persist_settings(),
            None => {}
        }
        app
    }

    fn persist_settings(&mut self) {
        if let Some(geometry) = self.window_geometry {
            self.settings.window = Some(geometry);
        }
        self.settings.last_file_path = self.session.current_path().map(Path::to_path_buf);
        self.settings.store(&self.settings_path);
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let mut dlg = rfd::FileDialog::new()
            .add_filter(statics::EN_FILE_FILTER_JSON, &["json"])
            .add_filter(statics::EN_FILE_FILTER_ALL, &["*"]);

        if let Some(dir) = self.settings.dialog_dir() {
            dlg = dlg.set_directory(dir);
        }

        dlg
    }

    fn open_file(&mut self) {
        let Some(path) = self.file_dialog().pick_file() else {
            return;
        };
        self.load_path(&path);
    }

    fn load_path(&mut self, path: &Path) {
        match self.session.load_path(path) {
            Ok(()) => {
                self.status = format!("Loaded {}", path.display());
                self.last_error = None;
                self.editor = None;
                self.scroll_to_current = true;
                self.persist_settings();
            }
            Err(e) => {
                log::warn!("failed to open {}: {e:#}", path.display());
                self.last_error = Some(format!("Failed to open file: {e:#}"));
            }
        }
    }

    fn save_file(&mut self) {
        if self.session.current_path().is_none() {
            self.save_file_as();
            return;
        }

        match self.session.save() {
            Ok(path) => self.on_saved(&path),
            Err(e) => self.last_error = Some(format!("Failed to save file: {e:#}")),
        }
    }

    fn save_file_as(&mut self) {
        let mut dlg = self.file_dialog();
        if let Some(file_name) = self.session.current_path().and_then(Path::file_name) {
            dlg = dlg.set_file_name(file_name.to_string_lossy());
        }

        let Some(path) = dlg.save_file() else {
            return;
        };

        match self.session.save_as(&path) {
            Ok(()) => self.on_saved(&path),
            Err(e) => self.last_error = Some(format!("Failed to save file: {e:#}")),
        }
    }

    fn on_saved(&mut self, path: &Path) {
        self.status = format!("Saved {}", path.display());
        self.last_error = None;
        self.persist_settings();
    }

    fn apply_filter(&mut self) {
        self.session.set_query(&self.filter_input);
        self.scroll_to_current = true;
    }

    fn step_match(&mut self, direction: Direction) {
        if self.session.advance(direction).is_some() {
            self.scroll_to_current = true;
        }
    }

    /// Commit through the session; a rejected value is reported and not applied.
    fn commit(&mut self, row: usize, field: Field, text: &str) -> bool {
        match self.session.commit_edit(row, field, text) {
            Ok(_) => {
                self.last_error = None;
                true
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    fn handle_cell_action(&mut self, action: CellAction) {
        match action {
            CellAction::Toggle(row, field) => {
                let Some(current) = self.session.records().get(row).map(|r| r.display(field))
                else {
                    return;
                };
                self.commit(row, field, record::toggle_bool_display(&current));
            }
            CellAction::Edit(row, field) => {
                let Some(buffer) = self.session.records().get(row).map(|r| r.display(field))
                else {
                    return;
                };
                self.editor = Some(CellEditor {
                    row,
                    field,
                    buffer,
                    request_focus: true,
                });
            }
        }
    }

    fn track_viewport(&mut self, ctx: &egui::Context) {
        let (outer, inner, maximized, close_requested) = ctx.input(|i| {
            let vp = i.viewport();
            (
                vp.outer_rect,
                vp.inner_rect,
                vp.maximized,
                vp.close_requested(),
            )
        });

        if let (Some(outer), Some(inner)) = (outer, inner) {
            let maximized = maximized.unwrap_or(false);
            // Keep the restored size while maximized so un-maximizing is sane.
            let (width, height) = match (maximized, self.window_geometry) {
                (true, Some(prev)) => (prev.width, prev.height),
                _ => (inner.width(), inner.height()),
            };
            self.window_geometry = Some(WindowGeometry {
                x: outer.min.x,
                y: outer.min.y,
                width,
                height,
                maximized,
            });
        }

        if close_requested {
            self.persist_settings();
        }

        let title = window_title(self.session.current_path());
        if title != self.shown_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.shown_title = title;
        }
    }

    fn render_editor_window(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        let multiline = editor.field.kind() == FieldKind::List;
        let mut open = true;
        let mut ok_clicked = false;
        let mut cancel_clicked = false;

        egui::Window::new(editor_title(editor.field))
            .id(egui::Id::new("cell_editor"))
            .collapsible(false)
            .resizable(multiline)
            .default_width(if multiline { 500.0 } else { 300.0 })
            .open(&mut open)
            .show(ctx, |ui| {
                let resp = if multiline {
                    ui.add(
                        egui::TextEdit::multiline(&mut editor.buffer)
                            .desired_rows(10)
                            .desired_width(f32::INFINITY),
                    )
                } else {
                    ui.label(statics::EN_LABEL_NEW_VALUE);
                    ui.add(egui::TextEdit::singleline(&mut editor.buffer))
                };
                if editor.request_focus {
                    resp.request_focus();
                    editor.request_focus = false;
                }
                let pressed_enter = !multiline
                    && resp.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.horizontal(|ui| {
                    ok_clicked = ui.button(statics::EN_BTN_OK).clicked() || pressed_enter;
                    cancel_clicked = ui.button(statics::EN_BTN_CANCEL).clicked();
                });
            });

        if ok_clicked {
            let (row, field, text) = (editor.row, editor.field, editor.buffer.clone());
            if self.commit(row, field, &text) {
                self.editor = None;
            }
        } else if cancel_clicked || !open {
            self.editor = None;
        }
    }

    fn render_filter_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(statics::EN_LABEL_FIND_ID);
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.filter_input)
                    .char_limit(statics::FIND_ID_MAX_CHARS)
                    .hint_text(statics::EN_HINT_FIND_ID)
                    .desired_width(200.0),
            );
            if resp.changed() {
                self.apply_filter();
            }
            if ui.button(statics::EN_BTN_PREVIOUS).clicked() {
                self.step_match(Direction::Previous);
            }
            if ui.button(statics::EN_BTN_NEXT).clicked() {
                self.step_match(Direction::Next);
            }
            ui.label(self.session.counter_text());
        });
    }

    fn render_table(&mut self, ui: &mut egui::Ui) {
        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
        let view = self.session.view();
        let records = view.records();
        let current = view.current_match();
        let mut action: Option<CellAction> = None;

        let mut table = TableBuilder::new(ui)
            .id_salt(statics::TABLE_ID_SALT)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
        for (i, field) in Field::ALL.iter().enumerate() {
            let column = if i + 1 == Field::ALL.len() {
                Column::remainder().at_least(field.initial_width())
            } else {
                Column::initial(field.initial_width())
            };
            table = table.column(column.resizable(true).clip(true));
        }
        if self.scroll_to_current
            && let Some(idx) = current
        {
            table = table.scroll_to_row(idx, Some(egui::Align::Center));
        }

        table
            .header(row_h, |mut header| {
                for field in Field::ALL {
                    header.col(|ui| {
                        ui.strong(field.key());
                    });
                }
            })
            .body(|body| {
                body.rows(row_h, records.len(), |mut row| {
                    let idx = row.index();
                    let record = &records[idx];
                    row.set_selected(current == Some(idx));

                    for field in Field::ALL {
                        row.col(|ui| {
                            let mut text = egui::RichText::new(record.display(field));
                            if field == Field::Id && view.is_match(idx) {
                                text = text.strong();
                            }
                            let resp = ui.add(
                                egui::Label::new(text)
                                    .sense(egui::Sense::click())
                                    .truncate(),
                            );
                            if resp.double_clicked() {
                                action = match field.kind() {
                                    FieldKind::Id => None,
                                    FieldKind::Bool => Some(CellAction::Toggle(idx, field)),
                                    _ => Some(CellAction::Edit(idx, field)),
                                };
                            }
                        });
                    }
                });
            });

        self.scroll_to_current = false;
        if let Some(action) = action {
            self.handle_cell_action(action);
        }
    }
}

impl eframe::App for ParamsEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.track_viewport(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_OPEN).clicked() {
                    self.open_file();
                }

                let loaded = self.session.is_loaded();
                if ui
                    .add_enabled(loaded, egui::Button::new(statics::EN_BTN_SAVE))
                    .clicked()
                {
                    self.save_file();
                }
                if ui
                    .add_enabled(loaded, egui::Button::new(statics::EN_BTN_SAVE_AS))
                    .clicked()
                {
                    self.save_file_as();
                }

                if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                    self.settings.dark_theme = !self.settings.dark_theme;
                    if self.settings.dark_theme {
                        ctx.set_visuals(egui::Visuals::dark());
                    } else {
                        ctx.set_visuals(egui::Visuals::light());
                    }
                    self.persist_settings();
                }

                if self.session.is_dirty() {
                    ui.separator();
                    ui.colored_label(egui::Color32::YELLOW, statics::EN_BADGE_DIRTY);
                }
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        if !self.session.is_loaded() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading(statics::EN_HOME_HEADING);
                ui.label(statics::EN_HOME_INSTRUCTIONS);
            });
            return;
        }

        egui::TopBottomPanel::top("filter_bar").show(ctx, |ui| {
            self.render_filter_bar(ui);
        });

        self.render_editor_window(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let has_parameters = self
                .session
                .document()
                .is_some_and(|d| d.has_parameters());
            if !has_parameters {
                ui.label(statics::EN_NO_PARAMETERS);
                return;
            }
            egui::ScrollArea::horizontal().show(ui, |ui| {
                self.render_table(ui);
            });
        });
    }
}
